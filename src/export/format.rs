//! `;`-delimited rendering of crawl reports
//!
//! Each report expands to one row per index up to its longest identifier
//! container. The report URL is repeated on every row and missing cells are
//! left empty.

use crate::report::{CrawlReport, SocialPlatform};
use crate::ExportError;

/// Column names of an export file, in order
pub const HEADER: [&str; 7] = [
    "url",
    "emails",
    "phones",
    "linkedin",
    "facebook",
    "twitter",
    "instagram",
];

/// Renders `reports` as delimited rows
///
/// The header row is emitted first when `include_header` is set. Reports are
/// written in order and never deduplicated against each other.
///
/// # Example
///
/// ```
/// use contact_harvester::export::format_rows;
/// use contact_harvester::CrawlReport;
///
/// let mut report = CrawlReport::new("url");
/// report.emails = vec!["a@x.com".into(), "b@y.com".into()];
/// report.phones = vec!["+1".into()];
///
/// let text = String::from_utf8(format_rows(&[report], false).unwrap()).unwrap();
/// assert_eq!(text, "url;a@x.com;+1;;;;\nurl;b@y.com;;;;;\n");
/// ```
pub fn format_rows(reports: &[CrawlReport], include_header: bool) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    if include_header {
        writer.write_record(HEADER)?;
    }

    for report in reports {
        for index in 0..report.row_count() {
            writer.write_record(report_row(report, index))?;
        }
    }

    writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))
}

fn report_row(report: &CrawlReport, index: usize) -> [&str; 7] {
    [
        report.source_url.as_str(),
        cell(&report.emails, index),
        cell(&report.phones, index),
        cell(report.social(SocialPlatform::LinkedIn), index),
        cell(report.social(SocialPlatform::Facebook), index),
        cell(report.social(SocialPlatform::Twitter), index),
        cell(report.social(SocialPlatform::Instagram), index),
    ]
}

fn cell(values: &[String], index: usize) -> &str {
    values.get(index).map(String::as_str).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(reports: &[CrawlReport], header: bool) -> String {
        String::from_utf8(format_rows(reports, header).unwrap()).unwrap()
    }

    fn sample() -> CrawlReport {
        let mut report = CrawlReport::new("url");
        report.emails = vec!["a@x.com".to_string(), "b@y.com".to_string()];
        report.phones = vec!["+1".to_string()];
        report
    }

    #[test]
    fn test_rows_padded_with_empty_cells() {
        let text = render(&[sample()], false);
        let rows: Vec<&str> = text.lines().collect();

        assert_eq!(rows, vec!["url;a@x.com;+1;;;;", "url;b@y.com;;;;;"]);
    }

    #[test]
    fn test_header_row() {
        let text = render(&[sample()], true);
        assert_eq!(
            text.lines().next(),
            Some("url;emails;phones;linkedin;facebook;twitter;instagram")
        );
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_social_columns_in_order() {
        let mut report = CrawlReport::new("https://example.com");
        report.linkedin = vec!["l".to_string()];
        report.facebook = vec!["f".to_string()];
        report.twitter = vec!["t".to_string()];
        report.instagram = vec!["i".to_string(), "i2".to_string()];

        let text = render(&[report], false);
        let rows: Vec<&str> = text.lines().collect();
        assert_eq!(
            rows,
            vec![
                "https://example.com;;;l;f;t;i",
                "https://example.com;;;;;;i2"
            ]
        );
    }

    #[test]
    fn test_multiple_reports_not_merged() {
        let text = render(&[sample(), sample()], false);
        assert_eq!(text.lines().count(), 4);
    }

    #[test]
    fn test_empty_report_has_no_rows() {
        let text = render(&[CrawlReport::new("https://example.com")], false);
        assert!(text.is_empty());
    }

    #[test]
    fn test_delimiter_inside_value_is_quoted() {
        let mut report = CrawlReport::new("u");
        report.emails = vec!["a;b@x.com".to_string()];

        let text = render(&[report], false);
        assert_eq!(text, "u;\"a;b@x.com\";;;;;\n");
    }
}
