//! Crawl report and result aggregation
//!
//! A [`CrawlReport`] collects every identifier found during one crawl. Pages
//! append to it as they are processed; [`CrawlReport::dedup`] finalizes it
//! before it is handed back to the caller.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::crawler::Extraction;

/// Social platforms recognized by the extractor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SocialPlatform {
    LinkedIn,
    Facebook,
    Twitter,
    Instagram,
}

impl SocialPlatform {
    /// All platforms, in export column order
    pub const ALL: [SocialPlatform; 4] = [
        SocialPlatform::LinkedIn,
        SocialPlatform::Facebook,
        SocialPlatform::Twitter,
        SocialPlatform::Instagram,
    ];

    /// Host/path marker identifying links to this platform
    pub fn marker(&self) -> &'static str {
        match self {
            Self::LinkedIn => "linkedin.com",
            Self::Facebook => "facebook.com",
            Self::Twitter => "twitter.com",
            Self::Instagram => "instagram.com",
        }
    }
}

/// Aggregated contact identifiers for one crawl
///
/// `source_url` is always the seed URL of the crawl, whichever page an
/// identifier was found on. Serialized with the field names used on the
/// wire (`url`, `emails`, `phones`, `linkedin`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlReport {
    #[serde(rename = "url", default)]
    pub source_url: String,
    #[serde(default)]
    pub emails: Vec<String>,
    #[serde(default)]
    pub phones: Vec<String>,
    #[serde(default)]
    pub linkedin: Vec<String>,
    #[serde(default)]
    pub facebook: Vec<String>,
    #[serde(default)]
    pub twitter: Vec<String>,
    #[serde(default)]
    pub instagram: Vec<String>,
}

impl CrawlReport {
    /// Creates an empty report for a crawl seeded at `source_url`
    pub fn new(source_url: impl Into<String>) -> Self {
        Self {
            source_url: source_url.into(),
            ..Self::default()
        }
    }

    /// Returns the container holding links for `platform`
    pub fn social(&self, platform: SocialPlatform) -> &[String] {
        match platform {
            SocialPlatform::LinkedIn => &self.linkedin,
            SocialPlatform::Facebook => &self.facebook,
            SocialPlatform::Twitter => &self.twitter,
            SocialPlatform::Instagram => &self.instagram,
        }
    }

    fn social_mut(&mut self, platform: SocialPlatform) -> &mut Vec<String> {
        match platform {
            SocialPlatform::LinkedIn => &mut self.linkedin,
            SocialPlatform::Facebook => &mut self.facebook,
            SocialPlatform::Twitter => &mut self.twitter,
            SocialPlatform::Instagram => &mut self.instagram,
        }
    }

    /// Appends one page's identifiers (no deduplication)
    pub fn absorb(&mut self, extraction: Extraction) {
        self.emails.extend(extraction.emails);
        self.phones.extend(extraction.phones);
        for (platform, links) in extraction.social {
            self.social_mut(platform).extend(links);
        }
    }

    /// Removes duplicate values from every container
    ///
    /// Equality is exact string equality. The first occurrence of each value
    /// is kept, so the operation is idempotent.
    pub fn dedup(mut self) -> Self {
        dedup_in_place(&mut self.emails);
        dedup_in_place(&mut self.phones);
        for platform in SocialPlatform::ALL {
            dedup_in_place(self.social_mut(platform));
        }
        self
    }

    /// Length of the longest identifier container
    pub fn row_count(&self) -> usize {
        [
            self.emails.len(),
            self.phones.len(),
            self.linkedin.len(),
            self.facebook.len(),
            self.twitter.len(),
            self.instagram.len(),
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }

    /// True when no identifier of any kind was collected
    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }
}

fn dedup_in_place(values: &mut Vec<String>) {
    let mut seen = HashSet::with_capacity(values.len());
    values.retain(|v| seen.insert(v.clone()));
}

/// One report or a list of reports, as accepted by the export endpoints
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ReportBatch {
    One(CrawlReport),
    Many(Vec<CrawlReport>),
}

impl ReportBatch {
    /// Flattens the batch into the reports it carries, in order
    pub fn into_reports(self) -> Vec<CrawlReport> {
        match self {
            Self::One(report) => vec![report],
            Self::Many(reports) => reports,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let mut report = CrawlReport::new("https://example.com");
        report.emails = strings(&["b@x.com", "a@x.com", "b@x.com"]);
        report.twitter = strings(&["https://twitter.com/x", "https://twitter.com/x/"]);

        let report = report.dedup();
        assert_eq!(report.emails, strings(&["b@x.com", "a@x.com"]));
        // raw hrefs are compared verbatim
        assert_eq!(report.twitter.len(), 2);
    }

    #[test]
    fn test_dedup_is_idempotent() {
        let mut report = CrawlReport::new("https://example.com");
        report.phones = strings(&["+1", "+2", "+1", "+1"]);
        report.facebook = strings(&["f", "f"]);

        let once = report.dedup();
        let twice = once.clone().dedup();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_absorb_appends_without_dedup() {
        let mut report = CrawlReport::new("https://example.com");
        let mut social = HashMap::new();
        social.insert(SocialPlatform::Instagram, strings(&["https://instagram.com/a"]));

        let page = Extraction {
            emails: strings(&["a@x.com"]),
            phones: vec![],
            social,
            links: vec![],
        };
        report.absorb(page.clone());
        report.absorb(page);

        assert_eq!(report.emails.len(), 2);
        assert_eq!(report.instagram.len(), 2);
        assert_eq!(report.source_url, "https://example.com");
    }

    #[test]
    fn test_row_count_uses_longest_container() {
        let mut report = CrawlReport::new("u");
        assert!(report.is_empty());

        report.emails = strings(&["a", "b"]);
        report.linkedin = strings(&["1", "2", "3"]);
        assert_eq!(report.row_count(), 3);
    }

    #[test]
    fn test_serialized_field_names() {
        let report = CrawlReport::new("https://example.com");
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["url"], "https://example.com");
        for key in ["emails", "phones", "linkedin", "facebook", "twitter", "instagram"] {
            assert!(json[key].is_array(), "missing {}", key);
        }
    }

    #[test]
    fn test_batch_accepts_single_or_list() {
        let one: ReportBatch =
            serde_json::from_str(r#"{"url":"u","emails":["a@x.com"]}"#).unwrap();
        assert_eq!(one.into_reports().len(), 1);

        let many: ReportBatch = serde_json::from_str(r#"[{"url":"a"},{"url":"b"}]"#).unwrap();
        let reports = many.into_reports();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[1].source_url, "b");
    }
}
