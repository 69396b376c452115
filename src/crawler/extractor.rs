//! HTML extractor for contact identifiers and outbound links
//!
//! Every `<a href>` on a page is inspected:
//! - `mailto:` targets become e-mail addresses (scheme stripped)
//! - `tel:` targets become phone numbers (scheme stripped)
//! - targets whose host or path mention a platform marker (`linkedin.com`,
//!   `facebook.com`, ...) are kept as social links, raw; this includes
//!   `mailto:` addresses on a platform domain
//! - every href, whatever its scheme, is returned as an outbound link for the
//!   crawl engine to resolve

use crate::report::SocialPlatform;
use crate::url::{extract_domain, resolve_href};
use scraper::{Html, Selector};
use std::collections::HashMap;
use url::Url;

const MAILTO: &str = "mailto:";
const TEL: &str = "tel:";

/// Identifiers and links extracted from one page
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Addresses from `mailto:` anchors
    pub emails: Vec<String>,

    /// Numbers from `tel:` anchors
    pub phones: Vec<String>,

    /// Raw hrefs per social platform
    pub social: HashMap<SocialPlatform, Vec<String>>,

    /// Raw href of every anchor, unresolved
    pub links: Vec<String>,
}

impl Extraction {
    /// Links found for `platform` (empty when none)
    pub fn social_links(&self, platform: SocialPlatform) -> &[String] {
        self.social.get(&platform).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Parses HTML content and extracts contact identifiers and outbound links
///
/// Malformed markup is handled by the HTML5 parser's error recovery; a page
/// without anchors yields an empty [`Extraction`].
///
/// # Example
///
/// ```
/// use contact_harvester::crawler::extract;
/// use url::Url;
///
/// let html = r#"<a href="mailto:info@example.com">Mail</a><a href="/about">About</a>"#;
/// let page = Url::parse("https://example.com/").unwrap();
/// let found = extract(html, &page);
/// assert_eq!(found.emails, vec!["info@example.com".to_string()]);
/// assert_eq!(found.links.len(), 2);
/// ```
pub fn extract(html: &str, page_url: &Url) -> Extraction {
    let document = Html::parse_document(html);
    let mut extraction = Extraction::default();

    let Ok(anchor_selector) = Selector::parse("a[href]") else {
        return extraction;
    };

    for element in document.select(&anchor_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        if let Some(address) = href.strip_prefix(MAILTO) {
            if !address.is_empty() {
                extraction.emails.push(address.to_string());
            }
        } else if let Some(number) = href.strip_prefix(TEL) {
            if !number.is_empty() {
                extraction.phones.push(number.to_string());
            }
        }

        for platform in SocialPlatform::ALL {
            if links_to_platform(href, page_url, platform) {
                extraction
                    .social
                    .entry(platform)
                    .or_default()
                    .push(href.to_string());
            }
        }

        extraction.links.push(href.to_string());
    }

    extraction
}

/// Checks whether `href` points at `platform`
///
/// The href is resolved against the page first and the marker is looked up
/// in the host and path of the result. Hrefs that do not resolve fall back to
/// a plain substring check.
fn links_to_platform(href: &str, page_url: &Url, platform: SocialPlatform) -> bool {
    let marker = platform.marker();

    match resolve_href(page_url, href) {
        Some(target) => {
            let host = extract_domain(&target).unwrap_or_default();
            host.contains(marker) || target.path().to_lowercase().contains(marker)
        }
        None => href.to_lowercase().contains(marker),
    }
}
