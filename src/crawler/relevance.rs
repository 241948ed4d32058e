//! Topic relevance probe for discovered domains
//!
//! Source files yield links to everything from AI blogs to shortener
//! spam. Before a domain earns a full crawl, its landing page gets one
//! cheap check: blacklist the known offenders, then look for topic
//! keywords in the title and meta description. In lenient mode every
//! non-blacklisted domain passes.

use scraper::Html;
use tracing::debug;

use crate::config::Config;
use crate::crawler::fetcher::PageFetcher;
use crate::parser::selectors::RelevanceSelectors;
use crate::utils::extract_host;

/// Decides whether a domain is worth crawling
pub struct DomainFilter {
    keywords: Vec<String>,
    blacklist: Vec<String>,
    strict_mode: bool,
    selectors: RelevanceSelectors,
}

impl DomainFilter {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            keywords: config
                .relevance
                .keywords
                .iter()
                .map(|k| k.to_lowercase())
                .collect(),
            blacklist: config.relevance.blacklist.clone(),
            strict_mode: config.relevance.strict_mode,
            selectors: RelevanceSelectors::new(),
        }
    }

    /// Check whether a domain should enter the discovery pipeline
    ///
    /// Never fails: unparsable URLs, unreachable hosts, and non-success
    /// responses all count as not relevant.
    pub async fn is_relevant(&self, fetcher: &PageFetcher, url: &str) -> bool {
        let host = match extract_host(url) {
            Ok(host) => host,
            Err(_) => return false,
        };

        if self.blacklist.iter().any(|entry| host.contains(entry)) {
            debug!(url = %url, "Skipping blacklisted domain");
            return false;
        }

        if !self.strict_mode {
            return true;
        }

        let page = match fetcher.fetch(url).await {
            Ok(page) => page,
            Err(e) => {
                debug!(url = %url, error = %e, "Relevance probe fetch failed");
                return false;
            }
        };

        if page.status != 200 {
            debug!(url = %url, status = page.status, "Relevance probe got non-200");
            return false;
        }

        let relevant = self.matches_keywords(&probe_text(&page.body, &self.selectors));
        if !relevant {
            debug!(url = %url, "No topic keywords in title or description");
        }
        relevant
    }

    fn matches_keywords(&self, haystack: &str) -> bool {
        self.keywords.iter().any(|kw| haystack.contains(kw))
    }
}

/// Lowercased title plus meta description, the only text the probe reads
fn probe_text(html: &str, selectors: &RelevanceSelectors) -> String {
    let document = Html::parse_document(html);

    let title = document
        .select(selectors.title)
        .next()
        .map(|el| el.text().collect::<String>())
        .unwrap_or_default();

    let description = document
        .select(selectors.meta_description)
        .next()
        .and_then(|el| el.value().attr("content"))
        .unwrap_or_default();

    format!("{} {}", title, description).to_lowercase()
}
