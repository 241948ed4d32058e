//! Per-domain discovery orchestration
//!
//! One engine instance drives the whole discovery phase: relevance
//! check first, then sitemaps, then hub crawling when the sitemap
//! harvest is too thin to trust.

use std::collections::HashSet;

use tracing::info;

use crate::config::Config;
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::hub::HubCrawler;
use crate::crawler::relevance::DomainFilter;
use crate::crawler::sitemap;
use crate::crawler::url;
use crate::utils::error::FetchError;
use crate::utils::extract_host;

/// Sitemap harvests below this size trigger the hub fallback.
const SITEMAP_SUFFICIENT: usize = 5;

/// Listing sections probed when a domain's sitemaps come up short.
const HUB_PATHS: &[&str] = &[
    "/blog",
    "/articles",
    "/news",
    "/mag",
    "/magazine",
    "/category/blog",
    "/archive",
    "/latest",
    "/posts",
];

/// Orchestrates relevance filtering, sitemaps, and hub crawling
pub struct DiscoveryEngine {
    fetcher: PageFetcher,
    filter: DomainFilter,
    hub: HubCrawler,
}

impl DiscoveryEngine {
    /// Build an engine with its own HTTP client
    ///
    /// # Errors
    ///
    /// Returns `FetchError` when the client cannot be constructed.
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        Ok(Self {
            fetcher: PageFetcher::new(config)?,
            filter: DomainFilter::new(config),
            hub: HubCrawler::new(config),
        })
    }

    /// Check a domain against the blacklist and topic keywords
    pub async fn is_relevant(&self, domain_url: &str) -> bool {
        self.filter.is_relevant(&self.fetcher, domain_url).await
    }

    /// Collect candidate article links for one domain
    ///
    /// An empty set is a normal outcome, not an error: it means the
    /// domain exposed nothing discoverable.
    pub async fn discover(&self, domain_url: &str) -> HashSet<String> {
        let Ok(domain) = extract_host(domain_url) else {
            return HashSet::new();
        };

        let mut links: HashSet<String> = sitemap::collect_links(&self.fetcher, domain_url)
            .await
            .into_iter()
            .collect();

        // A handful of sitemap links usually means a stub sitemap, so
        // hub results are unioned in rather than trusted exclusively.
        if links.len() < SITEMAP_SUFFICIENT {
            if links.is_empty() {
                info!(domain = %domain, "No usable sitemap, walking hub pages");
            }
            for hub_url in hub_candidates(domain_url) {
                links.extend(self.hub.crawl(&self.fetcher, &hub_url, &domain).await);
            }
        }

        links
    }
}

/// Join the fixed listing-section paths onto the domain root
fn hub_candidates(domain_url: &str) -> Vec<String> {
    HUB_PATHS
        .iter()
        .filter_map(|path| url::to_absolute(domain_url, path))
        .collect()
}
