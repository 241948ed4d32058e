//! Paginated hub-page crawling
//!
//! When a domain has no usable sitemap, its listing pages still link
//! to every article. Starting from a hub URL the crawler harvests
//! article-shaped links page by page, following "next" pagination until
//! the trail ends, a page adds nothing new, or the page cap is reached.

use std::collections::HashSet;
use std::time::Duration;

use scraper::Html;
use tracing::debug;

use crate::config::Config;
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::url;
use crate::parser::selectors::HubSelectors;

/// Walks listing pages and accumulates article links
pub struct HubCrawler {
    selectors: HubSelectors,
    max_pages: u32,
    page_delay: Duration,
}

impl HubCrawler {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            selectors: HubSelectors::new(),
            max_pages: config.discovery.max_hub_pages,
            page_delay: config.hub_page_delay(),
        }
    }

    /// Crawl a hub and its pagination trail, returning article links
    ///
    /// Fetch failures end the walk with whatever was collected so far.
    pub async fn crawl(&self, fetcher: &PageFetcher, start_url: &str, domain: &str) -> Vec<String> {
        let mut collected = HashSet::new();
        let mut ordered = Vec::new();
        let mut current = start_url.to_string();

        for page in 1..=self.max_pages {
            let fetched = match fetcher.fetch(&current).await {
                Ok(fetched) => fetched,
                Err(e) => {
                    debug!(url = %current, error = %e, "Hub page fetch failed");
                    break;
                }
            };

            if fetched.status != 200 {
                debug!(url = %current, status = fetched.status, "Hub page returned non-200");
                break;
            }

            let (found, next) =
                self.scan_page(&fetched.body, &current, domain, &mut collected, &mut ordered);
            debug!(page = page, url = %current, found = found, "Hub page scanned");

            // A page with nothing new means the listing has looped or
            // run dry.
            if found == 0 {
                break;
            }

            let Some(next) = next else { break };
            if next == current {
                break;
            }
            current = next;

            tokio::time::sleep(self.page_delay).await;
        }

        ordered
    }

    /// Harvest new article links from one page and locate its successor
    fn scan_page(
        &self,
        html: &str,
        page_url: &str,
        domain: &str,
        collected: &mut HashSet<String>,
        ordered: &mut Vec<String>,
    ) -> (usize, Option<String>) {
        let document = Html::parse_document(html);

        let mut found = 0;
        for anchor in document.select(self.selectors.links) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            let Some(absolute) = url::to_absolute(page_url, href) else {
                continue;
            };
            if !url::is_likely_article(&absolute, domain) {
                continue;
            }
            if collected.insert(absolute.clone()) {
                ordered.push(absolute);
                found += 1;
            }
        }

        (found, self.find_next(&document, page_url))
    }

    /// Resolve the next pagination link, if any
    ///
    /// Strategies in order: `rel="next"`, then pagination class names,
    /// then anchor text in Persian or English. Only the first matching
    /// candidate is considered; if it carries no href the trail ends.
    fn find_next(&self, document: &Html, page_url: &str) -> Option<String> {
        let candidate = document
            .select(self.selectors.rel_next)
            .next()
            .or_else(|| {
                document.select(self.selectors.classed_anchors).find(|a| {
                    a.value()
                        .attr("class")
                        .is_some_and(|c| self.selectors.next_class.is_match(c))
                })
            })
            .or_else(|| {
                document.select(self.selectors.anchors).find(|a| {
                    self.selectors
                        .next_text
                        .is_match(&a.text().collect::<String>())
                })
            })?;

        let href = candidate.value().attr("href")?;
        url::to_absolute(page_url, href)
    }
}
