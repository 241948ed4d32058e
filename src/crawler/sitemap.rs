//! Sitemap probing and recursive link harvesting
//!
//! WordPress and most news engines expose one of a handful of
//! well-known sitemap files. Candidates are probed in order and the
//! first that yields links wins. Index sitemaps are followed down to a
//! bounded depth; anything malformed returns whatever was collected.

use futures::future::BoxFuture;
use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::debug;

use crate::crawler::fetcher::PageFetcher;
use crate::utils::domain_root;

/// Well-known sitemap locations, probed in order at the domain root.
const SITEMAP_CANDIDATES: &[&str] = &[
    "sitemap.xml",
    "sitemap_index.xml",
    "post-sitemap.xml",
    "article-sitemap.xml",
    "news-sitemap.xml",
];

/// Nested sitemap indexes beyond this depth are not followed.
const MAX_SITEMAP_DEPTH: u32 = 2;

/// Harvest article links from a domain's sitemaps
///
/// Returns an empty vector when the URL has no host or no candidate
/// produces links.
pub async fn collect_links(fetcher: &PageFetcher, base_url: &str) -> Vec<String> {
    for candidate in candidate_urls(base_url) {
        let links = walk(fetcher, &candidate, 0).await;
        if !links.is_empty() {
            debug!(sitemap = %candidate, count = links.len(), "Sitemap yielded links");
            return links;
        }
    }
    Vec::new()
}

fn candidate_urls(base_url: &str) -> Vec<String> {
    let Some(root) = domain_root(base_url) else {
        return Vec::new();
    };
    SITEMAP_CANDIDATES
        .iter()
        .map(|name| format!("{root}/{name}"))
        .collect()
}

/// Fetch one sitemap and recurse into nested indexes
///
/// Fetch failures and non-XML responses return empty; a nested failure
/// only loses that branch.
fn walk<'a>(fetcher: &'a PageFetcher, url: &'a str, depth: u32) -> BoxFuture<'a, Vec<String>> {
    Box::pin(async move {
        if depth > MAX_SITEMAP_DEPTH {
            return Vec::new();
        }

        let page = match fetcher.fetch(url).await {
            Ok(page) => page,
            Err(e) => {
                debug!(url = %url, error = %e, "Sitemap fetch failed");
                return Vec::new();
            }
        };

        if page.status != 200 || !page.looks_like_xml() {
            return Vec::new();
        }

        let mut links = Vec::new();
        for loc in loc_values(&page.body) {
            // Nested sitemaps point at further .xml files; everything
            // else is a page link.
            if loc.ends_with(".xml") || loc.to_lowercase().contains("sitemap") {
                links.extend(walk(fetcher, &loc, depth + 1).await);
            } else {
                links.push(loc);
            }
        }
        links
    })
}

/// Pull every `<loc>` value out of a sitemap document
///
/// Namespaced tags and CDATA wrapping both occur in the wild. Malformed
/// XML ends the scan, keeping the values read so far.
fn loc_values(xml: &str) -> Vec<String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut values = Vec::new();
    let mut in_loc = false;
    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) if e.local_name().as_ref() == b"loc" => in_loc = true,
            Ok(Event::End(ref e)) if e.local_name().as_ref() == b"loc" => in_loc = false,
            Ok(Event::Text(e)) if in_loc => {
                if let Ok(text) = e.unescape() {
                    let trimmed = text.trim();
                    if !trimmed.is_empty() {
                        values.push(trimmed.to_string());
                    }
                }
            }
            Ok(Event::CData(e)) if in_loc => {
                let text = String::from_utf8_lossy(&e);
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    values.push(trimmed.to_string());
                }
            }
            Ok(Event::Eof) | Err(_) => break,
            _ => {}
        }
    }
    values
}
