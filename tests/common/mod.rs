//! Common test utilities

use std::path::Path;

use gleaner::config::Config;

/// Build a config rooted in a temp directory, tuned for fast tests
pub fn test_config(root: &Path) -> Config {
    let mut config = Config::default();
    config.crawler.requests_per_second = 1000;
    config.crawler.request_timeout_secs = 5;
    config.discovery.hub_page_delay_ms = 0;
    config.discovery.domain_delay_ms = 0;
    config.output.root_dir = root.join("scraped");
    config.output.queue_file = root.join("download_queue.txt");
    config
}

/// Full article page with a recognized content container
#[allow(dead_code)]
pub const SAMPLE_ARTICLE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>How transformer models changed language technology</title>
</head>
<body>
    <header><nav><a href="/">Home</a></nav></header>
    <h1>How transformer models changed language technology</h1>
    <div class="post-content">
        <p>Transformer language models rebuilt the entire field of natural language processing in under five years.</p>
        <p>Attention layers let every token weigh every other token, which is why context windows matter so much.</p>
        <p>Training such models takes thousands of accelerator hours and careful curation of web-scale corpora.</p>
    </div>
    <footer class="sidebar">Subscribe for updates</footer>
</body>
</html>"#;

/// Body text extracted from [`SAMPLE_ARTICLE_HTML`]
#[allow(dead_code)]
pub const SAMPLE_ARTICLE_BODY: &str = "Transformer language models rebuilt the entire field of natural language processing in under five years.\n\nAttention layers let every token weigh every other token, which is why context windows matter so much.\n\nTraining such models takes thousands of accelerator hours and careful curation of web-scale corpora.\n\n";

/// Minimal article page with the given title and a standard body
#[allow(dead_code)]
pub fn article_page(title: &str) -> String {
    format!(
        r#"<html>
<head><title>{title}</title></head>
<body>
<h1>{title}</h1>
<div class="entry-content">
<p>The release ships a faster tokenizer and a smaller default model for embedded use.</p>
<p>Benchmarks across three public datasets show double digit latency improvements.</p>
<p>Upgrading requires no code changes beyond bumping the version number in one place.</p>
</div>
</body>
</html>"#
    )
}

/// Landing page exposing only a title and meta description
#[allow(dead_code)]
pub fn landing_page(title: &str, description: &str) -> String {
    format!(
        r#"<html>
<head>
<title>{title}</title>
<meta name="description" content="{description}">
</head>
<body><p>Welcome</p></body>
</html>"#
    )
}

/// Listing page linking the given hrefs, optionally with a next link
#[allow(dead_code)]
pub fn hub_page(article_hrefs: &[&str], next_href: Option<&str>) -> String {
    let mut links = String::new();
    for href in article_hrefs {
        links.push_str(&format!("<li><a href=\"{href}\">Post</a></li>\n"));
    }
    let next = match next_href {
        Some(href) => format!("<a rel=\"next\" href=\"{href}\">Next</a>"),
        None => String::new(),
    };
    format!("<html><body><ul>\n{links}</ul>\n{next}\n</body></html>")
}

/// Sitemap document listing plain page links
#[allow(dead_code)]
pub fn sitemap_xml(locs: &[&str]) -> String {
    let entries: String = locs
        .iter()
        .map(|loc| format!("  <url><loc>{loc}</loc></url>\n"))
        .collect();
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n{entries}</urlset>\n"
    )
}

/// Sitemap index pointing at nested sitemap files
#[allow(dead_code)]
pub fn sitemap_index(locs: &[&str]) -> String {
    let entries: String = locs
        .iter()
        .map(|loc| format!("  <sitemap><loc>{loc}</loc></sitemap>\n"))
        .collect();
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <sitemapindex xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n{entries}</sitemapindex>\n"
    )
}
