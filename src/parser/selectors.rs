//! CSS selectors and class patterns for article extraction
//!
//! Content sites built on WordPress, Elementor, and hand-rolled themes
//! share a small vocabulary of container class names. The selectors here
//! encode that vocabulary once so the extractor and the hub crawler
//! never parse selector strings at call sites.

use lazy_static::lazy_static;
use regex::Regex;
use scraper::Selector;

// Helper macro to parse selectors safely at compile time
macro_rules! parse_selector {
    ($s:expr) => {
        Selector::parse($s).expect(concat!("Invalid CSS selector: ", $s))
    };
}

lazy_static! {
    // Title cascade: a real heading first, the document title as fallback
    static ref TITLE_CASCADE: Vec<Selector> = vec![
        parse_selector!("h1"),
        parse_selector!("title"),
    ];

    // Single document-order walk for noise removal. Parents come before
    // children, so removing a wrapper also covers everything inside it.
    static ref UNIVERSAL: Selector = parse_selector!("*");

    // Candidate article containers, filtered by CONTENT_CLASS_RE
    static ref CONTENT_CONTAINERS: Selector =
        parse_selector!("div[class], article[class], section[class]");

    // Text blocks collected inside a matched container
    static ref CONTENT_BLOCKS: Selector = parse_selector!("p, h2, h3, h4, ul, li");

    // Fallback scan when no container produces enough text
    static ref BODY_PARAGRAPHS: Selector = parse_selector!("body p");

    // Links collected from hub pages
    static ref HUB_LINKS: Selector = parse_selector!("a[href]");

    // Pagination strategies, tried in order
    static ref REL_NEXT_ANCHOR: Selector = parse_selector!(r#"a[rel~="next"]"#);
    static ref CLASSED_ANCHORS: Selector = parse_selector!("a[class]");
    static ref ALL_ANCHORS: Selector = parse_selector!("a");

    // Relevance probe reads only the document head
    static ref PAGE_TITLE: Selector = parse_selector!("title");
    static ref META_DESCRIPTION: Selector = parse_selector!(r#"meta[name="description"]"#);

    static ref NOISE_CLASS_RE: Regex = Regex::new(
        r"(?i)(sidebar|comment|widget|related|menu|navigation|breadcrumb|share|social|popup|cookie|hidden)"
    ).unwrap();

    static ref CONTENT_CLASS_RE: Regex = Regex::new(
        r"(?i)(post-content|entry-content|article-body|content-area|single-post|blog-post|elementor-widget-text-editor|elementor-widget-theme-post-content)"
    ).unwrap();

    static ref NEXT_CLASS_RE: Regex =
        Regex::new(r"(?i)(next|forward|pagination-next|page-link)").unwrap();

    static ref NEXT_TEXT_RE: Regex = Regex::new(r"(?i)(بعدی|Next|Old|Older|»|›)").unwrap();
}

/// Structural tags dropped wholesale before extraction.
const NOISE_TAG_NAMES: &[&str] = &[
    "script", "style", "nav", "header", "footer", "aside", "form", "iframe", "noscript",
];

/// Selectors for elements removed before extraction
pub struct NoiseSelectors {
    pub universal: &'static Selector,
    pub tag_names: &'static [&'static str],
    pub class_pattern: &'static Regex,
}

impl NoiseSelectors {
    #[must_use]
    pub fn new() -> Self {
        Self {
            universal: &UNIVERSAL,
            tag_names: NOISE_TAG_NAMES,
            class_pattern: &NOISE_CLASS_RE,
        }
    }
}

impl Default for NoiseSelectors {
    fn default() -> Self {
        Self::new()
    }
}

/// Selectors driving title and body extraction
pub struct ContentSelectors {
    pub title: &'static [Selector],
    pub containers: &'static Selector,
    pub container_class: &'static Regex,
    pub blocks: &'static Selector,
    pub body_paragraphs: &'static Selector,
}

impl ContentSelectors {
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: &TITLE_CASCADE,
            containers: &CONTENT_CONTAINERS,
            container_class: &CONTENT_CLASS_RE,
            blocks: &CONTENT_BLOCKS,
            body_paragraphs: &BODY_PARAGRAPHS,
        }
    }
}

impl Default for ContentSelectors {
    fn default() -> Self {
        Self::new()
    }
}

/// Selectors for hub-page link harvesting and pagination
pub struct HubSelectors {
    pub links: &'static Selector,
    pub rel_next: &'static Selector,
    pub classed_anchors: &'static Selector,
    pub anchors: &'static Selector,
    pub next_class: &'static Regex,
    pub next_text: &'static Regex,
}

impl HubSelectors {
    #[must_use]
    pub fn new() -> Self {
        Self {
            links: &HUB_LINKS,
            rel_next: &REL_NEXT_ANCHOR,
            classed_anchors: &CLASSED_ANCHORS,
            anchors: &ALL_ANCHORS,
            next_class: &NEXT_CLASS_RE,
            next_text: &NEXT_TEXT_RE,
        }
    }
}

impl Default for HubSelectors {
    fn default() -> Self {
        Self::new()
    }
}

/// Selectors for the domain relevance probe
pub struct RelevanceSelectors {
    pub title: &'static Selector,
    pub meta_description: &'static Selector,
}

impl RelevanceSelectors {
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: &PAGE_TITLE,
            meta_description: &META_DESCRIPTION,
        }
    }
}

impl Default for RelevanceSelectors {
    fn default() -> Self {
        Self::new()
    }
}
