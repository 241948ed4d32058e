//! Two-tier article extraction from arbitrary HTML
//!
//! No per-site selectors exist for the open web, so extraction leans on
//! the class vocabulary shared by WordPress and page-builder themes.
//! Tier one collects text blocks from recognized content containers;
//! when that comes up thin, tier two falls back to every substantial
//! paragraph in the body. Noise is stripped before either tier runs.

use scraper::{Html, Selector};

use crate::models::ExtractedArticle;
use crate::parser::sanitize::{clean_title, has_content, normalize_block_text};
use crate::parser::selectors::{ContentSelectors, NoiseSelectors};
use crate::utils::error::ExtractError;

/// Tier-one results shorter than this trigger the body-paragraph fallback.
const CONTAINER_TEXT_FLOOR: usize = 150;

/// Minimum block length inside a recognized container.
const BLOCK_MIN_CHARS: usize = 30;

/// Minimum paragraph length for the body-wide fallback.
const PARAGRAPH_MIN_CHARS: usize = 40;

/// Bodies at or under this length are rejected outright.
const BODY_MIN_CHARS: usize = 100;

/// Generic article extractor
///
/// One instance is shared across the whole download pool; all state
/// lives in pre-compiled selectors.
pub struct ArticleParser {
    content: ContentSelectors,
    noise: NoiseSelectors,
}

impl ArticleParser {
    #[must_use]
    pub fn new() -> Self {
        Self {
            content: ContentSelectors::new(),
            noise: NoiseSelectors::new(),
        }
    }

    /// Extract a titled article body from page HTML
    ///
    /// Noise elements are removed first, so a heading buried in a
    /// stripped `<header>` falls through to the document title.
    ///
    /// # Errors
    ///
    /// * `ExtractError::TitleNotFound` - no h1 or title text survived
    /// * `ExtractError::BodyTooShort` - neither tier produced enough text
    pub fn parse(&self, html: &str, url: &str) -> Result<ExtractedArticle, ExtractError> {
        let clean = self.remove_noise(html);
        let document = Html::parse_document(&clean);

        let title = self
            .extract_first_match(&document, self.content.title)
            .map(|t| clean_title(&t))
            .ok_or(ExtractError::TitleNotFound)?;

        let mut body = self.collect_container_blocks(&document);

        // Thin container text usually means an unrecognized theme, not a
        // short article. Rescan the whole body, keeping the container
        // harvest if the rescan finds nothing.
        if body.chars().count() < CONTAINER_TEXT_FLOOR {
            let fallback = self.collect_body_paragraphs(&document);
            if !fallback.is_empty() {
                body = fallback;
            }
        }

        let chars = body.chars().count();
        if chars <= BODY_MIN_CHARS {
            return Err(ExtractError::BodyTooShort(chars));
        }

        Ok(ExtractedArticle {
            url: url.to_string(),
            title,
            body,
        })
    }

    /// Extract first matching text from a list of selectors
    fn extract_first_match(&self, document: &Html, selectors: &[Selector]) -> Option<String> {
        for selector in selectors {
            if let Some(element) = document.select(selector).next() {
                let text = normalize_block_text(&element.text().collect::<String>());
                if has_content(&text) {
                    return Some(text);
                }
            }
        }
        None
    }

    /// Tier one: blocks from every recognized content container
    fn collect_container_blocks(&self, document: &Html) -> String {
        let mut body = String::new();

        for container in document.select(self.content.containers) {
            let class_attr = container.value().attr("class").unwrap_or_default();
            if !self.content.container_class.is_match(class_attr) {
                continue;
            }

            for block in container.select(self.content.blocks) {
                let text = normalize_block_text(&block.text().collect::<String>());
                if text.chars().count() > BLOCK_MIN_CHARS {
                    body.push_str(&text);
                    body.push_str("\n\n");
                }
            }
        }

        body
    }

    /// Tier two: every substantial paragraph anywhere in the body
    fn collect_body_paragraphs(&self, document: &Html) -> String {
        let mut body = String::new();

        for para in document.select(self.content.body_paragraphs) {
            let text = normalize_block_text(&para.text().collect::<String>());
            if text.chars().count() > PARAGRAPH_MIN_CHARS {
                body.push_str(&text);
                body.push_str("\n\n");
            }
        }

        body
    }

    /// Remove noise elements from an HTML document
    ///
    /// Works on the serialized tree so each element's `html()` matches
    /// the haystack exactly. The walk is document order, parents ahead
    /// of children, which keeps nested noise from orphaning its wrapper.
    fn remove_noise(&self, html: &str) -> String {
        let document = Html::parse_document(html);
        let mut result = document.html();

        for element in document.select(self.noise.universal) {
            let is_noise = self.noise.tag_names.contains(&element.value().name())
                || element
                    .value()
                    .attr("class")
                    .is_some_and(|c| self.noise.class_pattern.is_match(c));

            if is_noise {
                result = result.replace(&element.html(), "");
            }
        }

        result
    }
}

impl Default for ArticleParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://example.com/post/42";

    fn long_text(fill: char, count: usize) -> String {
        std::iter::repeat(fill).take(count).collect()
    }

    #[test]
    fn test_parse_container_article() {
        let html = format!(
            r#"<html><head><title>doc</title></head><body>
                <h1>هوش مصنوعی در سال جاری</h1>
                <div class="entry-content">
                    <p>{p1}</p>
                    <p>{p2}</p>
                </div>
            </body></html>"#,
            p1 = long_text('a', 80),
            p2 = long_text('b', 80),
        );

        let parser = ArticleParser::new();
        let article = parser.parse(&html, URL).unwrap();

        assert_eq!(article.title, "هوش مصنوعی در سال جاری");
        assert_eq!(article.url, URL);
        assert!(article.body.contains(&long_text('a', 80)));
        assert!(article.body.contains(&long_text('b', 80)));
        assert!(article.body.contains("\n\n"));
    }

    #[test]
    fn test_title_falls_back_to_document_title() {
        // The h1 sits in a header element, which noise removal strips.
        let html = format!(
            r#"<html><head><title>Fallback Title</title></head><body>
                <header><h1>Masthead</h1></header>
                <div class="post-content"><p>{p}</p></div>
            </body></html>"#,
            p = long_text('x', 160),
        );

        let parser = ArticleParser::new();
        let article = parser.parse(&html, URL).unwrap();
        assert_eq!(article.title, "Fallback Title");
    }

    #[test]
    fn test_title_slash_becomes_dash() {
        let html = format!(
            r#"<html><body><h1>AI/ML roundup</h1>
               <div class="entry-content"><p>{p}</p></div></body></html>"#,
            p = long_text('y', 160),
        );

        let parser = ArticleParser::new();
        let article = parser.parse(&html, URL).unwrap();
        assert_eq!(article.title, "AI-ML roundup");
    }

    #[test]
    fn test_missing_title_is_an_error() {
        let html = format!(
            r#"<html><body><div class="entry-content"><p>{p}</p></div></body></html>"#,
            p = long_text('z', 160),
        );

        let parser = ArticleParser::new();
        let err = parser.parse(&html, URL).unwrap_err();
        assert!(matches!(err, ExtractError::TitleNotFound));
    }

    #[test]
    fn test_short_body_is_an_error() {
        let html = r#"<html><body><h1>Title here</h1>
            <div class="entry-content"><p>Too short to matter.</p></div>
        </body></html>"#;

        let parser = ArticleParser::new();
        let err = parser.parse(html, URL).unwrap_err();
        assert!(matches!(err, ExtractError::BodyTooShort(_)));
    }

    #[test]
    fn test_fallback_scans_body_paragraphs() {
        // No recognized container class anywhere.
        let html = format!(
            r#"<html><body><h1>Plain theme post</h1>
                <div class="main-wrap">
                    <p>{p1}</p>
                    <p>short</p>
                    <p>{p2}</p>
                </div>
            </body></html>"#,
            p1 = long_text('c', 90),
            p2 = long_text('d', 90),
        );

        let parser = ArticleParser::new();
        let article = parser.parse(&html, URL).unwrap();
        assert!(article.body.contains(&long_text('c', 90)));
        assert!(article.body.contains(&long_text('d', 90)));
        assert!(!article.body.contains("short"));
    }

    #[test]
    fn test_sufficient_container_text_skips_fallback() {
        // Container yields 150 chars with separator, right at the floor.
        let html = format!(
            r#"<html><body><h1>Boundary check</h1>
                <div class="entry-content"><p>{p}</p></div>
                <p>{outside}</p>
            </body></html>"#,
            p = long_text('e', 148),
            outside = long_text('f', 60),
        );

        let parser = ArticleParser::new();
        let article = parser.parse(&html, URL).unwrap();
        assert!(!article.body.contains(&long_text('f', 60)));
    }

    #[test]
    fn test_thin_container_text_triggers_fallback() {
        // One char less and the body-wide rescan takes over.
        let html = format!(
            r#"<html><body><h1>Boundary check</h1>
                <div class="entry-content"><p>{p}</p></div>
                <p>{outside}</p>
            </body></html>"#,
            p = long_text('e', 147),
            outside = long_text('f', 60),
        );

        let parser = ArticleParser::new();
        let article = parser.parse(&html, URL).unwrap();
        assert!(article.body.contains(&long_text('f', 60)));
        assert!(article.body.contains(&long_text('e', 147)));
    }

    #[test]
    fn test_headings_and_lists_count_as_blocks() {
        let html = format!(
            r#"<html><body><h1>Structured post</h1>
                <div class="article-body">
                    <h2>{h}</h2>
                    <li>{li}</li>
                </div>
            </body></html>"#,
            h = long_text('g', 40),
            li = long_text('h', 70),
        );

        let parser = ArticleParser::new();
        let article = parser.parse(&html, URL).unwrap();
        assert!(article.body.contains(&long_text('g', 40)));
        assert!(article.body.contains(&long_text('h', 70)));
    }

    #[test]
    fn test_noise_classes_removed_before_extraction() {
        let html = format!(
            r#"<html><body><h1>Clean post</h1>
                <div class="entry-content">
                    <p>{keep}</p>
                    <p class="related-posts">{drop}</p>
                </div>
            </body></html>"#,
            keep = long_text('k', 160),
            drop = long_text('q', 90),
        );

        let parser = ArticleParser::new();
        let article = parser.parse(&html, URL).unwrap();
        assert!(article.body.contains(&long_text('k', 160)));
        assert!(!article.body.contains(&long_text('q', 90)));
    }

    #[test]
    fn test_nested_noise_removed_with_wrapper() {
        // The script inside the sidebar must not orphan the wrapper.
        let html = format!(
            r#"<html><body><h1>Nested noise</h1>
                <div class="sidebar-area"><script>var x = 1;</script><p>{side}</p></div>
                <div class="post-content"><p>{main}</p></div>
            </body></html>"#,
            side = long_text('s', 90),
            main = long_text('m', 160),
        );

        let parser = ArticleParser::new();
        let article = parser.parse(&html, URL).unwrap();
        assert!(article.body.contains(&long_text('m', 160)));
        assert!(!article.body.contains(&long_text('s', 90)));
    }

    #[test]
    fn test_remove_noise_keeps_content() {
        let parser = ArticleParser::new();
        let html = r#"<div>Content<script>alert('x');</script>More</div>"#;
        let clean = parser.remove_noise(html);
        assert!(!clean.contains("alert"));
        assert!(clean.contains("Content"));
        assert!(clean.contains("More"));
    }

    #[test]
    fn test_parser_default() {
        let parser = ArticleParser::default();
        assert_eq!(parser.content.title.len(), 2);
    }
}
