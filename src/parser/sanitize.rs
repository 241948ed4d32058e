//! Text cleanup for extracted article content
//!
//! Block text coming out of the DOM still carries invisible formatting
//! characters, double-encoded entities, and ragged whitespace. These
//! helpers flatten that into clean single-spaced text while leaving
//! Persian joiner characters alone.

use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Normalize one block of extracted text
///
/// Strips invisible formatting characters, decodes any entities that
/// survived HTML parsing, and collapses whitespace runs to single
/// spaces.
///
/// # Examples
///
/// ```
/// use gleaner::parser::sanitize::normalize_block_text;
///
/// let raw = "  Hello\u{200B}   World\n\tagain  ";
/// assert_eq!(normalize_block_text(raw), "Hello World again");
/// ```
#[must_use]
pub fn normalize_block_text(text: &str) -> String {
    let no_marks = remove_format_chars(text);
    let decoded = decode_entities(&no_marks);
    WHITESPACE_REGEX.replace_all(&decoded, " ").trim().to_string()
}

/// Remove invisible formatting characters
///
/// Drops zero-width spaces, bidi marks, line and paragraph separators,
/// and stray BOMs. The zero-width joiner and non-joiner stay: Persian
/// words like «می‌شود» need U+200C to render correctly.
///
/// # Examples
///
/// ```
/// use gleaner::parser::sanitize::remove_format_chars;
///
/// assert_eq!(remove_format_chars("a\u{200B}b\u{FEFF}c"), "abc");
/// assert_eq!(remove_format_chars("می\u{200C}شود"), "می\u{200C}شود");
/// ```
#[must_use]
pub fn remove_format_chars(text: &str) -> String {
    text.chars()
        .filter(|c| {
            !matches!(
                *c,
                '\u{200B}' | '\u{200E}' | '\u{200F}' | '\u{2028}'..='\u{202F}' | '\u{FEFF}'
            )
        })
        .collect()
}

/// Decode HTML entities left behind by double-encoded markup.
#[must_use]
pub fn decode_entities(text: &str) -> String {
    html_escape::decode_html_entities(text).to_string()
}

/// Check if text contains meaningful content
///
/// # Examples
///
/// ```
/// use gleaner::parser::sanitize::has_content;
///
/// assert!(has_content("Hello"));
/// assert!(!has_content("   \n\t  "));
/// ```
#[must_use]
pub fn has_content(text: &str) -> bool {
    !text.trim().is_empty()
}

/// Normalize a page title for use in headings and filenames
///
/// Slashes become dashes so the title can seed a filename later.
#[must_use]
pub fn clean_title(title: &str) -> String {
    normalize_block_text(title).replace('/', "-")
}

/// Truncate text to max length with ellipsis
///
/// # Examples
///
/// ```
/// use gleaner::parser::sanitize::truncate;
///
/// assert_eq!(truncate("Hello World", 5), "He...");
/// assert_eq!(truncate("Hello World", 20), "Hello World");
/// ```
#[must_use]
pub fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_len.saturating_sub(3)).collect();
        format!("{truncated}...")
    }
}
