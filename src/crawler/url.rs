//! Link normalization and free-text URL scanning
//!
//! Input files come from spreadsheets, chat exports, and plain notes, so raw
//! links arrive percent-encoded, glued to CSV separators, or wrapped in
//! punctuation. This module turns that mess into fetchable `https://` URLs
//! and decides which links on a listing page look like articles.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

/// Separator characters that text exports glue onto pasted links.
const GARBAGE_CHARS: [char; 6] = [',', ';', '،', '|', '\t', '\n'];

/// Characters trimmed from both edges of a candidate link.
const EDGE_TRIM: &[char] = &[
    ')', '.', ',', ';', ']', '"', '\'', ':', '[', '<', '>', ' ', '\u{200C}', '\r', '\n',
];

/// Static-asset markers that disqualify a scanned link.
const ASSET_MARKERS: [&str; 8] = [
    ".jpg", ".png", ".css", ".js", ".woff", ".ttf", ".svg", ".gif",
];

/// Path fragments that mark a link as navigation or utility, not an article.
const ARTICLE_EXCLUDE: [&str; 19] = [
    "wp-admin",
    "login",
    "register",
    "cart",
    "checkout",
    "contact",
    "about",
    "feed",
    "comment",
    "tag",
    "search",
    "page",
    "xml",
    "jpg",
    "png",
    "pdf",
    "zip",
    "privacy-policy",
    "terms",
];

/// Scheme-less host with a TLD of at least two letters, optionally a path.
static BARE_DOMAIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}(/.*)?$").unwrap());

/// Matches explicit `http(s)://` / `www.` links plus bare domains on common
/// TLDs. The excluded character class stops at whitespace, quotes, brackets,
/// and the zero-width non-joiner that Persian text mixes into URLs.
static URL_SCAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?:https?://|www\.)[^\s\u{200C},;"'<>\]\[]+|[a-zA-Z0-9.-]+\.(?:ir|com|net|org|co)[^\s\u{200C},;"'<>\]\[]*"#,
    )
    .unwrap()
});

/// Clean a raw link into a fetchable absolute URL
///
/// Percent-decodes once, strips separator garbage and edge punctuation,
/// and promotes bare domains to `https://`. Returns `None` when nothing
/// link-shaped survives.
///
/// # Examples
///
/// ```
/// use gleaner::crawler::url;
///
/// assert_eq!(
///     url::normalize("example.com/page,ref=1").as_deref(),
///     Some("https://example.com/page")
/// );
/// assert_eq!(url::normalize("   "), None);
/// ```
#[must_use]
pub fn normalize(raw: &str) -> Option<String> {
    if raw.is_empty() {
        return None;
    }

    // Percent-decode once; malformed sequences keep the raw form.
    let decoded = match urlencoding::decode(raw) {
        Ok(cow) => cow.into_owned(),
        Err(_) => raw.to_string(),
    };

    let mut link = decoded.trim().to_string();

    // Split on each separator in turn and keep the first piece that still
    // looks like a link. No piece qualifying leaves the string unchanged.
    for &sep in &GARBAGE_CHARS {
        if link.contains(sep) {
            if let Some(part) = link
                .split(sep)
                .find(|p| p.contains("http") || p.contains("www") || p.contains('.'))
            {
                link = part.to_string();
            }
        }
    }

    let link = link.trim_matches(EDGE_TRIM);

    if link.chars().count() < 4 || link.contains(' ') {
        return None;
    }

    if link.starts_with("http://") || link.starts_with("https://") {
        return Some(link.to_string());
    }

    if BARE_DOMAIN.is_match(link) {
        return Some(format!("https://{link}"));
    }

    None
}

/// Scan free text for anything URL-shaped
///
/// Returns raw matches in document order. Callers pass each through
/// [`normalize`] before use.
#[must_use]
pub fn scan_text(text: &str) -> Vec<String> {
    URL_SCAN
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Check whether a link points at a stylesheet, script, font, or image.
///
/// A plain substring test: pasted asset links often carry query strings or
/// cache-bust suffixes after the extension.
#[must_use]
pub fn has_asset_extension(url: &str) -> bool {
    let lower = url.to_lowercase();
    ASSET_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// Judge whether a link found on a listing page is worth queueing
///
/// The link must resolve to a host within `domain`, be at least 30
/// characters long overall, and avoid the navigation and utility path
/// fragments in [`ARTICLE_EXCLUDE`]. `domain` is the bare site host,
/// e.g. `example.com`.
///
/// # Examples
///
/// ```
/// use gleaner::crawler::url;
///
/// assert!(url::is_likely_article(
///     "https://example.com/2024/05/rust-ownership-explained",
///     "example.com"
/// ));
/// assert!(!url::is_likely_article(
///     "https://example.com/tag/rust-language-articles",
///     "example.com"
/// ));
/// ```
#[must_use]
pub fn is_likely_article(url: &str, domain: &str) -> bool {
    let parsed = match Url::parse(url) {
        Ok(u) => u,
        Err(_) => return false,
    };
    let host = match parsed.host_str() {
        Some(h) => h,
        None => return false,
    };

    if !host.contains(domain) {
        return false;
    }

    if url.chars().count() < 30 {
        return false;
    }

    let lower = url.to_lowercase();
    !ARTICLE_EXCLUDE.iter().any(|frag| lower.contains(frag))
}

/// Resolve an href against its page URL
///
/// Handles relative paths, root-relative paths, and already-absolute
/// links alike. Returns `None` when the base itself does not parse or
/// the join produces nothing usable.
#[must_use]
pub fn to_absolute(base: &str, href: &str) -> Option<String> {
    let base_url = Url::parse(base).ok()?;
    let joined = base_url.join(href).ok()?;
    Some(joined.to_string())
}
