//! HTML parsing and article extraction
//!
//! This module turns fetched pages into titled plain-text articles:
//! selector vocabulary, text sanitization, noise stripping, and the
//! two-tier body extraction strategy.

pub mod html;
pub mod sanitize;
pub mod selectors;

// Re-export the extractor most callers want
pub use html::ArticleParser;
