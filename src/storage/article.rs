//! Plain-text article storage
//!
//! Every extracted article becomes one UTF-8 text file under the
//! articles directory, named after its sanitized title. The document
//! keeps a small header so each file stays traceable to its source URL
//! without any index.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::models::ExtractedArticle;

/// Characters stripped from titles before they become filenames.
const FORBIDDEN_CHARS: &[char] = &['\\', '/', '*', '?', ':', '"', '<', '>', '|'];

/// Longest title slug kept in a filename.
const MAX_STEM_CHARS: usize = 100;

/// Full paths beyond this length fall back to a sequence name.
const MAX_PATH_CHARS: usize = 250;

/// Width of the `=` rule between header and body.
const RULE_WIDTH: usize = 50;

/// Writes extracted articles as text files
pub struct ArticleWriter {
    output_dir: PathBuf,
}

impl ArticleWriter {
    /// Create a writer, making the output directory if needed
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be created.
    pub fn new(output_dir: &Path) -> Result<Self> {
        fs::create_dir_all(output_dir).with_context(|| {
            format!("Failed to create article directory: {}", output_dir.display())
        })?;

        Ok(Self {
            output_dir: output_dir.to_path_buf(),
        })
    }

    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Render the on-disk document for an article
    #[must_use]
    pub fn render(&self, article: &ExtractedArticle) -> String {
        format!(
            "URL: {}\nTitle: {}\n{}\n\n{}",
            article.url,
            article.title,
            "=".repeat(RULE_WIDTH),
            article.body
        )
    }

    /// Save one article, returning the path written
    ///
    /// `sequence` names the file when the title-derived path would be
    /// unreasonably long.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be created or written.
    pub fn save(&self, article: &ExtractedArticle, sequence: u64) -> Result<PathBuf> {
        let document = self.render(article);
        let filepath = self.path_for(&article.title, sequence);

        let mut file = File::create(&filepath)
            .with_context(|| format!("Failed to create file: {}", filepath.display()))?;
        file.write_all(document.as_bytes())
            .with_context(|| format!("Failed to write to file: {}", filepath.display()))?;

        tracing::debug!(path = %filepath.display(), "Saved article");
        Ok(filepath)
    }

    fn path_for(&self, title: &str, sequence: u64) -> PathBuf {
        let filename = format!("{}.txt", clean_filename(title));
        let filepath = self.output_dir.join(filename);

        if filepath.to_string_lossy().chars().count() > MAX_PATH_CHARS {
            self.output_dir.join(format!("Article_{sequence}.txt"))
        } else {
            filepath
        }
    }
}

/// Reduce a title to a filename-safe stem
fn clean_filename(title: &str) -> String {
    let stripped: String = title
        .chars()
        .filter(|c| !FORBIDDEN_CHARS.contains(c))
        .collect();

    stripped.trim().chars().take(MAX_STEM_CHARS).collect()
}
