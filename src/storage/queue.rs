//! Download queue persistence
//!
//! The queue is a newline-delimited list of article URLs. Every save
//! rewrites the whole file sorted, so runs are resumable and the output
//! is deterministic regardless of discovery order.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Newline-delimited URL queue on disk
pub struct QueueFile {
    path: PathBuf,
}

impl QueueFile {
    #[must_use]
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load queued URLs in file order
    ///
    /// Blank lines and surrounding whitespace are dropped. A missing
    /// file is an empty queue, not an error.
    pub fn load(&self) -> Result<Vec<String>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read queue file: {}", self.path.display()))?;

        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect())
    }

    /// Rewrite the queue file with the given links, sorted
    pub fn save(&self, links: &HashSet<String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create queue directory: {}", parent.display())
                })?;
            }
        }

        let mut sorted: Vec<&str> = links.iter().map(String::as_str).collect();
        sorted.sort_unstable();

        let mut content = sorted.join("\n");
        if !content.is_empty() {
            content.push('\n');
        }

        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write queue file: {}", self.path.display()))?;

        tracing::debug!(path = %self.path.display(), count = links.len(), "Queue saved");
        Ok(())
    }
}
