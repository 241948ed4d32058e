//! Concurrent article downloading
//!
//! The download phase drains the queue through a bounded worker pool.
//! Workers share one fetcher, one visited set, and one stats block.
//! Every URL is claimed in the visited set before any network work, so
//! a URL is attempted at most once no matter how often it is queued,
//! and no single failure aborts the run.

use anyhow::Result;
use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::crawler::fetcher::PageFetcher;
use crate::models::{DownloadStats, StatsSnapshot, VisitedSet};
use crate::parser::ArticleParser;
use crate::storage::ArticleWriter;
use crate::utils::error::ExtractError;

/// Link suffixes that can never be an article page.
const MEDIA_EXTENSIONS: &[&str] = &[
    ".jpg", ".jpeg", ".png", ".gif", ".webp", ".svg", ".bmp", ".ico", ".mp4", ".mp3", ".avi",
    ".mov", ".pdf", ".doc", ".docx", ".xls", ".xlsx", ".zip", ".rar", ".exe",
];

/// The progress callback fires on every Nth saved article.
const PROGRESS_EVERY: u64 = 5;

type ProgressCallback = Box<dyn Fn(u64) + Send + Sync>;

/// Queue-draining download engine
pub struct Downloader {
    fetcher: PageFetcher,
    parser: ArticleParser,
    writer: ArticleWriter,
    visited: VisitedSet,
    stats: DownloadStats,
    progress: Option<ProgressCallback>,
    max_workers: usize,
}

impl Downloader {
    /// Build a downloader with its own HTTP client and output directory
    ///
    /// # Errors
    ///
    /// Returns an error when the client cannot be built or the article
    /// directory cannot be created.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            fetcher: PageFetcher::new(config)?,
            parser: ArticleParser::new(),
            writer: ArticleWriter::new(&config.articles_dir())?,
            visited: VisitedSet::new(),
            stats: DownloadStats::new(),
            progress: None,
            max_workers: config.download.max_workers,
        })
    }

    /// Attach a callback invoked with the running total on every fifth save
    #[must_use]
    pub fn with_progress(mut self, callback: impl Fn(u64) + Send + Sync + 'static) -> Self {
        self.progress = Some(Box::new(callback));
        self
    }

    /// Current counter values
    #[must_use]
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Process every queued URL through the worker pool
    pub async fn download_all(&self, urls: &[String]) -> StatsSnapshot {
        stream::iter(urls)
            .for_each_concurrent(self.max_workers, |url| async move {
                self.process(url).await;
            })
            .await;

        self.stats.snapshot()
    }

    /// Fetch, extract, and persist a single URL
    ///
    /// Every outcome lands in the stats block; this function never
    /// propagates an error to the pool.
    pub async fn process(&self, url: &str) {
        let lowered = url.trim().to_lowercase();
        if MEDIA_EXTENSIONS.iter().any(|ext| lowered.ends_with(ext)) {
            debug!(url = %url, "Skipping media file");
            self.stats.record_skipped();
            return;
        }

        // Claim before fetching so concurrent duplicates are no-ops.
        if !self.visited.insert(url) {
            return;
        }

        let page = match self.fetcher.fetch(url).await {
            Ok(page) => page,
            Err(e) => {
                warn!(url = %url, error = %e, "Fetch failed");
                self.stats.record_failed();
                return;
            }
        };

        if !page.is_probably_html() {
            debug!(url = %url, content_type = %page.content_type, "Skipping non-HTML content");
            self.stats.record_skipped();
            return;
        }

        if page.status != 200 {
            warn!(url = %url, status = page.status, "Fetch returned non-200");
            self.stats.record_failed();
            return;
        }

        let article = match self.parser.parse(&page.body, url) {
            Ok(article) => article,
            Err(ExtractError::TitleNotFound) => {
                debug!(url = %url, "No title found, skipping");
                self.stats.record_skipped();
                return;
            }
            Err(e @ ExtractError::BodyTooShort(_)) => {
                debug!(url = %url, error = %e, "Extraction failed");
                self.stats.record_failed();
                return;
            }
        };

        match self.writer.save(&article, self.visited.len() as u64) {
            Ok(path) => {
                let saved = self.stats.record_saved();
                info!(url = %url, path = %path.display(), "Article saved");
                if saved % PROGRESS_EVERY == 0 {
                    if let Some(callback) = &self.progress {
                        callback(saved);
                    }
                }
            }
            Err(e) => {
                warn!(url = %url, error = %e, "Save failed");
                self.stats.record_failed();
            }
        }
    }
}
