//! gleaner - AI article discovery and download pipeline
//!
//! A two-phase scraper for AI-related articles: the discovery phase scans
//! seed files for domains, checks each domain for relevant content, and
//! collects article links into a queue file; the download phase fetches the
//! queued links concurrently and saves cleaned article text to disk.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`crawler`] - Link discovery: relevance checks, sitemaps, hub pages
//! - [`downloader`] - Concurrent article download and extraction
//! - [`parser`] - HTML parsing and article text extraction
//! - [`models`] - Core data structures and types
//! - [`storage`] - Queue file and article persistence
//! - [`utils`] - Common utilities and helpers
//!
//! # Example
//!
//! ```no_run
//! use gleaner::config::Config;
//! use gleaner::crawler::DiscoveryEngine;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let engine = DiscoveryEngine::new(&config)?;
//!     let links = engine.discover("https://ai-news.example").await;
//!     println!("found {} article links", links.len());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod crawler;
pub mod downloader;
pub mod models;
pub mod parser;
pub mod storage;
pub mod utils;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::crawler::{DiscoveryEngine, DomainFilter, PageFetcher};
    pub use crate::downloader::Downloader;
    pub use crate::models::{DiscoveryReport, DownloadStats, ExtractedArticle, StatsSnapshot};
    pub use crate::parser::ArticleParser;
    pub use crate::storage::{ArticleWriter, QueueFile};
    pub use crate::utils::error::{ExtractError, FetchError};
}

// Direct re-exports for convenience
pub use models::{DiscoveryReport, ExtractedArticle, StatsSnapshot};
