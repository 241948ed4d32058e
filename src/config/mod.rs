//! Configuration management for the gleaner crawler
//!
//! This module handles loading and validating configuration from environment
//! variables, files, and command-line arguments.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Network and HTTP client configuration
    pub crawler: CrawlerConfig,

    /// Domain relevance filtering configuration
    pub relevance: RelevanceConfig,

    /// URL discovery configuration
    pub discovery: DiscoveryConfig,

    /// Article download configuration
    pub download: DownloadConfig,

    /// Output path configuration
    pub output: OutputConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Network and HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// Request timeout in seconds
    pub request_timeout_secs: u64,

    /// Rate limit (requests per second)
    pub requests_per_second: u32,

    /// User agent string
    pub user_agent: String,
}

/// Domain relevance filtering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelevanceConfig {
    /// When true, only domains whose root page mentions a target keyword
    /// are crawled
    pub strict_mode: bool,

    /// Target keywords matched against the root page title and description
    pub keywords: Vec<String>,

    /// Host substrings that disqualify a domain outright
    pub blacklist: Vec<String>,
}

/// URL discovery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Maximum listing pages to walk per hub
    pub max_hub_pages: u32,

    /// Delay between hub page fetches in milliseconds
    pub hub_page_delay_ms: u64,

    /// Delay between domains in milliseconds
    pub domain_delay_ms: u64,
}

/// Article download configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Number of parallel download workers
    pub max_workers: usize,
}

/// Output path configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Root output directory
    pub root_dir: PathBuf,

    /// Subdirectory of `root_dir` receiving article files
    pub articles_subdir: String,

    /// Path of the persisted URL queue
    pub queue_file: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

/// Default target keywords (Persian and English AI/programming topics)
fn default_keywords() -> Vec<String> {
    [
        "هوش مصنوعی",
        "AI",
        "Machine Learning",
        "Deep Learning",
        "Artificial Intelligence",
        "برنامه‌نویسی",
        "پایتون",
    ]
    .iter()
    .map(|s| (*s).to_string())
    .collect()
}

/// Default blacklist of non-article host substrings
fn default_blacklist() -> Vec<String> {
    [
        "youtube.com",
        "instagram.com",
        "twitter.com",
        "linkedin.com",
        "facebook.com",
        "google.com",
        "yahoo.com",
        "wikipedia.org",
        "aparat.com",
        "divar.ir",
        "sheypoor.com",
        "torob.com",
        "digikala.com",
        "ninisite.com",
        "civilica.com",
        "emalls.ir",
        "jobinja.ir",
        "microsoft.com",
        "adobe.com",
        "github.com",
        "gitlab.com",
    ]
    .iter()
    .map(|s| (*s).to_string())
    .collect()
}

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to the built-in defaults.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let request_timeout_secs = std::env::var("GLEANER_REQUEST_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults.crawler.request_timeout_secs);

        let requests_per_second = std::env::var("GLEANER_RATE_LIMIT")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(defaults.crawler.requests_per_second);

        let user_agent =
            std::env::var("GLEANER_USER_AGENT").unwrap_or(defaults.crawler.user_agent);

        let strict_mode = std::env::var("GLEANER_STRICT_MODE")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(defaults.relevance.strict_mode);

        let max_hub_pages = std::env::var("GLEANER_MAX_HUB_PAGES")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(defaults.discovery.max_hub_pages);

        let max_workers = std::env::var("GLEANER_MAX_WORKERS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(defaults.download.max_workers);

        let root_dir = std::env::var("GLEANER_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.output.root_dir);

        let queue_file = std::env::var("GLEANER_QUEUE_FILE")
            .map(PathBuf::from)
            .unwrap_or(defaults.output.queue_file);

        let log_level = std::env::var("GLEANER_LOG_LEVEL").unwrap_or(defaults.logging.level);

        let log_format = std::env::var("GLEANER_LOG_FORMAT").unwrap_or(defaults.logging.format);

        Ok(Self {
            crawler: CrawlerConfig {
                request_timeout_secs,
                requests_per_second,
                user_agent,
            },
            relevance: RelevanceConfig {
                strict_mode,
                keywords: defaults.relevance.keywords,
                blacklist: defaults.relevance.blacklist,
            },
            discovery: DiscoveryConfig {
                max_hub_pages,
                hub_page_delay_ms: defaults.discovery.hub_page_delay_ms,
                domain_delay_ms: defaults.discovery.domain_delay_ms,
            },
            download: DownloadConfig { max_workers },
            output: OutputConfig {
                root_dir,
                articles_subdir: defaults.output.articles_subdir,
                queue_file,
            },
            logging: LoggingConfig {
                level: log_level,
                format: log_format,
            },
        })
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.crawler.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be greater than 0");
        }

        if self.crawler.requests_per_second == 0 {
            anyhow::bail!("requests_per_second must be greater than 0");
        }

        if self.discovery.max_hub_pages == 0 {
            anyhow::bail!("max_hub_pages must be greater than 0");
        }

        if self.download.max_workers == 0 {
            anyhow::bail!("max_workers must be greater than 0");
        }

        if self.relevance.strict_mode && self.relevance.keywords.is_empty() {
            anyhow::bail!("strict_mode requires at least one keyword");
        }

        Ok(())
    }

    /// Get request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.crawler.request_timeout_secs)
    }

    /// Get the delay between hub page fetches as Duration
    #[must_use]
    pub fn hub_page_delay(&self) -> Duration {
        Duration::from_millis(self.discovery.hub_page_delay_ms)
    }

    /// Get the delay between domains as Duration
    #[must_use]
    pub fn domain_delay(&self) -> Duration {
        Duration::from_millis(self.discovery.domain_delay_ms)
    }

    /// Full path of the directory receiving article files
    #[must_use]
    pub fn articles_dir(&self) -> PathBuf {
        self.output.root_dir.join(&self.output.articles_subdir)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            crawler: CrawlerConfig {
                request_timeout_secs: 15,
                requests_per_second: 2,
                user_agent: DEFAULT_USER_AGENT.to_string(),
            },
            relevance: RelevanceConfig {
                strict_mode: true,
                keywords: default_keywords(),
                blacklist: default_blacklist(),
            },
            discovery: DiscoveryConfig {
                max_hub_pages: 15,
                hub_page_delay_ms: 1000,
                domain_delay_ms: 1000,
            },
            download: DownloadConfig { max_workers: 5 },
            output: OutputConfig {
                root_dir: PathBuf::from("Scraped_Data"),
                articles_subdir: String::from("Articles"),
                queue_file: PathBuf::from("download_queue.txt"),
            },
            logging: LoggingConfig {
                level: String::from("info"),
                format: String::from("text"),
            },
        }
    }
}
