//! Domain discovery with rate limiting
//!
//! This module implements the discovery side of the pipeline: rate
//! limited fetching, URL normalization, relevance filtering, sitemap
//! parsing, and hub-page crawling, orchestrated per domain by
//! [`discovery::DiscoveryEngine`].

pub mod discovery;
pub mod fetcher;
pub mod hub;
pub mod relevance;
pub mod sitemap;
pub mod url;

pub use discovery::DiscoveryEngine;
pub use fetcher::{FetchedPage, PageFetcher};
pub use hub::HubCrawler;
pub use relevance::DomainFilter;
