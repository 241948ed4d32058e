//! Error types for the gleaner crawler
//!
//! This module defines custom error types used throughout the application.

use thiserror::Error;

/// Errors that can occur during HTTP fetching operations
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Request timeout
    #[error("Request timeout")]
    Timeout,

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Errors that can occur during article extraction
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Neither an h1 nor a title element was found
    #[error("Title not found in document")]
    TitleNotFound,

    /// Extracted body fell below the acceptance threshold
    #[error("Extracted body too short ({0} chars)")]
    BodyTooShort(usize),
}
