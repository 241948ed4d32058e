//! Flat-file persistence
//!
//! This module handles the two on-disk artifacts of a run: the
//! download queue and the extracted article documents.

pub mod article;
pub mod queue;

pub use article::ArticleWriter;
pub use queue::QueueFile;
