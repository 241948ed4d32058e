pub mod discover;
pub mod download;
pub mod run;
pub mod stats;

// Re-export command functions for convenience
pub use discover::discover;
pub use download::download;
pub use run::run;
pub use stats::stats;
