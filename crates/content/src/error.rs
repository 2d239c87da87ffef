//! Error types for the content crate.

use thiserror::Error;

/// Errors that can occur while handling content-domain input
///
/// Empty profiles and empty candidate lists are valid degenerate inputs to
/// the core, not errors, so the only error surface here is parsing
/// user-supplied domain names at the request boundary.
#[derive(Error, Debug)]
pub enum ContentError {
    /// A request named a domain the core does not serve
    #[error("Unknown domain: {value} (expected movies, books, or music)")]
    UnknownDomain { value: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, ContentError>;
