//! Error types for shortening requests

use thiserror::Error;

use crate::ShortenerService;

/// Result type for shortening operations
pub type ShortenResult<T> = Result<T, ShortenError>;

/// Errors that can occur while shortening a URL
#[derive(Error, Debug)]
pub enum ShortenError {
    /// Transport failure, timeout or non-success status
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered but did not return a usable short link
    #[error("{service} error: {message}")]
    Rejected {
        /// Service that rejected the request
        service: ShortenerService,
        /// Message returned by the service
        message: String,
    },
}
