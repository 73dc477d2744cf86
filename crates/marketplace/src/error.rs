//! Error types for the marketplace collections API client.

use thiserror::Error;

/// Errors that can occur when fetching from the marketplace API.
///
/// All variants are transient from the caller's perspective: every page
/// request is retried with backoff before one of these surfaces, and a
/// surfaced error aborts the whole fetch rather than yielding a partial
/// list.
#[derive(Debug, Error)]
pub enum MarketplaceError {
    /// Transport-level failure.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error body from the API.
        message: String,
    },

    /// Response body did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}
