//! Error types for email generation.

use thiserror::Error;

/// Errors raised by the generation session and its streaming backend.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// `start()` was called without a target customer.
    #[error("no customer selected for email generation")]
    MissingCustomer,

    /// The HTTP request to the completion backend failed.
    #[error("completion request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The completion backend rejected the request.
    #[error("completion API error {status}: {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, verbatim.
        body: String,
    },

    /// The stream broke after it was opened (network fault, bad frame).
    #[error("completion stream failed: {0}")]
    Stream(String),
}
