/*!
 * Error types for the dotwai application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when talking to a completion gateway
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors that can occur during a translation run
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the completion gateway
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// A result slot is empty even though the work queue was fully drained.
    /// This indicates a dispatcher or worker bug and must never be papered over.
    #[error("internal consistency error: paragraph {index} has no translation despite a completed run")]
    MissingParagraph {
        /// Index of the paragraph with no translation
        index: usize,
    },

    /// A worker tried to write a slot that was already filled.
    /// The dispatcher hands out each index exactly once, so this is a programming error.
    #[error("internal consistency error: result slot {index} was written twice")]
    SlotAlreadyFilled {
        /// Index of the slot that was double-written
        index: usize,
    },

    /// The configured retry budget was exhausted for one paragraph
    #[error("gave up on paragraph {index} after {attempts} failed attempts")]
    RetriesExhausted {
        /// Index of the paragraph that could not be translated
        index: usize,
        /// Number of attempts made
        attempts: u32,
    },
}
