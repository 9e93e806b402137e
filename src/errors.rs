/*!
 * Error types for the termlock application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when talking to the external translation engine
#[derive(Error, Debug)]
pub enum ProviderError {
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

    /// Request timed out
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),
}

/// Recoverable problems while building the terminology table.
///
/// These never abort a session; they degrade term coverage and are
/// surfaced to the caller as diagnostics alongside the loaded table.
#[derive(Error, Debug)]
pub enum TerminologyError {
    /// A term source (builtin store or user file) could not be read
    #[error("Term source unavailable: {0}")]
    SourceUnavailable(String),

    /// A user file had too few columns to be usable
    #[error("Malformed term source: {0}")]
    MalformedSource(String),
}

/// Errors that can occur during a single translate operation
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the engine API; the only fatal failure for a request
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The requested language pair is unusable
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the engine provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from terminology loading
    #[error("Terminology error: {0}")]
    Terminology(#[from] TerminologyError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
