/*!
 * Error types for the polytrans library.
 *
 * This module contains custom error types for the provider and dispatch
 * layers, using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when invoking a translation or OCR provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Required configuration (endpoint URL, credentials) is missing
    #[error("Incomplete service configuration: {0}")]
    Configuration(String),

    /// The shared language enum has no vendor mapping for this service
    #[error("{service} does not support language {language}")]
    UnsupportedLanguage {
        /// Display name of the offending service
        service: String,
        /// Display name of the unmapped language
        language: String,
    },

    /// Error when making the network request fails
    #[error("Request failed: {0}")]
    Transport(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    Api {
        /// HTTP status code
        status_code: u16,
        /// Error body from the API
        message: String,
    },

    /// Empty, undecodable or blank response; carries the raw payload
    #[error("Failed to parse service response: {0}")]
    Parse(String),

    /// Well-formed response signaling an application-level failure
    #[error("Service reported an error: {0}")]
    ProviderLogic(String),

    /// The invoked translate method is not meaningful for this provider kind
    #[error("Operation not supported: {0}")]
    NotSupported(String),

    /// The call was aborted by a cancellation token; never shown as a failure
    #[error("Call was cancelled")]
    Cancelled,
}

impl ProviderError {
    /// Whether this error came from a cancellation token rather than a fault
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ProviderError::Cancelled)
    }
}

/// Errors that can occur in the dispatch layer itself
#[derive(Error, Debug)]
pub enum DispatchError {
    /// No provider is currently enabled and active
    #[error("No translation service is enabled")]
    NoActiveProvider,

    /// Error from the active provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
}

/// Main library error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from the dispatcher
    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}
