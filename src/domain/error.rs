//! Error types for the animescope plugin.
//!
//! This module defines the centralized error type [`AnimescopeError`] and a type
//! alias [`Result`] used throughout the crate. Provider-facing variants never
//! reach the renderer: the query coordinator converts them into the `Failed`
//! load phase and a notice string.

use thiserror::Error;

/// The main error type for animescope operations.
///
/// # Examples
///
/// ```
/// use animescope::AnimescopeError;
///
/// let err = AnimescopeError::Transport { status: 502, message: "bad gateway".to_string() };
/// assert!(err.is_provider_failure());
/// ```
#[derive(Debug, Error)]
pub enum AnimescopeError {
    /// The outbound query did not complete with a success status.
    ///
    /// Covers network failures reported by the host as well as non-2xx
    /// responses from the provider.
    #[error("query failed with HTTP {status}: {message}")]
    Transport {
        /// HTTP status code reported for the request.
        status: u16,
        /// Short excerpt of the response body, if any.
        message: String,
    },

    /// The response body was not a JSON array of well-shaped records.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The outbound request body could not be encoded.
    #[error("failed to encode request: {0}")]
    Encode(#[from] serde_json::Error),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme file could not be read or parsed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Genre vocabulary file could not be read, parsed, or was empty.
    #[error("Vocabulary error: {0}")]
    Vocabulary(String),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AnimescopeError {
    /// Returns `true` for errors that originate at the query provider boundary.
    #[must_use]
    pub const fn is_provider_failure(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::MalformedResponse(_))
    }
}

/// A specialized `Result` type for animescope operations.
pub type Result<T> = std::result::Result<T, AnimescopeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_error_message_includes_status() {
        let err = AnimescopeError::Transport {
            status: 500,
            message: "Error getting recommendations".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "query failed with HTTP 500: Error getting recommendations"
        );
    }

    #[test]
    fn only_wire_errors_count_as_provider_failures() {
        assert!(AnimescopeError::MalformedResponse("x".into()).is_provider_failure());
        assert!(!AnimescopeError::Theme("x".into()).is_provider_failure());
        assert!(!AnimescopeError::Config("x".into()).is_provider_failure());
    }
}
