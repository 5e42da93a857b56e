//! Error types for input validation and the HTTP transport.
//!
//! Neither type ever escapes the engine as a `Result`: both convert into a
//! [`Failure`](crate::outcome::Failure) whose reason is the error's display
//! string.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Reasons why raw inputs could not become a publish request.
///
/// Variants are listed in the order the validator checks them; only the
/// first failing field is ever reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The universe id was absent, zero, negative, or not an integer.
    #[error("universe id was not valid")]
    InvalidUniverseId,

    /// The place id was absent, zero, negative, or not an integer.
    #[error("place id was not valid")]
    InvalidPlaceId,

    /// No API key text was supplied.
    #[error("missing API key")]
    MissingApiKey,

    /// No artifact path was supplied.
    #[error("missing file path")]
    MissingPath,

    /// The artifact path does not end with a recognised place extension.
    #[error("invalid file format: {path} (expected a .rbxl or .rbxlx file)")]
    InvalidFormat {
        /// The rejected path.
        path: String,
    },

    /// The retry count was present but not a non-negative integer.
    #[error("max retries was not valid")]
    InvalidMaxRetries,

    /// The artifact file could not be read.
    #[error("unable to read file at \"{path}\": {reason}")]
    UnreadableArtifact {
        /// Path that was read.
        path: Utf8PathBuf,
        /// Description of the underlying I/O error.
        reason: String,
    },
}

/// Failures that happen before a response status is available.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request was sent but nothing usable came back: connection
    /// refused, DNS failure, timeout, or a broken stream.
    #[error("no response from server")]
    NoResponse {
        /// Transport-level detail, kept for logging only.
        detail: String,
    },

    /// The request could not be built or sent at all.
    #[error("error: {message}")]
    Setup {
        /// Description of what went wrong.
        message: String,
    },
}
