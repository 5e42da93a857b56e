//! The closed result type returned by the publish engine.

use std::fmt;
use std::num::NonZeroU64;

use crate::error::{TransportError, ValidationError};

/// Lowest HTTP status treated as a server error.
pub const SERVER_ERROR_STATUS: u16 = 500;

/// A published place version number. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VersionNumber(NonZeroU64);

impl VersionNumber {
    /// Wrap a version number reported by the API.
    #[must_use]
    pub const fn new(version: NonZeroU64) -> Self {
        Self(version)
    }

    /// The version number as a plain integer.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for VersionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a failure originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Inputs were rejected before any network traffic.
    Validation,
    /// No HTTP response was obtained.
    Transport,
    /// The API answered with a structured error code and message.
    Remote,
    /// The API answered with a body matching no known shape.
    Unclassified,
}

/// A terminal publish failure with a human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    kind: FailureKind,
    reason: String,
    status_code: Option<u16>,
}

impl Failure {
    /// Create a failure. `status_code` should be present exactly when the
    /// failure came from an HTTP response.
    #[must_use]
    pub fn new(kind: FailureKind, reason: impl Into<String>, status_code: Option<u16>) -> Self {
        Self {
            kind,
            reason: reason.into(),
            status_code,
        }
    }

    /// The failure class.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        self.kind
    }

    /// The human-readable reason.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// The HTTP status, if the failure came from a response.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    /// Whether the failure carries a server-error status.
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status_code
            .is_some_and(|status| status >= SERVER_ERROR_STATUS)
    }

    /// Whether the status suggests the API key was rejected.
    #[must_use]
    pub const fn suggests_invalid_credential(&self) -> bool {
        matches!(self.status_code, Some(401 | 403))
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason)
    }
}

impl From<ValidationError> for Failure {
    fn from(err: ValidationError) -> Self {
        Self::new(FailureKind::Validation, err.to_string(), None)
    }
}

impl From<TransportError> for Failure {
    fn from(err: TransportError) -> Self {
        Self::new(FailureKind::Transport, err.to_string(), None)
    }
}

/// The only value the engine hands back to its caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The place was published.
    Success {
        /// The version the API assigned.
        version_number: VersionNumber,
    },
    /// Publishing did not happen.
    Failure(Failure),
}

impl Outcome {
    /// Returns true for [`Outcome::Success`].
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The published version, if any.
    #[must_use]
    pub const fn version_number(&self) -> Option<VersionNumber> {
        match self {
            Self::Success { version_number } => Some(*version_number),
            Self::Failure(_) => None,
        }
    }

    /// The failure, if any.
    #[must_use]
    pub const fn failure(&self) -> Option<&Failure> {
        match self {
            Self::Success { .. } => None,
            Self::Failure(failure) => Some(failure),
        }
    }
}

impl From<Failure> for Outcome {
    fn from(failure: Failure) -> Self {
        Self::Failure(failure)
    }
}
