//! A single publish attempt.

use log::debug;

use crate::classify::classify;
use crate::outcome::{Failure, Outcome, SERVER_ERROR_STATUS};
use crate::request::PublishRequest;
use crate::transport::{PublishTransport, RawResponse};

/// The classified result of one attempt, plus the status it was derived from.
///
/// Only [`RetryController`](crate::retry::RetryController) looks at the
/// status; callers of the engine see the [`Outcome`] alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptResult {
    outcome: Outcome,
    status: Option<u16>,
}

impl AttemptResult {
    /// The classified outcome.
    #[must_use]
    pub const fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// The HTTP status, or `None` when no response arrived.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        self.status
    }

    /// Whether another attempt could succeed: only failures carrying a
    /// server-error status qualify.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self.outcome, Outcome::Failure(_))
            && self
                .status
                .is_some_and(|status| status >= SERVER_ERROR_STATUS)
    }

    /// Consume the result, keeping the outcome.
    #[must_use]
    pub fn into_outcome(self) -> Outcome {
        self.outcome
    }
}

/// Perform exactly one publish call and classify what came back.
#[must_use]
pub fn attempt_publish(transport: &dyn PublishTransport, request: &PublishRequest) -> AttemptResult {
    match transport.send(request) {
        Ok(RawResponse { status, body }) => {
            debug!("classifying response with status {status}");
            AttemptResult {
                outcome: classify(status, &body),
                status: Some(status),
            }
        }
        Err(err) => {
            debug!("publish call failed without a response: {err:?}");
            AttemptResult {
                outcome: Outcome::Failure(Failure::from(err)),
                status: None,
            }
        }
    }
}
