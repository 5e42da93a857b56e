//! Bounded retries around [`attempt_publish`].
//!
//! Attempts run strictly one after another. Only failures carrying a 5xx
//! status are retried; a success, a client error, or a transport failure ends
//! the run at once. With a budget of `N` retries the controller makes at most
//! `N + 1` calls.

use std::io::Write;
use std::time::Duration;

use log::info;

use crate::attempt::{AttemptResult, attempt_publish};
use crate::outcome::{Failure, Outcome};
use crate::request::PublishRequest;
use crate::transport::PublishTransport;

/// Hint printed when the API rejects the credential.
pub const CREDENTIAL_HINT: &str = "Make sure the given API key is valid.";

/// What the controller does after an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Make another attempt.
    Retry,
    /// Stop and return the attempt's outcome.
    Finish,
}

/// Decide whether to retry after an attempt.
///
/// `retries_used` counts retries already made, not including the first call.
#[must_use]
pub fn decide(result: &AttemptResult, retries_used: u32, max_retries: u32) -> RetryDecision {
    if result.is_retryable() && retries_used < max_retries {
        RetryDecision::Retry
    } else {
        RetryDecision::Finish
    }
}

/// Drives publish attempts until one succeeds or retrying stops making sense.
pub struct RetryController<'a> {
    transport: &'a dyn PublishTransport,
    delay: Duration,
    quiet: bool,
}

impl<'a> RetryController<'a> {
    /// Create a controller that retries immediately and reports progress.
    #[must_use]
    pub fn new(transport: &'a dyn PublishTransport) -> Self {
        Self {
            transport,
            delay: Duration::ZERO,
            quiet: false,
        }
    }

    /// Wait `delay` before each retry.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Route progress lines to the log at `info` level instead of the sink.
    #[must_use]
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Publish `request`, retrying server errors up to its retry budget.
    ///
    /// Progress lines are advisory and go to `progress`; they never influence
    /// the returned outcome.
    pub fn publish(&self, request: &PublishRequest, progress: &mut dyn Write) -> Outcome {
        let max_retries = request.max_retries();
        let mut retries_used: u32 = 0;
        let mut result = self.attempt(request, progress);

        loop {
            if let Outcome::Failure(failure) = result.outcome() {
                self.report_failure(failure, progress);
            }

            match decide(&result, retries_used, max_retries) {
                RetryDecision::Retry => {
                    retries_used = retries_used.saturating_add(1);
                    self.note(
                        progress,
                        &format!("Retrying... ({retries_used} of {max_retries})"),
                    );
                    if !self.delay.is_zero() {
                        std::thread::sleep(self.delay);
                    }
                    result = self.attempt(request, progress);
                }
                RetryDecision::Finish => {
                    self.finish(&result, retries_used, progress);
                    return result.into_outcome();
                }
            }
        }
    }

    fn attempt(&self, request: &PublishRequest, progress: &mut dyn Write) -> AttemptResult {
        self.note(
            progress,
            &format!(
                "Publishing place {} in universe {}...",
                request.place_id(),
                request.universe_id()
            ),
        );
        attempt_publish(self.transport, request)
    }

    fn report_failure(&self, failure: &Failure, progress: &mut dyn Write) {
        let line = match failure.status_code() {
            Some(status) => format!("Publishing failed with status code {status}: {failure}"),
            None => format!("Publishing failed: {failure}"),
        };
        self.note(progress, &line);
    }

    fn finish(&self, result: &AttemptResult, retries_used: u32, progress: &mut dyn Write) {
        match result.outcome() {
            Outcome::Success { version_number } => {
                self.note(
                    progress,
                    &format!("Published successfully! New version number: {version_number}"),
                );
            }
            Outcome::Failure(failure) if result.is_retryable() => {
                self.note(
                    progress,
                    &format!("Giving up after {retries_used} retries: {failure}"),
                );
            }
            Outcome::Failure(failure) if failure.suggests_invalid_credential() => {
                self.note(progress, CREDENTIAL_HINT);
            }
            Outcome::Failure(_) => {}
        }
    }

    /// Each line goes to exactly one of the sink or the log, so a verbose
    /// logger on stderr never repeats it.
    fn note(&self, progress: &mut dyn Write, line: &str) {
        if self.quiet {
            info!("{line}");
            return;
        }
        if writeln!(progress, "{line}").is_err() {
            // Progress output is best-effort.
        }
    }
}

#[cfg(test)]
#[path = "retry_tests.rs"]
mod tests;
