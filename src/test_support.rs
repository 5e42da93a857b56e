//! Scripted transport for tests that need a sequence of responses.
//!
//! Enabled for unit tests and, through the `test-support` feature, for the
//! behaviour suites under `tests/`.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use crate::classify::ResponseBody;
use crate::error::TransportError;
use crate::request::{PublishRequest, RawInputs, validate};
use crate::transport::{PublishTransport, RawResponse};

/// A [`PublishTransport`] that replays queued replies in order.
///
/// Once the queue is empty every further call yields a
/// [`TransportError::Setup`] naming the exhausted script, so an unexpected
/// extra attempt shows up as a failed outcome rather than a panic.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    replies: RefCell<VecDeque<Result<RawResponse, TransportError>>>,
    calls: Cell<usize>,
}

impl ScriptedTransport {
    /// Create an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response with the given status and body text.
    #[must_use]
    pub fn then_respond(self, status: u16, body: &str) -> Self {
        self.replies.borrow_mut().push_back(Ok(RawResponse {
            status,
            body: ResponseBody::from(body),
        }));
        self
    }

    /// Queue the same response `times` times.
    #[must_use]
    pub fn then_respond_repeatedly(self, times: usize, status: u16, body: &str) -> Self {
        (0..times).fold(self, |script, _| script.then_respond(status, body))
    }

    /// Queue a transport failure.
    #[must_use]
    pub fn then_fail(self, error: TransportError) -> Self {
        self.replies.borrow_mut().push_back(Err(error));
        self
    }

    /// Number of calls made so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl PublishTransport for ScriptedTransport {
    fn send(&self, _request: &PublishRequest) -> Result<RawResponse, TransportError> {
        self.calls.set(self.calls.get().saturating_add(1));
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| {
                Err(TransportError::Setup {
                    message: "scripted transport exhausted".to_owned(),
                })
            })
    }
}

/// Build a valid binary-format request with the given retry budget.
///
/// # Panics
///
/// Never in practice: the fixed inputs always validate.
#[must_use]
pub fn sample_request(max_retries: u32) -> PublishRequest {
    let inputs = RawInputs {
        universe_id: Some("1818".into()),
        place_id: Some("4242".into()),
        api_key: Some("test-api-key".into()),
        path: Some("build/game.rbxl".into()),
        max_retries: Some(max_retries.to_string().into()),
    };
    match validate(&inputs) {
        Ok(target) => target.into_request(b"fake place".to_vec()),
        Err(err) => panic!("sample inputs should validate: {err}"),
    }
}
