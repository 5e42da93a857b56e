//! Classification of publish API responses.
//!
//! The place versions endpoint does not use its status codes consistently:
//! a success body can arrive with an error status and vice versa. The body
//! shape is therefore the only reliable signal, and [`classify`] inspects it
//! in a fixed order:
//!
//! 1. decode the body as JSON (undecodable bodies skip to step 4);
//! 2. an object with a positive `versionNumber` is a success, even when error
//!    fields are also present;
//! 3. an object with a positive `code` and non-empty `message` is a remote
//!    error;
//! 4. anything else is an unclassified response.

use std::borrow::Cow;

use serde_json::Value;

use crate::coerce::Coerce;
use crate::outcome::{Failure, FailureKind, Outcome, VersionNumber};

/// Longest body rendering kept in an "unknown response" reason.
const RENDER_LIMIT: usize = 1024;

/// A response body as received, before classification.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// Undecoded bytes straight off the wire.
    Raw(Vec<u8>),
    /// A body that was already decoded upstream.
    Structured(Value),
}

impl From<&str> for ResponseBody {
    fn from(text: &str) -> Self {
        Self::Raw(text.as_bytes().to_vec())
    }
}

impl From<Value> for ResponseBody {
    fn from(value: Value) -> Self {
        Self::Structured(value)
    }
}

/// Map an HTTP status and body to exactly one [`Outcome`].
///
/// The function is pure: the same inputs always produce the same outcome.
///
/// # Examples
///
/// ```
/// use place_publish::classify::classify;
///
/// let outcome = classify(200, &r#"{"versionNumber": 42}"#.into());
/// assert_eq!(outcome.version_number().map(|v| v.get()), Some(42));
///
/// let outcome = classify(400, &r#"{"code": 7, "message": "bad request"}"#.into());
/// assert_eq!(
///     outcome.failure().map(|f| f.reason()),
///     Some("failed with error code #7: bad request"),
/// );
/// ```
#[must_use]
pub fn classify(status: u16, body: &ResponseBody) -> Outcome {
    match decode(body) {
        Some(value) => classify_value(status, &value),
        None => unclassified(status, &render_undecodable(body)),
    }
}

fn decode(body: &ResponseBody) -> Option<Cow<'_, Value>> {
    match body {
        ResponseBody::Structured(value) => Some(Cow::Borrowed(value)),
        ResponseBody::Raw(bytes) => serde_json::from_slice(bytes).ok().map(Cow::Owned),
    }
}

fn classify_value(status: u16, value: &Value) -> Outcome {
    if let Value::Object(record) = value {
        if let Some(version) = record
            .get("versionNumber")
            .and_then(|field| field.as_positive_integer())
        {
            return Outcome::Success {
                version_number: VersionNumber::new(version),
            };
        }

        let code = record
            .get("code")
            .and_then(|field| field.as_positive_integer());
        let message = record
            .get("message")
            .and_then(|field| field.as_non_empty_str());
        if let (Some(code), Some(message)) = (code, message) {
            return Outcome::Failure(Failure::new(
                FailureKind::Remote,
                format!("failed with error code #{code}: {message}"),
                Some(status),
            ));
        }
    }
    unclassified(status, &value.to_string())
}

fn unclassified(status: u16, rendering: &str) -> Outcome {
    Outcome::Failure(Failure::new(
        FailureKind::Unclassified,
        format!("unknown response: {}", truncate(rendering)),
        Some(status),
    ))
}

fn render_undecodable(body: &ResponseBody) -> String {
    match body {
        ResponseBody::Raw(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        ResponseBody::Structured(value) => value.to_string(),
    }
}

fn truncate(text: &str) -> Cow<'_, str> {
    match text.char_indices().nth(RENDER_LIMIT) {
        Some((cut, _)) => Cow::Owned(format!("{}...", text.get(..cut).unwrap_or(text))),
        None => Cow::Borrowed(text),
    }
}
