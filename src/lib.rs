//! Publish-with-retry engine for Roblox place files.
//!
//! The crate turns loosely-typed inputs into a validated [`PublishRequest`],
//! uploads the place through the Open Cloud place versions endpoint, and
//! classifies whatever the API answers into a closed [`Outcome`]. Server
//! errors are retried within a bounded budget; everything else ends the run.
//!
//! Sourcing configuration, reading the place file, and rendering the result
//! are left to the caller (see the `place-publish-cli` crate).
//!
//! # Modules
//!
//! - [`coerce`] - Lenient integer and string coercions
//! - [`request`] - Raw inputs, validation, and the publish request
//! - [`classify`] - Response body classification
//! - [`transport`] - Transport trait and the `ureq` implementation
//! - [`attempt`] - A single classified publish call
//! - [`retry`] - Bounded retries over attempts
//! - [`outcome`] - Success and failure results
//! - [`error`] - Validation and transport errors
//!
//! # Examples
//!
//! ```no_run
//! use place_publish::request::{RawInputs, validate};
//! use place_publish::retry::RetryController;
//! use place_publish::transport::{HttpTransport, TransportConfig};
//!
//! let inputs = RawInputs {
//!     universe_id: Some("123".into()),
//!     place_id: Some("456".into()),
//!     api_key: Some("key".into()),
//!     path: Some("game.rbxl".into()),
//!     max_retries: Some("3".into()),
//! };
//! let target = validate(&inputs).expect("valid inputs");
//! let bytes = std::fs::read(target.path()).expect("readable place file");
//! let request = target.into_request(bytes);
//!
//! let transport = HttpTransport::new(&TransportConfig::default());
//! let outcome = RetryController::new(&transport).publish(&request, &mut std::io::stderr());
//! println!("{outcome:?}");
//! ```

pub mod attempt;
pub mod classify;
pub mod coerce;
pub mod error;
pub mod outcome;
pub mod request;
pub mod retry;
pub mod transport;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use outcome::{Failure, FailureKind, Outcome, VersionNumber};
pub use request::{PublishRequest, RawInputs, RawValue, validate};
pub use retry::RetryController;
