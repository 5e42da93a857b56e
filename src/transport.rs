//! HTTP transport for the place versions endpoint.
//!
//! The [`PublishTransport`] trait is the seam between the engine and the
//! network, so tests can script responses without a server. [`HttpTransport`]
//! is the production implementation backed by `ureq`.

use std::time::Duration;

use log::{debug, warn};

use crate::classify::ResponseBody;
use crate::error::TransportError;
use crate::request::{PlaceId, PublishRequest, UniverseId};

/// Production Open Cloud host.
pub const DEFAULT_API_BASE_URL: &str = "https://apis.roblox.com";

/// Upper bound on one publish call, including the upload.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Header carrying the Open Cloud API key.
const API_KEY_HEADER: &str = "x-api-key";

/// A status code and body as returned by the server.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Undecoded response body.
    pub body: ResponseBody,
}

/// Sends a single publish call.
#[cfg_attr(test, mockall::automock)]
pub trait PublishTransport {
    /// Send `request` once and return whatever the server answered.
    ///
    /// Every HTTP status, including 4xx and 5xx, is returned as a
    /// [`RawResponse`]; only failures without a response are errors.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::NoResponse`] when the server could not be
    /// reached or did not answer, and [`TransportError::Setup`] when the
    /// request could not be built.
    fn send(&self, request: &PublishRequest) -> Result<RawResponse, TransportError>;
}

/// Settings for [`HttpTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Scheme and host of the API, without a trailing path.
    pub base_url: String,
    /// Global timeout for one call.
    pub timeout: Duration,
    /// Whether to honour `HTTP_PROXY`-style environment variables.
    pub use_env_proxy: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            use_env_proxy: true,
        }
    }
}

/// `ureq`-backed transport.
pub struct HttpTransport {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpTransport {
    /// Build a transport with its own connection pool.
    #[must_use]
    pub fn new(config: &TransportConfig) -> Self {
        let mut builder = ureq::Agent::config_builder()
            .timeout_global(Some(config.timeout))
            .http_status_as_error(false);
        if !config.use_env_proxy {
            builder = builder.proxy(None);
        }
        Self {
            agent: ureq::Agent::new_with_config(builder.build()),
            base_url: config.base_url.trim_end_matches('/').to_owned(),
        }
    }
}

impl PublishTransport for HttpTransport {
    fn send(&self, request: &PublishRequest) -> Result<RawResponse, TransportError> {
        let url = versions_url(&self.base_url, request.universe_id(), request.place_id());
        debug!(
            "POST {url} ({} bytes, {})",
            request.artifact().len(),
            request.kind().content_type()
        );
        let response = self
            .agent
            .post(&url)
            .header("Content-Type", request.kind().content_type())
            .header(API_KEY_HEADER, request.api_key().expose())
            .send(request.artifact())
            .map_err(map_ureq_error)?;

        let status = response.status().as_u16();
        let body = response.into_body().read_to_vec().unwrap_or_else(|err| {
            warn!("failed to read response body for status {status}: {err}");
            Vec::new()
        });
        debug!("received status {status} with {} body bytes", body.len());
        Ok(RawResponse {
            status,
            body: ResponseBody::Raw(body),
        })
    }
}

/// Build the publish URL for a place.
///
/// # Examples
///
/// ```
/// use std::num::NonZeroU64;
/// use place_publish::request::{PlaceId, UniverseId};
/// use place_publish::transport::versions_url;
///
/// let universe = UniverseId::new(NonZeroU64::new(10).expect("non-zero"));
/// let place = PlaceId::new(NonZeroU64::new(20).expect("non-zero"));
/// assert_eq!(
///     versions_url("https://apis.roblox.com", universe, place),
///     "https://apis.roblox.com/universes/v1/10/places/20/versions?versionType=Published",
/// );
/// ```
#[must_use]
pub fn versions_url(base_url: &str, universe_id: UniverseId, place_id: PlaceId) -> String {
    format!("{base_url}/universes/v1/{universe_id}/places/{place_id}/versions?versionType=Published")
}

/// Sort a `ureq` failure into "no response" versus "could not send".
fn map_ureq_error(err: ureq::Error) -> TransportError {
    match err {
        ureq::Error::Io(_)
        | ureq::Error::Timeout(_)
        | ureq::Error::HostNotFound
        | ureq::Error::ConnectionFailed
        | ureq::Error::Protocol(_) => TransportError::NoResponse {
            detail: err.to_string(),
        },
        other => TransportError::Setup {
            message: other.to_string(),
        },
    }
}
