//! Raw publish inputs and their validation into a [`PublishRequest`].
//!
//! Validation is split in two so that it stays free of I/O: [`validate`]
//! turns [`RawInputs`] into a [`PublishTarget`], and the caller reads the
//! artifact at [`PublishTarget::path`] before calling
//! [`PublishTarget::into_request`]. A [`PublishRequest`] can therefore only
//! exist once every field has passed its check.

use std::fmt;
use std::num::NonZeroU64;

use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;

use crate::coerce::{Coerce, parse_unsigned};
use crate::error::ValidationError;

/// Retry budget used when no retry count is configured.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// A configuration scalar as it was supplied, before any validation.
///
/// Flags and environment variables always produce text; TOML configuration
/// files may also produce integers.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// An integer scalar.
    Integer(i64),
    /// A text scalar.
    Text(String),
}

impl RawValue {
    /// Returns the value as an integer greater than or equal to zero.
    #[must_use]
    pub fn as_non_negative_integer(&self) -> Option<u64> {
        match self {
            Self::Integer(value) => u64::try_from(*value).ok(),
            Self::Text(text) => parse_unsigned(text),
        }
    }

    /// Whether the value is text made only of whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(text) if text.trim().is_empty())
    }
}

impl Coerce for RawValue {
    fn as_positive_integer(&self) -> Option<NonZeroU64> {
        match self {
            Self::Integer(value) => u64::try_from(*value).ok().and_then(NonZeroU64::new),
            Self::Text(text) => text.as_positive_integer(),
        }
    }

    fn as_non_empty_str(&self) -> Option<&str> {
        match self {
            Self::Integer(_) => None,
            Self::Text(text) => text.as_non_empty_str(),
        }
    }
}

impl fmt::Debug for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Text(text) => write!(f, "{text:?}"),
        }
    }
}

impl From<&str> for RawValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for RawValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

/// Unvalidated publish inputs.
///
/// Field names deserialise from kebab-case so the same keys work in a TOML
/// `[publish]` table and as CLI flag names.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct RawInputs {
    /// Universe (experience) id.
    pub universe_id: Option<RawValue>,
    /// Place id within the universe.
    pub place_id: Option<RawValue>,
    /// Open Cloud API key.
    pub api_key: Option<RawValue>,
    /// Path to the `.rbxl` or `.rbxlx` file.
    pub path: Option<RawValue>,
    /// Retries allowed after server errors.
    pub max_retries: Option<RawValue>,
}

impl RawInputs {
    /// Fill every field missing from `self` with the one from `lower`.
    #[must_use]
    pub fn layered_over(self, lower: Self) -> Self {
        Self {
            universe_id: self.universe_id.or(lower.universe_id),
            place_id: self.place_id.or(lower.place_id),
            api_key: self.api_key.or(lower.api_key),
            path: self.path.or(lower.path),
            max_retries: self.max_retries.or(lower.max_retries),
        }
    }
}

impl fmt::Debug for RawInputs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawInputs")
            .field("universe_id", &self.universe_id)
            .field("place_id", &self.place_id)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("path", &self.path)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

/// Identifier of the universe that owns the place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniverseId(NonZeroU64);

impl UniverseId {
    /// Wrap a universe id.
    #[must_use]
    pub const fn new(id: NonZeroU64) -> Self {
        Self(id)
    }

    /// The id as a plain integer.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for UniverseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of the place being published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlaceId(NonZeroU64);

impl PlaceId {
    /// Wrap a place id.
    #[must_use]
    pub const fn new(id: NonZeroU64) -> Self {
        Self(id)
    }

    /// The id as a plain integer.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An opaque Open Cloud API key.
///
/// Not `Display`; `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The raw key, for the credential header only.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

/// Serialisation format of a place file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// Binary place file (`.rbxl`).
    Binary,
    /// XML place file (`.rbxlx`).
    Xml,
}

impl ArtifactKind {
    /// Derive the kind from a file path's extension. Matching is exact and
    /// case-sensitive.
    ///
    /// # Examples
    ///
    /// ```
    /// use place_publish::request::ArtifactKind;
    ///
    /// assert_eq!(ArtifactKind::from_path("game.rbxl"), Some(ArtifactKind::Binary));
    /// assert_eq!(ArtifactKind::from_path("game.rbxlx"), Some(ArtifactKind::Xml));
    /// assert_eq!(ArtifactKind::from_path("game.rbxm"), None);
    /// ```
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        if path.ends_with(".rbxl") {
            Some(Self::Binary)
        } else if path.ends_with(".rbxlx") {
            Some(Self::Xml)
        } else {
            None
        }
    }

    /// The `Content-Type` sent with an artifact of this kind.
    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Binary => "application/octet-stream",
            Self::Xml => "application/xml",
        }
    }
}

/// Validated inputs, still waiting for the artifact bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishTarget {
    universe_id: UniverseId,
    place_id: PlaceId,
    api_key: ApiKey,
    path: Utf8PathBuf,
    kind: ArtifactKind,
    max_retries: u32,
}

impl PublishTarget {
    /// Path of the artifact to read.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Format of the artifact.
    #[must_use]
    pub const fn kind(&self) -> ArtifactKind {
        self.kind
    }

    /// Attach the artifact bytes, completing the request.
    #[must_use]
    pub fn into_request(self, artifact: Vec<u8>) -> PublishRequest {
        PublishRequest {
            universe_id: self.universe_id,
            place_id: self.place_id,
            api_key: self.api_key,
            artifact,
            kind: self.kind,
            max_retries: self.max_retries,
        }
    }
}

/// Everything needed to publish one place version. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishRequest {
    universe_id: UniverseId,
    place_id: PlaceId,
    api_key: ApiKey,
    artifact: Vec<u8>,
    kind: ArtifactKind,
    max_retries: u32,
}

impl PublishRequest {
    /// Target universe.
    #[must_use]
    pub const fn universe_id(&self) -> UniverseId {
        self.universe_id
    }

    /// Target place.
    #[must_use]
    pub const fn place_id(&self) -> PlaceId {
        self.place_id
    }

    /// Credential for the API key header.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// The artifact bytes sent as the request body.
    #[must_use]
    pub fn artifact(&self) -> &[u8] {
        &self.artifact
    }

    /// Format of the artifact.
    #[must_use]
    pub const fn kind(&self) -> ArtifactKind {
        self.kind
    }

    /// Retries allowed after server errors.
    #[must_use]
    pub const fn max_retries(&self) -> u32 {
        self.max_retries
    }
}

/// Validate raw inputs, reporting only the first failing field.
///
/// Fields are checked in a fixed order: universe id, place id, API key,
/// path, file format, then retry count. An absent or blank retry count
/// falls back to [`DEFAULT_MAX_RETRIES`].
///
/// # Errors
///
/// Returns the [`ValidationError`] for the first field that fails its check.
///
/// # Examples
///
/// ```
/// use place_publish::request::{RawInputs, RawValue, validate};
///
/// let inputs = RawInputs {
///     universe_id: Some("123".into()),
///     place_id: Some(RawValue::Integer(456)),
///     api_key: Some("secret".into()),
///     path: Some("build/game.rbxl".into()),
///     max_retries: None,
/// };
/// let target = validate(&inputs).expect("inputs are valid");
/// assert_eq!(target.path().as_str(), "build/game.rbxl");
/// ```
pub fn validate(inputs: &RawInputs) -> Result<PublishTarget, ValidationError> {
    let universe_id = inputs
        .universe_id
        .as_ref()
        .and_then(Coerce::as_positive_integer)
        .map(UniverseId::new)
        .ok_or(ValidationError::InvalidUniverseId)?;
    let place_id = inputs
        .place_id
        .as_ref()
        .and_then(Coerce::as_positive_integer)
        .map(PlaceId::new)
        .ok_or(ValidationError::InvalidPlaceId)?;
    let api_key = inputs
        .api_key
        .as_ref()
        .and_then(Coerce::as_non_empty_str)
        .map(ApiKey::new)
        .ok_or(ValidationError::MissingApiKey)?;
    let path = inputs
        .path
        .as_ref()
        .and_then(Coerce::as_non_empty_str)
        .ok_or(ValidationError::MissingPath)?;
    let kind = ArtifactKind::from_path(path).ok_or_else(|| ValidationError::InvalidFormat {
        path: path.to_owned(),
    })?;
    let max_retries = validate_max_retries(inputs.max_retries.as_ref())?;

    Ok(PublishTarget {
        universe_id,
        place_id,
        api_key,
        path: Utf8PathBuf::from(path),
        kind,
        max_retries,
    })
}

fn validate_max_retries(value: Option<&RawValue>) -> Result<u32, ValidationError> {
    match value {
        None => Ok(DEFAULT_MAX_RETRIES),
        Some(raw) if raw.is_blank() => Ok(DEFAULT_MAX_RETRIES),
        Some(raw) => raw
            .as_non_negative_integer()
            .and_then(|count| u32::try_from(count).ok())
            .ok_or(ValidationError::InvalidMaxRetries),
    }
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
