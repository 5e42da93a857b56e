//! Reading the place file named by a validated publish target.

use log::info;
use place_publish::error::ValidationError;
use place_publish::request::{PublishRequest, PublishTarget};

/// Read the artifact at `target.path()` and complete the publish request.
///
/// # Errors
///
/// Returns [`ValidationError::UnreadableArtifact`] when the file cannot be
/// read.
pub fn load_request(target: PublishTarget) -> Result<PublishRequest, ValidationError> {
    let bytes = std::fs::read(target.path()).map_err(|err| ValidationError::UnreadableArtifact {
        path: target.path().to_owned(),
        reason: err.to_string(),
    })?;
    info!("read {} bytes from {}", bytes.len(), target.path());
    Ok(target.into_request(bytes))
}
