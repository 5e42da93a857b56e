//! Layered publish inputs: flags and environment over an optional TOML file.
//!
//! The file holds a single `[publish]` table whose keys match the flag names:
//!
//! ```toml
//! [publish]
//! universe-id = 123
//! place-id = "456"
//! path = "build/game.rbxl"
//! max-retries = 5
//! ```
//!
//! Values are passed on unvalidated; the engine's validator decides whether
//! they are usable.

use camino::Utf8Path;
use log::debug;
use place_publish::{RawInputs, RawValue};
use serde::Deserialize;

use crate::cli::Cli;
use crate::error::{CliError, Result};

/// On-disk configuration file layout.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    publish: RawInputs,
}

/// Collect raw inputs from the command line, falling back to the config file.
///
/// Blank flag or environment values count as absent, because GitHub Actions
/// exports every declared input even when the workflow leaves it unset.
///
/// # Errors
///
/// Returns an error if the configuration file cannot be read or parsed.
pub fn resolve_inputs(cli: &Cli) -> Result<RawInputs> {
    let from_flags = RawInputs {
        universe_id: flag_value(cli.universe_id.as_deref()),
        place_id: flag_value(cli.place_id.as_deref()),
        api_key: flag_value(cli.api_key.as_deref()),
        path: flag_value(cli.path.as_deref()),
        max_retries: flag_value(cli.max_retries.as_deref()),
    };
    let from_file = match cli.config.as_deref() {
        Some(path) => load_config_file(path)?,
        None => RawInputs::default(),
    };
    Ok(from_flags.layered_over(from_file))
}

/// Read and parse the `[publish]` table from a configuration file.
///
/// # Errors
///
/// Returns [`CliError::ConfigRead`] or [`CliError::ConfigParse`].
pub fn load_config_file(path: &Utf8Path) -> Result<RawInputs> {
    debug!("loading publish inputs from {path}");
    let contents = std::fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
        path: path.to_owned(),
        source,
    })?;
    parse_config(&contents).map_err(|source| CliError::ConfigParse {
        path: path.to_owned(),
        source: Box::new(source),
    })
}

fn parse_config(contents: &str) -> std::result::Result<RawInputs, toml::de::Error> {
    toml::from_str::<ConfigFile>(contents).map(|file| file.publish)
}

fn flag_value(value: Option<&str>) -> Option<RawValue> {
    value
        .filter(|text| !text.trim().is_empty())
        .map(RawValue::from)
}
