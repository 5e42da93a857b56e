//! Error types for the publishing CLI.
//!
//! These cover the plumbing around the engine: configuration files and
//! output sinks. Publish failures themselves are never errors here; they
//! arrive as [`place_publish::Outcome::Failure`].

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that stop the CLI before or after publishing.
#[derive(Debug, Error)]
pub enum CliError {
    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        /// Path to the configuration file.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML or has unknown keys.
    #[error("invalid config file {path}: {source}")]
    ConfigParse {
        /// Path to the configuration file.
        path: Utf8PathBuf,
        /// The underlying parse error.
        #[source]
        source: Box<toml::de::Error>,
    },

    /// The GitHub Actions output file could not be written.
    #[error("failed to write GitHub output file {path}: {source}")]
    GithubOutput {
        /// Path to the output file.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Writing the report to stdout failed.
    #[error("failed to write output")]
    WriteFailed {
        /// The underlying error that caused the write to fail.
        #[source]
        source: std::io::Error,
    },
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
