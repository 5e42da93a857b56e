//! CLI argument definitions for the place publisher.
//!
//! Every publish input can come from a flag or from the environment variable
//! GitHub Actions sets for an action input of the same name, so the binary
//! works unchanged as a workflow step.

use std::fmt;

use camino::Utf8PathBuf;
use clap::Parser;
use place_publish::transport::{DEFAULT_API_BASE_URL, DEFAULT_TIMEOUT};

/// Publish a Roblox place file through Open Cloud.
#[derive(Parser, Clone)]
#[command(name = "place-publish")]
#[command(version, about)]
#[command(long_about = concat!(
    "Publish a Roblox place file through the Open Cloud place versions API.\n\n",
    "The place is uploaded as a new published version. Server errors (5xx) are ",
    "retried up to --max-retries times; client errors and connection failures ",
    "stop the run immediately.\n\n",
    "Inputs may be given as flags, as GitHub Actions inputs (INPUT_* variables), ",
    "or in a TOML file passed with --config. Flags and environment variables ",
    "take precedence over the file.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Publish a binary place file:\n",
    "    $ place-publish --universe-id 123 --place-id 456 --api-key $KEY --path game.rbxl\n\n",
    "  Read inputs from a config file and print JSON:\n",
    "    $ place-publish --config publish.toml --json\n",
))]
pub struct Cli {
    /// Universe (experience) id.
    #[arg(long, value_name = "ID", env = "INPUT_UNIVERSE-ID")]
    pub universe_id: Option<String>,

    /// Place id within the universe.
    #[arg(long, value_name = "ID", env = "INPUT_PLACE-ID")]
    pub place_id: Option<String>,

    /// Open Cloud API key with place publishing permission.
    #[arg(long, value_name = "KEY", env = "INPUT_API-KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Path to the .rbxl or .rbxlx place file.
    #[arg(long, value_name = "FILE", env = "INPUT_PATH")]
    pub path: Option<String>,

    /// Retries allowed after server errors [default: 3].
    #[arg(long, value_name = "N", env = "INPUT_MAX-RETRIES")]
    pub max_retries: Option<String>,

    /// TOML file with a [publish] table of inputs.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<Utf8PathBuf>,

    /// Base URL of the Open Cloud API.
    #[arg(long, value_name = "URL", default_value = DEFAULT_API_BASE_URL)]
    pub api_base_url: String,

    /// Timeout for each publish call, in seconds.
    #[arg(long, value_name = "SECONDS", default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout_secs: u64,

    /// Pause between retries, in milliseconds.
    #[arg(long, value_name = "MILLIS", default_value_t = 0)]
    pub retry_delay_ms: u64,

    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,

    /// Increase log verbosity (repeatable: -v, -vv, -vvv).
    #[arg(
        short,
        long = "verbose",
        action = clap::ArgAction::Count,
        conflicts_with = "quiet"
    )]
    pub verbosity: u8,

    /// Suppress progress output (the result is still printed).
    #[arg(short, long, conflicts_with = "verbosity")]
    pub quiet: bool,

    /// GitHub Actions output file to append results to.
    #[arg(long, value_name = "FILE", env = "GITHUB_OUTPUT")]
    pub github_output: Option<Utf8PathBuf>,
}

impl fmt::Debug for Cli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cli")
            .field("universe_id", &self.universe_id)
            .field("place_id", &self.place_id)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("path", &self.path)
            .field("max_retries", &self.max_retries)
            .field("config", &self.config)
            .field("api_base_url", &self.api_base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("retry_delay_ms", &self.retry_delay_ms)
            .field("json", &self.json)
            .field("verbosity", &self.verbosity)
            .field("quiet", &self.quiet)
            .field("github_output", &self.github_output)
            .finish()
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
