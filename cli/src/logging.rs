//! Logger installation for the CLI binary.

use log::LevelFilter;

/// Map `-v` count and `--quiet` to a log level.
///
/// `RUST_LOG`, when set, still overrides the result.
#[must_use]
pub const fn level_for(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install `env_logger` on stderr at the level implied by the flags.
pub fn init(verbosity: u8, quiet: bool) {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level_for(verbosity, quiet))
        .parse_default_env()
        .format_timestamp(None)
        .target(env_logger::Target::Stderr);
    if builder.try_init().is_err() {
        // A logger is already installed (tests); keep it.
    }
}
