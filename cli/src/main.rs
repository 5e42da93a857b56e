//! Place publisher CLI entrypoint.
//!
//! Publishes a Roblox place file and exits non-zero when publishing fails.

use clap::Parser;
use place_publish::Outcome;
use place_publish_cli::cli::Cli;
use place_publish_cli::error::Result;
use place_publish_cli::logging;
use place_publish_cli::publish_flow::{Sinks, run};
use std::io::Write;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbosity, cli.quiet);

    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    let run_result = run(
        &cli,
        &mut Sinks {
            stdout: &mut stdout,
            stderr: &mut stderr,
        },
    );
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn exit_code_for_run_result(result: Result<Outcome>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(outcome) if outcome.is_success() => 0,
        Ok(_) => 1,
        Err(err) => {
            if writeln!(stderr, "{err}").is_err() {
                // Best-effort logging; ignore write failures.
            }
            1
        }
    }
}
