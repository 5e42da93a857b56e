//! End-to-end publish flow for the CLI binary.
//!
//! Keeps validation, file loading, publishing, and reporting together so
//! `main.rs` only parses arguments and maps the result to an exit code.

use std::io::Write;
use std::time::Duration;

use log::warn;
use place_publish::request::validate;
use place_publish::transport::{HttpTransport, PublishTransport, TransportConfig};
use place_publish::{Failure, FailureKind, Outcome, RetryController};

use crate::artifact::load_request;
use crate::cli::Cli;
use crate::config::resolve_inputs;
use crate::error::{CliError, Result};
use crate::report::{Report, append_github_outputs, write_report};

/// Output sinks for one run.
pub struct Sinks<'a> {
    /// Receives the final report.
    pub stdout: &'a mut dyn Write,
    /// Receives progress lines.
    pub stderr: &'a mut dyn Write,
}

/// Run the publish flow with the production HTTP transport.
///
/// # Errors
///
/// Returns an error only when the report cannot be written to stdout. Publish
/// failures, including an unreadable or malformed configuration file, are
/// returned as [`Outcome::Failure`] and reported like any other failure.
pub fn run(cli: &Cli, sinks: &mut Sinks<'_>) -> Result<Outcome> {
    let transport = HttpTransport::new(&TransportConfig {
        base_url: cli.api_base_url.clone(),
        timeout: Duration::from_secs(cli.timeout_secs),
        use_env_proxy: true,
    });
    run_with(cli, &transport, sinks)
}

/// Run the publish flow with an injected transport.
///
/// # Errors
///
/// See [`run`].
pub fn run_with(
    cli: &Cli,
    transport: &dyn PublishTransport,
    sinks: &mut Sinks<'_>,
) -> Result<Outcome> {
    let outcome = publish(cli, transport, sinks.stderr);
    let report = Report::from(&outcome);

    // GitHub outputs are appended before stdout is touched.
    if let Some(path) = cli.github_output.as_deref() {
        if let Err(err) = append_github_outputs(path, &report) {
            warn!("{err}");
        }
    }
    write_report(&report, cli.json, cli.github_output.is_some(), sinks.stdout)?;
    Ok(outcome)
}

fn publish(cli: &Cli, transport: &dyn PublishTransport, stderr: &mut dyn Write) -> Outcome {
    progress(cli, stderr, "Validating params...");
    let inputs = match resolve_inputs(cli) {
        Ok(inputs) => inputs,
        Err(err) => return config_failure(&err),
    };
    let target = match validate(&inputs) {
        Ok(target) => target,
        Err(err) => return Outcome::Failure(Failure::from(err)),
    };

    progress(cli, stderr, "Reading place file...");
    let request = match load_request(target) {
        Ok(request) => request,
        Err(err) => return Outcome::Failure(Failure::from(err)),
    };

    RetryController::new(transport)
        .with_delay(Duration::from_millis(cli.retry_delay_ms))
        .quiet(cli.quiet)
        .publish(&request, stderr)
}

fn config_failure(err: &CliError) -> Outcome {
    Outcome::Failure(Failure::new(
        FailureKind::Validation,
        err.to_string(),
        None,
    ))
}

fn progress(cli: &Cli, stderr: &mut dyn Write, message: &str) {
    if cli.quiet {
        return;
    }
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort progress output; ignore write failures.
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use place_publish::test_support::ScriptedTransport;

    fn parse_clean(args: &[&str]) -> Cli {
        temp_env::with_vars_unset(
            [
                "INPUT_UNIVERSE-ID",
                "INPUT_PLACE-ID",
                "INPUT_API-KEY",
                "INPUT_PATH",
                "INPUT_MAX-RETRIES",
                "GITHUB_OUTPUT",
            ],
            || Cli::parse_from(args),
        )
    }

    /// A stdout that refuses every write.
    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "closed pipe",
            ))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn run_scripted(args: &[&str], transport: &ScriptedTransport) -> (Outcome, String, String) {
        let cli = parse_clean(args);
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let outcome = run_with(
            &cli,
            transport,
            &mut Sinks {
                stdout: &mut stdout,
                stderr: &mut stderr,
            },
        )
        .expect("run succeeds");
        (
            outcome,
            String::from_utf8(stdout).expect("UTF-8 stdout"),
            String::from_utf8(stderr).expect("UTF-8 stderr"),
        )
    }

    #[test]
    fn validation_failure_makes_no_call() {
        let transport = ScriptedTransport::new();
        let (outcome, stdout, _) = run_scripted(&["place-publish", "--place-id", "1"], &transport);

        assert_eq!(transport.calls(), 0);
        let failure = outcome.failure().expect("failure");
        assert_eq!(failure.kind(), FailureKind::Validation);
        assert_eq!(stdout, "Publish failed: universe id was not valid\n");
    }

    #[test]
    fn unreadable_file_makes_no_call() {
        let transport = ScriptedTransport::new();
        let (outcome, _, _) = run_scripted(
            &[
                "place-publish",
                "--universe-id",
                "1",
                "--place-id",
                "2",
                "--api-key",
                "key",
                "--path",
                "/nonexistent/game.rbxl",
            ],
            &transport,
        );

        assert_eq!(transport.calls(), 0);
        let reason = outcome.failure().map(Failure::reason).unwrap_or_default();
        assert!(reason.starts_with("unable to read file at"), "{reason}");
    }

    #[test]
    fn successful_publish_prints_version() {
        let dir = tempfile::tempdir().expect("temp dir");
        let place = dir.path().join("game.rbxl");
        std::fs::write(&place, b"place").expect("write place");
        let transport = ScriptedTransport::new().then_respond(200, r#"{"versionNumber": 12}"#);

        let (outcome, stdout, stderr) = run_scripted(
            &[
                "place-publish",
                "--universe-id",
                "1",
                "--place-id",
                "2",
                "--api-key",
                "key",
                "--path",
                place.to_str().expect("UTF-8 path"),
            ],
            &transport,
        );

        assert!(outcome.is_success());
        assert_eq!(stdout, "Published version 12\n");
        assert!(stderr.contains("Validating params..."), "{stderr}");
        assert!(stderr.contains("Reading place file..."), "{stderr}");
    }

    #[test]
    fn quiet_run_has_no_progress() {
        let transport = ScriptedTransport::new();
        let (_, _, stderr) = run_scripted(&["place-publish", "--quiet"], &transport);
        assert!(stderr.is_empty(), "{stderr}");
    }

    #[test]
    fn malformed_config_is_reported_as_failure() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = dir.path().join("publish.toml");
        std::fs::write(&config, "[publish]\nmax-retries = 2.5\n").expect("write config");
        let github_output = dir.path().join("github_output");
        let transport = ScriptedTransport::new();

        let (outcome, stdout, _) = run_scripted(
            &[
                "place-publish",
                "--config",
                config.to_str().expect("UTF-8 path"),
                "--github-output",
                github_output.to_str().expect("UTF-8 path"),
            ],
            &transport,
        );

        assert_eq!(transport.calls(), 0);
        let failure = outcome.failure().expect("failure");
        assert_eq!(failure.kind(), FailureKind::Validation);
        assert!(failure.reason().starts_with("invalid config file"), "{failure}");
        assert!(stdout.contains("::error::invalid config file"), "{stdout}");

        let outputs = std::fs::read_to_string(&github_output).expect("read GitHub output");
        assert!(outputs.lines().any(|line| line == "success=false"), "{outputs}");
        assert!(outputs.lines().any(|line| line == "version-number=-1"), "{outputs}");
    }

    #[test]
    fn missing_config_file_is_reported_as_failure() {
        let transport = ScriptedTransport::new();
        let (outcome, stdout, _) = run_scripted(
            &["place-publish", "--config", "/nonexistent/publish.toml"],
            &transport,
        );

        let reason = outcome.failure().map(Failure::reason).unwrap_or_default();
        assert!(reason.starts_with("failed to read config file"), "{reason}");
        assert!(stdout.starts_with("Publish failed: failed to read config file"), "{stdout}");
    }

    #[test]
    fn github_outputs_survive_a_broken_stdout() {
        let dir = tempfile::tempdir().expect("temp dir");
        let github_output = dir.path().join("github_output");
        let cli = parse_clean(&[
            "place-publish",
            "--github-output",
            github_output.to_str().expect("UTF-8 path"),
        ]);
        let transport = ScriptedTransport::new();
        let mut stdout = ClosedPipe;
        let mut stderr = Vec::new();

        let result = run_with(
            &cli,
            &transport,
            &mut Sinks {
                stdout: &mut stdout,
                stderr: &mut stderr,
            },
        );

        assert!(matches!(result, Err(CliError::WriteFailed { .. })));
        let outputs = std::fs::read_to_string(&github_output).expect("read GitHub output");
        assert!(outputs.lines().any(|line| line == "success=false"), "{outputs}");
    }
}
