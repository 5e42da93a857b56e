//! Progress lines reach either the sink or the log, never both.

use log::Level;
use logtest::Logger;
use place_publish::RetryController;
use place_publish::test_support::{ScriptedTransport, sample_request};

fn drain_progress_records(logger: &mut Logger) -> Vec<String> {
    let mut lines = Vec::new();
    while let Some(record) = logger.pop() {
        let text = record.args().to_string();
        if record.level() == Level::Info && text.starts_with("Publish") {
            lines.push(text);
        }
    }
    lines
}

#[test]
fn progress_lines_are_written_once() {
    let mut logger = Logger::start();

    let transport = ScriptedTransport::new().then_respond(200, r#"{"versionNumber": 4}"#);
    let mut progress = Vec::new();
    let outcome = RetryController::new(&transport).publish(&sample_request(0), &mut progress);
    assert!(outcome.is_success());
    let written = String::from_utf8(progress).expect("progress is UTF-8");
    assert!(written.contains("Published successfully!"), "{written}");
    assert!(
        drain_progress_records(&mut logger).is_empty(),
        "sink lines must not also be logged"
    );

    let transport = ScriptedTransport::new().then_respond(200, r#"{"versionNumber": 4}"#);
    let mut progress = Vec::new();
    let outcome = RetryController::new(&transport)
        .quiet(true)
        .publish(&sample_request(0), &mut progress);
    assert!(outcome.is_success());
    assert!(progress.is_empty());
    let logged = drain_progress_records(&mut logger);
    assert!(
        logged
            .iter()
            .any(|line| line.contains("Published successfully!")),
        "quiet progress should be logged: {logged:?}"
    );
}
