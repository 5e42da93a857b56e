//! End-to-end tests for the `ureq` transport against a mock HTTP server.

use std::net::TcpListener;
use std::time::Duration;

use place_publish::test_support::sample_request;
use place_publish::transport::{HttpTransport, PublishTransport, RawResponse, TransportConfig};
use place_publish::{FailureKind, Outcome, RetryController};
use wiremock::matchers::{body_bytes, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const VERSIONS_PATH: &str = "/universes/v1/1818/places/4242/versions";

fn transport_for(base_url: String) -> HttpTransport {
    HttpTransport::new(&TransportConfig {
        base_url,
        timeout: Duration::from_secs(10),
        use_env_proxy: false,
    })
}

/// Send one request from a blocking worker so the mock server keeps running.
async fn send_once(base_url: String, max_retries: u32) -> RawResponse {
    tokio::task::spawn_blocking(move || {
        transport_for(base_url)
            .send(&sample_request(max_retries))
            .expect("server should respond")
    })
    .await
    .expect("blocking task")
}

async fn publish(base_url: String, max_retries: u32) -> Outcome {
    tokio::task::spawn_blocking(move || {
        let transport = transport_for(base_url);
        let mut progress = Vec::new();
        RetryController::new(&transport).publish(&sample_request(max_retries), &mut progress)
    })
    .await
    .expect("blocking task")
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn publish_call_has_expected_shape() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(VERSIONS_PATH))
        .and(query_param("versionType", "Published"))
        .and(header("x-api-key", "test-api-key"))
        .and(header("content-type", "application/octet-stream"))
        .and(body_bytes(b"fake place".to_vec()))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"versionNumber": 8}"#))
        .expect(1)
        .mount(&server)
        .await;

    let response = send_once(server.uri(), 0).await;
    assert_eq!(response.status, 200);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn error_statuses_are_returned_as_responses() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(VERSIONS_PATH))
        .respond_with(
            ResponseTemplate::new(400).set_body_string(r#"{"code": 3, "message": "bad file"}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let response = send_once(server.uri(), 0).await;
    assert_eq!(response.status, 400);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn controller_retries_against_mock_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(VERSIONS_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(VERSIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"versionNumber": 31}"#))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = publish(server.uri(), 1).await;
    assert_eq!(outcome.version_number().map(|v| v.get()), Some(31));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn server_errors_stop_at_the_retry_budget() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(VERSIONS_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .expect(3)
        .mount(&server)
        .await;

    let outcome = publish(server.uri(), 2).await;
    let failure = outcome.failure().expect("failure outcome");
    assert_eq!(failure.status_code(), Some(500));
    assert_eq!(failure.kind(), FailureKind::Unclassified);
}

#[test]
fn refused_connection_is_a_transport_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind local listener");
    let address = listener.local_addr().expect("listener address");
    drop(listener);
    let transport = transport_for(format!("http://{address}"));

    let mut progress = Vec::new();
    let outcome = RetryController::new(&transport).publish(&sample_request(3), &mut progress);
    let failure = outcome.failure().expect("failure outcome");
    assert_eq!(failure.kind(), FailureKind::Transport);
    assert_eq!(failure.reason(), "no response from server");
    assert_eq!(failure.status_code(), None);
}
