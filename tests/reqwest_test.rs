//! Wiremock integration tests for the instrumented `reqwest` client.
#![cfg(feature = "reqwest")]

use std::future::Future;

use bytes::Bytes;
use http::{Method, Request, StatusCode};
use metrics_util::debugging::{DebugValue, DebuggingRecorder};
use metrics_util::{CompositeKey, MetricKind};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use promred::{BackendKind, HttpRequester, InstrumentedRequester, MetricsNamespace};

// ============================================================================
// Helpers
// ============================================================================

type SnapshotVec = Vec<(
    CompositeKey,
    Option<metrics::Unit>,
    Option<metrics::SharedString>,
    DebugValue,
)>;

fn has_labels(key: &CompositeKey, labels: &[(&str, &str)]) -> bool {
    let actual: Vec<(&str, &str)> = key.key().labels().map(|l| (l.key(), l.value())).collect();
    actual.len() == labels.len() && labels.iter().all(|label| actual.contains(label))
}

fn counter_value(snapshot: &SnapshotVec, name: &str, labels: &[(&str, &str)]) -> u64 {
    snapshot
        .iter()
        .filter(|(key, ..)| {
            key.kind() == MetricKind::Counter && key.key().name() == name && has_labels(key, labels)
        })
        .map(|(.., value)| match value {
            DebugValue::Counter(v) => *v,
            _ => 0,
        })
        .sum()
}

fn recorded<F: Future>(recorder: &DebuggingRecorder, future: F) -> F::Output {
    metrics::with_local_recorder(recorder, || {
        tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
    })
}

fn request(method: Method, uri: String, body: &'static [u8]) -> Request<Bytes> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Bytes::from_static(body))
        .unwrap()
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_success_and_error_statuses() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/users"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/users"))
        .respond_with(ResponseTemplate::new(422).set_body_string("invalid"))
        .mount(&mock_server)
        .await;

    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    let namespace = MetricsNamespace::new();
    let registry = BackendKind::HttpClient
        .register_in(&namespace, "doer")
        .unwrap();
    let client = InstrumentedRequester::new(reqwest::Client::new(), registry).unwrap();
    let url = format!("{}/v1/users", mock_server.uri());

    recorded(&recorder, async {
        let ok = client
            .send(request(Method::GET, url.clone(), b""))
            .await
            .expect("request should complete")
            .expect("a response");
        assert_eq!(ok.status(), StatusCode::OK);
        assert_eq!(ok.body(), &Bytes::from_static(b"[]"));

        let rejected = client
            .send(request(Method::POST, url.clone(), b"{}"))
            .await
            .expect("request should complete")
            .expect("a response");
        assert_eq!(rejected.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(rejected.body(), &Bytes::from_static(b"invalid"));
    });

    let snapshot = snapshotter.snapshot().into_vec();
    let get = [("path", "/v1/users"), ("http_method", "GET")];
    let post = [("path", "/v1/users"), ("http_method", "POST")];
    assert_eq!(counter_value(&snapshot, "doer_operation_total", &get), 1);
    assert_eq!(counter_value(&snapshot, "doer_error_total", &get), 0);
    assert_eq!(counter_value(&snapshot, "doer_operation_total", &post), 1);
    assert_eq!(counter_value(&snapshot, "doer_error_total", &post), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_connection_failure_is_counted() {
    // Nothing listens on port 1.
    let uri = "http://127.0.0.1:1";

    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    let namespace = MetricsNamespace::new();
    let registry = BackendKind::HttpClient
        .register_in(&namespace, "doer")
        .unwrap();
    let client = InstrumentedRequester::new(reqwest::Client::new(), registry).unwrap();

    let result = recorded(
        &recorder,
        client.send(request(Method::GET, format!("{uri}/health"), b"")),
    );
    assert!(result.is_err());

    let snapshot = snapshotter.snapshot().into_vec();
    let labels = [("path", "/health"), ("http_method", "GET")];
    assert_eq!(counter_value(&snapshot, "doer_operation_total", &labels), 1);
    assert_eq!(counter_value(&snapshot, "doer_error_total", &labels), 1);
}
