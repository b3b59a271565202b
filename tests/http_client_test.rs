//! Tests for the instrumented HTTP client.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use http::{Method, Request, Response, StatusCode};
use metrics_util::debugging::{DebugValue, DebuggingRecorder};
use metrics_util::{CompositeKey, MetricKind};

use promred::{BackendKind, HttpRequester, InstrumentedRequester, MetricsNamespace, Registry};

// ============================================================================
// Mock requester
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
struct TransportError(&'static str);

/// Answers every request with a fixed reply.
enum Reply {
    Status(u16),
    NoResponse,
    Error,
}

struct MockRequester {
    reply: Reply,
}

impl MockRequester {
    fn new(reply: Reply) -> Self {
        Self { reply }
    }
}

#[async_trait]
impl HttpRequester for MockRequester {
    type Error = TransportError;

    async fn send(
        &self,
        request: Request<Bytes>,
    ) -> Result<Option<Response<Bytes>>, TransportError> {
        match self.reply {
            Reply::Status(status) => {
                let mut response = Response::new(request.into_body());
                *response.status_mut() = StatusCode::from_u16(status).unwrap();
                Ok(Some(response))
            }
            Reply::NoResponse => Ok(None),
            Reply::Error => Err(TransportError("connection reset")),
        }
    }
}

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

fn client_registry(namespace: &MetricsNamespace) -> Arc<Registry> {
    BackendKind::HttpClient
        .register_in(namespace, "doer")
        .unwrap()
}

fn get(uri: &str) -> Request<Bytes> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Bytes::from_static(b"ping"))
        .unwrap()
}

/// Send one GET through a requester answering with `reply`; returns the
/// operation and error counts recorded for it.
fn send_once(reply: Reply) -> (u64, u64) {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    let namespace = MetricsNamespace::new();
    let client =
        InstrumentedRequester::new(MockRequester::new(reply), client_registry(&namespace)).unwrap();

    let _ = recorded(&recorder, client.send(get("http://svc.local/v1/items")));

    let snapshot = snapshotter.snapshot().into_vec();
    let labels = [("path", "/v1/items"), ("http_method", "GET")];
    (
        counter_value(&snapshot, "doer_operation_total", &labels),
        counter_value(&snapshot, "doer_error_total", &labels),
    )
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn success_is_counted_without_error() {
    assert_eq!(send_once(Reply::Status(200)), (1, 0));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn redirect_is_success() {
    assert_eq!(send_once(Reply::Status(302)), (1, 0));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn client_error_status_is_failure() {
    assert_eq!(send_once(Reply::Status(404)), (1, 1));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn server_error_status_is_failure() {
    assert_eq!(send_once(Reply::Status(503)), (1, 1));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn missing_response_is_failure() {
    assert_eq!(send_once(Reply::NoResponse), (1, 1));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn transport_error_is_failure() {
    assert_eq!(send_once(Reply::Error), (1, 1));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn results_pass_through_unchanged() {
    let namespace = MetricsNamespace::new();
    let registry = client_registry(&namespace);

    let ok = InstrumentedRequester::new(MockRequester::new(Reply::Status(404)), registry.clone())
        .unwrap();
    let response = ok.send(get("http://svc.local/echo")).await.unwrap().unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.body(), &Bytes::from_static(b"ping"));

    let failing = InstrumentedRequester::new(MockRequester::new(Reply::Error), registry).unwrap();
    let err = failing.send(get("http://svc.local/echo")).await.unwrap_err();
    assert_eq!(err, TransportError("connection reset"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn query_string_is_not_part_of_the_path() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    let namespace = MetricsNamespace::new();
    let client = InstrumentedRequester::new(
        MockRequester::new(Reply::Status(200)),
        client_registry(&namespace),
    )
    .unwrap();

    let post = Request::builder()
        .method(Method::POST)
        .uri("http://svc.local/v1/items?page=2")
        .body(Bytes::new())
        .unwrap();
    recorded(&recorder, client.send(post)).unwrap();

    let snapshot = snapshotter.snapshot().into_vec();
    let labels = [("path", "/v1/items"), ("http_method", "POST")];
    assert_eq!(counter_value(&snapshot, "doer_operation_total", &labels), 1);
}
