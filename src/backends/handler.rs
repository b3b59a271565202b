//! Instrumented HTTP request handlers, as `tower` middleware.
//!
//! [`HandlerLayer`] wraps any `tower::Service` that turns an
//! `http::Request` into an `http::Response` (an axum router, a hyper service,
//! a `service_fn`). Each request is recorded under its path and method; the
//! counters additionally carry the response status code, the histogram does
//! not.
//!
//! A response always has a status, so a handler that never sets one is
//! recorded with the implicit `200`. When no response is produced at all (the
//! inner service errors, or the request future is dropped) the status label
//! is `none`.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use http::{Request, Response};
use tower::{Layer, Service};

use crate::Result;
use crate::bootstrap::BackendKind;
use crate::descriptor::OperationDescriptor;
use crate::instrument::Instrumented;
use crate::registry::Registry;
use crate::telemetry;

// ============================================================================
// Layer
// ============================================================================

/// Layer producing [`InstrumentedHandler`] services.
#[derive(Debug, Clone)]
pub struct HandlerLayer {
    instrumented: Instrumented,
}

impl HandlerLayer {
    /// `registry` must have been created with the handler label schema.
    pub fn new(registry: Arc<Registry>) -> Result<Self> {
        Ok(Self {
            instrumented: Instrumented::new(registry, BackendKind::Handler)?,
        })
    }
}

impl<S> Layer<S> for HandlerLayer {
    type Service = InstrumentedHandler<S>;

    fn layer(&self, inner: S) -> Self::Service {
        InstrumentedHandler {
            inner,
            instrumented: self.instrumented.clone(),
        }
    }
}

// ============================================================================
// Service
// ============================================================================

/// Service recording rate, errors and duration of the wrapped handler.
#[derive(Debug, Clone)]
pub struct InstrumentedHandler<S> {
    inner: S,
    instrumented: Instrumented,
}

type BoxFuture<T, E> = Pin<Box<dyn Future<Output = std::result::Result<T, E>> + Send>>;

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for InstrumentedHandler<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: Send + 'static,
    ReqBody: Send + 'static,
    ResBody: Send + 'static,
{
    type Response = Response<ResBody>;
    type Error = S::Error;
    type Future = BoxFuture<Response<ResBody>, S::Error>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<std::result::Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<ReqBody>) -> Self::Future {
        let descriptor =
            OperationDescriptor::request(request.uri().path(), request.method().as_str())
                .with(telemetry::STATUS_CODE, telemetry::NO_STATUS);

        // The instance that was polled ready serves this request.
        let ready = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, ready);
        let instrumented = self.instrumented.clone();

        Box::pin(async move {
            instrumented
                .invoke_with(descriptor, move || inner.call(request), status_label)
                .await
        })
    }
}

fn status_label<B, E>(
    result: &std::result::Result<Response<B>, E>,
    descriptor: OperationDescriptor,
) -> OperationDescriptor {
    match result {
        Ok(response) => descriptor.with(telemetry::STATUS_CODE, response.status().as_str()),
        Err(_) => descriptor,
    }
}
