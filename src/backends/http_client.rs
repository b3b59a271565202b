//! Instrumented HTTP client.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use super::traits::HttpRequester;
use crate::Result;
use crate::bootstrap::BackendKind;
use crate::descriptor::OperationDescriptor;
use crate::instrument::Instrumented;
use crate::registry::Registry;

/// Decorator that records every request sent through an [`HttpRequester`].
///
/// Calls are labelled with the request's path and method. A call fails when
/// the requester returns an error, completes without a response, or the
/// response status is 400 or above. Since it implements [`HttpRequester`]
/// itself, it can stand in wherever the wrapped requester was used.
pub struct InstrumentedRequester<R> {
    inner: R,
    instrumented: Instrumented,
}

impl<R: HttpRequester> InstrumentedRequester<R> {
    pub fn new(inner: R, registry: Arc<Registry>) -> Result<Self> {
        Ok(Self {
            inner,
            instrumented: Instrumented::new(registry, BackendKind::HttpClient)?,
        })
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }
}

#[async_trait]
impl<R: HttpRequester> HttpRequester for InstrumentedRequester<R> {
    type Error = R::Error;

    async fn send(
        &self,
        request: http::Request<Bytes>,
    ) -> std::result::Result<Option<http::Response<Bytes>>, R::Error> {
        let descriptor =
            OperationDescriptor::request(request.uri().path(), request.method().as_str());
        self.instrumented
            .invoke(descriptor, || self.inner.send(request))
            .await
    }
}
