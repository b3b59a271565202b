//! Instrumented pub/sub publisher.

use std::sync::Arc;

use super::traits::Publisher;
use crate::Result;
use crate::bootstrap::BackendKind;
use crate::descriptor::OperationDescriptor;
use crate::instrument::Instrumented;
use crate::registry::Registry;
use crate::types::{PublishRequest, PublishResponse};

/// `operation` label value.
pub const PUBLISH: &str = "Publish";

/// Wraps a [`Publisher`]; `publish` takes the caller's `invoker` tag.
pub struct InstrumentedPublisher<P> {
    inner: P,
    instrumented: Instrumented,
}

impl<P: Publisher> InstrumentedPublisher<P> {
    pub fn new(inner: P, registry: Arc<Registry>) -> Result<Self> {
        Ok(Self {
            inner,
            instrumented: Instrumented::new(registry, BackendKind::Publisher)?,
        })
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    pub async fn publish(
        &self,
        request: PublishRequest,
        invoker: &str,
    ) -> std::result::Result<PublishResponse, P::Error> {
        self.instrumented
            .invoke(OperationDescriptor::invoked(invoker, PUBLISH), || {
                self.inner.publish(request)
            })
            .await
    }
}
