//! Instrumented message queue.

use std::sync::Arc;

use super::traits::MessageQueue;
use crate::Result;
use crate::bootstrap::BackendKind;
use crate::descriptor::OperationDescriptor;
use crate::instrument::Instrumented;
use crate::registry::Registry;
use crate::types::{
    ReceiveMessageRequest, ReceiveMessageResponse, SendMessageRequest, SendMessageResponse,
};

/// `operation` label values.
pub mod operation {
    pub const SEND_MESSAGE: &str = "SendMessage";
    pub const RECEIVE_MESSAGE: &str = "ReceiveMessage";
}

/// Wraps a [`MessageQueue`]. Queue calls have no request identity of their
/// own, so each method takes the caller's `invoker` tag.
pub struct InstrumentedQueue<Q> {
    inner: Q,
    instrumented: Instrumented,
}

impl<Q: MessageQueue> InstrumentedQueue<Q> {
    pub fn new(inner: Q, registry: Arc<Registry>) -> Result<Self> {
        Ok(Self {
            inner,
            instrumented: Instrumented::new(registry, BackendKind::Queue)?,
        })
    }

    pub fn inner(&self) -> &Q {
        &self.inner
    }

    pub async fn send_message(
        &self,
        request: SendMessageRequest,
        invoker: &str,
    ) -> std::result::Result<SendMessageResponse, Q::Error> {
        self.instrumented
            .invoke(
                OperationDescriptor::invoked(invoker, operation::SEND_MESSAGE),
                || self.inner.send_message(request),
            )
            .await
    }

    /// An empty batch is a successful receive.
    pub async fn receive_message(
        &self,
        request: ReceiveMessageRequest,
        invoker: &str,
    ) -> std::result::Result<ReceiveMessageResponse, Q::Error> {
        self.instrumented
            .invoke(
                OperationDescriptor::invoked(invoker, operation::RECEIVE_MESSAGE),
                || self.inner.receive_message(request),
            )
            .await
    }
}
