//! Instrumented message-stream reader, writer and heartbeater.
//!
//! All three share the stream registry and label their calls with the
//! caller's `invoker` tag. Heartbeats are classified with the embedded-error
//! policy: a broker error carried inside a successful response is a failure,
//! and a call that both returns an error and embeds one counts once.

use std::sync::Arc;

use super::traits::{Heartbeater, MessageReader, MessageWriter};
use crate::Result;
use crate::bootstrap::BackendKind;
use crate::descriptor::OperationDescriptor;
use crate::instrument::Instrumented;
use crate::registry::Registry;
use crate::types::{HeartbeatRequest, HeartbeatResponse, StreamMessage};

/// `operation` label values.
pub mod operation {
    pub const READ_MESSAGE: &str = "ReadMessage";
    pub const READER_CLOSE: &str = "ReaderClose";
    pub const WRITE_MESSAGES: &str = "WriteMessages";
    pub const WRITER_CLOSE: &str = "WriterClose";
    pub const HEARTBEAT: &str = "Heartbeat";
}

// ============================================================================
// Reader
// ============================================================================

/// Wraps a [`MessageReader`].
pub struct InstrumentedReader<R> {
    inner: R,
    instrumented: Instrumented,
}

impl<R: MessageReader> InstrumentedReader<R> {
    pub fn new(inner: R, registry: Arc<Registry>) -> Result<Self> {
        Ok(Self {
            inner,
            instrumented: Instrumented::new(registry, BackendKind::Stream)?,
        })
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    /// The recorded duration includes the time spent waiting for a record.
    pub async fn read_message(&self, invoker: &str) -> std::result::Result<StreamMessage, R::Error> {
        self.instrumented
            .invoke(
                OperationDescriptor::invoked(invoker, operation::READ_MESSAGE),
                || self.inner.read_message(),
            )
            .await
    }

    pub async fn close(&self, invoker: &str) -> std::result::Result<(), R::Error> {
        self.instrumented
            .invoke(
                OperationDescriptor::invoked(invoker, operation::READER_CLOSE),
                || self.inner.close(),
            )
            .await
    }
}

// ============================================================================
// Writer
// ============================================================================

/// Wraps a [`MessageWriter`].
pub struct InstrumentedWriter<W> {
    inner: W,
    instrumented: Instrumented,
}

impl<W: MessageWriter> InstrumentedWriter<W> {
    pub fn new(inner: W, registry: Arc<Registry>) -> Result<Self> {
        Ok(Self {
            inner,
            instrumented: Instrumented::new(registry, BackendKind::Stream)?,
        })
    }

    pub fn inner(&self) -> &W {
        &self.inner
    }

    /// One call is one operation, however many messages it carries.
    pub async fn write_messages(
        &self,
        messages: &[StreamMessage],
        invoker: &str,
    ) -> std::result::Result<(), W::Error> {
        self.instrumented
            .invoke(
                OperationDescriptor::invoked(invoker, operation::WRITE_MESSAGES),
                || self.inner.write_messages(messages),
            )
            .await
    }

    pub async fn close(&self, invoker: &str) -> std::result::Result<(), W::Error> {
        self.instrumented
            .invoke(
                OperationDescriptor::invoked(invoker, operation::WRITER_CLOSE),
                || self.inner.close(),
            )
            .await
    }
}

// ============================================================================
// Heartbeater
// ============================================================================

/// Wraps a [`Heartbeater`].
pub struct InstrumentedHeartbeater<H> {
    inner: H,
    instrumented: Instrumented,
}

impl<H: Heartbeater> InstrumentedHeartbeater<H> {
    pub fn new(inner: H, registry: Arc<Registry>) -> Result<Self> {
        Ok(Self {
            inner,
            instrumented: Instrumented::new(registry, BackendKind::Stream)?,
        })
    }

    pub fn inner(&self) -> &H {
        &self.inner
    }

    pub async fn heartbeat(
        &self,
        request: HeartbeatRequest,
        invoker: &str,
    ) -> std::result::Result<HeartbeatResponse, H::Error> {
        self.instrumented
            .invoke(
                OperationDescriptor::invoked(invoker, operation::HEARTBEAT),
                || self.inner.heartbeat(request),
            )
            .await
    }
}
