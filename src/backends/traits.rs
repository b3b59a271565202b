//! Capability traits for the instrumented backends.
//!
//! Each trait exposes only the operations that get instrumented. Wrappers
//! depend on these traits and never on a concrete client, so any transport
//! (an SDK client, a connection pool, a test double) can sit underneath.
//!
//! Every trait carries its own `Error` type: the instrumentation layer
//! observes backend errors but never converts or wraps them.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use crate::types::{
    HeartbeatRequest, HeartbeatResponse, PublishRequest, PublishResponse, ReceiveMessageRequest,
    ReceiveMessageResponse, SendMessageRequest, SendMessageResponse, StreamMessage,
};

// ============================================================================
// HTTP
// ============================================================================

/// Sends HTTP requests.
#[async_trait]
pub trait HttpRequester: Send + Sync {
    type Error: Send;

    /// Send a request.
    ///
    /// `Ok(None)` means the exchange completed without a response.
    async fn send(
        &self,
        request: http::Request<Bytes>,
    ) -> Result<Option<http::Response<Bytes>>, Self::Error>;
}

// ============================================================================
// Key-value store
// ============================================================================

/// A key-value store.
///
/// A missing key is `Ok(None)`, not an error.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    type Error: Send;

    async fn get(&self, key: &str) -> Result<Option<Bytes>, Self::Error>;

    /// Read one field of a hash.
    async fn hget(&self, key: &str, field: &str) -> Result<Option<Bytes>, Self::Error>;

    /// Read several keys; the result has one slot per key, in order.
    async fn mget(&self, keys: &[&str]) -> Result<Vec<Option<Bytes>>, Self::Error>;

    /// Write a key, optionally expiring after `expiration`.
    async fn set(
        &self,
        key: &str,
        value: Bytes,
        expiration: Option<Duration>,
    ) -> Result<(), Self::Error>;

    /// Write a key that expires after `expiration`.
    async fn set_ex(&self, key: &str, value: Bytes, expiration: Duration)
    -> Result<(), Self::Error>;

    /// Write several keys at once.
    async fn mset(&self, pairs: &[(&str, Bytes)]) -> Result<(), Self::Error>;

    async fn ping(&self) -> Result<(), Self::Error>;
}

// ============================================================================
// Message queue
// ============================================================================

/// A point-to-point message queue.
#[async_trait]
pub trait MessageQueue: Send + Sync {
    type Error: Send;

    async fn send_message(
        &self,
        request: SendMessageRequest,
    ) -> Result<SendMessageResponse, Self::Error>;

    async fn receive_message(
        &self,
        request: ReceiveMessageRequest,
    ) -> Result<ReceiveMessageResponse, Self::Error>;
}

// ============================================================================
// Pub/sub
// ============================================================================

/// Publishes to a pub/sub topic.
#[async_trait]
pub trait Publisher: Send + Sync {
    type Error: Send;

    async fn publish(&self, request: PublishRequest) -> Result<PublishResponse, Self::Error>;
}

// ============================================================================
// Message stream
// ============================================================================

/// Consumes records from a message stream.
#[async_trait]
pub trait MessageReader: Send + Sync {
    type Error: Send;

    /// Read the next record, waiting until one is available.
    async fn read_message(&self) -> Result<StreamMessage, Self::Error>;

    async fn close(&self) -> Result<(), Self::Error>;
}

/// Produces records to a message stream.
#[async_trait]
pub trait MessageWriter: Send + Sync {
    type Error: Send;

    async fn write_messages(&self, messages: &[StreamMessage]) -> Result<(), Self::Error>;

    async fn close(&self) -> Result<(), Self::Error>;
}

/// Sends group membership heartbeats to a stream broker.
#[async_trait]
pub trait Heartbeater: Send + Sync {
    type Error: Send;

    /// The response may carry a broker error even when the call succeeds.
    async fn heartbeat(&self, request: HeartbeatRequest)
    -> Result<HeartbeatResponse, Self::Error>;
}
