//! Message-stream types: records, heartbeats and broker errors

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::classify::Payload;

/// A record read from or written to a stream partition
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamMessage {
    pub topic: String,
    pub partition: i32,
    /// Assigned by the broker; ignored on write.
    pub offset: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<Vec<u8>>,
    pub value: Vec<u8>,
    #[serde(default)]
    pub headers: Vec<(String, Vec<u8>)>,
}

impl StreamMessage {
    pub fn new(topic: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            topic: topic.into(),
            value: value.into(),
            ..Default::default()
        }
    }

    pub fn key(mut self, key: impl Into<Vec<u8>>) -> Self {
        self.key = Some(key.into());
        self
    }
}

/// Group membership heartbeat
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeartbeatRequest {
    pub group_id: String,
    pub generation_id: i32,
    pub member_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_instance_id: Option<String>,
}

/// Broker reply to a heartbeat.
///
/// The broker can answer successfully at the transport level while still
/// reporting a protocol error (e.g. a rebalance in progress) in `error`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeartbeatResponse {
    #[serde(default)]
    pub throttle: Duration,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<BrokerError>,
}

/// Protocol-level error code returned inside a broker response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("broker error {code}: {message}")]
pub struct BrokerError {
    pub code: i16,
    pub message: String,
}

impl BrokerError {
    pub fn new(code: i16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl Payload for StreamMessage {}

impl Payload for HeartbeatResponse {
    fn embedded_error(&self) -> bool {
        self.error.is_some()
    }
}
