//! Message queue request and response types

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::classify::Payload;

/// Send one message to a queue
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub queue_url: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay: Option<Duration>,
    #[serde(default)]
    pub attributes: HashMap<String, String>,
    /// FIFO queues only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
}

impl SendMessageRequest {
    pub fn new(queue_url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            queue_url: queue_url.into(),
            body: body.into(),
            ..Default::default()
        }
    }
}

/// Acknowledgement of a sent message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendMessageResponse {
    pub message_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence_number: Option<String>,
}

/// Receive up to `max_messages` messages from a queue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiveMessageRequest {
    pub queue_url: String,
    pub max_messages: u32,
    /// Long-poll wait; `None` returns immediately.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_time: Option<Duration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility_timeout: Option<Duration>,
}

impl ReceiveMessageRequest {
    pub fn new(queue_url: impl Into<String>) -> Self {
        Self {
            queue_url: queue_url.into(),
            max_messages: 1,
            wait_time: None,
            visibility_timeout: None,
        }
    }
}

/// Messages returned by a receive call. An empty batch is not a failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiveMessageResponse {
    #[serde(default)]
    pub messages: Vec<QueueMessage>,
}

/// A message delivered from a queue
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueMessage {
    pub message_id: String,
    pub receipt_handle: String,
    pub body: String,
    #[serde(default)]
    pub attributes: HashMap<String, String>,
}

impl Payload for SendMessageResponse {}
impl Payload for ReceiveMessageResponse {}
