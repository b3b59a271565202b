//! Pub/sub publish types

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::classify::Payload;

/// Publish one message to a topic
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishRequest {
    pub topic: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default)]
    pub attributes: HashMap<String, String>,
}

impl PublishRequest {
    pub fn new(topic: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            message: message.into(),
            ..Default::default()
        }
    }
}

/// Acknowledgement of a published message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishResponse {
    pub message_id: String,
}

impl Payload for PublishResponse {}
