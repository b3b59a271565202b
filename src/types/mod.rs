//! Request and response types of the instrumented capabilities.

mod publish;
mod queue;
mod stream;

pub use publish::{PublishRequest, PublishResponse};
pub use queue::{
    QueueMessage, ReceiveMessageRequest, ReceiveMessageResponse, SendMessageRequest,
    SendMessageResponse,
};
pub use stream::{BrokerError, HeartbeatRequest, HeartbeatResponse, StreamMessage};
