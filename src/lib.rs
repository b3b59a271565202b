//! Promred - RED metrics for external backends
//!
//! This crate wraps calls to HTTP services, request handlers, key-value
//! stores, message queues, pub/sub topics and message streams, and records
//! for each call its rate (an operation counter), its errors (an error
//! counter) and its duration (a histogram in seconds). Results and errors are
//! handed back to the caller untouched.
//!
//! Metrics go through the `metrics` facade; install any recorder (prometheus,
//! statsd, ...) to export them.
//!
//! # Key-value store example
//!
//! ```rust,no_run
//! use promred::{Config, InstrumentedStore, KeyValueStore, Registries};
//!
//! async fn lookup<S: KeyValueStore>(store: S) -> promred::Result<()> {
//!     let registries = Registries::register(&Config::load(None)?)?;
//!     let store = InstrumentedStore::new(store, registries.store.clone())?;
//!
//!     // Recorded as redis_operation_total{invoker="checkout",operation="Get"}
//!     let _ = store.get("cart:42", "checkout").await;
//!     Ok(())
//! }
//! ```
//!
//! # Handler example
//!
//! ```rust,ignore
//! use promred::{HandlerLayer, Registries, Config};
//! use tower::ServiceBuilder;
//!
//! let registries = Registries::register(&Config::default())?;
//! let service = ServiceBuilder::new()
//!     .layer(HandlerLayer::new(registries.handler.clone())?)
//!     .service(router);
//! ```

pub mod backends;
pub mod bootstrap;
pub mod classify;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod instrument;
pub mod registry;
pub mod telemetry;
pub mod types;

// Re-export main types at crate root
pub use bootstrap::{BackendKind, Registries};
pub use classify::{Observe, Outcome, Payload, Policy};
pub use config::{Config, PrefixConfig};
pub use descriptor::OperationDescriptor;
pub use error::{PromredError, Result};
pub use instrument::Instrumented;
pub use registry::{InstrumentKind, LabelSchema, MetricsNamespace, Registry};

// Re-export wrappers and capabilities
pub use backends::{
    HandlerLayer, Heartbeater, HttpRequester, InstrumentedHandler, InstrumentedHeartbeater,
    InstrumentedPublisher, InstrumentedQueue, InstrumentedReader, InstrumentedRequester,
    InstrumentedStore, InstrumentedWriter, KeyValueStore, MessageQueue, MessageReader,
    MessageWriter, Publisher,
};

// Re-export all types
pub use types::{
    BrokerError, HeartbeatRequest, HeartbeatResponse, PublishRequest, PublishResponse,
    QueueMessage, ReceiveMessageRequest, ReceiveMessageResponse, SendMessageRequest,
    SendMessageResponse, StreamMessage,
};
