//! Backend capabilities and their instrumented wrappers.
//!
//! Every wrapper is built from the wrapped backend and the [`Registry`] of
//! its kind, and records one operation, one duration and (on failure) one
//! error per call.
//!
//! [`Registry`]: crate::Registry

pub mod handler;
pub mod http_client;
pub mod publisher;
pub mod queue;
#[cfg(feature = "reqwest")]
mod reqwest_client;
pub mod store;
pub mod stream;
pub mod traits;

pub use handler::{HandlerLayer, InstrumentedHandler};
pub use http_client::InstrumentedRequester;
pub use publisher::InstrumentedPublisher;
pub use queue::InstrumentedQueue;
pub use store::InstrumentedStore;
pub use stream::{InstrumentedHeartbeater, InstrumentedReader, InstrumentedWriter};
pub use traits::{
    Heartbeater, HttpRequester, KeyValueStore, MessageQueue, MessageReader, MessageWriter,
    Publisher,
};
