//! Instrumented key-value store.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;

use super::traits::KeyValueStore;
use crate::Result;
use crate::bootstrap::BackendKind;
use crate::descriptor::OperationDescriptor;
use crate::instrument::Instrumented;
use crate::registry::Registry;

/// `operation` label values.
pub mod operation {
    pub const GET: &str = "Get";
    pub const HGET: &str = "HGet";
    pub const MGET: &str = "MGet";
    pub const SET: &str = "Set";
    pub const SET_EX: &str = "SetEX";
    pub const MSET: &str = "MSet";
    pub const PING: &str = "Ping";
}

/// Wraps a [`KeyValueStore`], recording every call under the caller's
/// `invoker` tag and the operation name.
///
/// A call fails when the store returns an error. A missing key is a
/// successful `Ok(None)`.
pub struct InstrumentedStore<S> {
    inner: S,
    instrumented: Instrumented,
}

impl<S: KeyValueStore> InstrumentedStore<S> {
    /// Wrap `inner`, recording into `registry`.
    ///
    /// `registry` must have been created with the store label schema.
    pub fn new(inner: S, registry: Arc<Registry>) -> Result<Self> {
        Ok(Self {
            inner,
            instrumented: Instrumented::new(registry, BackendKind::Store)?,
        })
    }

    /// The wrapped store.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub async fn get(&self, key: &str, invoker: &str) -> std::result::Result<Option<Bytes>, S::Error> {
        self.instrumented
            .invoke(OperationDescriptor::invoked(invoker, operation::GET), || {
                self.inner.get(key)
            })
            .await
    }

    pub async fn hget(
        &self,
        key: &str,
        field: &str,
        invoker: &str,
    ) -> std::result::Result<Option<Bytes>, S::Error> {
        self.instrumented
            .invoke(OperationDescriptor::invoked(invoker, operation::HGET), || {
                self.inner.hget(key, field)
            })
            .await
    }

    pub async fn mget(
        &self,
        keys: &[&str],
        invoker: &str,
    ) -> std::result::Result<Vec<Option<Bytes>>, S::Error> {
        self.instrumented
            .invoke(OperationDescriptor::invoked(invoker, operation::MGET), || {
                self.inner.mget(keys)
            })
            .await
    }

    pub async fn set(
        &self,
        key: &str,
        value: Bytes,
        expiration: Option<Duration>,
        invoker: &str,
    ) -> std::result::Result<(), S::Error> {
        self.instrumented
            .invoke(OperationDescriptor::invoked(invoker, operation::SET), || {
                self.inner.set(key, value, expiration)
            })
            .await
    }

    pub async fn set_ex(
        &self,
        key: &str,
        value: Bytes,
        expiration: Duration,
        invoker: &str,
    ) -> std::result::Result<(), S::Error> {
        self.instrumented
            .invoke(OperationDescriptor::invoked(invoker, operation::SET_EX), || {
                self.inner.set_ex(key, value, expiration)
            })
            .await
    }

    pub async fn mset(
        &self,
        pairs: &[(&str, Bytes)],
        invoker: &str,
    ) -> std::result::Result<(), S::Error> {
        self.instrumented
            .invoke(OperationDescriptor::invoked(invoker, operation::MSET), || {
                self.inner.mset(pairs)
            })
            .await
    }

    pub async fn ping(&self, invoker: &str) -> std::result::Result<(), S::Error> {
        self.instrumented
            .invoke(OperationDescriptor::invoked(invoker, operation::PING), || {
                self.inner.ping()
            })
            .await
    }
}
