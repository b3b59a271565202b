//! The shared invoke path behind every backend wrapper.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use crate::bootstrap::BackendKind;
use crate::classify::{Observe, Outcome, Policy};
use crate::descriptor::OperationDescriptor;
use crate::registry::Registry;
use crate::{PromredError, Result};

/// A registry bound to the classification policy of one backend kind.
///
/// Holds nothing but shared, immutable state; clones are cheap and every
/// invocation is independent of the others.
#[derive(Debug, Clone)]
pub struct Instrumented {
    registry: Arc<Registry>,
    policy: Policy,
}

impl Instrumented {
    /// Bind `registry` to the policy of `kind`.
    ///
    /// Fails with [`PromredError::InvalidSchema`] when the registry was not
    /// created with the label schema `kind` builds its descriptors for, so a
    /// wrapper can never record under the wrong labels.
    pub fn new(registry: Arc<Registry>, kind: BackendKind) -> Result<Self> {
        let expected = kind.label_schema();
        if registry.schema() != &expected {
            return Err(PromredError::InvalidSchema(format!(
                "registry '{}' has counter labels [{}], {kind} wrappers record [{}]",
                registry.prefix(),
                registry.schema().counter().join(", "),
                expected.counter().join(", ")
            )));
        }
        Ok(Self::with_policy(registry, kind.policy()))
    }

    /// Bind `registry` to an explicit policy without schema checks.
    pub fn with_policy(registry: Arc<Registry>, policy: Policy) -> Self {
        Self { registry, policy }
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// Time `call`, count it, classify its result and hand the result back
    /// unchanged.
    pub async fn invoke<F, Fut, R>(&self, descriptor: OperationDescriptor, call: F) -> R
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = R>,
        R: Observe,
    {
        self.invoke_with(descriptor, call, |_, descriptor| descriptor)
            .await
    }

    /// Like [`invoke`](Self::invoke), with a hook that derives extra labels
    /// from the result before it is recorded.
    pub async fn invoke_with<F, Fut, R, L>(
        &self,
        descriptor: OperationDescriptor,
        call: F,
        label: L,
    ) -> R
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = R>,
        R: Observe,
        L: FnOnce(&R, OperationDescriptor) -> OperationDescriptor,
    {
        let mut pending = Pending::start(self, descriptor);
        let result = call().await;
        if let Some(descriptor) = pending.descriptor.take() {
            let descriptor = label(&result, descriptor);
            let outcome = self.policy.classify(&result);
            self.registry
                .record(&descriptor, pending.started.elapsed(), outcome);
        }
        result
    }
}

/// An in-flight call. Records the attempt as failed if dropped before the
/// backend call returned (caller cancellation, or a panic in the backend).
struct Pending<'a> {
    instrumented: &'a Instrumented,
    descriptor: Option<OperationDescriptor>,
    started: Instant,
}

impl<'a> Pending<'a> {
    fn start(instrumented: &'a Instrumented, descriptor: OperationDescriptor) -> Self {
        Self {
            instrumented,
            descriptor: Some(descriptor),
            started: Instant::now(),
        }
    }
}

impl Drop for Pending<'_> {
    fn drop(&mut self) {
        if let Some(descriptor) = self.descriptor.take() {
            debug!(
                registry = self.instrumented.registry.prefix(),
                "call abandoned before completion"
            );
            self.instrumented
                .registry
                .record(&descriptor, self.started.elapsed(), Outcome::Failure);
        }
    }
}
