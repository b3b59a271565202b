//! Per-call label identity.

use crate::telemetry;

/// The label values identifying one instrumented call.
///
/// Built per call from whatever context the backend kind offers (request
/// path and method, or a caller-supplied invoker tag) plus the operation
/// name. Labels are keyed by name, so each instrument can project the subset
/// its schema asks for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationDescriptor {
    labels: Vec<(&'static str, String)>,
}

impl OperationDescriptor {
    /// Create an empty descriptor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Descriptor for invoker-tagged backends: `invoker` + `operation`.
    pub fn invoked(invoker: impl Into<String>, operation: &str) -> Self {
        Self::new()
            .with(telemetry::INVOKER, invoker)
            .with(telemetry::OPERATION, operation)
    }

    /// Descriptor for HTTP requests: `path` + `http_method`.
    pub fn request(path: impl Into<String>, method: impl Into<String>) -> Self {
        Self::new()
            .with(telemetry::PATH, path)
            .with(telemetry::HTTP_METHOD, method)
    }

    /// Set a label, replacing any previous value under the same name.
    pub fn with(mut self, name: &'static str, value: impl Into<String>) -> Self {
        let value = value.into();
        match self.labels.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.labels.push((name, value)),
        }
        self
    }

    /// Value of the named label, if set.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.labels
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Label names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.labels.iter().map(|(n, _)| *n)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
