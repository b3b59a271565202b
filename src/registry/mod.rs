//! Metric registries: one set of instruments per backend kind.
//!
//! A [`Registry`] owns the three instruments of a backend kind (operation
//! counter, error counter, duration histogram) and the label schema they are
//! recorded with. It is created once at startup and shared by every wrapper
//! of that kind through an `Arc`.
//!
//! # Example
//!
//! ```rust
//! use promred::{LabelSchema, MetricsNamespace, OperationDescriptor, Outcome, Registry};
//! use std::time::Duration;
//!
//! let namespace = MetricsNamespace::new();
//! let registry = Registry::create_in(
//!     &namespace,
//!     "redis",
//!     LabelSchema::new(&["invoker", "operation"]),
//! )?;
//! assert_eq!(registry.operation_total(), "redis_operation_total");
//!
//! let descriptor = OperationDescriptor::invoked("checkout", "Get");
//! registry.record(&descriptor, Duration::from_millis(3), Outcome::Success);
//!
//! // The same names cannot be claimed twice.
//! assert!(Registry::create_in(&namespace, "redis", LabelSchema::new(&["invoker"])).is_err());
//! # Ok::<(), promred::PromredError>(())
//! ```

pub mod namespace;
pub mod schema;

use std::time::Duration;

use metrics::{Label, Unit};
use tracing::{debug, error};

pub use namespace::{InstrumentKind, MetricsNamespace};
pub use schema::LabelSchema;

use crate::classify::Outcome;
use crate::descriptor::OperationDescriptor;
use crate::telemetry;
use crate::{PromredError, Result};

/// The instruments of one backend kind.
#[derive(Debug)]
pub struct Registry {
    prefix: String,
    operation_total: String,
    error_total: String,
    duration_seconds: String,
    schema: LabelSchema,
}

impl Registry {
    /// Register `{prefix}_operation_total`, `{prefix}_error_total` and
    /// `{prefix}_duration_seconds` in the process-wide namespace.
    pub fn create(prefix: &str, schema: LabelSchema) -> Result<Self> {
        Self::create_in(MetricsNamespace::global(), prefix, schema)
    }

    /// Register the instruments in an explicit namespace.
    ///
    /// Fails with [`PromredError::RegistrationConflict`] if any of the three
    /// names is taken; in that case none of them is registered.
    pub fn create_in(namespace: &MetricsNamespace, prefix: &str, schema: LabelSchema) -> Result<Self> {
        if !schema::is_valid_metric_name(prefix) {
            return Err(PromredError::InvalidMetricName(prefix.to_string()));
        }
        schema.validate()?;

        let registry = Self {
            prefix: prefix.to_string(),
            operation_total: format!("{prefix}_{}", telemetry::OPERATION_TOTAL_SUFFIX),
            error_total: format!("{prefix}_{}", telemetry::ERROR_TOTAL_SUFFIX),
            duration_seconds: format!("{prefix}_{}", telemetry::DURATION_SECONDS_SUFFIX),
            schema,
        };

        namespace.claim(&[
            (
                registry.operation_total.as_str(),
                InstrumentKind::Counter,
                registry.schema.counter(),
            ),
            (
                registry.error_total.as_str(),
                InstrumentKind::Counter,
                registry.schema.counter(),
            ),
            (
                registry.duration_seconds.as_str(),
                InstrumentKind::Histogram,
                registry.schema.histogram(),
            ),
        ])?;

        metrics::describe_counter!(
            registry.operation_total.clone(),
            Unit::Count,
            telemetry::OPERATION_TOTAL_HELP
        );
        metrics::describe_counter!(
            registry.error_total.clone(),
            Unit::Count,
            telemetry::ERROR_TOTAL_HELP
        );
        metrics::describe_histogram!(
            registry.duration_seconds.clone(),
            Unit::Seconds,
            telemetry::DURATION_SECONDS_HELP
        );

        debug!(prefix, "registry created");
        Ok(registry)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Name of the operation counter.
    pub fn operation_total(&self) -> &str {
        &self.operation_total
    }

    /// Name of the error counter.
    pub fn error_total(&self) -> &str {
        &self.error_total
    }

    /// Name of the duration histogram.
    pub fn duration_seconds(&self) -> &str {
        &self.duration_seconds
    }

    pub fn schema(&self) -> &LabelSchema {
        &self.schema
    }

    /// Check that `descriptor` carries exactly the labels this registry's
    /// instruments are recorded with.
    pub fn check(&self, descriptor: &OperationDescriptor) -> Result<()> {
        let expected = self.schema.descriptor_labels();
        let matches = descriptor.len() == expected.len()
            && expected.iter().all(|name| descriptor.get(name).is_some());
        if matches {
            return Ok(());
        }
        Err(PromredError::LabelArityMismatch {
            instrument: self.prefix.clone(),
            expected: expected.join(", "),
            actual: descriptor.names().collect::<Vec<_>>().join(", "),
        })
    }

    /// Record one call: a duration observation and an operation increment,
    /// plus an error increment when `outcome` is a failure.
    ///
    /// A descriptor that does not match the schema is a wiring defect; the
    /// sample is dropped and logged rather than recorded under wrong labels.
    pub fn record(&self, descriptor: &OperationDescriptor, elapsed: Duration, outcome: Outcome) {
        if let Err(e) = self.check(descriptor) {
            error!(error = %e, "dropping metric sample");
            return;
        }

        let counter_labels = project(self.schema.counter(), descriptor);
        let histogram_labels = project(self.schema.histogram(), descriptor);

        metrics::histogram!(self.duration_seconds.clone(), histogram_labels)
            .record(elapsed.as_secs_f64());
        metrics::counter!(self.operation_total.clone(), counter_labels.clone()).increment(1);
        if outcome.is_failure() {
            metrics::counter!(self.error_total.clone(), counter_labels).increment(1);
        }
    }
}

/// Label values for `names`, in schema order. Callers check the descriptor first.
fn project(names: &[&'static str], descriptor: &OperationDescriptor) -> Vec<Label> {
    names
        .iter()
        .filter_map(|name| descriptor.get(name).map(|value| Label::new(*name, value.to_owned())))
        .collect()
}
