//! Metric naming constants.
//!
//! Every registry exposes three instruments derived from its prefix. Consumers
//! install their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! Counters end in `_total`, the histogram is in seconds:
//!
//! - `{prefix}_operation_total`: every call, successful or not
//! - `{prefix}_error_total`: calls classified as failed
//! - `{prefix}_duration_seconds`: call duration
//!
//! # Common labels
//!
//! - `invoker`: caller-supplied tag for backends without a request identity
//! - `operation`: backend operation (e.g. "Get", "SendMessage", "Heartbeat")
//! - `path`, `http_method`: request identity for HTTP backends
//! - `status_code`: response status, handler counters only

/// Suffix of the operation counter.
pub const OPERATION_TOTAL_SUFFIX: &str = "operation_total";

/// Suffix of the error counter.
pub const ERROR_TOTAL_SUFFIX: &str = "error_total";

/// Suffix of the duration histogram.
pub const DURATION_SECONDS_SUFFIX: &str = "duration_seconds";

pub const OPERATION_TOTAL_HELP: &str = "The number of operations";
pub const ERROR_TOTAL_HELP: &str = "The number of those operations that have failed";
pub const DURATION_SECONDS_HELP: &str = "The amount of time those operations take";

/// Label: caller-supplied invoker tag.
pub const INVOKER: &str = "invoker";

/// Label: backend operation name.
pub const OPERATION: &str = "operation";

/// Label: request path.
pub const PATH: &str = "path";

/// Label: request method.
pub const HTTP_METHOD: &str = "http_method";

/// Label: response status code.
pub const STATUS_CODE: &str = "status_code";

/// `status_code` value used when no response was produced.
pub const NO_STATUS: &str = "none";
