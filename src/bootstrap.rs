//! Backend kinds and registry bootstrap.

use std::fmt;
use std::sync::Arc;

use crate::classify::Policy;
use crate::config::Config;
use crate::registry::{LabelSchema, MetricsNamespace, Registry};
use crate::telemetry;
use crate::Result;

/// The backend shapes this crate knows how to instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Outbound HTTP requests.
    HttpClient,
    /// Inbound HTTP request handlers.
    Handler,
    /// Key-value stores.
    Store,
    /// Message queues.
    Queue,
    /// Pub/sub publishers.
    Publisher,
    /// Message-stream brokers (readers, writers, heartbeats).
    Stream,
}

impl BackendKind {
    pub const ALL: [BackendKind; 6] = [
        BackendKind::HttpClient,
        BackendKind::Handler,
        BackendKind::Store,
        BackendKind::Queue,
        BackendKind::Publisher,
        BackendKind::Stream,
    ];

    /// Config key and display name.
    pub fn as_str(self) -> &'static str {
        match self {
            BackendKind::HttpClient => "http_client",
            BackendKind::Handler => "handler",
            BackendKind::Store => "store",
            BackendKind::Queue => "queue",
            BackendKind::Publisher => "publisher",
            BackendKind::Stream => "stream",
        }
    }

    /// Metric name prefix used when the configuration does not set one.
    pub fn default_prefix(self) -> &'static str {
        match self {
            BackendKind::HttpClient => "doer",
            BackendKind::Handler => "handler",
            BackendKind::Store => "redis",
            BackendKind::Queue => "sqs",
            BackendKind::Publisher => "sns",
            BackendKind::Stream => "kafka",
        }
    }

    /// Labels the wrappers of this kind record with.
    pub fn label_schema(self) -> LabelSchema {
        match self {
            BackendKind::HttpClient => {
                LabelSchema::new(&[telemetry::PATH, telemetry::HTTP_METHOD])
            }
            BackendKind::Handler => LabelSchema::new(&[
                telemetry::PATH,
                telemetry::HTTP_METHOD,
                telemetry::STATUS_CODE,
            ])
            .histogram_labels(&[telemetry::PATH, telemetry::HTTP_METHOD]),
            BackendKind::Store
            | BackendKind::Queue
            | BackendKind::Publisher
            | BackendKind::Stream => LabelSchema::new(&[telemetry::INVOKER, telemetry::OPERATION]),
        }
    }

    /// How calls of this kind are classified.
    pub fn policy(self) -> Policy {
        match self {
            BackendKind::HttpClient => {
                Policy::Any(&[Policy::NullableResult, Policy::StatusCode])
            }
            BackendKind::Handler => Policy::Any(&[Policy::ErrorReturned, Policy::StatusCode]),
            BackendKind::Store | BackendKind::Queue | BackendKind::Publisher => {
                Policy::ErrorReturned
            }
            BackendKind::Stream => Policy::EmbeddedError,
        }
    }

    /// Register this kind's instruments under `prefix`.
    pub fn register_in(self, namespace: &MetricsNamespace, prefix: &str) -> Result<Arc<Registry>> {
        Registry::create_in(namespace, prefix, self.label_schema()).map(Arc::new)
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One registry per backend kind, created together at startup.
#[derive(Debug, Clone)]
pub struct Registries {
    pub http_client: Arc<Registry>,
    pub handler: Arc<Registry>,
    pub store: Arc<Registry>,
    pub queue: Arc<Registry>,
    pub publisher: Arc<Registry>,
    pub stream: Arc<Registry>,
}

impl Registries {
    /// Register every backend kind in the process-wide namespace.
    pub fn register(config: &Config) -> Result<Self> {
        Self::register_in(MetricsNamespace::global(), config)
    }

    /// Register every backend kind in `namespace`.
    pub fn register_in(namespace: &MetricsNamespace, config: &Config) -> Result<Self> {
        let register = |kind: BackendKind| kind.register_in(namespace, &config.prefix_for(kind));
        Ok(Self {
            http_client: register(BackendKind::HttpClient)?,
            handler: register(BackendKind::Handler)?,
            store: register(BackendKind::Store)?,
            queue: register(BackendKind::Queue)?,
            publisher: register(BackendKind::Publisher)?,
            stream: register(BackendKind::Stream)?,
        })
    }

    /// The registry of `kind`.
    pub fn get(&self, kind: BackendKind) -> &Arc<Registry> {
        match kind {
            BackendKind::HttpClient => &self.http_client,
            BackendKind::Handler => &self.handler,
            BackendKind::Store => &self.store,
            BackendKind::Queue => &self.queue,
            BackendKind::Publisher => &self.publisher,
            BackendKind::Stream => &self.stream,
        }
    }
}
