//! Error taxonomy for the deployment adapter
//!
//! The adapter performs no local recovery: every failure from a model or
//! runtime backend is wrapped with the operation it occurred in and
//! propagated unchanged to the caller. No retries, no partial-failure
//! handling.

use thiserror::Error;

/// Boxed error type backends may chain as a source.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Opaque error raised by an external model or runtime implementation.
///
/// The adapter never interprets these; diagnosing one means looking at the
/// backend that produced it.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct BackendError {
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }
}

/// Errors surfaced by the deployment adapter
#[derive(Error, Debug)]
pub enum DeployError {
    /// The requested runtime kind has no registered factory
    #[error("no runtime registered under kind '{0}'")]
    UnknownRuntime(String),
    /// A registered factory failed to construct its runtime
    #[error("runtime '{kind}' could not be constructed")]
    RuntimeInit {
        kind: String,
        #[source]
        source: BackendError,
    },
    /// The supplied object does not expose a servable model
    #[error("object does not expose a servable model")]
    NotServable,
    /// Deploy or readiness-wait failed
    #[error("deploy of model '{model}' failed")]
    Deploy {
        model: String,
        #[source]
        source: BackendError,
    },
    /// Remote invocation failed
    #[error("remote call to model '{model}' failed")]
    Invoke {
        model: String,
        #[source]
        source: BackendError,
    },
    /// Endpoint lookup failed
    #[error("endpoint lookup for model '{model}' failed")]
    Endpoint {
        model: String,
        #[source]
        source: BackendError,
    },
    /// Manifest rendering failed
    #[error("manifest render for model '{model}' failed")]
    Manifest {
        model: String,
        #[source]
        source: BackendError,
    },
    /// Teardown failed
    #[error("undeploy of model '{model}' failed")]
    Undeploy {
        model: String,
        #[source]
        source: BackendError,
    },
}

/// Result type for adapter operations
pub type DeployResult<T> = Result<T, DeployError>;
