//! Serving contracts
//!
//! The explicit trait surface concrete serving backends implement. The
//! adapter in `mlserve-deploy` drives the whole lifecycle through these
//! traits and owns no behavior of its own: provisioning, readiness
//! detection, remote invocation, manifest rendering, and teardown are all
//! backend-defined.

use async_trait::async_trait;
use std::any::Any;
use std::sync::Arc;

use crate::error::BackendError;
use crate::metadata::{ModelSpec, RuntimeOptions};

/// A deployable model backend
///
/// Every method that touches infrastructure receives the runtime it should
/// act against; the adapter guarantees it is always the runtime the handle
/// was constructed with.
#[async_trait]
pub trait Model: Send + Sync {
    /// The model's own spec: identity, protocol, and authored options.
    fn model_spec(&self) -> &ModelSpec;

    /// Provision the model on the given runtime.
    async fn deploy(&self, runtime: &dyn Runtime) -> Result<(), BackendError>;

    /// Block until the deployed model reports ready. Timeout policy, if
    /// any, is the backend's.
    async fn wait_ready(&self, runtime: &dyn Runtime) -> Result<(), BackendError>;

    /// Invoke the deployed model remotely under the given spec.
    async fn invoke(
        &self,
        spec: &ModelSpec,
        request: serde_json::Value,
    ) -> Result<serde_json::Value, BackendError>;

    /// Network endpoint the deployed model answers on. Pure query.
    fn endpoint(&self, runtime: &dyn Runtime) -> Result<String, BackendError>;

    /// Deployment manifest for the given runtime (e.g. Kubernetes YAML).
    /// Pure query.
    fn manifest(&self, runtime: &dyn Runtime) -> Result<String, BackendError>;

    /// Tear the deployed model down.
    async fn undeploy(&self, runtime: &dyn Runtime) -> Result<(), BackendError>;
}

/// A deployment runtime implementation
///
/// Opaque to the adapter beyond its options: all behavior is invoked
/// through [`Model`] methods, which receive the runtime as a parameter.
/// Instances are produced only by registry factories.
pub trait Runtime: Send + Sync {
    /// The options this runtime was constructed with.
    fn options(&self) -> &RuntimeOptions;

    /// Lets a concrete model recover the runtime it was paired with.
    fn as_any(&self) -> &dyn Any;
}

/// Something a serving model can be extracted from
///
/// User-facing objects (a pipeline definition, a decorated function, a
/// model wrapper) implement this to hand the adapter their normalized
/// model. `None` means the object carries no servable model and handle
/// construction fails.
pub trait Servable {
    fn serving_model(&self) -> Option<Arc<dyn Model>>;
}

impl Servable for Arc<dyn Model> {
    fn serving_model(&self) -> Option<Arc<dyn Model>> {
        Some(self.clone())
    }
}

impl<M> Servable for Arc<M>
where
    M: Model + 'static,
{
    fn serving_model(&self) -> Option<Arc<dyn Model>> {
        Some(self.clone() as Arc<dyn Model>)
    }
}
