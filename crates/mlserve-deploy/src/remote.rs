//! Remote model handle
//!
//! [`RemoteModel`] pairs a servable model with the runtime it is deployed
//! on and the spec derived from both. The pairing is fixed for the handle's
//! lifetime: every lifecycle call goes to the same runtime, and every
//! remote invocation carries the same spec.

use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use mlserve_core::{DeployError, DeployResult, Model, ModelSpec, Runtime, Servable};

/// Handle to a model operated on a specific runtime
///
/// Construction performs no I/O; `deploy` provisions infrastructure and
/// blocks until the backend reports ready. Dropping the handle does not
/// tear the deployment down; call [`RemoteModel::undeploy`] for that.
pub struct RemoteModel {
    model: Arc<dyn Model>,
    runtime: Box<dyn Runtime>,
    spec: ModelSpec,
}

impl RemoteModel {
    /// Wrap a servable object and a runtime instance.
    ///
    /// The handle's spec copies the model's own identity and protocol and
    /// takes the runtime's options, so invocations always reflect the
    /// runtime the handle was paired with.
    pub fn new(source: &dyn Servable, runtime: Box<dyn Runtime>) -> DeployResult<Self> {
        let model = source.serving_model().ok_or(DeployError::NotServable)?;
        let spec = model
            .model_spec()
            .with_runtime_options(runtime.options().clone());
        Ok(Self {
            model,
            runtime,
            spec,
        })
    }

    fn model_name(&self) -> &str {
        &self.spec.model_details.name
    }

    /// Provision the model and block until the backend reports ready.
    ///
    /// Strict sequence: the backend's deploy completes before its
    /// readiness-wait begins; a deploy failure short-circuits. The backend
    /// owns all timeout policy.
    #[instrument(skip(self), fields(model = %self.model_name(), runtime = %self.spec.runtime_options.runtime))]
    pub async fn deploy(&self) -> DeployResult<()> {
        self.model
            .deploy(self.runtime.as_ref())
            .await
            .map_err(|source| DeployError::Deploy {
                model: self.model_name().to_string(),
                source,
            })?;
        debug!("Deploy accepted, waiting for readiness");

        self.model
            .wait_ready(self.runtime.as_ref())
            .await
            .map_err(|source| DeployError::Deploy {
                model: self.model_name().to_string(),
                source,
            })?;
        info!("Model ready");
        Ok(())
    }

    /// Invoke the deployed model remotely.
    ///
    /// Forwards the request plus the handle's fixed spec and returns the
    /// backend's result unchanged.
    #[instrument(skip(self, request), fields(model = %self.model_name()))]
    pub async fn predict(&self, request: serde_json::Value) -> DeployResult<serde_json::Value> {
        self.model
            .invoke(&self.spec, request)
            .await
            .map_err(|source| DeployError::Invoke {
                model: self.model_name().to_string(),
                source,
            })
    }

    /// Network endpoint the deployed model answers on. Pure query.
    pub fn endpoint(&self) -> DeployResult<String> {
        self.model
            .endpoint(self.runtime.as_ref())
            .map_err(|source| DeployError::Endpoint {
                model: self.model_name().to_string(),
                source,
            })
    }

    /// Deployment manifest for the paired runtime. Pure query.
    pub fn manifest(&self) -> DeployResult<String> {
        self.model
            .manifest(self.runtime.as_ref())
            .map_err(|source| DeployError::Manifest {
                model: self.model_name().to_string(),
                source,
            })
    }

    /// Tear the deployed model down. No retry.
    #[instrument(skip(self), fields(model = %self.model_name()))]
    pub async fn undeploy(&self) -> DeployResult<()> {
        self.model
            .undeploy(self.runtime.as_ref())
            .await
            .map_err(|source| DeployError::Undeploy {
                model: self.model_name().to_string(),
                source,
            })?;
        info!("Model undeployed");
        Ok(())
    }

    /// The spec this handle deploys and invokes under.
    pub fn spec(&self) -> &ModelSpec {
        &self.spec
    }

    /// The runtime this handle is paired with.
    pub fn runtime(&self) -> &dyn Runtime {
        self.runtime.as_ref()
    }
}

impl fmt::Debug for RemoteModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // model and runtime are trait objects; the spec identifies both
        f.debug_struct("RemoteModel")
            .field("spec", &self.spec)
            .finish_non_exhaustive()
    }
}
