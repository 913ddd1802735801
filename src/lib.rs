//! Shared fakes for the mlserve integration test suite
//!
//! A minimal in-process serving backend: a runtime that only carries its
//! options and a model that echoes invocations. Enough to drive the whole
//! deploy / predict / undeploy lifecycle without touching infrastructure.

use async_trait::async_trait;
use std::any::Any;
use std::sync::{Arc, Mutex};

use mlserve_core::{
    BackendError, Model, ModelDetails, ModelSpec, Protocol, Runtime, RuntimeOptions,
};

/// In-process runtime fake. Carries its options and nothing else.
pub struct LocalRuntime {
    options: RuntimeOptions,
}

impl Runtime for LocalRuntime {
    fn options(&self) -> &RuntimeOptions {
        &self.options
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Factory for [`LocalRuntime`], registered under whatever kind a test picks.
pub fn local_runtime(options: RuntimeOptions) -> Result<Box<dyn Runtime>, BackendError> {
    Ok(Box::new(LocalRuntime { options }))
}

/// Model fake that records lifecycle calls and echoes invocations.
pub struct EchoModel {
    spec: ModelSpec,
    calls: Mutex<Vec<&'static str>>,
}

impl EchoModel {
    pub fn new(name: &str) -> Arc<Self> {
        Arc::new(Self {
            spec: ModelSpec::new(
                ModelDetails::new(name, format!("s3://models/{name}")),
                Protocol::V2,
                RuntimeOptions::default(),
            ),
            calls: Mutex::new(vec![]),
        })
    }

    /// Endpoint the fake reports for its deployed model.
    pub fn fixed_endpoint(&self) -> String {
        format!(
            "http://localhost:9000/v2/models/{}/infer",
            self.spec.model_details.name
        )
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Model for EchoModel {
    fn model_spec(&self) -> &ModelSpec {
        &self.spec
    }

    async fn deploy(&self, _runtime: &dyn Runtime) -> Result<(), BackendError> {
        self.record("deploy");
        Ok(())
    }

    async fn wait_ready(&self, _runtime: &dyn Runtime) -> Result<(), BackendError> {
        self.record("wait_ready");
        Ok(())
    }

    async fn invoke(
        &self,
        spec: &ModelSpec,
        request: serde_json::Value,
    ) -> Result<serde_json::Value, BackendError> {
        self.record("invoke");
        Ok(serde_json::json!({
            "model": spec.model_details.name,
            "runtime": spec.runtime_options.runtime,
            "echo": request,
        }))
    }

    fn endpoint(&self, _runtime: &dyn Runtime) -> Result<String, BackendError> {
        Ok(self.fixed_endpoint())
    }

    fn manifest(&self, runtime: &dyn Runtime) -> Result<String, BackendError> {
        Ok(format!(
            "apiVersion: apps/v1\nkind: Deployment\nmetadata:\n  name: {}\n  namespace: {}\nspec:\n  replicas: {}\n",
            self.spec.model_details.name,
            runtime.options().namespace,
            runtime.options().replicas,
        ))
    }

    async fn undeploy(&self, _runtime: &dyn Runtime) -> Result<(), BackendError> {
        self.record("undeploy");
        Ok(())
    }
}
