//! Model and runtime metadata
//!
//! Serde-backed value types describing a model's identity, the wire protocol
//! it speaks, and the options a runtime implementation is constructed with.
//! All fields carry serde defaults so partial JSON/TOML documents parse.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Errors from parsing runtime options documents
#[derive(Error, Debug)]
pub enum OptionsParseError {
    #[error("invalid JSON runtime options: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid TOML runtime options: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Wire protocol a deployed model speaks (mirrors the serving backends)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    /// Open inference protocol v2
    #[default]
    V2,
    Seldon,
    Tensorflow,
}

/// Serving platform the model artifact targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ModelFramework {
    Sklearn,
    Xgboost,
    Tensorflow,
    Pytorch,
    Onnx,
    Mlflow,
    #[default]
    Custom,
}

/// Identity and signature of a registered model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDetails {
    /// Model name, unique within a namespace
    pub name: String,
    /// Artifact location (e.g. `s3://...` or `gs://...`)
    pub uri: String,
    /// Local staging folder, if the artifact is mirrored on disk
    #[serde(default)]
    pub local_folder: String,
    #[serde(default)]
    pub description: String,
    /// Serving platform for the artifact
    #[serde(default)]
    pub platform: ModelFramework,
    /// Input signature field names
    #[serde(default)]
    pub inputs: Vec<String>,
    /// Output signature field names
    #[serde(default)]
    pub outputs: Vec<String>,
}

impl ModelDetails {
    /// Minimal details: a name and an artifact uri, everything else default.
    pub fn new(name: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            uri: uri.into(),
            local_folder: String::new(),
            description: String::new(),
            platform: ModelFramework::default(),
            inputs: vec![],
            outputs: vec![],
        }
    }
}

/// Runtime kind registered for local Docker serving.
pub const DEFAULT_RUNTIME_KIND: &str = "docker";

/// Options a runtime implementation is constructed with
///
/// `runtime` names the registry kind to resolve; everything else is handed
/// to the constructed runtime and copied into the deployed model's spec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeOptions {
    /// Registry kind under which the runtime implementation is registered
    #[serde(default = "default_runtime_kind")]
    pub runtime: String,
    /// Target namespace for namespaced runtimes
    #[serde(default = "default_namespace")]
    pub namespace: String,
    /// Desired replica count for the deployment
    #[serde(default = "default_replicas")]
    pub replicas: u32,
    /// Runtime-specific settings, passed through untouched
    #[serde(default)]
    pub settings: HashMap<String, serde_json::Value>,
}

fn default_runtime_kind() -> String {
    DEFAULT_RUNTIME_KIND.to_string()
}

fn default_namespace() -> String {
    "default".to_string()
}

fn default_replicas() -> u32 {
    1
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self {
            runtime: default_runtime_kind(),
            namespace: default_namespace(),
            replicas: default_replicas(),
            settings: HashMap::new(),
        }
    }
}

impl RuntimeOptions {
    /// Default options targeting the given registry kind.
    pub fn for_kind(kind: impl Into<String>) -> Self {
        Self {
            runtime: kind.into(),
            ..Default::default()
        }
    }

    /// Parse options from a JSON document. Missing fields take defaults.
    pub fn from_json_str(s: &str) -> Result<Self, OptionsParseError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Parse options from a TOML document. Missing fields take defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, OptionsParseError> {
        Ok(toml::from_str(s)?)
    }
}

/// The spec a model is deployed and invoked under
///
/// Built by the adapter handle from the wrapped model's own details and
/// protocol plus the options of the runtime it was paired with. Immutable
/// after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSpec {
    pub model_details: ModelDetails,
    pub protocol: Protocol,
    pub runtime_options: RuntimeOptions,
}

impl ModelSpec {
    pub fn new(
        model_details: ModelDetails,
        protocol: Protocol,
        runtime_options: RuntimeOptions,
    ) -> Self {
        Self {
            model_details,
            protocol,
            runtime_options,
        }
    }

    /// Copy of this spec re-targeted at another runtime's options.
    pub fn with_runtime_options(&self, runtime_options: RuntimeOptions) -> Self {
        Self {
            model_details: self.model_details.clone(),
            protocol: self.protocol,
            runtime_options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runtime_options_defaults() {
        let options = RuntimeOptions::default();
        assert_eq!(options.runtime, "docker");
        assert_eq!(options.namespace, "default");
        assert_eq!(options.replicas, 1);
        assert!(options.settings.is_empty());
    }

    #[test]
    fn test_runtime_options_partial_json() {
        let options = RuntimeOptions::from_json_str(r#"{"runtime": "kubernetes"}"#).unwrap();
        assert_eq!(options.runtime, "kubernetes");
        assert_eq!(options.namespace, "default");
        assert_eq!(options.replicas, 1);
    }

    #[test]
    fn test_runtime_options_toml() {
        let doc = r#"
            runtime = "kubernetes"
            namespace = "serving"
            replicas = 3

            [settings]
            gpu = true
        "#;
        let options = RuntimeOptions::from_toml_str(doc).unwrap();
        assert_eq!(options.runtime, "kubernetes");
        assert_eq!(options.namespace, "serving");
        assert_eq!(options.replicas, 3);
        assert_eq!(options.settings["gpu"], serde_json::json!(true));
    }

    #[test]
    fn test_runtime_options_invalid_json() {
        assert!(RuntimeOptions::from_json_str("{not json").is_err());
    }

    #[test]
    fn test_protocol_serialization() {
        assert_eq!(serde_json::to_string(&Protocol::V2).unwrap(), r#""v2""#);
        let parsed: Protocol = serde_json::from_str(r#""seldon""#).unwrap();
        assert_eq!(parsed, Protocol::Seldon);
    }

    #[test]
    fn test_model_details_minimal() {
        let details = ModelDetails::new("iris", "s3://models/iris");
        assert_eq!(details.name, "iris");
        assert_eq!(details.platform, ModelFramework::Custom);
        assert!(details.inputs.is_empty());
    }

    #[test]
    fn test_spec_retarget_keeps_identity() {
        let spec = ModelSpec::new(
            ModelDetails::new("iris", "s3://models/iris"),
            Protocol::Seldon,
            RuntimeOptions::default(),
        );
        let retargeted = spec.with_runtime_options(RuntimeOptions::for_kind("kubernetes"));
        assert_eq!(retargeted.model_details, spec.model_details);
        assert_eq!(retargeted.protocol, Protocol::Seldon);
        assert_eq!(retargeted.runtime_options.runtime, "kubernetes");
    }
}
