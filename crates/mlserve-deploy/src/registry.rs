//! Runtime registry
//!
//! Maps runtime-kind identifiers to factory functions. Embedding
//! applications populate a registry at process start (either the process
//! global or one they own) and the deploy entry points resolve against it.
//! Resolution of an unregistered kind fails before any model method runs.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};
use tracing::{debug, instrument};

use mlserve_core::{BackendError, DeployError, DeployResult, Runtime, RuntimeOptions};

/// Factory producing a runtime instance from its options.
pub type RuntimeFactory =
    Arc<dyn Fn(RuntimeOptions) -> Result<Box<dyn Runtime>, BackendError> + Send + Sync>;

/// Registry of runtime implementations keyed by kind
#[derive(Default)]
pub struct RuntimeRegistry {
    factories: RwLock<HashMap<String, RuntimeFactory>>,
}

impl RuntimeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            factories: RwLock::new(HashMap::new()),
        }
    }

    /// Register a factory under a kind. A later registration for the same
    /// kind replaces the earlier one.
    pub fn register<F>(&self, kind: impl Into<String>, factory: F)
    where
        F: Fn(RuntimeOptions) -> Result<Box<dyn Runtime>, BackendError> + Send + Sync + 'static,
    {
        let kind = kind.into();
        debug!(kind = %kind, "Runtime factory registered");
        let mut factories = self.factories.write().unwrap();
        factories.insert(kind, Arc::new(factory));
    }

    /// Whether a factory is registered under the given kind.
    pub fn contains(&self, kind: &str) -> bool {
        self.factories.read().unwrap().contains_key(kind)
    }

    /// Registered kinds, sorted for stable output.
    pub fn kinds(&self) -> Vec<String> {
        let mut kinds: Vec<String> = self.factories.read().unwrap().keys().cloned().collect();
        kinds.sort();
        kinds
    }

    /// Construct the runtime named by `options.runtime`.
    #[instrument(skip(self, options), fields(kind = %options.runtime))]
    pub fn resolve(&self, options: &RuntimeOptions) -> DeployResult<Box<dyn Runtime>> {
        let factory = {
            let factories = self.factories.read().unwrap();
            factories
                .get(&options.runtime)
                .cloned()
                .ok_or_else(|| DeployError::UnknownRuntime(options.runtime.clone()))?
        };

        debug!("Constructing runtime");
        factory(options.clone()).map_err(|source| DeployError::RuntimeInit {
            kind: options.runtime.clone(),
            source,
        })
    }
}

/// Process-wide registry used by [`crate::deploy`]
///
/// Starts empty; the embedding application registers its runtime kinds at
/// startup.
pub fn global() -> &'static RuntimeRegistry {
    static GLOBAL: OnceLock<RuntimeRegistry> = OnceLock::new();
    GLOBAL.get_or_init(RuntimeRegistry::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mlserve_core::Runtime;
    use std::any::Any;

    struct StubRuntime {
        options: RuntimeOptions,
    }

    impl Runtime for StubRuntime {
        fn options(&self) -> &RuntimeOptions {
            &self.options
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn stub_factory(options: RuntimeOptions) -> Result<Box<dyn Runtime>, BackendError> {
        Ok(Box::new(StubRuntime { options }))
    }

    #[test]
    fn test_resolve_constructs_with_given_options() {
        let registry = RuntimeRegistry::new();
        registry.register("stub", stub_factory);

        let mut options = RuntimeOptions::for_kind("stub");
        options.replicas = 4;

        let runtime = registry.resolve(&options).unwrap();
        assert_eq!(runtime.options(), &options);
    }

    #[test]
    fn test_resolve_unknown_kind() {
        let registry = RuntimeRegistry::new();
        let options = RuntimeOptions::for_kind("missing");

        match registry.resolve(&options) {
            Err(DeployError::UnknownRuntime(kind)) => assert_eq!(kind, "missing"),
            Err(other) => panic!("expected UnknownRuntime, got {other:?}"),
            Ok(_) => panic!("expected UnknownRuntime, got a runtime"),
        }
    }

    #[test]
    fn test_resolve_factory_failure() {
        let registry = RuntimeRegistry::new();
        registry.register("broken", |_| Err(BackendError::new("no docker daemon")));

        match registry.resolve(&RuntimeOptions::for_kind("broken")) {
            Err(DeployError::RuntimeInit { kind, .. }) => assert_eq!(kind, "broken"),
            Err(other) => panic!("expected RuntimeInit, got {other:?}"),
            Ok(_) => panic!("expected RuntimeInit, got a runtime"),
        }
    }

    #[test]
    fn test_register_replaces_existing() {
        let registry = RuntimeRegistry::new();
        registry.register("stub", |_| Err(BackendError::new("first")));
        registry.register("stub", stub_factory);

        assert!(registry.resolve(&RuntimeOptions::for_kind("stub")).is_ok());
        assert_eq!(registry.kinds(), vec!["stub".to_string()]);
    }

    #[test]
    fn test_contains_and_kinds() {
        let registry = RuntimeRegistry::new();
        registry.register("kubernetes", stub_factory);
        registry.register("docker", stub_factory);

        assert!(registry.contains("docker"));
        assert!(!registry.contains("lambda"));
        assert_eq!(registry.kinds(), vec!["docker".to_string(), "kubernetes".to_string()]);
    }
}
