//! Deployment adapter for the mlserve serving contracts
//!
//! This crate is pure composition over `mlserve-core`:
//! - [`registry::RuntimeRegistry`]: explicit mapping from runtime-kind
//!   identifier to factory, populated at process start
//! - [`remote::RemoteModel`]: uniform handle exposing
//!   deploy / predict / endpoint / manifest / undeploy
//! - [`deploy`] / [`deploy_with`]: resolve, wrap, and immediately deploy
//!
//! The adapter owns no provisioning, readiness, invocation, or teardown
//! logic; every substantive operation is delegated to the registered
//! backends, and every backend failure propagates unchanged.

pub mod registry;
pub mod remote;

// Re-export adapter types for convenience
pub use registry::{RuntimeFactory, RuntimeRegistry};
pub use remote::RemoteModel;

use mlserve_core::{DeployResult, RuntimeOptions, Servable};

/// Resolve a runtime from the global registry, wrap the model, and deploy.
///
/// `None` options mean [`RuntimeOptions::default`]. Returns the live handle
/// once the backend reports ready. Resolution failure occurs before any
/// model method is invoked.
pub async fn deploy(
    source: &dyn Servable,
    options: Option<RuntimeOptions>,
) -> DeployResult<RemoteModel> {
    deploy_with(registry::global(), source, options).await
}

/// [`deploy`] against an explicit registry instead of the process global.
pub async fn deploy_with(
    registry: &RuntimeRegistry,
    source: &dyn Servable,
    options: Option<RuntimeOptions>,
) -> DeployResult<RemoteModel> {
    let options = options.unwrap_or_default();
    let runtime = registry.resolve(&options)?;
    let handle = RemoteModel::new(source, runtime)?;
    handle.deploy().await?;
    Ok(handle)
}
