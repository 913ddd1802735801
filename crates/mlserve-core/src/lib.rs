//! Core types and contracts for the mlserve deployment adapter
//!
//! This crate defines:
//! - Metadata: model identity, wire protocol, and runtime options
//! - Contracts: the `Model`, `Runtime`, and `Servable` traits that concrete
//!   serving backends implement
//! - Errors: the adapter's error taxonomy and the opaque backend error
//!
//! The adapter itself lives in `mlserve-deploy`; this crate carries no
//! deployment logic.

pub mod contract;
pub mod error;
pub mod metadata;

// Re-export the types most callers need
pub use contract::{Model, Runtime, Servable};
pub use error::{BackendError, DeployError, DeployResult};
pub use metadata::{ModelDetails, ModelFramework, ModelSpec, Protocol, RuntimeOptions};
