//! DeployML - declarative MLOps stack deployment
//!
//! A stack config (YAML) names a cloud, a deployment type and the tools for
//! each MLOps stage. DeployML resolves it, renders Terraform from templates
//! into a per-stack workspace, drives Terraform through its lifecycle and
//! turns the resulting outputs into a registry of service endpoints.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use domain::entities::{StackConfig, Workspace};
pub use domain::value_objects::Cloud;
pub use error::{DeploymlError, DeploymlResult};
