//! Domain Layer
//!
//! The orchestration core of deployml, free of direct I/O.
//!
//! ## Structure
//!
//! - `entities/` - StackConfig, Workspace, ServiceUrlCollection
//! - `value_objects/` - Cloud, LifecycleStep, TimeEstimate, Fingerprint, bucket names
//! - `services/` - ConfigResolver, TemplateRenderer, progress estimation, output normalization
//! - `ports/` - Interfaces for Terraform, gcloud, storage and the workspace on disk

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
