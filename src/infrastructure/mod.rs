//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `terraform` - Terraform CLI provisioner
//! - `gcloud` - gcloud-backed bucket registry, session and database admin
//! - `locator` - PATH lookup for doctor
//! - `fs/` - atomic writes and the local workspace store
//! - `repositories/` - stack config files and template overrides
//! - `events/` - NDJSON lifecycle event sink

pub mod events;
pub mod fs;
pub mod gcloud;
pub mod locator;
pub mod repositories;
pub mod terraform;

// Re-export for convenience
pub use events::JsonEventSink;
pub use fs::{atomic_write, LocalWorkspaceStore};
pub use gcloud::GcloudCli;
pub use locator::WhichLocator;
pub use repositories::{load_template_overrides, YamlStackConfigRepository};
pub use terraform::TerraformCli;
