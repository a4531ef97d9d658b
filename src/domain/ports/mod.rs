//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod cloud_session;
pub mod confirm;
pub mod lifecycle_events;
pub mod provisioner;
pub mod storage;
pub mod tool_locator;
pub mod workspace_store;

pub use cloud_session::{CloudCliError, CloudCliResult, CloudSession, DatabaseAdmin};
pub use confirm::{Confirmer, FixedAnswer};
pub use lifecycle_events::{LifecycleEvent, LifecycleEventSink, NoopEventSink};
pub use provisioner::{PendingStep, Provisioner, ProvisionerError, ProvisionerResult, ToolOutput};
pub use storage::{BucketRegistry, StorageError};
pub use tool_locator::ToolLocator;
pub use workspace_store::WorkspaceStore;
