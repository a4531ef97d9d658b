//! Lifecycle Event Port
//!
//! Observable interface for deploy and destroy runs. Terminal progress,
//! NDJSON streams and silent runs are all sinks.

use std::path::PathBuf;

use crate::domain::value_objects::{LifecycleStep, TimeEstimate};

/// Event emitted while driving a workspace through its lifecycle
#[derive(Debug, Clone)]
pub enum LifecycleEvent {
    /// Modules copied into the workspace
    WorkspacePrepared { path: PathBuf, modules: usize },

    /// Generated a bucket name for the artifact store
    BucketGenerated { bucket: String, attempts: usize },

    /// Artifacts written to disk
    Rendered { fingerprint: String },

    /// Terraform step started
    StepStarted { step: LifecycleStep },

    /// Terraform step finished
    StepFinished { step: LifecycleStep, success: bool },

    /// Plan scanned for an estimate
    Estimated { estimate: TimeEstimate },

    /// Long-running step progress
    Progress { percent: u8, message: String },

    /// Stateful resource cleanup ran (best effort)
    CleanupAttempted { target: String, success: bool },

    /// User declined the confirmation prompt
    Cancelled,
}

/// Trait for receiving lifecycle events
pub trait LifecycleEventSink {
    fn on_event(&self, event: LifecycleEvent);
}

/// No-op sink for silent operation
pub struct NoopEventSink;

impl LifecycleEventSink for NoopEventSink {
    fn on_event(&self, _event: LifecycleEvent) {}
}
