//! Destroy Result

use std::path::PathBuf;

use crate::application::provisioning::CleanupOutcome;
use crate::domain::entities::Workspace;
use crate::domain::value_objects::TimeEstimate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestroyOutcome {
    /// No workspace on disk; nothing ran
    Absent,
    Cancelled,
    Destroyed,
}

#[derive(Debug, Clone)]
pub struct DestroyResult {
    pub outcome: DestroyOutcome,
    pub workspace: Workspace,
    pub estimate: Option<TimeEstimate>,
    pub database_cleanup: CleanupOutcome,
    pub workspace_removed: bool,
    pub state_files_removed: Vec<PathBuf>,
}

impl DestroyResult {
    pub(super) fn new(outcome: DestroyOutcome, workspace: Workspace) -> Self {
        Self {
            outcome,
            workspace,
            estimate: None,
            database_cleanup: CleanupOutcome::default(),
            workspace_removed: false,
            state_files_removed: Vec::new(),
        }
    }
}
