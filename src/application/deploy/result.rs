//! Deploy Result

use crate::domain::entities::{OutputMap, ServiceUrlCollection, StackConfig, Workspace};
use crate::domain::services::ResolutionReport;
use crate::domain::value_objects::{Fingerprint, TimeEstimate};

/// How a deploy ended, short of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployOutcome {
    /// Apply ran and succeeded
    Applied,
    /// The user declined after seeing the plan
    Cancelled,
}

/// Result of a deploy operation
#[derive(Debug, Clone)]
pub struct DeployResult {
    pub outcome: DeployOutcome,
    pub workspace: Workspace,
    /// Config as rendered, after resolution
    pub config: StackConfig,
    pub resolution: ResolutionReport,
    pub fingerprint: Fingerprint,
    pub estimate: Option<TimeEstimate>,
    /// Raw outputs; empty unless applied
    pub outputs: OutputMap,
    pub urls: ServiceUrlCollection,
}

impl DeployResult {
    pub fn is_applied(&self) -> bool {
        self.outcome == DeployOutcome::Applied
    }
}
