//! Time estimate value object

use std::fmt;
use std::time::Duration;

use super::Operation;

/// Why an estimate came out the way it did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimateBasis {
    /// Plan had no resource change lines
    NoChanges,
    /// Managed database instances dominate provisioning time
    ManagedDatabase { instances: usize },
    /// Tiered per-resource cost
    ResourceCount { resources: usize },
}

/// Duration estimate for an apply or destroy, in whole minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeEstimate {
    pub minutes: u32,
    pub basis: EstimateBasis,
    pub operation: Operation,
}

impl TimeEstimate {
    pub fn duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.minutes.max(1)) * 60)
    }
}

impl fmt::Display for TimeEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.basis {
            EstimateBasis::NoChanges => f.write_str("~1 minute"),
            EstimateBasis::ManagedDatabase { .. } => {
                write!(f, "~{} minutes (Cloud SQL/PostgreSQL detected)", self.minutes)
            }
            EstimateBasis::ResourceCount { .. } if self.minutes == 1 => f.write_str("~1 minute"),
            EstimateBasis::ResourceCount { .. } => write!(f, "~{} minutes", self.minutes),
        }
    }
}
