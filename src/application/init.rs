//! Init Use Case
//!
//! Prepares a cloud account for its first deploy. On GCP that means
//! enabling the service APIs the templates use; other providers only get
//! guidance.

use tracing::debug;

use crate::domain::ports::CloudSession;
use crate::domain::value_objects::{Cloud, REQUIRED_GCP_APIS};
use crate::error::{DeploymlError, DeploymlResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    ServicesEnabled { project_id: String, count: usize },
    /// Nothing to enable; a hint for the user
    Guidance(&'static str),
}

pub const AWS_GUIDANCE: &str = "No API enablement required for AWS. Ensure IAM permissions are set.";
pub const AZURE_GUIDANCE: &str =
    "No API enablement required for most Azure services. Register providers if needed.";

pub struct InitUseCase<'a> {
    session: &'a dyn CloudSession,
}

impl<'a> InitUseCase<'a> {
    pub fn new(session: &'a dyn CloudSession) -> Self {
        Self { session }
    }

    pub fn execute(&self, cloud: Cloud, project_id: Option<&str>) -> DeploymlResult<InitOutcome> {
        match cloud {
            Cloud::Gcp => {
                let project_id = project_id
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .ok_or_else(|| DeploymlError::ProjectIdRequired {
                        cloud: "GCP".to_string(),
                    })?;
                debug!(project_id, "enabling {} services", REQUIRED_GCP_APIS.len());
                self.session
                    .enable_services(project_id, REQUIRED_GCP_APIS)?;
                Ok(InitOutcome::ServicesEnabled {
                    project_id: project_id.to_string(),
                    count: REQUIRED_GCP_APIS.len(),
                })
            }
            Cloud::Aws => Ok(InitOutcome::Guidance(AWS_GUIDANCE)),
            Cloud::Azure => Ok(InitOutcome::Guidance(AZURE_GUIDANCE)),
        }
    }
}
