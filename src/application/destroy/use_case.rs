//! Destroy Use Case
//!
//! Absent workspace is a no-op. Otherwise: confirm, scan the destroy plan,
//! drop the tracking database if a Cloud SQL instance is going away,
//! destroy, then clean up local files.

use tracing::{debug, warn};

use crate::application::provisioning::ProvisioningDriver;
use crate::domain::ports::{CloudSession, DatabaseAdmin};
use crate::domain::value_objects::{LifecycleStep, Operation};
use crate::error::DeploymlResult;

use super::options::{DestroyOptions, PostDestroy};
use super::result::{DestroyOutcome, DestroyResult};

pub const STATE_CLEANUP_PROMPT: &str = "Clean up Terraform state files?";

pub struct DestroyUseCase<'a> {
    driver: ProvisioningDriver<'a>,
    session: &'a dyn CloudSession,
    admin: &'a dyn DatabaseAdmin,
}

impl<'a> DestroyUseCase<'a> {
    pub fn new(
        driver: ProvisioningDriver<'a>,
        session: &'a dyn CloudSession,
        admin: &'a dyn DatabaseAdmin,
    ) -> Self {
        Self {
            driver,
            session,
            admin,
        }
    }

    pub fn execute(&self, options: DestroyOptions) -> DeploymlResult<DestroyResult> {
        let DestroyOptions {
            workspace,
            project_id,
            post_destroy,
        } = options;

        if !self.driver.workspace_exists(&workspace) {
            debug!(workspace = %workspace.name(), "no workspace, nothing to destroy");
            return Ok(DestroyResult::new(DestroyOutcome::Absent, workspace));
        }

        let prompt = format!(
            "Are you sure you want to destroy all resources in '{}'?",
            workspace.name()
        );
        if !self.driver.confirm(&prompt)? {
            debug!("destroy cancelled");
            return Ok(DestroyResult::new(DestroyOutcome::Cancelled, workspace));
        }

        if let Some(project_id) = project_id.as_deref() {
            if let Err(e) = self.session.set_project(project_id) {
                warn!("could not set active project {project_id}: {e}");
            }
        }

        let mut result = DestroyResult::new(DestroyOutcome::Destroyed, workspace);
        let plan = self
            .driver
            .run_lifecycle_step(LifecycleStep::PlanDestroy, &result.workspace)?;
        result.estimate = Some(self.driver.estimate(&plan.stdout, Operation::Destroy));

        result.database_cleanup = self.driver.cleanup_stateful_resources_before_destroy(
            &result.workspace,
            &plan.stdout,
            project_id.as_deref(),
            self.admin,
        );

        self.driver
            .run_lifecycle_step(LifecycleStep::Destroy, &result.workspace)?;
        debug!(workspace = %result.workspace.name(), "destroyed");

        match post_destroy {
            PostDestroy::RemoveWorkspace => {
                self.driver.clean_workspace(&result.workspace)?;
                result.workspace_removed = true;
            }
            PostDestroy::OfferStateCleanup => {
                if self.driver.confirm(STATE_CLEANUP_PROMPT)? {
                    result.state_files_removed =
                        self.driver.clean_state_files(&result.workspace)?;
                }
            }
        }
        Ok(result)
    }
}
