//! Provisioning driver
//!
//! The lifecycle steps shared by deploy and destroy: workspace setup,
//! Terraform invocations, estimate + confirmation, apply with progress,
//! pre-destroy cleanup and workspace cleanup.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::domain::entities::{OutputMap, Workspace};
use crate::domain::ports::{
    Confirmer, DatabaseAdmin, LifecycleEvent, LifecycleEventSink, Provisioner, ToolOutput,
    WorkspaceStore,
};
use crate::domain::services::{
    parse_outputs, percent_complete, progress_estimator, RenderedArtifacts, StageMessages,
};
use crate::domain::value_objects::{LifecycleStep, Operation, TimeEstimate};
use crate::error::{DeploymlError, DeploymlResult};

/// Refresh interval of the apply indicator
pub const PROGRESS_TICK: Duration = Duration::from_secs(1);

/// Resource type whose presence in a destroy plan triggers cleanup
pub const SQL_INSTANCE_RESOURCE: &str = "google_sql_database_instance";
/// Output naming the Cloud SQL instance
pub const CONNECTION_NAME_OUTPUT: &str = "instance_connection_name";
/// Database and user the tracking server creates on the instance
pub const TRACKING_DATABASE: &str = "mlflow";
pub const TRACKING_USER: &str = "mlflow";

/// What best-effort database cleanup managed to do
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupOutcome {
    pub instance: Option<String>,
    pub database_dropped: bool,
    pub user_dropped: bool,
}

pub struct ProvisioningDriver<'a> {
    provisioner: &'a dyn Provisioner,
    store: &'a dyn WorkspaceStore,
    confirmer: &'a dyn Confirmer,
    events: &'a dyn LifecycleEventSink,
    tick: Duration,
}

impl<'a> ProvisioningDriver<'a> {
    pub fn new(
        provisioner: &'a dyn Provisioner,
        store: &'a dyn WorkspaceStore,
        confirmer: &'a dyn Confirmer,
        events: &'a dyn LifecycleEventSink,
    ) -> Self {
        Self {
            provisioner,
            store,
            confirmer,
            events,
            tick: PROGRESS_TICK,
        }
    }

    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    pub fn workspace_exists(&self, workspace: &Workspace) -> bool {
        self.store.exists(workspace)
    }

    pub fn prepare_workspace(&self, workspace: &Workspace) -> DeploymlResult<Vec<String>> {
        let modules = self.store.prepare(workspace)?;
        self.events.on_event(LifecycleEvent::WorkspacePrepared {
            path: workspace.terraform_dir(),
            modules: modules.len(),
        });
        Ok(modules)
    }

    pub fn write_artifacts(
        &self,
        workspace: &Workspace,
        artifacts: &RenderedArtifacts,
    ) -> DeploymlResult<()> {
        self.store.write_artifacts(workspace, artifacts)?;
        self.events.on_event(LifecycleEvent::Rendered {
            fingerprint: artifacts.fingerprint.to_string(),
        });
        Ok(())
    }

    /// Run one blocking step.
    ///
    /// A failing init is only logged; the plan that follows reports the
    /// real problem. Plan and destroy failures are errors.
    pub fn run_lifecycle_step(
        &self,
        step: LifecycleStep,
        workspace: &Workspace,
    ) -> DeploymlResult<ToolOutput> {
        self.events.on_event(LifecycleEvent::StepStarted { step });
        debug!(%step, dir = %workspace.terraform_dir().display(), "running terraform");
        let output = self.provisioner.run(step, &workspace.terraform_dir())?;
        let success = output.success();
        self.events
            .on_event(LifecycleEvent::StepFinished { step, success });

        if success {
            return Ok(output);
        }
        match step {
            LifecycleStep::Init => {
                warn!(code = ?output.code, "terraform init failed: {}", output.stderr.trim());
                Ok(output)
            }
            LifecycleStep::Plan | LifecycleStep::PlanDestroy => Err(DeploymlError::PlanFailed {
                stderr: output.stderr,
            }),
            LifecycleStep::Apply => Err(DeploymlError::ApplyFailed {
                code: output.code,
                stderr: output.stderr,
            }),
            LifecycleStep::Destroy => Err(DeploymlError::DestroyFailed {
                code: output.code,
                stderr: output.stderr,
            }),
            LifecycleStep::Output => Err(DeploymlError::Tool {
                tool: "terraform output".to_string(),
                message: output.stderr.trim().to_string(),
            }),
        }
    }

    pub fn estimate(&self, plan_output: &str, operation: Operation) -> TimeEstimate {
        let estimate = progress_estimator::estimate(plan_output, operation);
        self.events
            .on_event(LifecycleEvent::Estimated { estimate });
        estimate
    }

    /// Estimate from the plan text, then ask. `None` means the user declined.
    pub fn estimate_and_confirm(
        &self,
        plan_output: &str,
        operation: Operation,
        prompt: &str,
    ) -> DeploymlResult<Option<TimeEstimate>> {
        let estimate = self.estimate(plan_output, operation);
        if self.confirmer.confirm(prompt)? {
            Ok(Some(estimate))
        } else {
            self.events.on_event(LifecycleEvent::Cancelled);
            Ok(None)
        }
    }

    /// Run apply in the background, refreshing progress every tick until the
    /// waiter reports completion. 100% and the final message are emitted once,
    /// after completion is observed.
    pub fn apply_with_progress(
        &self,
        workspace: &Workspace,
        estimate: &TimeEstimate,
        messages: &StageMessages,
    ) -> DeploymlResult<ToolOutput> {
        let step = LifecycleStep::Apply;
        self.events.on_event(LifecycleEvent::StepStarted { step });
        let pending = self.provisioner.spawn(step, &workspace.terraform_dir())?;
        let started = Instant::now();
        let estimated = estimate.duration();

        let result = loop {
            let percent = percent_complete(started.elapsed(), estimated);
            self.events.on_event(LifecycleEvent::Progress {
                percent,
                message: messages.message_for(percent).to_string(),
            });
            if let Some(result) = pending.wait_timeout(self.tick) {
                break result;
            }
        };

        let output = result?;
        let success = output.success();
        if success {
            self.events.on_event(LifecycleEvent::Progress {
                percent: 100,
                message: messages.final_message().to_string(),
            });
        }
        self.events
            .on_event(LifecycleEvent::StepFinished { step, success });
        debug!(elapsed = ?started.elapsed(), success, "apply finished");

        if success {
            Ok(output)
        } else {
            Err(DeploymlError::ApplyFailed {
                code: output.code,
                stderr: output.stderr,
            })
        }
    }

    /// Drop the tracking database and user before the SQL instance goes away.
    ///
    /// Best effort: every failure is logged and the destroy proceeds.
    pub fn cleanup_stateful_resources_before_destroy(
        &self,
        workspace: &Workspace,
        plan_output: &str,
        project_id: Option<&str>,
        admin: &dyn DatabaseAdmin,
    ) -> CleanupOutcome {
        let mut outcome = CleanupOutcome::default();
        if !plan_output.contains(SQL_INSTANCE_RESOURCE) {
            return outcome;
        }

        let connection_name = match self
            .provisioner
            .output_raw(&workspace.terraform_dir(), CONNECTION_NAME_OUTPUT)
        {
            Ok(Some(name)) => name,
            Ok(None) => {
                warn!("destroy plan removes a Cloud SQL instance but no connection name is known");
                return outcome;
            }
            Err(e) => {
                warn!("could not read {CONNECTION_NAME_OUTPUT}: {e}");
                return outcome;
            }
        };

        let parts: Vec<&str> = connection_name.trim().split(':').collect();
        let (project, instance) = match parts.as_slice() {
            [project, _region, instance] => (Some(*project), *instance),
            [instance] => (None, *instance),
            _ => {
                warn!("unexpected connection name shape: {connection_name}");
                return outcome;
            }
        };
        let Some(project) = project_id.or(project) else {
            warn!("no project known for instance {instance}, skipping database cleanup");
            return outcome;
        };
        outcome.instance = Some(instance.to_string());

        match admin.drop_database(instance, project, TRACKING_DATABASE) {
            Ok(()) => outcome.database_dropped = true,
            Err(e) => warn!("could not drop database {TRACKING_DATABASE}: {e}"),
        }
        self.events.on_event(LifecycleEvent::CleanupAttempted {
            target: format!("database {TRACKING_DATABASE} on {instance}"),
            success: outcome.database_dropped,
        });

        match admin.drop_user(instance, project, TRACKING_USER) {
            Ok(()) => outcome.user_dropped = true,
            Err(e) => warn!("could not drop user {TRACKING_USER}: {e}"),
        }
        self.events.on_event(LifecycleEvent::CleanupAttempted {
            target: format!("user {TRACKING_USER} on {instance}"),
            success: outcome.user_dropped,
        });

        outcome
    }

    /// `terraform output -json`, parsed. Unparseable output is an empty map.
    pub fn read_outputs(&self, workspace: &Workspace) -> DeploymlResult<OutputMap> {
        let output = self.run_lifecycle_step(LifecycleStep::Output, workspace)?;
        Ok(parse_outputs(&output.stdout).unwrap_or_else(|e| {
            warn!("could not parse terraform outputs: {e}");
            OutputMap::new()
        }))
    }

    pub fn clean_workspace(&self, workspace: &Workspace) -> DeploymlResult<()> {
        self.store.remove(workspace)
    }

    pub fn clean_state_files(&self, workspace: &Workspace) -> DeploymlResult<Vec<PathBuf>> {
        self.store.clean_state_files(workspace)
    }

    pub fn confirm(&self, prompt: &str) -> DeploymlResult<bool> {
        Ok(self.confirmer.confirm(prompt)?)
    }
}
