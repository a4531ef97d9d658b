//! Deploy Use Case
//!
//! Orchestrates the deploy flow:
//! 1. Authenticate the cloud session (GCP)
//! 2. Resolve the stack config (postgres propagation, artifact bucket)
//! 3. Prepare the workspace and write rendered artifacts
//! 4. `terraform init`, then `terraform plan`
//! 5. Estimate and confirm
//! 6. Apply with progress, then read and normalize outputs

use rand::Rng;
use tracing::{debug, warn};

use crate::application::provisioning::ProvisioningDriver;
use crate::domain::entities::{OutputMap, StackConfig, Workspace};
use crate::domain::ports::{BucketRegistry, CloudSession, LifecycleEvent, LifecycleEventSink};
use crate::domain::services::{
    normalize, BucketSource, ConfigResolver, StageMessages, TemplateRenderer,
};
use crate::domain::value_objects::{Cloud, LifecycleStep, Operation};
use crate::error::DeploymlResult;

use super::options::DeployOptions;
use super::result::{DeployOutcome, DeployResult};

pub const DEPLOY_PROMPT: &str = "Do you want to deploy the stack?";

pub struct DeployUseCase<'a> {
    driver: ProvisioningDriver<'a>,
    renderer: &'a TemplateRenderer,
    registry: &'a dyn BucketRegistry,
    session: &'a dyn CloudSession,
    events: &'a dyn LifecycleEventSink,
}

impl<'a> DeployUseCase<'a> {
    pub fn new(
        driver: ProvisioningDriver<'a>,
        renderer: &'a TemplateRenderer,
        registry: &'a dyn BucketRegistry,
        session: &'a dyn CloudSession,
        events: &'a dyn LifecycleEventSink,
    ) -> Self {
        Self {
            driver,
            renderer,
            registry,
            session,
            events,
        }
    }

    pub fn execute<R: Rng>(&self, options: DeployOptions, rng: R) -> DeploymlResult<DeployResult> {
        let DeployOptions {
            mut config,
            base_dir,
            workspace,
        } = options;
        let workspace = Workspace::for_config(&base_dir, &config, workspace.as_deref())?;

        if config.provider.cloud == Cloud::Gcp {
            self.ensure_session(&config)?;
        }

        let resolution = ConfigResolver::new(self.registry, rng).resolve(&mut config)?;
        if let Some(bucket) = &resolution.bucket {
            if let BucketSource::Generated { attempts } = bucket.source {
                self.events.on_event(LifecycleEvent::BucketGenerated {
                    bucket: bucket.bucket.clone(),
                    attempts,
                });
            }
        }

        debug!(workspace = %workspace.name(), "workspace ready");
        self.driver.prepare_workspace(&workspace)?;

        let artifacts = self.renderer.render(&config)?;
        self.driver.write_artifacts(&workspace, &artifacts)?;
        debug!(fingerprint = %artifacts.fingerprint.short(), "rendered");

        self.driver.run_lifecycle_step(LifecycleStep::Init, &workspace)?;
        let plan = self.driver.run_lifecycle_step(LifecycleStep::Plan, &workspace)?;
        debug!("planned");

        let mut result = DeployResult {
            outcome: DeployOutcome::Cancelled,
            workspace,
            config: config.clone(),
            resolution,
            fingerprint: artifacts.fingerprint,
            estimate: None,
            outputs: OutputMap::new(),
            urls: Default::default(),
        };

        let Some(estimate) =
            self.driver
                .estimate_and_confirm(&plan.stdout, Operation::Apply, DEPLOY_PROMPT)?
        else {
            debug!("deploy cancelled");
            return Ok(result);
        };
        result.estimate = Some(estimate);

        let messages = StageMessages::for_stack(&config.stack);
        self.driver
            .apply_with_progress(&result.workspace, &estimate, &messages)?;
        result.outcome = DeployOutcome::Applied;
        debug!("applied");

        // Outputs are informational once apply succeeded
        result.outputs = self
            .driver
            .read_outputs(&result.workspace)
            .unwrap_or_else(|e| {
                warn!("could not read outputs: {e}");
                OutputMap::new()
            });
        result.urls = normalize(&result.outputs);
        Ok(result)
    }

    fn ensure_session(&self, config: &StackConfig) -> DeploymlResult<()> {
        if !self.session.is_authenticated() {
            debug!("no active credentials, starting login");
            self.session.login()?;
        }
        if let Some(project_id) = config.project_id() {
            self.session.set_project(project_id)?;
        }
        Ok(())
    }
}
