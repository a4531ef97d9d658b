//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.
//!
//! Use cases borrow their ports, so the concrete adapters live in a
//! `Toolchain` owned by the command for the duration of the run.

use crate::application::{
    DeployUseCase, DestroyUseCase, DoctorOptions, DoctorUseCase, InitUseCase, ProvisioningDriver,
    StatusUseCase,
};
use crate::config::Settings;
use crate::domain::ports::{Confirmer, LifecycleEventSink};
use crate::domain::services::TemplateRenderer;
use crate::error::DeploymlResult;
use crate::infrastructure::{
    load_template_overrides, GcloudCli, LocalWorkspaceStore, TerraformCli, WhichLocator,
    YamlStackConfigRepository,
};

/// Concrete adapters for every port
pub struct Toolchain {
    pub terraform: TerraformCli,
    pub gcloud: GcloudCli,
    pub store: LocalWorkspaceStore,
    pub locator: WhichLocator,
    pub stacks: YamlStackConfigRepository,
}

impl Toolchain {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            terraform: TerraformCli::new(settings.tools.terraform.clone()),
            gcloud: GcloudCli::new(settings.tools.gcloud.clone()),
            store: LocalWorkspaceStore::new(settings.paths.modules_dir()),
            locator: WhichLocator,
            stacks: YamlStackConfigRepository::new(),
        }
    }

    pub fn driver<'a>(
        &'a self,
        confirmer: &'a dyn Confirmer,
        events: &'a dyn LifecycleEventSink,
    ) -> ProvisioningDriver<'a> {
        ProvisioningDriver::new(&self.terraform, &self.store, confirmer, events)
    }

    pub fn deploy_use_case<'a>(
        &'a self,
        renderer: &'a TemplateRenderer,
        confirmer: &'a dyn Confirmer,
        events: &'a dyn LifecycleEventSink,
    ) -> DeployUseCase<'a> {
        DeployUseCase::new(
            self.driver(confirmer, events),
            renderer,
            &self.gcloud,
            &self.gcloud,
            events,
        )
    }

    pub fn destroy_use_case<'a>(
        &'a self,
        confirmer: &'a dyn Confirmer,
        events: &'a dyn LifecycleEventSink,
    ) -> DestroyUseCase<'a> {
        DestroyUseCase::new(self.driver(confirmer, events), &self.gcloud, &self.gcloud)
    }

    pub fn status_use_case(&self) -> StatusUseCase<'_> {
        StatusUseCase::new(&self.terraform, &self.store)
    }

    pub fn doctor_use_case(&self) -> DoctorUseCase<'_> {
        DoctorUseCase::new(&self.locator, &self.gcloud)
    }

    pub fn init_use_case(&self) -> InitUseCase<'_> {
        InitUseCase::new(&self.gcloud)
    }
}

/// Built-in templates plus any overrides from `paths.templates_dir`
pub fn create_renderer(settings: &Settings) -> DeploymlResult<TemplateRenderer> {
    let mut renderer = TemplateRenderer::new()?;
    if let Some(dir) = &settings.paths.templates_dir {
        load_template_overrides(&mut renderer, dir)?;
    }
    Ok(renderer)
}

/// Doctor looks for the binaries the settings point at
pub fn doctor_options(settings: &Settings, project_id: Option<String>) -> DoctorOptions {
    DoctorOptions {
        docker_bin: settings.tools.docker.clone(),
        terraform_bin: settings.tools.terraform.clone(),
        gcloud_bin: settings.tools.gcloud.clone(),
        aws_bin: settings.tools.aws.clone(),
        project_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn doctor_options_follow_tool_settings() {
        let mut settings = Settings::default();
        settings.tools.terraform = "/opt/tf/terraform".to_string();

        let options = doctor_options(&settings, Some("p1".to_string()));

        assert_eq!(options.terraform_bin, "/opt/tf/terraform");
        assert_eq!(options.docker_bin, "docker");
        assert_eq!(options.project_id.as_deref(), Some("p1"));
    }

    #[test]
    fn renderer_without_override_dir_has_builtin_families() {
        let renderer = create_renderer(&Settings::default()).unwrap();
        assert!(renderer.has_family("gcp", "cloud_run"));
        assert!(renderer.has_family("gcp", "cloud_vm"));
    }

    #[test]
    fn renderer_ignores_missing_override_dir() {
        let mut settings = Settings::default();
        settings.paths.templates_dir = Some(PathBuf::from("/definitely/not/here"));

        assert!(create_renderer(&settings).is_ok());
    }
}
