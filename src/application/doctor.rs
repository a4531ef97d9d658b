//! Doctor Use Case
//!
//! Environment checks: required binaries, cloud authentication and, for a
//! named GCP project, which required service APIs are still disabled.

use tracing::debug;

use crate::domain::ports::{CloudSession, ToolLocator};
use crate::domain::value_objects::REQUIRED_GCP_APIS;

/// Binaries the doctor looks for
#[derive(Debug, Clone)]
pub struct DoctorOptions {
    pub docker_bin: String,
    pub terraform_bin: String,
    pub gcloud_bin: String,
    pub aws_bin: String,
    /// Check enabled APIs of this project
    pub project_id: Option<String>,
}

impl Default for DoctorOptions {
    fn default() -> Self {
        Self {
            docker_bin: "docker".to_string(),
            terraform_bin: "terraform".to_string(),
            gcloud_bin: "gcloud".to_string(),
            aws_bin: "aws".to_string(),
            project_id: None,
        }
    }
}

/// Result of a single environment check
#[derive(Debug, Clone)]
pub struct CheckItem {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub recommendation: Option<String>,
    pub details: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warning,
    Error,
}

#[derive(Debug, Clone, Default)]
pub struct DoctorResult {
    pub items: Vec<CheckItem>,
    /// Required APIs not yet enabled, when a project was checked
    pub missing_apis: Vec<String>,
    pub passed: usize,
    pub warnings: usize,
    pub errors: usize,
}

impl DoctorResult {
    /// No errors; warnings allowed
    pub fn is_success(&self) -> bool {
        self.errors == 0
    }

    fn record(&mut self, item: CheckItem) {
        match item.status {
            CheckStatus::Pass => self.passed += 1,
            CheckStatus::Warning => self.warnings += 1,
            CheckStatus::Error => self.errors += 1,
        }
        self.items.push(item);
    }
}

pub struct DoctorUseCase<'a> {
    locator: &'a dyn ToolLocator,
    session: &'a dyn CloudSession,
}

impl<'a> DoctorUseCase<'a> {
    pub fn new(locator: &'a dyn ToolLocator, session: &'a dyn CloudSession) -> Self {
        Self { locator, session }
    }

    pub fn execute(&self, options: &DoctorOptions) -> DoctorResult {
        self.execute_with_callback(options, |_| {})
    }

    /// Execute with a callback for each check (for streaming UI)
    pub fn execute_with_callback<F>(&self, options: &DoctorOptions, mut on_check: F) -> DoctorResult
    where
        F: FnMut(&CheckItem),
    {
        let mut result = DoctorResult::default();
        let mut push = |result: &mut DoctorResult, item: CheckItem| {
            on_check(&item);
            result.record(item);
        };

        push(
            &mut result,
            self.binary_check(
                "docker",
                &options.docker_bin,
                "Docker",
                CheckStatus::Error,
                "Install Docker: https://docs.docker.com/get-docker/",
            ),
        );
        push(
            &mut result,
            self.binary_check(
                "terraform",
                &options.terraform_bin,
                "Terraform",
                CheckStatus::Error,
                "Install Terraform: https://developer.hashicorp.com/terraform/install",
            ),
        );

        let gcloud = self.gcloud_check(&options.gcloud_bin);
        let gcloud_ready = gcloud.status == CheckStatus::Pass;
        push(&mut result, gcloud);

        push(
            &mut result,
            self.binary_check(
                "aws",
                &options.aws_bin,
                "AWS CLI",
                CheckStatus::Warning,
                "Install the AWS CLI to deploy to AWS",
            ),
        );

        if let Some(project_id) = options.project_id.as_deref().filter(|p| !p.is_empty()) {
            if gcloud_ready {
                let (item, missing) = self.api_check(project_id);
                result.missing_apis = missing;
                push(&mut result, item);
            } else {
                debug!("gcloud not ready, skipping API check for {project_id}");
            }
        }

        result
    }

    fn binary_check(
        &self,
        name: &str,
        binary: &str,
        label: &str,
        missing_status: CheckStatus,
        recommendation: &str,
    ) -> CheckItem {
        match self.locator.locate(binary) {
            Some(path) => CheckItem {
                name: name.to_string(),
                status: CheckStatus::Pass,
                message: format!("{label} is installed"),
                recommendation: None,
                details: vec![path.display().to_string()],
            },
            None => CheckItem {
                name: name.to_string(),
                status: missing_status,
                message: format!("{label} is not installed"),
                recommendation: Some(recommendation.to_string()),
                details: Vec::new(),
            },
        }
    }

    fn gcloud_check(&self, binary: &str) -> CheckItem {
        let Some(path) = self.locator.locate(binary) else {
            return CheckItem {
                name: "gcloud".to_string(),
                status: CheckStatus::Error,
                message: "GCP CLI is not installed".to_string(),
                recommendation: Some(
                    "Install the Google Cloud CLI: https://cloud.google.com/sdk/docs/install"
                        .to_string(),
                ),
                details: Vec::new(),
            };
        };
        let details = vec![path.display().to_string()];
        if self.session.is_authenticated() {
            CheckItem {
                name: "gcloud".to_string(),
                status: CheckStatus::Pass,
                message: "GCP CLI installed and authenticated".to_string(),
                recommendation: None,
                details,
            }
        } else {
            CheckItem {
                name: "gcloud".to_string(),
                status: CheckStatus::Warning,
                message: "GCP CLI installed but not authenticated".to_string(),
                recommendation: Some("Run: gcloud auth application-default login".to_string()),
                details,
            }
        }
    }

    fn api_check(&self, project_id: &str) -> (CheckItem, Vec<String>) {
        let name = "gcp-apis".to_string();
        let enabled = match self.session.list_enabled_services(project_id) {
            Ok(enabled) => enabled,
            Err(e) => {
                let item = CheckItem {
                    name,
                    status: CheckStatus::Warning,
                    message: format!("Failed to list enabled APIs for {project_id}"),
                    recommendation: None,
                    details: vec![e.to_string()],
                };
                return (item, Vec::new());
            }
        };

        let missing: Vec<String> = REQUIRED_GCP_APIS
            .iter()
            .filter(|api| !enabled.iter().any(|e| e == *api))
            .map(|api| api.to_string())
            .collect();

        let item = if missing.is_empty() {
            CheckItem {
                name,
                status: CheckStatus::Pass,
                message: "All required GCP APIs are enabled".to_string(),
                recommendation: None,
                details: Vec::new(),
            }
        } else {
            CheckItem {
                name,
                status: CheckStatus::Warning,
                message: format!("{} required APIs are not enabled", missing.len()),
                recommendation: Some(format!(
                    "deployml init --provider gcp --project-id {project_id}"
                )),
                details: missing.clone(),
            }
        };
        (item, missing)
    }
}
