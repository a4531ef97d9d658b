//! Generate Use Case
//!
//! Builds the default mlflow stack config for a new project.

use std::path::PathBuf;

use crate::domain::entities::{
    param_keys, DeploymentConfig, ProviderConfig, StackConfig, ToolBinding, MLFLOW_TOOL,
};
use crate::domain::value_objects::Cloud;
use crate::error::{DeploymlError, DeploymlResult};

pub const DEFAULT_STACK_NAME: &str = "stack";
pub const DEFAULT_DEPLOYMENT_TYPE: &str = "cloud_run";
pub const DEFAULT_REGION: &str = "us-west1";
pub const VM_DEPLOYMENT_TYPE: &str = "cloud_vm";

#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub name: String,
    pub cloud: Cloud,
    pub deployment_type: String,
    pub project_id: Option<String>,
    pub region: String,
    /// VM deployments only; defaults to `<region>-a`
    pub zone: Option<String>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            name: DEFAULT_STACK_NAME.to_string(),
            cloud: Cloud::Gcp,
            deployment_type: DEFAULT_DEPLOYMENT_TYPE.to_string(),
            project_id: None,
            region: DEFAULT_REGION.to_string(),
            zone: None,
        }
    }
}

impl GenerateOptions {
    fn is_vm(&self) -> bool {
        self.deployment_type == VM_DEPLOYMENT_TYPE
    }

    /// `<name>.yaml`
    pub fn default_output(&self) -> PathBuf {
        PathBuf::from(format!("{}.yaml", self.name))
    }
}

/// Tracking server, artifact store and model registry, all mlflow
pub fn default_stack(options: &GenerateOptions) -> DeploymlResult<StackConfig> {
    let project_id = options
        .project_id
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty());
    let gcp = options.cloud == Cloud::Gcp;
    if gcp && project_id.is_none() {
        return Err(DeploymlError::ProjectIdRequired {
            cloud: "GCP".to_string(),
        });
    }
    let name = options.name.as_str();

    let mut tracking = ToolBinding::new("experiment_tracking", MLFLOW_TOOL)
        .with_param("service_name", format!("{name}-mlflow-server"))
        .with_param("allow_public_access", true);
    if options.is_vm() {
        tracking = tracking
            .with_param("vm_name", format!("{name}-mlflow-vm"))
            .with_param("machine_type", "e2-medium")
            .with_param("disk_size_gb", 20)
            .with_param("mlflow_port", 5000);
    }

    let bucket = match (gcp, project_id) {
        (true, Some(project_id)) => format!("{name}-artifacts-{project_id}"),
        _ => String::new(),
    };
    let artifacts = ToolBinding::new("artifact_tracking", MLFLOW_TOOL)
        .with_param(param_keys::ARTIFACT_BUCKET, bucket)
        .with_param(param_keys::CREATE_BUCKET, true);

    let registry = ToolBinding::new("model_registry", MLFLOW_TOOL)
        .with_param(param_keys::BACKEND_STORE_URI, "sqlite:///mlflow.db");

    let zone = if gcp && options.is_vm() {
        Some(
            options
                .zone
                .clone()
                .unwrap_or_else(|| format!("{}-a", options.region)),
        )
    } else {
        None
    };

    let config = StackConfig {
        name: Some(name.to_string()),
        provider: ProviderConfig {
            cloud: options.cloud,
            project_id: project_id.filter(|_| gcp).map(str::to_string),
            region: options.region.clone(),
            zone,
        },
        deployment: DeploymentConfig {
            deployment_type: options.deployment_type.clone(),
        },
        stack: vec![tracking, artifacts, registry],
    };
    config.validate().map_err(|message| DeploymlError::InvalidConfig {
        file: options.default_output(),
        message,
    })?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gcp(deployment_type: &str) -> GenerateOptions {
        GenerateOptions {
            name: "demo".to_string(),
            deployment_type: deployment_type.to_string(),
            project_id: Some("p1".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn cloud_run_stack_has_three_mlflow_stages() {
        let config = default_stack(&gcp("cloud_run")).unwrap();

        assert_eq!(
            config.stage_names(),
            vec!["experiment_tracking", "artifact_tracking", "model_registry"]
        );
        assert!(config.stack.iter().all(|b| b.tool == "mlflow"));
        assert_eq!(
            config.stack[1].param_str(param_keys::ARTIFACT_BUCKET),
            Some("demo-artifacts-p1")
        );
        assert_eq!(config.provider.zone, None);
        assert!(!config.stack[0].has_param("vm_name"));
    }

    #[test]
    fn vm_stack_gets_vm_params_and_zone() {
        let config = default_stack(&gcp("cloud_vm")).unwrap();

        assert_eq!(config.provider.zone.as_deref(), Some("us-west1-a"));
        let tracking = &config.stack[0];
        assert_eq!(tracking.param_str("vm_name"), Some("demo-mlflow-vm"));
        assert_eq!(tracking.param_str("machine_type"), Some("e2-medium"));
        assert_eq!(tracking.params["disk_size_gb"], 20);
    }

    #[test]
    fn explicit_zone_wins() {
        let options = GenerateOptions {
            zone: Some("us-west1-c".to_string()),
            ..gcp("cloud_vm")
        };

        let config = default_stack(&options).unwrap();

        assert_eq!(config.zone(), "us-west1-c");
    }

    #[test]
    fn gcp_without_project_is_rejected() {
        let options = GenerateOptions {
            project_id: None,
            ..gcp("cloud_run")
        };

        let err = default_stack(&options).unwrap_err();

        assert!(matches!(err, DeploymlError::ProjectIdRequired { .. }));
    }

    #[test]
    fn non_gcp_leaves_bucket_and_project_empty() {
        let options = GenerateOptions {
            cloud: Cloud::Aws,
            ..gcp("cloud_run")
        };

        let config = default_stack(&options).unwrap();

        assert_eq!(config.project_id(), None);
        assert_eq!(config.stack[1].param_str(param_keys::ARTIFACT_BUCKET), None);
    }

    #[test]
    fn generated_yaml_parses_back() {
        let config = default_stack(&gcp("cloud_vm")).unwrap();

        let yaml = config.to_yaml_string().unwrap();
        let parsed = StackConfig::from_yaml_str(&yaml).unwrap();

        assert_eq!(parsed, config);
    }

    #[test]
    fn output_defaults_to_stack_name() {
        assert_eq!(gcp("cloud_run").default_output(), PathBuf::from("demo.yaml"));
    }
}
