//! Error types for DeployML
//!
//! Library errors use `thiserror`; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::{CloudCliError, ProvisionerError};

/// Result type alias for DeployML operations
pub type DeploymlResult<T> = Result<T, DeploymlError>;

/// Main error type for DeployML operations
#[derive(Error, Debug)]
pub enum DeploymlError {
    /// Stack config file does not exist
    #[error("config file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Stack config could not be parsed or is missing required keys
    #[error("invalid config {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// Workspace name would resolve outside `.deployml/`
    #[error("invalid workspace name: {reason}")]
    InvalidWorkspaceName { name: String, reason: String },

    /// Provider needs an explicit project
    #[error("--project-id is required for {cloud}")]
    ProjectIdRequired { cloud: String },

    /// No template family for the (cloud, deployment type) pair
    #[error("no templates for provider '{cloud}' with deployment type '{deployment_type}'")]
    TemplateNotFound {
        cloud: String,
        deployment_type: String,
    },

    /// Template failed to render
    #[error("failed to render {artifact}: {message}")]
    Render { artifact: String, message: String },

    /// Reusable Terraform modules are not installed
    #[error("module templates not found at: {path}")]
    ModuleTemplatesMissing { path: PathBuf },

    /// A required external binary is not on PATH
    #[error("required tool '{tool}' is not installed")]
    ToolMissing { tool: String },

    /// Object-storage existence check could not be answered
    #[error("could not check bucket '{bucket}': {message}")]
    StorageCheckFailed { bucket: String, message: String },

    /// Every generated bucket name collided with an existing bucket
    #[error("no free bucket name found after {attempts} attempts")]
    NamingCollisionExhausted { attempts: usize },

    /// `terraform plan` exited non-zero
    #[error("terraform plan failed: {stderr}")]
    PlanFailed { stderr: String },

    /// `terraform apply` exited non-zero
    #[error("terraform apply failed (exit code {code:?})")]
    ApplyFailed { code: Option<i32>, stderr: String },

    /// `terraform destroy` exited non-zero
    #[error("terraform destroy failed (exit code {code:?}): {stderr}")]
    DestroyFailed { code: Option<i32>, stderr: String },

    /// External command could not be started or awaited
    #[error("{tool} failed: {message}")]
    Tool { tool: String, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ProvisionerError> for DeploymlError {
    fn from(err: ProvisionerError) -> Self {
        match &err {
            ProvisionerError::Spawn { program, source }
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                DeploymlError::ToolMissing {
                    tool: program.clone(),
                }
            }
            ProvisionerError::Spawn { program, .. } | ProvisionerError::Wait { program, .. } => {
                DeploymlError::Tool {
                    tool: program.clone(),
                    message: err.to_string(),
                }
            }
        }
    }
}

impl From<CloudCliError> for DeploymlError {
    fn from(err: CloudCliError) -> Self {
        match &err {
            CloudCliError::Spawn { program, source }
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                DeploymlError::ToolMissing {
                    tool: program.clone(),
                }
            }
            CloudCliError::Spawn { program, .. } => DeploymlError::Tool {
                tool: program.clone(),
                message: err.to_string(),
            },
            CloudCliError::Failed { .. } => DeploymlError::Tool {
                tool: "gcloud".to_string(),
                message: err.to_string(),
            },
        }
    }
}
