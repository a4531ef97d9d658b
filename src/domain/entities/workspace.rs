//! Workspace entity
//!
//! `<base>/.deployml/<name>/terraform/` holds the rendered artifacts, the
//! copied modules and Terraform's own state. Nothing guards a workspace
//! against two concurrent lifecycle runs; callers must not start one.

use std::path::{Component, Path, PathBuf};

use super::StackConfig;
use crate::error::{DeploymlError, DeploymlResult};

/// Directory (under the base dir) holding all workspaces
pub const WORKSPACES_DIR: &str = ".deployml";
/// Rendered infrastructure definition
pub const MAIN_TF: &str = "main.tf";
/// Variable declarations
pub const VARIABLES_TF: &str = "variables.tf";
/// Variable values
pub const TFVARS: &str = "terraform.tfvars";
/// Fingerprint of the last render
pub const RENDER_FINGERPRINT_FILE: &str = ".deployml-render";

/// Terraform state and lock files removed by `clean_state_files`
pub const STATE_FILES: &[&str] = &[
    ".terraform",
    "terraform.tfstate",
    "terraform.tfstate.backup",
    ".terraform.lock.hcl",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    name: String,
    root: PathBuf,
}

impl Workspace {
    /// Name used when the stack config has none
    pub const DEFAULT_NAME: &'static str = "development";

    /// The name must be a single plain path component so the workspace
    /// stays inside `<base>/.deployml/`.
    pub fn new(base_dir: &Path, name: impl Into<String>) -> DeploymlResult<Self> {
        let name = name.into();
        if let Err(reason) = validate_name(&name) {
            return Err(DeploymlError::InvalidWorkspaceName { name, reason });
        }
        let root = base_dir.join(WORKSPACES_DIR).join(&name);
        Ok(Self { name, root })
    }

    /// Resolve the workspace for a config, honoring an explicit override
    pub fn for_config(
        base_dir: &Path,
        config: &StackConfig,
        name_override: Option<&str>,
    ) -> DeploymlResult<Self> {
        let name = name_override
            .filter(|n| !n.trim().is_empty())
            .or(config.name.as_deref().filter(|n| !n.trim().is_empty()))
            .unwrap_or(Self::DEFAULT_NAME);
        Self::new(base_dir, name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn terraform_dir(&self) -> PathBuf {
        self.root.join("terraform")
    }

    pub fn modules_dir(&self) -> PathBuf {
        self.terraform_dir().join("modules")
    }

    pub fn fingerprint_path(&self) -> PathBuf {
        self.terraform_dir().join(RENDER_FINGERPRINT_FILE)
    }

    /// A workspace exists once its terraform directory does
    pub fn exists(&self) -> bool {
        self.terraform_dir().is_dir()
    }
}

/// Reject names that would resolve outside the workspaces directory
pub fn validate_name(name: &str) -> Result<(), String> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(part)), None) if part == name => Ok(()),
        _ => Err(format!(
            "workspace name '{name}' must be a single directory name without path separators"
        )),
    }
}
