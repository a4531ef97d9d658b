//! Settings type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::DeploymlResult;

use super::loader::{self, ConfigWarning};

/// Module library shipped alongside the crate
const BUNDLED_MODULES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/terraform/modules");

/// External binaries, by name or path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolsConfig {
    #[serde(default = "default_terraform")]
    pub terraform: String,

    #[serde(default = "default_gcloud")]
    pub gcloud: String,

    #[serde(default = "default_docker")]
    pub docker: String,

    #[serde(default = "default_aws")]
    pub aws: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            terraform: default_terraform(),
            gcloud: default_gcloud(),
            docker: default_docker(),
            aws: default_aws(),
        }
    }
}

fn default_terraform() -> String {
    "terraform".to_string()
}

fn default_gcloud() -> String {
    "gcloud".to_string()
}

fn default_docker() -> String {
    "docker".to_string()
}

fn default_aws() -> String {
    "aws".to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Reusable Terraform modules copied into every workspace
    #[serde(default)]
    pub modules_dir: Option<PathBuf>,

    /// Directory of `<cloud>/<type>/<artifact>.tera` overrides
    #[serde(default)]
    pub templates_dir: Option<PathBuf>,

    /// Directory holding `.deployml/` (defaults to the current directory)
    #[serde(default)]
    pub workspace_root: Option<PathBuf>,
}

impl PathsConfig {
    pub fn modules_dir(&self) -> PathBuf {
        self.modules_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(BUNDLED_MODULES_DIR))
    }
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub color: ColorMode,

    #[serde(default)]
    pub animation: AnimationMode,

    #[serde(default = "default_true")]
    pub unicode: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::default(),
            animation: AnimationMode::default(),
            unicode: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Color output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Animation output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AnimationMode {
    #[default]
    Auto,
    Always,
    Never,
    Minimal,
}

/// Full settings structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub tools: ToolsConfig,

    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Settings {
    /// Load settings from a TOML file
    pub fn load(path: &Path) -> DeploymlResult<Self> {
        Ok(Self::load_with_warnings(path)?.0)
    }

    /// Load settings and collect unknown-key warnings
    pub fn load_with_warnings(path: &Path) -> DeploymlResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Directory holding `.deployml/`, relative paths resolved against `cwd`
    pub fn workspace_root(&self, cwd: &Path) -> PathBuf {
        match &self.paths.workspace_root {
            Some(root) if root.is_absolute() => root.clone(),
            Some(root) => cwd.join(root),
            None => cwd.to_path_buf(),
        }
    }
}
