//! Deploy Options

use std::path::PathBuf;

use crate::domain::entities::StackConfig;

/// Options for the deploy use case
#[derive(Debug, Clone)]
pub struct DeployOptions {
    /// Parsed stack config; resolution mutates a copy
    pub config: StackConfig,
    /// Directory holding `.deployml/`
    pub base_dir: PathBuf,
    /// Workspace name override (defaults to the stack name)
    pub workspace: Option<String>,
}

impl DeployOptions {
    pub fn new(config: StackConfig, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            config,
            base_dir: base_dir.into(),
            workspace: None,
        }
    }

    pub fn with_workspace(mut self, workspace: Option<String>) -> Self {
        self.workspace = workspace;
        self
    }
}
