//! YAML Stack Config Repository
//!
//! Reads and writes stack configs with `serde_yaml_ng`. Writes go through
//! `atomic_write` so a failed `generate` never leaves a half-written file.

use std::path::Path;

use tracing::debug;

use crate::domain::entities::StackConfig;
use crate::error::{DeploymlError, DeploymlResult};
use crate::infrastructure::fs::atomic_write;

#[derive(Debug, Default, Clone, Copy)]
pub struct YamlStackConfigRepository;

impl YamlStackConfigRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn load(&self, path: &Path) -> DeploymlResult<StackConfig> {
        if !path.is_file() {
            return Err(DeploymlError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config =
            StackConfig::from_yaml_str(&content).map_err(|message| DeploymlError::InvalidConfig {
                file: path.to_path_buf(),
                message,
            })?;
        debug!(path = %path.display(), stages = config.stack.len(), "loaded stack config");
        Ok(config)
    }

    pub fn save(&self, path: &Path, config: &StackConfig) -> DeploymlResult<()> {
        let yaml = config
            .to_yaml_string()
            .map_err(|message| DeploymlError::InvalidConfig {
                file: path.to_path_buf(),
                message,
            })?;
        atomic_write(path, yaml.as_bytes())?;
        Ok(())
    }
}
