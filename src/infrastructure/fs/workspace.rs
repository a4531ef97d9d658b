//! Local workspace store
//!
//! Layout under `<base>/.deployml/<name>/terraform/`:
//! - `modules/` - copies of the module library, refreshed on every prepare
//! - `main.tf`, `variables.tf`, `terraform.tfvars` - rendered artifacts
//! - `.deployml-render` - fingerprint of the last render

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::entities::{Workspace, MAIN_TF, STATE_FILES, TFVARS, VARIABLES_TF};
use crate::domain::ports::WorkspaceStore;
use crate::domain::services::RenderedArtifacts;
use crate::domain::value_objects::Fingerprint;
use crate::error::{DeploymlError, DeploymlResult};

use super::atomic::atomic_write;

#[derive(Debug, Clone)]
pub struct LocalWorkspaceStore {
    modules_dir: PathBuf,
}

impl LocalWorkspaceStore {
    pub fn new(modules_dir: impl Into<PathBuf>) -> Self {
        Self {
            modules_dir: modules_dir.into(),
        }
    }

    pub fn modules_dir(&self) -> &Path {
        &self.modules_dir
    }
}

fn copy_dir_recursive(from: &Path, to: &Path) -> io::Result<()> {
    fs::create_dir_all(to)?;
    for entry in fs::read_dir(from)? {
        let entry = entry?;
        let target = to.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir_recursive(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

fn remove_path(path: &Path) -> io::Result<()> {
    if path.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}

impl WorkspaceStore for LocalWorkspaceStore {
    fn exists(&self, workspace: &Workspace) -> bool {
        workspace.exists()
    }

    fn prepare(&self, workspace: &Workspace) -> DeploymlResult<Vec<String>> {
        if !self.modules_dir.is_dir() {
            return Err(DeploymlError::ModuleTemplatesMissing {
                path: self.modules_dir.clone(),
            });
        }
        let target_root = workspace.modules_dir();
        fs::create_dir_all(&target_root)?;

        let mut modules = Vec::new();
        for entry in fs::read_dir(&self.modules_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let target = target_root.join(entry.file_name());
            if target.exists() {
                remove_path(&target)?;
            }
            copy_dir_recursive(&entry.path(), &target)?;
            modules.push(entry.file_name().to_string_lossy().into_owned());
        }
        modules.sort();
        debug!(count = modules.len(), dir = %target_root.display(), "copied modules");
        Ok(modules)
    }

    fn write_artifacts(
        &self,
        workspace: &Workspace,
        artifacts: &RenderedArtifacts,
    ) -> DeploymlResult<()> {
        let dir = workspace.terraform_dir();
        for (name, content) in artifacts.files() {
            atomic_write(&dir.join(name), content.as_bytes())?;
        }
        atomic_write(
            &workspace.fingerprint_path(),
            format!("{}\n", artifacts.fingerprint).as_bytes(),
        )?;
        Ok(())
    }

    fn read_fingerprint(&self, workspace: &Workspace) -> Option<Fingerprint> {
        let raw = fs::read_to_string(workspace.fingerprint_path()).ok()?;
        Fingerprint::parse(raw.trim())
    }

    fn current_fingerprint(&self, workspace: &Workspace) -> Option<Fingerprint> {
        let dir = workspace.terraform_dir();
        let read = |name: &str| fs::read_to_string(dir.join(name)).ok();
        let (main_tf, variables_tf, tfvars) = (read(MAIN_TF)?, read(VARIABLES_TF)?, read(TFVARS)?);
        Some(Fingerprint::of_parts([
            (MAIN_TF, main_tf.as_str()),
            (VARIABLES_TF, variables_tf.as_str()),
            (TFVARS, tfvars.as_str()),
        ]))
    }

    fn clean_state_files(&self, workspace: &Workspace) -> DeploymlResult<Vec<PathBuf>> {
        let dir = workspace.terraform_dir();
        let mut removed = Vec::new();
        for name in STATE_FILES {
            let path = dir.join(name);
            if path.exists() {
                remove_path(&path)?;
                removed.push(path);
            }
        }
        Ok(removed)
    }

    fn remove(&self, workspace: &Workspace) -> DeploymlResult<()> {
        if workspace.root().exists() {
            fs::remove_dir_all(workspace.root())?;
        }
        Ok(())
    }
}
