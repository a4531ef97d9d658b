//! WorkspaceStore port - the on-disk workspace
//!
//! Implementations:
//! - `LocalWorkspaceStore` - real directories, atomic artifact writes
//! - test doubles recording calls in memory

use std::path::PathBuf;

use crate::domain::entities::Workspace;
use crate::domain::services::RenderedArtifacts;
use crate::domain::value_objects::Fingerprint;
use crate::error::DeploymlResult;

pub trait WorkspaceStore {
    /// True once the workspace's terraform directory exists
    fn exists(&self, workspace: &Workspace) -> bool;

    /// Create `terraform/modules` and refresh every module from the library.
    /// Returns the names of the copied modules.
    fn prepare(&self, workspace: &Workspace) -> DeploymlResult<Vec<String>>;

    /// Write the three artifacts and the render fingerprint
    fn write_artifacts(
        &self,
        workspace: &Workspace,
        artifacts: &RenderedArtifacts,
    ) -> DeploymlResult<()>;

    /// Fingerprint of the last render, if any
    fn read_fingerprint(&self, workspace: &Workspace) -> Option<Fingerprint>;

    /// Fingerprint of the artifacts as they are on disk now
    fn current_fingerprint(&self, workspace: &Workspace) -> Option<Fingerprint>;

    /// Remove Terraform state and lock files, returning what was removed
    fn clean_state_files(&self, workspace: &Workspace) -> DeploymlResult<Vec<PathBuf>>;

    /// Remove the whole workspace directory
    fn remove(&self, workspace: &Workspace) -> DeploymlResult<()>;
}
