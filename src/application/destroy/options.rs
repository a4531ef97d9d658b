//! Destroy Options

use crate::domain::entities::Workspace;

/// What happens to local files after a successful destroy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostDestroy {
    /// Remove the whole workspace directory
    RemoveWorkspace,
    /// Ask before removing Terraform state files
    #[default]
    OfferStateCleanup,
}

#[derive(Debug, Clone)]
pub struct DestroyOptions {
    pub workspace: Workspace,
    /// Project for `gcloud config set project` and database cleanup
    pub project_id: Option<String>,
    pub post_destroy: PostDestroy,
}

impl DestroyOptions {
    pub fn new(workspace: Workspace) -> Self {
        Self {
            workspace,
            project_id: None,
            post_destroy: PostDestroy::default(),
        }
    }

    pub fn with_project_id(mut self, project_id: Option<String>) -> Self {
        self.project_id = project_id;
        self
    }

    pub fn with_post_destroy(mut self, post_destroy: PostDestroy) -> Self {
        self.post_destroy = post_destroy;
        self
    }
}
