//! Cloud CLI ports: the authenticated session and managed-database admin

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CloudCliError {
    #[error("{program} could not be started: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {code:?}: {stderr}")]
    Failed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
}

pub type CloudCliResult<T> = Result<T, CloudCliError>;

pub trait CloudSession {
    fn is_authenticated(&self) -> bool;

    /// Interactive application-default login
    fn login(&self) -> CloudCliResult<()>;

    fn set_project(&self, project_id: &str) -> CloudCliResult<()>;

    fn enable_services(&self, project_id: &str, services: &[&str]) -> CloudCliResult<()>;

    fn list_enabled_services(&self, project_id: &str) -> CloudCliResult<Vec<String>>;
}

/// Best-effort cleanup of a managed SQL instance before destroy
pub trait DatabaseAdmin {
    fn drop_database(&self, instance: &str, project_id: &str, database: &str)
        -> CloudCliResult<()>;

    fn drop_user(&self, instance: &str, project_id: &str, user: &str) -> CloudCliResult<()>;
}
