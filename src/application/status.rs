//! Status Use Case
//!
//! Read-only view of a workspace: whether its rendered artifacts still
//! match the last render, and what the deployed stack exposes.

use tracing::{debug, warn};

use crate::domain::entities::{
    OutputMap, PostgresConnectionInfo, ServiceUrlCollection, Workspace,
};
use crate::domain::ports::{Provisioner, WorkspaceStore};
use crate::domain::services::{normalize, parse_outputs, postgres_info};
use crate::domain::value_objects::{Fingerprint, LifecycleStep};
use crate::error::DeploymlResult;

/// How the on-disk artifacts relate to the recorded render
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderState {
    Current(Fingerprint),
    /// Artifacts were edited (or removed) after the last render
    Stale {
        recorded: Fingerprint,
        on_disk: Option<Fingerprint>,
    },
    NeverRendered,
}

impl RenderState {
    pub fn label(&self) -> &'static str {
        match self {
            RenderState::Current(_) => "current",
            RenderState::Stale { .. } => "stale",
            RenderState::NeverRendered => "never rendered",
        }
    }
}

#[derive(Debug, Clone)]
pub struct StatusReport {
    pub workspace: Workspace,
    pub exists: bool,
    pub render: RenderState,
    pub outputs: OutputMap,
    pub urls: ServiceUrlCollection,
    pub postgres: Option<PostgresConnectionInfo>,
    pub warnings: Vec<String>,
}

pub struct StatusUseCase<'a> {
    provisioner: &'a dyn Provisioner,
    store: &'a dyn WorkspaceStore,
}

impl<'a> StatusUseCase<'a> {
    pub fn new(provisioner: &'a dyn Provisioner, store: &'a dyn WorkspaceStore) -> Self {
        Self { provisioner, store }
    }

    /// Missing workspaces are reported, not errors. Only a tool that cannot
    /// be started fails the call.
    pub fn execute(&self, workspace: Workspace, show_credentials: bool) -> DeploymlResult<StatusReport> {
        let mut report = StatusReport {
            exists: self.store.exists(&workspace),
            render: RenderState::NeverRendered,
            outputs: OutputMap::new(),
            urls: ServiceUrlCollection::default(),
            postgres: None,
            warnings: Vec::new(),
            workspace,
        };
        if !report.exists {
            debug!(workspace = %report.workspace.name(), "no workspace");
            return Ok(report);
        }

        report.render = self.render_state(&report.workspace);

        let output = self
            .provisioner
            .run(LifecycleStep::Output, &report.workspace.terraform_dir())?;
        if !output.success() {
            let message = format!(
                "could not read terraform outputs: {}",
                output.stderr.trim()
            );
            warn!("{message}");
            report.warnings.push(message);
            return Ok(report);
        }

        report.outputs = match parse_outputs(&output.stdout) {
            Ok(outputs) => outputs,
            Err(e) => {
                let message = format!("could not parse terraform outputs: {e}");
                warn!("{message}");
                report.warnings.push(message);
                OutputMap::new()
            }
        };
        report.urls = normalize(&report.outputs);
        report.postgres = postgres_info(&report.outputs, show_credentials);
        Ok(report)
    }

    fn render_state(&self, workspace: &Workspace) -> RenderState {
        match self.store.read_fingerprint(workspace) {
            None => RenderState::NeverRendered,
            Some(recorded) => {
                let on_disk = self.store.current_fingerprint(workspace);
                if on_disk.as_ref() == Some(&recorded) {
                    RenderState::Current(recorded)
                } else {
                    RenderState::Stale { recorded, on_disk }
                }
            }
        }
    }
}
