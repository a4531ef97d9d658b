//! In-memory port implementations shared by use-case tests

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use crate::domain::entities::{Workspace, STATE_FILES};
use crate::domain::ports::{
    BucketRegistry, CloudCliError, CloudCliResult, CloudSession, Confirmer, DatabaseAdmin,
    PendingStep, Provisioner, ProvisionerResult, StorageError, ToolOutput, WorkspaceStore,
};
use crate::domain::services::RenderedArtifacts;
use crate::domain::value_objects::{Fingerprint, LifecycleStep};
use crate::error::{DeploymlError, DeploymlResult};

#[derive(Default)]
pub struct MockProvisioner {
    pub calls: RefCell<Vec<LifecycleStep>>,
    pub responses: RefCell<HashMap<LifecycleStep, ToolOutput>>,
    pub raw_outputs: HashMap<String, String>,
    /// Apply reports completion only after this long
    pub apply_delay: Option<Duration>,
}

impl MockProvisioner {
    pub fn respond(self, step: LifecycleStep, output: ToolOutput) -> Self {
        self.responses.borrow_mut().insert(step, output);
        self
    }

    fn response(&self, step: LifecycleStep) -> ToolOutput {
        self.responses
            .borrow()
            .get(&step)
            .cloned()
            .unwrap_or_else(|| ToolOutput::ok(""))
    }

    pub fn steps(&self) -> Vec<LifecycleStep> {
        self.calls.borrow().clone()
    }
}

impl Provisioner for MockProvisioner {
    fn run(&self, step: LifecycleStep, _dir: &Path) -> ProvisionerResult<ToolOutput> {
        self.calls.borrow_mut().push(step);
        Ok(self.response(step))
    }

    fn spawn(&self, step: LifecycleStep, _dir: &Path) -> ProvisionerResult<PendingStep> {
        self.calls.borrow_mut().push(step);
        let output = self.response(step);
        match self.apply_delay {
            None => Ok(PendingStep::finished("terraform", Ok(output))),
            Some(delay) => {
                let (tx, rx) = mpsc::channel();
                std::thread::spawn(move || {
                    std::thread::sleep(delay);
                    let _ = tx.send(Ok(output));
                });
                Ok(PendingStep::new("terraform", rx))
            }
        }
    }

    fn output_raw(&self, _dir: &Path, name: &str) -> ProvisionerResult<Option<String>> {
        Ok(self.raw_outputs.get(name).cloned())
    }
}

/// Workspace store that only records what it was asked to do
#[derive(Default)]
pub struct MockStore {
    pub exists: bool,
    pub missing_modules: bool,
    pub prepared: Cell<usize>,
    pub written: RefCell<Option<RenderedArtifacts>>,
    pub on_disk: RefCell<Option<Fingerprint>>,
    pub state_cleaned: Cell<bool>,
    pub removed: Cell<bool>,
}

impl WorkspaceStore for MockStore {
    fn exists(&self, _workspace: &Workspace) -> bool {
        self.exists
    }

    fn prepare(&self, _workspace: &Workspace) -> DeploymlResult<Vec<String>> {
        if self.missing_modules {
            return Err(DeploymlError::ModuleTemplatesMissing {
                path: PathBuf::from("/nowhere/modules"),
            });
        }
        self.prepared.set(self.prepared.get() + 1);
        Ok(vec!["artifact_bucket".into(), "cloud_run_service".into()])
    }

    fn write_artifacts(
        &self,
        _workspace: &Workspace,
        artifacts: &RenderedArtifacts,
    ) -> DeploymlResult<()> {
        *self.on_disk.borrow_mut() = Some(artifacts.fingerprint.clone());
        *self.written.borrow_mut() = Some(artifacts.clone());
        Ok(())
    }

    fn read_fingerprint(&self, _workspace: &Workspace) -> Option<Fingerprint> {
        self.written.borrow().as_ref().map(|a| a.fingerprint.clone())
    }

    fn current_fingerprint(&self, _workspace: &Workspace) -> Option<Fingerprint> {
        self.on_disk.borrow().clone()
    }

    fn clean_state_files(&self, workspace: &Workspace) -> DeploymlResult<Vec<PathBuf>> {
        self.state_cleaned.set(true);
        Ok(STATE_FILES
            .iter()
            .map(|f| workspace.terraform_dir().join(f))
            .collect())
    }

    fn remove(&self, _workspace: &Workspace) -> DeploymlResult<()> {
        self.removed.set(true);
        Ok(())
    }
}

#[derive(Default)]
pub struct MockRegistry {
    pub existing: HashSet<String>,
}

impl BucketRegistry for MockRegistry {
    fn exists(&self, bucket: &str, _project_id: &str) -> Result<bool, StorageError> {
        Ok(self.existing.contains(bucket))
    }
}

/// Cloud CLI double; `failing` makes every mutating call fail
#[derive(Default)]
pub struct MockCloud {
    pub authenticated: Cell<bool>,
    pub failing: bool,
    pub enabled: Vec<String>,
    pub calls: RefCell<Vec<String>>,
}

impl MockCloud {
    fn record(&self, call: String) -> CloudCliResult<()> {
        self.calls.borrow_mut().push(call.clone());
        if self.failing {
            return Err(CloudCliError::Failed {
                command: call,
                code: Some(1),
                stderr: "permission denied".into(),
            });
        }
        Ok(())
    }
}

impl CloudSession for MockCloud {
    fn is_authenticated(&self) -> bool {
        self.authenticated.get()
    }

    fn login(&self) -> CloudCliResult<()> {
        self.record("login".into())?;
        self.authenticated.set(true);
        Ok(())
    }

    fn set_project(&self, project_id: &str) -> CloudCliResult<()> {
        self.record(format!("set_project {project_id}"))
    }

    fn enable_services(&self, project_id: &str, services: &[&str]) -> CloudCliResult<()> {
        self.record(format!("enable {project_id} {}", services.len()))
    }

    fn list_enabled_services(&self, _project_id: &str) -> CloudCliResult<Vec<String>> {
        Ok(self.enabled.clone())
    }
}

impl DatabaseAdmin for MockCloud {
    fn drop_database(&self, instance: &str, project_id: &str, database: &str) -> CloudCliResult<()> {
        self.record(format!("drop database {database} on {instance} in {project_id}"))
    }

    fn drop_user(&self, instance: &str, project_id: &str, user: &str) -> CloudCliResult<()> {
        self.record(format!("drop user {user} on {instance} in {project_id}"))
    }
}

/// Confirmer that answers from a script and counts questions
pub struct ScriptedConfirmer {
    answers: RefCell<Vec<bool>>,
    pub asked: RefCell<Vec<String>>,
}

impl ScriptedConfirmer {
    pub fn new(answers: &[bool]) -> Self {
        Self {
            answers: RefCell::new(answers.iter().rev().copied().collect()),
            asked: RefCell::new(Vec::new()),
        }
    }
}

impl Confirmer for ScriptedConfirmer {
    fn confirm(&self, prompt: &str) -> std::io::Result<bool> {
        self.asked.borrow_mut().push(prompt.to_string());
        Ok(self.answers.borrow_mut().pop().unwrap_or(false))
    }
}
