//! Terraform CLI provisioner
//!
//! Blocking steps capture stdout and stderr. `spawn` hands the child to a
//! waiter thread that reports completion over a channel, so the caller can
//! redraw progress while apply runs.

use std::path::Path;
use std::process::{Command, Output, Stdio};
use std::sync::mpsc;
use std::thread;

use tracing::debug;

use crate::domain::ports::{
    PendingStep, Provisioner, ProvisionerError, ProvisionerResult, ToolOutput,
};
use crate::domain::value_objects::LifecycleStep;

#[derive(Debug, Clone)]
pub struct TerraformCli {
    program: String,
}

impl TerraformCli {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command(&self, args: &[&str], dir: &Path) -> Command {
        debug!(program = %self.program, ?args, dir = %dir.display(), "invoking");
        let mut cmd = Command::new(&self.program);
        cmd.args(args)
            .current_dir(dir)
            .stdin(Stdio::null())
            .env("TF_IN_AUTOMATION", "1");
        cmd
    }

    fn spawn_error(&self, source: std::io::Error) -> ProvisionerError {
        ProvisionerError::Spawn {
            program: self.program.clone(),
            source,
        }
    }
}

fn to_tool_output(output: Output) -> ToolOutput {
    ToolOutput {
        code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}

impl Provisioner for TerraformCli {
    fn run(&self, step: LifecycleStep, dir: &Path) -> ProvisionerResult<ToolOutput> {
        let output = self
            .command(step.args(), dir)
            .output()
            .map_err(|e| self.spawn_error(e))?;
        Ok(to_tool_output(output))
    }

    fn spawn(&self, step: LifecycleStep, dir: &Path) -> ProvisionerResult<PendingStep> {
        // stdout is not read while the indicator owns the terminal
        let child = self
            .command(step.args(), dir)
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        let (tx, rx) = mpsc::channel();
        let program = self.program.clone();
        thread::spawn(move || {
            let result = child
                .wait_with_output()
                .map(to_tool_output)
                .map_err(|e| ProvisionerError::Wait {
                    program,
                    message: e.to_string(),
                });
            let _ = tx.send(result);
        });
        Ok(PendingStep::new(self.program.clone(), rx))
    }

    fn output_raw(&self, dir: &Path, name: &str) -> ProvisionerResult<Option<String>> {
        let output = self
            .command(&["output", "-raw", name], dir)
            .output()
            .map_err(|e| self.spawn_error(e))?;
        if !output.status.success() {
            debug!(name, "output not available");
            return Ok(None);
        }
        let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(Some(value).filter(|v| !v.is_empty()))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::time::Duration;
    use tempfile::tempdir;

    fn fake_terraform(dir: &Path, body: &str) -> String {
        let path = dir.join("terraform");
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path.display().to_string()
    }

    #[test]
    fn run_passes_step_arguments_and_captures_output() {
        let dir = tempdir().unwrap();
        let terraform = TerraformCli::new(fake_terraform(dir.path(), r#"echo "$@"; echo warn >&2"#));

        let output = terraform.run(LifecycleStep::Plan, dir.path()).unwrap();

        assert!(output.success());
        assert_eq!(output.stdout.trim(), "plan -no-color -input=false");
        assert_eq!(output.stderr.trim(), "warn");
    }

    #[test]
    fn run_reports_exit_code() {
        let dir = tempdir().unwrap();
        let terraform = TerraformCli::new(fake_terraform(dir.path(), "echo broken >&2; exit 3"));

        let output = terraform.run(LifecycleStep::Destroy, dir.path()).unwrap();

        assert_eq!(output.code, Some(3));
        assert_eq!(output.stderr.trim(), "broken");
    }

    #[test]
    fn missing_binary_is_a_spawn_error() {
        let dir = tempdir().unwrap();
        let terraform = TerraformCli::new(dir.path().join("nope").display().to_string());

        let err = terraform.run(LifecycleStep::Init, dir.path()).unwrap_err();

        assert!(matches!(
            err,
            ProvisionerError::Spawn { ref source, .. } if source.kind() == std::io::ErrorKind::NotFound
        ));
    }

    #[test]
    fn spawned_step_reports_over_channel() {
        let dir = tempdir().unwrap();
        let terraform = TerraformCli::new(fake_terraform(dir.path(), "sleep 0.1; echo late >&2"));

        let pending = terraform.spawn(LifecycleStep::Apply, dir.path()).unwrap();
        let mut result = None;
        for _ in 0..100 {
            if let Some(r) = pending.wait_timeout(Duration::from_millis(50)) {
                result = Some(r);
                break;
            }
        }

        let output = result.expect("apply finished").unwrap();
        assert!(output.success());
        assert_eq!(output.stderr.trim(), "late");
    }

    #[test]
    fn output_raw_returns_trimmed_value_or_none() {
        let dir = tempdir().unwrap();
        let terraform = TerraformCli::new(fake_terraform(
            dir.path(),
            r#"if [ "$3" = "instance_connection_name" ]; then echo "p1:us-west1:db"; else exit 1; fi"#,
        ));

        assert_eq!(
            terraform
                .output_raw(dir.path(), "instance_connection_name")
                .unwrap()
                .as_deref(),
            Some("p1:us-west1:db")
        );
        assert_eq!(terraform.output_raw(dir.path(), "other").unwrap(), None);
    }
}
