//! Google Cloud CLI adapter
//!
//! One `gcloud` wrapper serving three ports: bucket existence checks, the
//! authenticated session, and Cloud SQL cleanup.

use std::process::{Command, Output, Stdio};

use tracing::debug;

use crate::domain::ports::{
    BucketRegistry, CloudCliError, CloudCliResult, CloudSession, DatabaseAdmin, StorageError,
};

#[derive(Debug, Clone)]
pub struct GcloudCli {
    program: String,
}

impl GcloudCli {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn output(&self, args: &[&str]) -> CloudCliResult<Output> {
        debug!(program = %self.program, ?args, "invoking");
        Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| CloudCliError::Spawn {
                program: self.program.clone(),
                source,
            })
    }

    /// Run and require success, returning stdout
    fn run_checked(&self, args: &[&str]) -> CloudCliResult<String> {
        let output = self.output(args)?;
        if !output.status.success() {
            return Err(CloudCliError::Failed {
                command: format!("{} {}", self.program, args.join(" ")),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl BucketRegistry for GcloudCli {
    /// Bucket names are global: a bucket we may not read still takes the name.
    fn exists(&self, bucket: &str, project_id: &str) -> Result<bool, StorageError> {
        let url = format!("gs://{bucket}");
        let output = self
            .output(&[
                "storage",
                "buckets",
                "describe",
                &url,
                "--project",
                project_id,
                "--format=value(name)",
            ])
            .map_err(|e| StorageError(e.to_string()))?;
        if output.status.success() {
            return Ok(true);
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let lowered = stderr.to_lowercase();
        if lowered.contains("404") || lowered.contains("not found") || lowered.contains("notfound") {
            Ok(false)
        } else if lowered.contains("403") || lowered.contains("permission") {
            Ok(true)
        } else {
            Err(StorageError(stderr.trim().to_string()))
        }
    }
}

impl CloudSession for GcloudCli {
    fn is_authenticated(&self) -> bool {
        self.output(&["auth", "list"])
            .map(|o| o.status.success() && String::from_utf8_lossy(&o.stdout).contains("ACTIVE"))
            .unwrap_or(false)
    }

    fn login(&self) -> CloudCliResult<()> {
        // Interactive: the browser flow needs the terminal
        let status = Command::new(&self.program)
            .args(["auth", "application-default", "login"])
            .status()
            .map_err(|source| CloudCliError::Spawn {
                program: self.program.clone(),
                source,
            })?;
        if status.success() {
            Ok(())
        } else {
            Err(CloudCliError::Failed {
                command: format!("{} auth application-default login", self.program),
                code: status.code(),
                stderr: String::new(),
            })
        }
    }

    fn set_project(&self, project_id: &str) -> CloudCliResult<()> {
        self.run_checked(&["config", "set", "project", project_id])
            .map(|_| ())
    }

    fn enable_services(&self, project_id: &str, services: &[&str]) -> CloudCliResult<()> {
        let mut args = vec!["services", "enable"];
        args.extend_from_slice(services);
        args.extend_from_slice(&["--project", project_id]);
        self.run_checked(&args).map(|_| ())
    }

    fn list_enabled_services(&self, project_id: &str) -> CloudCliResult<Vec<String>> {
        let stdout = self.run_checked(&[
            "services",
            "list",
            "--enabled",
            "--project",
            project_id,
            "--format=value(config.name)",
        ])?;
        Ok(stdout
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect())
    }
}

impl DatabaseAdmin for GcloudCli {
    fn drop_database(&self, instance: &str, project_id: &str, database: &str) -> CloudCliResult<()> {
        self.run_checked(&[
            "sql",
            "databases",
            "delete",
            database,
            "--instance",
            instance,
            "--project",
            project_id,
            "--quiet",
        ])
        .map(|_| ())
    }

    fn drop_user(&self, instance: &str, project_id: &str, user: &str) -> CloudCliResult<()> {
        self.run_checked(&[
            "sql",
            "users",
            "delete",
            user,
            "--instance",
            instance,
            "--project",
            project_id,
            "--quiet",
        ])
        .map(|_| ())
    }
}
