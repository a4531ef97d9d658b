//! Normalized view of a deployment's Terraform outputs
//!
//! Rebuilt from `terraform output -json` on every request; never persisted.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry of `terraform output -json`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct OutputValue {
    #[serde(default)]
    pub value: Value,
    #[serde(default)]
    pub sensitive: bool,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub value_type: Option<Value>,
}

impl OutputValue {
    pub fn plain(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            sensitive: false,
            value_type: None,
        }
    }

    pub fn sensitive(value: impl Into<Value>) -> Self {
        Self {
            sensitive: true,
            ..Self::plain(value)
        }
    }

    /// Null, empty strings and empty collections have nothing to show
    pub fn is_empty(&self) -> bool {
        match &self.value {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            Value::Array(a) => a.is_empty(),
            Value::Object(o) => o.is_empty(),
            _ => false,
        }
    }
}

/// Output name to entry, sorted so parsing is order-independent
pub type OutputMap = BTreeMap<String, OutputValue>;

/// Shape of deployment inferred from which outputs exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentFamily {
    Vm,
    Serverless,
    #[default]
    Generic,
}

impl DeploymentFamily {
    pub fn label(self) -> &'static str {
        match self {
            DeploymentFamily::Vm => "cloud_vm",
            DeploymentFamily::Serverless => "cloud_run",
            DeploymentFamily::Generic => "generic",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VmAccess {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssh_command: Option<String>,
}

impl VmAccess {
    pub fn is_empty(&self) -> bool {
        self.external_ip.is_none() && self.ssh_command.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ServiceUrlCollection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_store: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serving: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dashboard: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduler: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    pub cron_jobs: BTreeMap<String, String>,
    pub family: DeploymentFamily,
    #[serde(skip_serializing_if = "VmAccess::is_empty")]
    pub vm: VmAccess,
    pub warnings: Vec<String>,
}

impl ServiceUrlCollection {
    /// `(label, url)` for every discovered service slot, in display order
    pub fn services(&self) -> Vec<(&'static str, &str)> {
        [
            ("MLflow", &self.tracking),
            ("Feast", &self.feature_store),
            ("Serving API", &self.serving),
            ("Grafana", &self.dashboard),
            ("Airflow", &self.scheduler),
        ]
        .into_iter()
        .filter_map(|(label, url)| url.as_deref().map(|u| (label, u)))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.services().is_empty() && self.database.is_none() && self.cron_jobs.is_empty()
    }
}

/// Managed PostgreSQL access details
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostgresConnectionInfo {
    pub connection_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
    pub username: String,
    pub database: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_ip: Option<String>,
    /// Present only when credentials were explicitly requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_connection: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direct_connection: Option<String>,
}
