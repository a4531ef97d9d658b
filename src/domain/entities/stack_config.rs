//! Stack configuration entity
//!
//! The declarative description of a deployment, as read from YAML:
//!
//! ```yaml
//! name: demo
//! provider: { name: gcp, project_id: my-project, region: us-west1 }
//! deployment: { type: cloud_run }
//! stack:
//!   - experiment_tracking:
//!       name: mlflow
//!       params: { allow_public_access: true }
//! ```
//!
//! Stages are kept in file order; renderers iterate them in that order.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::domain::value_objects::Cloud;

/// Tool parameters; sorted keys keep rendering byte-stable
pub type Params = BTreeMap<String, Value>;

/// Stage name of the artifact store binding
pub const ARTIFACT_TRACKING_STAGE: &str = "artifact_tracking";
/// Tool that owns the artifact bucket
pub const MLFLOW_TOOL: &str = "mlflow";

/// Parameter keys the resolver reads and writes
pub mod param_keys {
    pub const ARTIFACT_BUCKET: &str = "artifact_bucket";
    pub const CREATE_ARTIFACT_BUCKET: &str = "create_artifact_bucket";
    pub const CREATE_BUCKET: &str = "create_bucket";
    pub const BACKEND_STORE_URI: &str = "backend_store_uri";
    pub const USE_POSTGRES: &str = "use_postgres";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub provider: ProviderConfig,
    pub deployment: DeploymentConfig,
    #[serde(
        default,
        serialize_with = "serialize_stages",
        deserialize_with = "deserialize_stages"
    )]
    pub stack: Vec<ToolBinding>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(rename = "name")]
    pub cloud: Cloud,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    pub region: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentConfig {
    #[serde(rename = "type")]
    pub deployment_type: String,
}

/// One `stage -> tool` binding from the `stack` list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolBinding {
    pub stage: String,
    #[serde(rename = "name")]
    pub tool: String,
    pub params: Params,
}

impl ToolBinding {
    pub fn new(stage: impl Into<String>, tool: impl Into<String>) -> Self {
        Self {
            stage: stage.into(),
            tool: tool.into(),
            params: Params::new(),
        }
    }

    pub fn with_param(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    /// String parameter; empty strings count as absent
    pub fn param_str(&self, key: &str) -> Option<&str> {
        self.params
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    pub fn param_bool(&self, key: &str) -> Option<bool> {
        self.params.get(key).and_then(Value::as_bool)
    }

    pub fn has_param(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    pub fn set_param(&mut self, key: &str, value: impl Into<Value>) {
        self.params.insert(key.to_string(), value.into());
    }

    pub fn is_artifact_store(&self) -> bool {
        self.stage == ARTIFACT_TRACKING_STAGE && self.tool == MLFLOW_TOOL
    }
}

impl StackConfig {
    /// Parse and validate YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self, String> {
        let config: StackConfig = serde_yaml_ng::from_str(content).map_err(|e| e.to_string())?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> Result<String, String> {
        serde_yaml_ng::to_string(self).map_err(|e| e.to_string())
    }

    /// Checks serde cannot express
    pub fn validate(&self) -> Result<(), String> {
        if self.provider.cloud.requires_project_id()
            && self.project_id().map(str::trim).unwrap_or("").is_empty()
        {
            return Err(format!(
                "provider.project_id is required for {}",
                self.provider.cloud
            ));
        }
        if self.provider.region.trim().is_empty() {
            return Err("provider.region must not be empty".to_string());
        }
        if let Some(name) = self.name.as_deref().filter(|n| !n.trim().is_empty()) {
            super::workspace::validate_name(name)?;
        }
        if self.deployment.deployment_type.trim().is_empty() {
            return Err("deployment.type must not be empty".to_string());
        }
        for binding in &self.stack {
            if binding.tool.trim().is_empty() {
                return Err(format!("stage '{}' has an empty tool name", binding.stage));
            }
        }
        Ok(())
    }

    pub fn project_id(&self) -> Option<&str> {
        self.provider.project_id.as_deref()
    }

    /// Explicit zone, or the region's `-a` zone
    pub fn zone(&self) -> String {
        self.provider
            .zone
            .clone()
            .filter(|z| !z.is_empty())
            .unwrap_or_else(|| format!("{}-a", self.provider.region))
    }

    pub fn stage_names(&self) -> Vec<&str> {
        self.stack.iter().map(|b| b.stage.as_str()).collect()
    }

    /// True if any tool asks the renderer to provision the artifact bucket.
    /// `create_artifact_bucket` wins over the shorter `create_bucket`.
    pub fn creates_artifact_bucket(&self) -> bool {
        self.stack.iter().any(|b| {
            b.param_bool(param_keys::CREATE_ARTIFACT_BUCKET)
                .or_else(|| b.param_bool(param_keys::CREATE_BUCKET))
                == Some(true)
        })
    }
}

/// Wire shape of a tool under its stage key
#[derive(Debug, Deserialize, Serialize)]
struct ToolSpec {
    name: String,
    #[serde(default, deserialize_with = "deserialize_params")]
    params: Params,
}

fn deserialize_params<'de, D>(deserializer: D) -> Result<Params, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Params>::deserialize(deserializer)?.unwrap_or_default())
}

/// A single `- stage: {tool}` list item, entries in file order
struct StageEntry(Vec<(String, ToolSpec)>);

impl<'de> Deserialize<'de> for StageEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct StageVisitor;

        impl<'de> Visitor<'de> for StageVisitor {
            type Value = StageEntry;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a mapping of stage name to tool")
            }

            fn visit_map<A>(self, mut map: A) -> Result<StageEntry, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::new();
                while let Some((stage, tool)) = map.next_entry::<String, ToolSpec>()? {
                    entries.push((stage, tool));
                }
                Ok(StageEntry(entries))
            }
        }

        deserializer.deserialize_map(StageVisitor)
    }
}

fn deserialize_stages<'de, D>(deserializer: D) -> Result<Vec<ToolBinding>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Option::<Vec<StageEntry>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(entries
        .into_iter()
        .flat_map(|entry| entry.0)
        .map(|(stage, spec)| ToolBinding {
            stage,
            tool: spec.name,
            params: spec.params,
        })
        .collect())
}

fn serialize_stages<S>(stages: &[ToolBinding], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    struct Stage<'a>(&'a ToolBinding);

    impl Serialize for Stage<'_> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            #[derive(Serialize)]
            struct Tool<'a> {
                name: &'a str,
                params: &'a Params,
            }

            let mut map = serializer.serialize_map(Some(1))?;
            map.serialize_entry(
                &self.0.stage,
                &Tool {
                    name: &self.0.tool,
                    params: &self.0.params,
                },
            )?;
            map.end()
        }
    }

    serializer.collect_seq(stages.iter().map(Stage))
}
