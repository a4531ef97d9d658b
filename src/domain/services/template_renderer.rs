//! Terraform artifact rendering
//!
//! Pure: the same config always yields byte-identical `main.tf`,
//! `variables.tf` and `terraform.tfvars`. Built-in template families are
//! compiled into the binary; an override directory may replace them or add
//! new `(cloud, deployment type)` pairs.

use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::Value;
use tera::{Context, Tera};

use crate::domain::entities::{param_keys, Params, StackConfig, MAIN_TF, TFVARS, VARIABLES_TF};
use crate::domain::value_objects::Fingerprint;
use crate::error::{DeploymlError, DeploymlResult};

/// Artifact file names, in render order
pub const ARTIFACTS: [&str; 3] = [MAIN_TF, VARIABLES_TF, TFVARS];

const BUILTIN_TEMPLATES: &[(&str, &str, &str, &str)] = &[
    (
        "gcp",
        "cloud_run",
        MAIN_TF,
        include_str!("../../../templates/gcp/cloud_run/main.tf.tera"),
    ),
    (
        "gcp",
        "cloud_run",
        VARIABLES_TF,
        include_str!("../../../templates/gcp/cloud_run/variables.tf.tera"),
    ),
    (
        "gcp",
        "cloud_run",
        TFVARS,
        include_str!("../../../templates/gcp/cloud_run/terraform.tfvars.tera"),
    ),
    (
        "gcp",
        "cloud_vm",
        MAIN_TF,
        include_str!("../../../templates/gcp/cloud_vm/main.tf.tera"),
    ),
    (
        "gcp",
        "cloud_vm",
        VARIABLES_TF,
        include_str!("../../../templates/gcp/cloud_vm/variables.tf.tera"),
    ),
    (
        "gcp",
        "cloud_vm",
        TFVARS,
        include_str!("../../../templates/gcp/cloud_vm/terraform.tfvars.tera"),
    ),
];

/// Container images used when a tool has no `image` param
const DEFAULT_IMAGES: &[(&str, &str)] = &[
    ("mlflow", "ghcr.io/mlflow/mlflow:v2.14.1"),
    ("feast", "feastdev/feature-server:0.38.0"),
    ("fastapi", "tiangolo/uvicorn-gunicorn-fastapi:python3.11"),
    ("grafana", "grafana/grafana:11.1.0"),
    ("airflow", "apache/airflow:2.9.2"),
];

/// Rendered Terraform files plus their fingerprint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArtifacts {
    pub main_tf: String,
    pub variables_tf: String,
    pub tfvars: String,
    pub fingerprint: Fingerprint,
}

impl RenderedArtifacts {
    pub fn new(main_tf: String, variables_tf: String, tfvars: String) -> Self {
        let fingerprint = Fingerprint::of_parts([
            (MAIN_TF, main_tf.as_str()),
            (VARIABLES_TF, variables_tf.as_str()),
            (TFVARS, tfvars.as_str()),
        ]);
        Self {
            main_tf,
            variables_tf,
            tfvars,
            fingerprint,
        }
    }

    /// `(file name, content)` pairs
    pub fn files(&self) -> [(&'static str, &str); 3] {
        [
            (MAIN_TF, self.main_tf.as_str()),
            (VARIABLES_TF, self.variables_tf.as_str()),
            (TFVARS, self.tfvars.as_str()),
        ]
    }
}

pub struct TemplateRenderer {
    tera: Tera,
    families: BTreeSet<(String, String)>,
}

impl TemplateRenderer {
    /// Renderer with the built-in families loaded
    pub fn new() -> DeploymlResult<Self> {
        let mut renderer = Self {
            tera: Tera::default(),
            families: BTreeSet::new(),
        };
        renderer.tera.autoescape_on(Vec::new());
        for (cloud, deployment_type, artifact, source) in BUILTIN_TEMPLATES {
            renderer.register_template(cloud, deployment_type, artifact, source)?;
        }
        Ok(renderer)
    }

    /// Add or replace one artifact template of a family
    pub fn register_template(
        &mut self,
        cloud: &str,
        deployment_type: &str,
        artifact: &str,
        source: &str,
    ) -> DeploymlResult<()> {
        if !ARTIFACTS.contains(&artifact) {
            return Err(DeploymlError::Render {
                artifact: artifact.to_string(),
                message: format!("unknown artifact, expected one of {}", ARTIFACTS.join(", ")),
            });
        }
        self.tera
            .add_raw_template(&template_name(cloud, deployment_type, artifact), source)
            .map_err(|e| DeploymlError::Render {
                artifact: format!("{cloud}/{deployment_type}/{artifact}"),
                message: error_chain(&e),
            })?;
        self.families
            .insert((cloud.to_string(), deployment_type.to_string()));
        Ok(())
    }

    pub fn has_family(&self, cloud: &str, deployment_type: &str) -> bool {
        self.families
            .contains(&(cloud.to_string(), deployment_type.to_string()))
    }

    /// Known `cloud/type` pairs, sorted
    pub fn families(&self) -> Vec<String> {
        self.families
            .iter()
            .map(|(cloud, deployment_type)| format!("{cloud}/{deployment_type}"))
            .collect()
    }

    pub fn render(&self, config: &StackConfig) -> DeploymlResult<RenderedArtifacts> {
        let cloud = config.provider.cloud.as_str();
        let deployment_type = config.deployment.deployment_type.as_str();
        if !self.has_family(cloud, deployment_type) {
            return Err(DeploymlError::TemplateNotFound {
                cloud: cloud.to_string(),
                deployment_type: deployment_type.to_string(),
            });
        }

        let context = render_context(config)?;
        let render = |artifact: &str| -> DeploymlResult<String> {
            let name = template_name(cloud, deployment_type, artifact);
            if !self.tera.get_template_names().any(|n| n == name) {
                return Err(DeploymlError::Render {
                    artifact: artifact.to_string(),
                    message: format!("template family {cloud}/{deployment_type} has no {artifact}"),
                });
            }
            self.tera
                .render(&name, &context)
                .map_err(|e| DeploymlError::Render {
                    artifact: artifact.to_string(),
                    message: error_chain(&e),
                })
        };

        Ok(RenderedArtifacts::new(
            render(MAIN_TF)?,
            render(VARIABLES_TF)?,
            render(TFVARS)?,
        ))
    }
}

fn template_name(cloud: &str, deployment_type: &str, artifact: &str) -> String {
    format!("{cloud}/{deployment_type}/{artifact}")
}

/// Tera keeps the useful detail in the source chain
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[derive(Serialize)]
struct RenderModel<'a> {
    name: &'a str,
    cloud: &'a str,
    deployment_type: &'a str,
    project_id: &'a str,
    region: &'a str,
    zone: String,
    create_artifact_bucket: bool,
    use_postgres: bool,
    artifact_bucket: Option<&'a str>,
    stack: Vec<StageModel<'a>>,
    tools: Vec<ToolModel>,
}

#[derive(Serialize)]
struct StageModel<'a> {
    stage: &'a str,
    name: &'a str,
    params: &'a Params,
}

/// One distinct tool; params of repeated tools merge in stack order
#[derive(Serialize)]
struct ToolModel {
    name: String,
    /// Terraform-safe form of `name`
    ident: String,
    stages: Vec<String>,
    image: String,
    variables: Vec<VariableModel>,
}

#[derive(Serialize)]
struct VariableModel {
    /// Terraform variable name, `<tool>_<key>`
    name: String,
    key: String,
    value: Value,
}

fn render_context(config: &StackConfig) -> DeploymlResult<Context> {
    let mut tools: Vec<(String, Vec<String>, Params)> = Vec::new();
    for binding in &config.stack {
        match tools.iter_mut().find(|(name, _, _)| *name == binding.tool) {
            Some((_, stages, params)) => {
                stages.push(binding.stage.clone());
                params.extend(binding.params.clone());
            }
            None => tools.push((
                binding.tool.clone(),
                vec![binding.stage.clone()],
                binding.params.clone(),
            )),
        }
    }

    let tools = tools
        .into_iter()
        .map(|(name, stages, mut params)| {
            let image = params
                .remove("image")
                .and_then(|v| v.as_str().map(str::to_string))
                .unwrap_or_else(|| default_image(&name));
            let variables = params
                .into_iter()
                .map(|(key, value)| VariableModel {
                    name: format!("{}_{}", identifier(&name), identifier(&key)),
                    key,
                    value,
                })
                .collect();
            ToolModel {
                ident: identifier(&name),
                name,
                stages,
                image,
                variables,
            }
        })
        .collect();

    let model = RenderModel {
        name: config.name.as_deref().unwrap_or_default(),
        cloud: config.provider.cloud.as_str(),
        deployment_type: &config.deployment.deployment_type,
        project_id: config.project_id().unwrap_or_default(),
        region: &config.provider.region,
        zone: config.zone(),
        create_artifact_bucket: config.creates_artifact_bucket(),
        use_postgres: config
            .stack
            .iter()
            .any(|b| b.param_bool(param_keys::USE_POSTGRES) == Some(true)),
        artifact_bucket: config
            .stack
            .iter()
            .find(|b| b.is_artifact_store())
            .and_then(|b| b.param_str(param_keys::ARTIFACT_BUCKET)),
        stack: config
            .stack
            .iter()
            .map(|b| StageModel {
                stage: &b.stage,
                name: &b.tool,
                params: &b.params,
            })
            .collect(),
        tools,
    };

    Context::from_serialize(&model).map_err(|e| DeploymlError::Render {
        artifact: "context".to_string(),
        message: error_chain(&e),
    })
}

fn default_image(tool: &str) -> String {
    DEFAULT_IMAGES
        .iter()
        .find(|(name, _)| *name == tool)
        .map(|(_, image)| image.to_string())
        .unwrap_or_else(|| format!("{tool}:latest"))
}

/// Letters, digits and `_` pass through; anything else becomes `_`
fn identifier(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}
