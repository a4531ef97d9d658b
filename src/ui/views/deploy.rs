use std::path::Path;

use deployml::application::{DeployOutcome, DeployResult};
use deployml::domain::services::BucketSource;
use deployml::StackConfig;
use serde_json::json;

use crate::ui::blocks::header::CommandHeader;
use crate::ui::blocks::summary::ResultSummary;
use crate::ui::primitives::icon::Icon;

pub fn render_deploy_header(
    config_path: &Path,
    config: &StackConfig,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::Deploy, "DeployML Deploy");
    header.add("Config", config_path.display().to_string());
    header.add(
        "Target",
        format!(
            "{} / {} ({})",
            config.provider.cloud.display_name(),
            config.deployment.deployment_type,
            config.provider.region
        ),
    );
    if let Some(project) = config.project_id() {
        header.add("Project", project);
    }
    let tools: Vec<String> = config
        .stack
        .iter()
        .map(|b| format!("{}={}", b.stage, b.tool))
        .collect();
    if !tools.is_empty() {
        header.add("Stack", tools.join(", "));
    }
    header.render(supports_color, supports_unicode)
}

pub fn render_deploy_summary(
    result: &DeployResult,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut summary = match result.outcome {
        DeployOutcome::Applied => ResultSummary::success("Deployment Complete"),
        DeployOutcome::Cancelled => ResultSummary::partial("Deployment Cancelled"),
    };
    summary.add_row("Workspace", result.workspace.name());
    summary.add_row("Path", result.workspace.terraform_dir().display().to_string());
    if let Some(estimate) = &result.estimate {
        summary.add_row("Estimate", estimate.to_string());
    }
    if let Some(bucket) = &result.resolution.bucket {
        let origin = match bucket.source {
            BucketSource::Generated { .. } => "generated",
            BucketSource::Existing => "existing",
            BucketSource::Missing => "will be created",
        };
        summary.add_row("Artifact bucket", format!("{} ({})", bucket.bucket, origin));
    }
    if result.resolution.postgres_propagated {
        summary.add_row("Backend store", "postgresql (all tools)");
    }

    match result.outcome {
        DeployOutcome::Applied => {
            if result.urls.is_empty() {
                summary.add_warning("No service URLs found in Terraform outputs");
            }
            summary.with_next_step(format!(
                "deployml status --workspace {}",
                result.workspace.name()
            ));
        }
        DeployOutcome::Cancelled => summary.add_warning("Nothing was applied"),
    }
    summary.render(supports_color, supports_unicode)
}

pub fn deploy_json(result: &DeployResult) -> serde_json::Value {
    json!({
        "event": "complete",
        "command": "deploy",
        "status": match result.outcome {
            DeployOutcome::Applied => "applied",
            DeployOutcome::Cancelled => "cancelled",
        },
        "workspace": result.workspace.name(),
        "path": result.workspace.terraform_dir().display().to_string(),
        "fingerprint": result.fingerprint.as_str(),
        "estimate_minutes": result.estimate.map(|e| e.minutes),
        "artifact_bucket": result.resolution.bucket.as_ref().map(|b| b.bucket.clone()),
        "services": &result.urls,
    })
}
