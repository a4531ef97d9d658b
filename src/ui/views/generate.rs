use std::path::Path;

use deployml::StackConfig;
use serde_json::json;

use crate::ui::blocks::summary::ResultSummary;

pub fn render_generate(
    output: &Path,
    config: &StackConfig,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut summary = ResultSummary::success("Stack Config Written");
    summary.add_row("File", output.display().to_string());
    summary.add_row("Provider", config.provider.cloud.display_name());
    summary.add_row("Type", config.deployment.deployment_type.clone());
    summary.add_row("Region", config.provider.region.clone());
    summary.with_next_step(format!("deployml deploy -c {}", output.display()));
    summary.render(supports_color, supports_unicode)
}

pub fn generate_json(output: &Path, config: &StackConfig) -> serde_json::Value {
    json!({
        "event": "complete",
        "command": "generate",
        "path": output.display().to_string(),
        "provider": config.provider.cloud.as_str(),
        "deployment_type": config.deployment.deployment_type,
        "region": config.provider.region,
    })
}
