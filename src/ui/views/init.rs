use deployml::application::InitOutcome;
use deployml::domain::value_objects::Cloud;
use serde_json::json;

use crate::ui::blocks::summary::ResultSummary;

pub fn render_init(outcome: &InitOutcome, supports_color: bool, supports_unicode: bool) -> String {
    match outcome {
        InitOutcome::ServicesEnabled { project_id, count } => {
            let mut summary = ResultSummary::success("Cloud Services Enabled");
            summary.add_row("Project", project_id.clone());
            summary.add_row("APIs", count.to_string());
            summary.with_next_step("deployml generate");
            summary.render(supports_color, supports_unicode)
        }
        InitOutcome::Guidance(message) => {
            let mut summary = ResultSummary::partial("Nothing to Enable");
            summary.add_warning(*message);
            summary.render(supports_color, supports_unicode)
        }
    }
}

pub fn init_json(cloud: Cloud, outcome: &InitOutcome) -> serde_json::Value {
    match outcome {
        InitOutcome::ServicesEnabled { project_id, count } => json!({
            "event": "complete",
            "command": "init",
            "provider": cloud.as_str(),
            "project_id": project_id,
            "enabled": count,
        }),
        InitOutcome::Guidance(message) => json!({
            "event": "complete",
            "command": "init",
            "provider": cloud.as_str(),
            "guidance": message,
        }),
    }
}
