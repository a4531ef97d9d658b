use deployml::application::{DestroyOutcome, DestroyResult};
use deployml::Workspace;
use serde_json::json;

use crate::ui::blocks::header::CommandHeader;
use crate::ui::blocks::summary::ResultSummary;
use crate::ui::primitives::icon::Icon;

pub fn render_destroy_header(
    workspace: &Workspace,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::Destroy, "DeployML Destroy");
    header.add("Workspace", workspace.name());
    header.add("Path", workspace.terraform_dir().display().to_string());
    header.render(supports_color, supports_unicode)
}

pub fn render_destroy_summary(
    result: &DestroyResult,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut summary = match result.outcome {
        DestroyOutcome::Destroyed => ResultSummary::success("Resources Destroyed"),
        DestroyOutcome::Absent => ResultSummary::partial("Nothing to Destroy"),
        DestroyOutcome::Cancelled => ResultSummary::partial("Destroy Cancelled"),
    };
    summary.add_row("Workspace", result.workspace.name());

    match result.outcome {
        DestroyOutcome::Absent => {
            summary.add_warning(format!(
                "No workspace at {}",
                result.workspace.terraform_dir().display()
            ));
        }
        DestroyOutcome::Cancelled => summary.add_warning("No resources were destroyed"),
        DestroyOutcome::Destroyed => {
            if let Some(estimate) = &result.estimate {
                summary.add_row("Estimate", estimate.to_string());
            }
            let cleanup = &result.database_cleanup;
            if let Some(instance) = &cleanup.instance {
                summary.add_row("Cloud SQL", instance.clone());
                if !(cleanup.database_dropped && cleanup.user_dropped) {
                    summary.add_warning("Database cleanup was incomplete; check the instance");
                }
            }
            if result.workspace_removed {
                summary.add_row("Workspace dir", "removed");
            } else if !result.state_files_removed.is_empty() {
                summary.add_row(
                    "State files",
                    format!("{} removed", result.state_files_removed.len()),
                );
            }
        }
    }
    summary.render(supports_color, supports_unicode)
}

pub fn destroy_json(result: &DestroyResult) -> serde_json::Value {
    json!({
        "event": "complete",
        "command": "destroy",
        "status": match result.outcome {
            DestroyOutcome::Destroyed => "destroyed",
            DestroyOutcome::Absent => "absent",
            DestroyOutcome::Cancelled => "cancelled",
        },
        "workspace": result.workspace.name(),
        "estimate_minutes": result.estimate.map(|e| e.minutes),
        "database_dropped": result.database_cleanup.database_dropped,
        "user_dropped": result.database_cleanup.user_dropped,
        "workspace_removed": result.workspace_removed,
        "state_files_removed": result
            .state_files_removed
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use deployml::application::CleanupOutcome;
    use std::path::Path;

    fn result(outcome: DestroyOutcome) -> DestroyResult {
        DestroyResult {
            outcome,
            workspace: Workspace::new(Path::new("/work"), "demo").unwrap(),
            estimate: None,
            database_cleanup: CleanupOutcome::default(),
            workspace_removed: false,
            state_files_removed: Vec::new(),
        }
    }

    #[test]
    fn absent_workspace_is_reported_not_failed() {
        let rendered = render_destroy_summary(&result(DestroyOutcome::Absent), false, false);
        assert!(rendered.contains("[WARN] Nothing to Destroy"));
        assert!(rendered.contains("No workspace at /work/.deployml/demo/terraform"));
    }

    #[test]
    fn incomplete_cleanup_is_flagged() {
        let mut r = result(DestroyOutcome::Destroyed);
        r.database_cleanup = CleanupOutcome {
            instance: Some("inst".into()),
            database_dropped: true,
            user_dropped: false,
        };
        r.workspace_removed = true;

        let rendered = render_destroy_summary(&r, false, false);
        assert!(rendered.contains("Cloud SQL      inst"));
        assert!(rendered.contains("Database cleanup was incomplete"));
        assert!(rendered.contains("Workspace dir  removed"));
    }

    #[test]
    fn json_status_names_outcome() {
        assert_eq!(destroy_json(&result(DestroyOutcome::Absent))["status"], "absent");
    }
}
