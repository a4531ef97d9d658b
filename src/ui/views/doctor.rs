use deployml::application::{CheckStatus, DoctorResult};
use serde_json::json;

use crate::ui::blocks::check_item::render_check_item;
use crate::ui::blocks::header::CommandHeader;
use crate::ui::blocks::summary::ResultSummary;
use crate::ui::primitives::icon::Icon;

pub fn render_doctor_header(
    project_id: Option<&str>,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::Doctor, "DeployML Doctor");
    header.add("Project", project_id.unwrap_or("(none, API checks skipped)"));
    header.render(supports_color, supports_unicode)
}

pub fn render_doctor(
    result: &DoctorResult,
    verbose: bool,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut out = String::new();
    for item in &result.items {
        out.push_str(&render_check_item(item, verbose, supports_color, supports_unicode));
    }
    out.push('\n');
    out.push_str(&render_doctor_summary(result, supports_color, supports_unicode));
    out
}

pub fn render_doctor_summary(
    result: &DoctorResult,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut summary = if result.is_success() {
        ResultSummary::success("Environment Ready")
    } else {
        ResultSummary::partial("Environment Needs Attention")
    };
    summary.add_row("Passed", result.passed.to_string());
    summary.add_row("Warnings", result.warnings.to_string());
    summary.add_row("Errors", result.errors.to_string());
    if !result.missing_apis.is_empty() {
        summary.add_warning(format!("{} required APIs disabled", result.missing_apis.len()));
        summary.with_next_step("deployml init --provider gcp --project-id <project>");
    }
    summary.render(supports_color, supports_unicode)
}

pub fn doctor_json(result: &DoctorResult) -> serde_json::Value {
    let checks: Vec<_> = result
        .items
        .iter()
        .map(|item| {
            json!({
                "name": item.name,
                "status": match item.status {
                    CheckStatus::Pass => "pass",
                    CheckStatus::Warning => "warning",
                    CheckStatus::Error => "error",
                },
                "message": item.message,
                "recommendation": item.recommendation,
                "details": item.details,
            })
        })
        .collect();
    json!({
        "event": "complete",
        "command": "doctor",
        "success": result.is_success(),
        "passed": result.passed,
        "warnings": result.warnings,
        "errors": result.errors,
        "missing_apis": result.missing_apis,
        "checks": checks,
    })
}
