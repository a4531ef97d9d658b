use deployml::application::{RenderState, StatusReport};
use serde_json::json;

use super::outputs::{render_outputs, render_postgres, render_services};
use crate::ui::blocks::header::CommandHeader;
use crate::ui::blocks::warning::WarningBlock;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

pub fn render_status(report: &StatusReport, supports_color: bool, supports_unicode: bool) -> String {
    let mut header = CommandHeader::new(Icon::Status, "DeployML Status");
    header.add("Workspace", report.workspace.name());
    header.add("Path", report.workspace.terraform_dir().display().to_string());

    if !report.exists {
        header.add("State", "not deployed");
        let mut out = header.render(supports_color, supports_unicode);
        out.push_str(&format!(
            "{} {}\n",
            Icon::Arrow.colored(supports_color, supports_unicode),
            ColoredText::dim("Run `deployml deploy -c <stack.yaml>` first").render(supports_color)
        ));
        return out;
    }

    header.add("Artifacts", render_label(&report.render));
    let mut out = header.render(supports_color, supports_unicode);

    if let RenderState::Stale { .. } = report.render {
        let mut block = WarningBlock::new("Rendered files changed since the last deploy");
        block.add_line("The next deploy will re-render them from the stack config");
        out.push_str(&block.render(supports_color, supports_unicode));
    }

    out.push_str(&render_services(&report.urls, supports_color, supports_unicode));
    if let Some(info) = &report.postgres {
        out.push_str(&render_postgres(info, supports_color, supports_unicode));
    }
    out.push_str(&render_outputs(&report.outputs, supports_color, supports_unicode));

    if !report.warnings.is_empty() {
        let mut block = WarningBlock::new("Status is incomplete");
        for warning in &report.warnings {
            block.add_line(warning.clone());
        }
        out.push_str(&block.render(supports_color, supports_unicode));
    }
    out
}

fn render_label(state: &RenderState) -> String {
    match state {
        RenderState::Current(fp) => format!("{} ({})", state.label(), fp.short()),
        _ => state.label().to_string(),
    }
}

pub fn status_json(report: &StatusReport) -> serde_json::Value {
    let outputs: serde_json::Map<String, serde_json::Value> = report
        .outputs
        .iter()
        .map(|(name, output)| {
            let value = if output.sensitive {
                serde_json::Value::Null
            } else {
                output.value.clone()
            };
            (name.clone(), json!({ "value": value, "sensitive": output.sensitive }))
        })
        .collect();
    json!({
        "event": "complete",
        "command": "status",
        "workspace": report.workspace.name(),
        "exists": report.exists,
        "render": report.render.label(),
        "services": &report.urls,
        "postgres": &report.postgres,
        "outputs": outputs,
        "warnings": report.warnings,
    })
}
