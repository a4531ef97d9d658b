//! Terraform outputs and the service registry built from them

use deployml::domain::entities::{OutputMap, OutputValue, PostgresConnectionInfo, ServiceUrlCollection};
use serde_json::Value;

use crate::ui::blocks::warning::WarningBlock;
use crate::ui::primitives::text::ColoredText;
use crate::ui::widgets::panel::Panel;

pub const NO_VALUE: &str = "(no value)";
pub const SENSITIVE: &str = "(sensitive, hidden)";

fn display_value(output: &OutputValue) -> String {
    if output.sensitive {
        return SENSITIVE.to_string();
    }
    if output.is_empty() {
        return NO_VALUE.to_string();
    }
    match &output.value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Every output, one per line; sensitive values never shown
pub fn render_outputs(outputs: &OutputMap, supports_color: bool, supports_unicode: bool) -> String {
    if outputs.is_empty() {
        return String::new();
    }
    let width = outputs.keys().map(String::len).max().unwrap_or(0);
    let mut panel = Panel::with_title(ColoredText::info("Terraform Outputs").bold().render(supports_color));
    panel.add_empty();
    for (name, output) in outputs {
        let value = display_value(output);
        let value = if output.sensitive || output.is_empty() {
            ColoredText::dim(value).render(supports_color)
        } else {
            value
        };
        panel.add_line(format!("{:<width$}  {}", name, value, width = width));
    }
    panel.render(supports_color, supports_unicode)
}

/// Discovered endpoints, database and cron jobs
pub fn render_services(
    urls: &ServiceUrlCollection,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut out = String::new();
    let mut panel = Panel::with_title(ColoredText::info("Services").bold().render(supports_color));
    panel.add_empty();

    let mut rows: Vec<(String, String)> = urls
        .services()
        .into_iter()
        .map(|(label, url)| (label.to_string(), url.to_string()))
        .collect();
    if let Some(db) = &urls.database {
        rows.push(("Database".to_string(), db.clone()));
    }
    if let Some(ip) = &urls.vm.external_ip {
        rows.push(("VM IP".to_string(), ip.clone()));
    }
    if let Some(ssh) = &urls.vm.ssh_command {
        rows.push(("SSH".to_string(), ssh.clone()));
    }

    if rows.is_empty() {
        panel.add_line(ColoredText::dim("No service URLs found in outputs").render(supports_color));
    } else {
        let width = rows.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
        for (label, value) in rows {
            panel.add_line(format!("{:<width$}  {}", label, value, width = width));
        }
    }

    if !urls.cron_jobs.is_empty() {
        panel.add_empty();
        panel.add_line(ColoredText::info("Cron jobs").render(supports_color));
        for (job, url) in &urls.cron_jobs {
            panel.add_line(format!("  {}  {}", job, url));
        }
    }
    panel.add_empty();
    panel.add_line(ColoredText::dim(format!("Deployment: {}", urls.family.label())).render(supports_color));
    out.push_str(&panel.render(supports_color, supports_unicode));

    if !urls.warnings.is_empty() {
        let mut block = WarningBlock::new("Some outputs were skipped");
        for warning in &urls.warnings {
            block.add_line(warning.clone());
        }
        out.push_str(&block.render(supports_color, supports_unicode));
    }
    out
}

pub fn render_postgres(
    info: &PostgresConnectionInfo,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut rows: Vec<(&str, String)> = vec![("Connection", info.connection_name.clone())];
    let optional = [
        ("Project", &info.project),
        ("Region", &info.region),
        ("Instance", &info.instance),
        ("Public IP", &info.public_ip),
    ];
    rows.extend(
        optional
            .into_iter()
            .filter_map(|(label, value)| value.clone().map(|v| (label, v))),
    );
    rows.push(("Database", info.database.clone()));
    rows.push(("User", info.username.clone()));
    rows.push((
        "Password",
        info.password
            .clone()
            .unwrap_or_else(|| "(hidden, use --show-credentials)".to_string()),
    ));
    let commands = [
        ("Proxy", &info.proxy_command),
        ("Via proxy", &info.proxy_connection),
        ("Direct", &info.direct_connection),
    ];
    rows.extend(
        commands
            .into_iter()
            .filter_map(|(label, value)| value.clone().map(|v| (label, v))),
    );

    let width = rows.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
    let mut panel = Panel::with_title(ColoredText::info("PostgreSQL").bold().render(supports_color));
    panel.add_empty();
    for (label, value) in rows {
        panel.add_line(format!("{:<width$}  {}", label, value, width = width));
    }
    panel.render(supports_color, supports_unicode)
}
