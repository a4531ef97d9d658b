use deployml::application::{CheckItem, CheckStatus};

use crate::ui::primitives::icon::Icon;

fn status_icon(status: CheckStatus) -> Icon {
    match status {
        CheckStatus::Pass => Icon::Success,
        CheckStatus::Warning => Icon::Warning,
        CheckStatus::Error => Icon::Error,
    }
}

/// One doctor line, with the recommendation and (verbose) details below it
pub fn render_check_item(
    item: &CheckItem,
    verbose: bool,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let icon = status_icon(item.status).colored(supports_color, supports_unicode);
    let arrow = Icon::Arrow.colored(supports_color, supports_unicode);

    let mut out = format!("  {} {} - {}\n", icon, item.name, item.message);
    if let Some(rec) = &item.recommendation {
        out.push_str(&format!("    {} {}\n", arrow, rec));
    }
    if verbose {
        for detail in &item.details {
            out.push_str(&format!("    {} {}\n", arrow, detail));
        }
    }
    out
}
