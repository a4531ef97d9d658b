use deployml::config::ConfigWarning;

use crate::ui::primitives::icon::Icon;

/// Unknown settings keys, one warning each, with a suggestion when close
pub fn print_config_warnings(warnings: &[ConfigWarning], unicode: bool) {
    for w in warnings {
        eprint!("{}", format_config_warning(w, unicode));
    }
}

fn format_config_warning(w: &ConfigWarning, unicode: bool) -> String {
    let icon = Icon::Warning.render(unicode);
    let mut out = match w.line {
        Some(line) => format!(
            "{} Unknown config key '{}' in {}:{}\n",
            icon,
            w.key,
            w.file.display(),
            line
        ),
        None => format!("{} Unknown config key '{}' in {}\n", icon, w.key, w.file.display()),
    };
    if let Some(suggestion) = &w.suggestion {
        out.push_str(&format!("   Did you mean '{}'?\n", suggestion));
    }
    out
}
