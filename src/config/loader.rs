//! Settings loading

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::domain::entities::WORKSPACES_DIR;
use crate::error::{DeploymlError, DeploymlResult};

use super::types::{ColorMode, Settings};

const SETTINGS_FILE: &str = "config.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load settings and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> DeploymlResult<(Settings, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let settings: Settings = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| DeploymlError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((settings, warnings))
}

/// Load from project settings, user settings, or defaults.
///
/// Warnings come back to the caller; a settings file that fails to parse is
/// skipped with a log line.
pub fn load_or_default(project_root: Option<&Path>) -> (Settings, Vec<ConfigWarning>) {
    let candidates = project_root
        .map(|root| root.join(WORKSPACES_DIR).join(SETTINGS_FILE))
        .into_iter()
        .chain(user_config_dir().map(|dir| dir.join("deployml").join(SETTINGS_FILE)));

    for path in candidates {
        if !path.exists() {
            continue;
        }
        match load_with_warnings(&path) {
            Ok((settings, warnings)) => {
                debug!(path = %path.display(), "loaded settings");
                return (with_env_overrides(settings), warnings);
            }
            Err(e) => warn!("ignoring settings file: {e}"),
        }
    }

    (with_env_overrides(Settings::default()), Vec::new())
}

/// Apply environment variable overrides (DEPLOYML_* prefix)
pub fn with_env_overrides(settings: Settings) -> Settings {
    with_env_overrides_from(settings, |key| std::env::var(key).ok())
}

pub(super) fn with_env_overrides_from(
    mut settings: Settings,
    var: impl Fn(&str) -> Option<String>,
) -> Settings {
    let non_empty = |key: &str| var(key).filter(|v| !v.trim().is_empty());

    if let Some(bin) = non_empty("DEPLOYML_TERRAFORM_BIN") {
        settings.tools.terraform = bin;
    }
    if let Some(bin) = non_empty("DEPLOYML_GCLOUD_BIN") {
        settings.tools.gcloud = bin;
    }
    if let Some(dir) = non_empty("DEPLOYML_MODULES_DIR") {
        settings.paths.modules_dir = Some(PathBuf::from(dir));
    }
    if let Some(dir) = non_empty("DEPLOYML_TEMPLATES_DIR") {
        settings.paths.templates_dir = Some(PathBuf::from(dir));
    }
    if let Some(color) = non_empty("DEPLOYML_COLOR") {
        settings.output.color = match color.to_lowercase().as_str() {
            "always" => ColorMode::Always,
            "never" => ColorMode::Never,
            _ => ColorMode::Auto,
        };
    }

    settings
}

/// `$XDG_CONFIG_HOME`, else `~/.config`
fn user_config_dir() -> Option<PathBuf> {
    std::env::var("XDG_CONFIG_HOME")
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "tools",
        "terraform",
        "gcloud",
        "docker",
        "aws",
        "paths",
        "modules_dir",
        "templates_dir",
        "workspace_root",
        "output",
        "color",
        "animation",
        "unicode",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
