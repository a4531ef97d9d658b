//! Tool settings for DeployML
//!
//! Resolution order:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (DEPLOYML_*)
//! 3. Project settings (.deployml/config.toml)
//! 4. User settings (~/.config/deployml/config.toml)
//! 5. Built-in defaults (lowest priority)
//!
//! Stack configs (the YAML a deploy reads) are not settings; see
//! `domain::entities::StackConfig`.

mod loader;
mod types;

pub use loader::{load_or_default, load_with_warnings, with_env_overrides, ConfigWarning};
pub use types::{AnimationMode, ColorMode, OutputConfig, PathsConfig, Settings, ToolsConfig};
