//! Repository Implementations
//!
//! File-backed stores for stack configs and template overrides.

mod stack_config;
mod templates;

pub use stack_config::YamlStackConfigRepository;
pub use templates::load_template_overrides;
