//! Deploy Module
//!
//! Drives a stack config from YAML to a running deployment.
//!
//! ## Structure
//!
//! - `options` - Input (`DeployOptions`)
//! - `result` - Outcome (`DeployResult`, `DeployOutcome`)
//! - `use_case` - Orchestration (`DeployUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use deployml::application::deploy::{DeployOptions, DeployUseCase};
//!
//! let use_case = DeployUseCase::new(driver, &renderer, &registry, &session, &events);
//! let result = use_case.execute(DeployOptions::new(config, base_dir), rand::thread_rng())?;
//! ```

mod options;
mod result;
mod use_case;

pub use options::DeployOptions;
pub use result::{DeployOutcome, DeployResult};
pub use use_case::{DeployUseCase, DEPLOY_PROMPT};

#[cfg(test)]
mod tests;
