//! Common test utilities for DeployML CLI tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated test environment with temp directories
//! - Fake `terraform` and `gcloud` scripts for end-to-end runs
//! - Fixtures: Reusable stack configs

#![allow(dead_code)]

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;
