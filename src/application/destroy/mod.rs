//! Destroy Module
//!
//! Tears down a workspace's infrastructure, dropping stateful database
//! objects first, then optionally removes local state.

mod options;
mod result;
mod use_case;

pub use options::{DestroyOptions, PostDestroy};
pub use result::{DestroyOutcome, DestroyResult};
pub use use_case::{DestroyUseCase, STATE_CLEANUP_PROMPT};

#[cfg(test)]
mod tests;
