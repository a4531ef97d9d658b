//! PATH lookup through the `which` crate

use std::path::PathBuf;

use crate::domain::ports::ToolLocator;

#[derive(Debug, Clone, Copy, Default)]
pub struct WhichLocator;

impl ToolLocator for WhichLocator {
    fn locate(&self, binary: &str) -> Option<PathBuf> {
        which::which(binary).ok()
    }
}
