//! Locating external binaries

use std::path::PathBuf;

pub trait ToolLocator {
    fn locate(&self, binary: &str) -> Option<PathBuf>;

    fn is_installed(&self, binary: &str) -> bool {
        self.locate(binary).is_some()
    }
}
