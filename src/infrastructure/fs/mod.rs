//! Local file system: atomic writes and the workspace store

mod atomic;
mod workspace;

pub use atomic::atomic_write;
pub use workspace::LocalWorkspaceStore;
