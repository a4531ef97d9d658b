pub mod panel;
pub mod progress;
