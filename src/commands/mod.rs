//! Command handlers
//!
//! Each handler builds its adapters through a `Toolchain`, runs one use
//! case and renders the result as text or as NDJSON events.

pub mod deploy;
pub mod destroy;
pub mod doctor;
pub mod generate;
pub mod init;
pub mod status;

use std::path::PathBuf;

use anyhow::Result;

use deployml::config::Settings;
use deployml::domain::ports::{Confirmer, FixedAnswer, LifecycleEventSink};
use deployml::infrastructure::JsonEventSink;

use crate::ui::context::UiContext;
use crate::ui::prompt::DialoguerConfirmer;
use crate::ui::sink::TerminalEventSink;

/// `--yes` answers every question; without a terminal nothing is confirmed
pub(crate) fn confirmer(ui: &UiContext, yes: bool) -> Box<dyn Confirmer> {
    if yes {
        Box::new(FixedAnswer(true))
    } else if ui.interactive() {
        Box::new(DialoguerConfirmer::new(ui.unicode))
    } else {
        Box::new(FixedAnswer(false))
    }
}

pub(crate) fn event_sink(ui: &UiContext, command: &'static str) -> Box<dyn LifecycleEventSink> {
    if ui.json {
        Box::new(JsonEventSink::stdout(command))
    } else {
        Box::new(TerminalEventSink::stdout(*ui))
    }
}

/// Directory workspaces are created under
pub(crate) fn base_dir(settings: &Settings) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    Ok(settings.workspace_root(&cwd))
}
