//! Status command handler

use std::path::Path;

use anyhow::Result;

use deployml::config::Settings;
use deployml::presentation::Toolchain;
use deployml::Workspace;

use crate::ui::context::UiContext;
use crate::ui::json::emit;
use crate::ui::views::status::{render_status, status_json};

pub fn cmd_status(
    config_path: Option<&Path>,
    workspace: Option<String>,
    show_credentials: bool,
    ui: &UiContext,
    settings: &Settings,
) -> Result<()> {
    let toolchain = Toolchain::from_settings(settings);
    let base_dir = super::base_dir(settings)?;

    let workspace = match config_path {
        Some(path) => {
            let config = toolchain.stacks.load(path)?;
            Workspace::for_config(&base_dir, &config, workspace.as_deref())?
        }
        None => Workspace::new(
            &base_dir,
            workspace.unwrap_or_else(|| Workspace::DEFAULT_NAME.to_string()),
        )?,
    };

    let report = toolchain
        .status_use_case()
        .execute(workspace, show_credentials)?;

    if ui.json {
        emit(status_json(&report))?;
    } else {
        print!("{}", render_status(&report, ui.color, ui.unicode));
    }
    Ok(())
}
