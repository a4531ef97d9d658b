//! Destroy command handler

use std::path::Path;

use anyhow::Result;
use serde_json::json;

use deployml::application::{DestroyOptions, PostDestroy};
use deployml::config::Settings;
use deployml::presentation::Toolchain;
use deployml::Workspace;

use crate::ui::context::UiContext;
use crate::ui::json::emit;
use crate::ui::views::destroy::{destroy_json, render_destroy_header, render_destroy_summary};

pub fn cmd_destroy(
    config_path: &Path,
    workspace: Option<String>,
    clean_workspace: bool,
    yes: bool,
    ui: &UiContext,
    settings: &Settings,
) -> Result<()> {
    let toolchain = Toolchain::from_settings(settings);
    let config = toolchain.stacks.load(config_path)?;
    let base_dir = super::base_dir(settings)?;
    let workspace = Workspace::for_config(&base_dir, &config, workspace.as_deref())?;

    if ui.json {
        emit(json!({
            "event": "start",
            "command": "destroy",
            "workspace": workspace.name(),
        }))?;
    } else {
        print!("{}", render_destroy_header(&workspace, ui.color, ui.unicode));
        println!();
    }

    let post_destroy = if clean_workspace {
        PostDestroy::RemoveWorkspace
    } else {
        PostDestroy::OfferStateCleanup
    };
    let options = DestroyOptions::new(workspace)
        .with_project_id(config.project_id().map(str::to_string))
        .with_post_destroy(post_destroy);

    let confirmer = super::confirmer(ui, yes);
    let events = super::event_sink(ui, "destroy");
    let result = toolchain
        .destroy_use_case(confirmer.as_ref(), events.as_ref())
        .execute(options)?;

    if ui.json {
        emit(destroy_json(&result))?;
    } else {
        println!();
        print!("{}", render_destroy_summary(&result, ui.color, ui.unicode));
    }
    Ok(())
}
