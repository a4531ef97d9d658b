//! Deploy command handler

use std::path::Path;

use anyhow::Result;
use serde_json::json;

use deployml::application::DeployOptions;
use deployml::config::Settings;
use deployml::presentation::{create_renderer, Toolchain};

use crate::ui::context::UiContext;
use crate::ui::json::emit;
use crate::ui::views::deploy::{deploy_json, render_deploy_header, render_deploy_summary};
use crate::ui::views::outputs::render_services;

pub fn cmd_deploy(
    config_path: &Path,
    workspace: Option<String>,
    yes: bool,
    ui: &UiContext,
    settings: &Settings,
) -> Result<()> {
    let toolchain = Toolchain::from_settings(settings);
    let config = toolchain.stacks.load(config_path)?;
    let base_dir = super::base_dir(settings)?;

    if ui.json {
        emit(json!({
            "event": "start",
            "command": "deploy",
            "config": config_path.display().to_string(),
            "provider": config.provider.cloud.as_str(),
            "deployment_type": config.deployment.deployment_type,
        }))?;
    } else {
        print!("{}", render_deploy_header(config_path, &config, ui.color, ui.unicode));
        println!();
    }

    let renderer = create_renderer(settings)?;
    let confirmer = super::confirmer(ui, yes);
    let events = super::event_sink(ui, "deploy");
    let use_case = toolchain.deploy_use_case(&renderer, confirmer.as_ref(), events.as_ref());

    let options = DeployOptions::new(config, base_dir).with_workspace(workspace);
    let result = use_case.execute(options, rand::thread_rng())?;

    if ui.json {
        emit(deploy_json(&result))?;
        return Ok(());
    }

    println!();
    if result.is_applied() && !result.urls.is_empty() {
        print!("{}", render_services(&result.urls, ui.color, ui.unicode));
    }
    print!("{}", render_deploy_summary(&result, ui.color, ui.unicode));
    Ok(())
}
