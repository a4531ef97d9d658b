//! Init command handler

use anyhow::Result;

use deployml::config::Settings;
use deployml::domain::value_objects::Cloud;
use deployml::presentation::Toolchain;

use crate::ui::blocks::header::CommandHeader;
use crate::ui::context::UiContext;
use crate::ui::json::emit;
use crate::ui::primitives::icon::Icon;
use crate::ui::views::init::{init_json, render_init};

pub fn cmd_init(
    cloud: Cloud,
    project_id: Option<String>,
    ui: &UiContext,
    settings: &Settings,
) -> Result<()> {
    if !ui.json {
        let mut header = CommandHeader::new(Icon::Init, "DeployML Init");
        header.add("Provider", cloud.display_name());
        if let Some(project) = &project_id {
            header.add("Project", project.clone());
        }
        print!("{}", header.render(ui.color, ui.unicode));
        println!();
    }

    let toolchain = Toolchain::from_settings(settings);
    let outcome = toolchain
        .init_use_case()
        .execute(cloud, project_id.as_deref())?;

    if ui.json {
        emit(init_json(cloud, &outcome))?;
    } else {
        print!("{}", render_init(&outcome, ui.color, ui.unicode));
    }
    Ok(())
}
