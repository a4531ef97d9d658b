//! Doctor command implementation

use std::io::Write;

use anyhow::Result;
use serde_json::json;

use deployml::config::Settings;
use deployml::presentation::{doctor_options, Toolchain};

use crate::ui::blocks::check_item::render_check_item;
use crate::ui::context::UiContext;
use crate::ui::json::emit;
use crate::ui::views::doctor::{doctor_json, render_doctor_header, render_doctor_summary};

/// Exits with status 1 when any check errored
pub fn cmd_doctor(project_id: Option<String>, ui: &UiContext, settings: &Settings) -> Result<()> {
    let toolchain = Toolchain::from_settings(settings);
    let options = doctor_options(settings, project_id);

    if ui.json {
        emit(json!({
            "event": "start",
            "command": "doctor",
            "project_id": options.project_id,
        }))?;
    } else {
        print!(
            "{}",
            render_doctor_header(options.project_id.as_deref(), ui.color, ui.unicode)
        );
        println!();
    }

    let verbose = ui.verbose > 0;
    let result = toolchain
        .doctor_use_case()
        .execute_with_callback(&options, |item| {
            if !ui.json {
                print!("{}", render_check_item(item, verbose, ui.color, ui.unicode));
            }
        });

    if ui.json {
        emit(doctor_json(&result))?;
    } else {
        println!();
        print!("{}", render_doctor_summary(&result, ui.color, ui.unicode));
    }

    if !result.is_success() {
        std::io::stdout().flush()?;
        std::process::exit(1);
    }
    Ok(())
}
