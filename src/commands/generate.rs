//! Generate command handler
//!
//! Flags win; anything missing is asked for on a terminal and defaulted
//! otherwise.

use std::path::PathBuf;

use anyhow::{anyhow, Result};

use deployml::application::generate::{
    DEFAULT_DEPLOYMENT_TYPE, DEFAULT_REGION, DEFAULT_STACK_NAME, VM_DEPLOYMENT_TYPE,
};
use deployml::application::{default_stack, GenerateOptions};
use deployml::config::Settings;
use deployml::domain::ports::Confirmer;
use deployml::domain::value_objects::Cloud;
use deployml::presentation::Toolchain;

use crate::ui::context::UiContext;
use crate::ui::json::emit;
use crate::ui::prompt::{ask, select, DialoguerConfirmer};
use crate::ui::views::generate::{generate_json, render_generate};

const CLOUDS: [Cloud; 3] = [Cloud::Gcp, Cloud::Aws, Cloud::Azure];
const DEPLOYMENT_TYPES: [&str; 2] = [DEFAULT_DEPLOYMENT_TYPE, VM_DEPLOYMENT_TYPE];

/// Values given on the command line
#[derive(Debug, Default)]
pub struct GenerateArgs {
    pub name: Option<String>,
    pub provider: Option<Cloud>,
    pub deployment_type: Option<String>,
    pub project_id: Option<String>,
    pub region: Option<String>,
    pub zone: Option<String>,
    pub output: Option<PathBuf>,
}

pub fn cmd_generate(args: GenerateArgs, ui: &UiContext, settings: &Settings) -> Result<()> {
    let interactive = ui.interactive();
    let options = if interactive {
        prompt_missing(&args, ui.unicode)?
    } else {
        args.options()
    };
    let output = args.output.unwrap_or_else(|| options.default_output());

    let config = default_stack(&options)?;

    if interactive && output.exists() {
        let confirmer = DialoguerConfirmer::new(ui.unicode);
        if !confirmer.confirm(&format!("{} exists. Overwrite?", output.display()))? {
            return Err(anyhow!("not overwriting {}", output.display()));
        }
    }

    Toolchain::from_settings(settings).stacks.save(&output, &config)?;

    if ui.json {
        emit(generate_json(&output, &config))?;
    } else {
        print!("{}", render_generate(&output, &config, ui.color, ui.unicode));
    }
    Ok(())
}

impl GenerateArgs {
    /// Flags over defaults, no prompting
    fn options(&self) -> GenerateOptions {
        let defaults = GenerateOptions::default();
        GenerateOptions {
            name: self.name.clone().unwrap_or(defaults.name),
            cloud: self.provider.unwrap_or(defaults.cloud),
            deployment_type: self.deployment_type.clone().unwrap_or(defaults.deployment_type),
            project_id: self.project_id.clone(),
            region: self.region.clone().unwrap_or(defaults.region),
            zone: self.zone.clone(),
        }
    }
}

/// Ask for every value the command line did not give
fn prompt_missing(args: &GenerateArgs, unicode: bool) -> Result<GenerateOptions> {
    let mut options = args.options();

    if args.name.is_none() {
        options.name = ask(unicode, "MLOps stack name", Some(DEFAULT_STACK_NAME))?;
    }
    if args.provider.is_none() {
        let labels: Vec<&str> = CLOUDS.iter().map(Cloud::display_name).collect();
        options.cloud = CLOUDS[select(unicode, "Select provider", &labels, 0)?];
    }
    if args.deployment_type.is_none() {
        let index = select(unicode, "Select deployment type", &DEPLOYMENT_TYPES, 0)?;
        options.deployment_type = DEPLOYMENT_TYPES[index].to_string();
    }

    if options.cloud.requires_project_id() {
        if args.project_id.is_none() {
            options.project_id = Some(ask(unicode, "GCP project ID", None)?);
        }
        if args.region.is_none() {
            options.region = ask(unicode, "GCP region", Some(DEFAULT_REGION))?;
        }
        if options.deployment_type == VM_DEPLOYMENT_TYPE && args.zone.is_none() {
            let zone = format!("{}-a", options.region);
            options.zone = Some(ask(unicode, "GCP zone", Some(&zone))?);
        }
    }
    Ok(options)
}
