//! DeployML CLI - deploy MLOps stacks to the cloud with Terraform
//!
//! Usage: deployml <COMMAND>
//!
//! Commands:
//!   deploy    Render, plan and apply a stack config
//!   destroy   Destroy the resources of a deployed stack
//!   init      Enable the cloud APIs a deployment needs
//!   doctor    Check required tools and authentication
//!   status    Show a workspace and its deployed services
//!   generate  Write a starter stack config

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use deployml::config::{self, Settings};
use deployml::presentation::{Cli, Commands};

mod commands;
mod ui;

use commands::generate::GenerateArgs;
use ui::context::UiContext;

/// `DEPLOYML_LOG` wins over `-v`
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("DEPLOYML_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let json = cli.json;
    if let Err(e) = run(cli) {
        ui::error::print_error(&e, json);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let (settings, warnings) = config::load_or_default(Some(&cwd));
    let ui = UiContext::new(
        cli.json,
        cli.verbose,
        cli.color,
        cli.no_animation,
        &settings.output,
    );
    if !cli.json {
        ui::output::print_config_warnings(&warnings, ui.unicode);
    }

    dispatch(cli.command, &ui, &settings)
}

fn dispatch(command: Commands, ui: &UiContext, settings: &Settings) -> Result<()> {
    match command {
        Commands::Deploy {
            config_path,
            workspace,
            yes,
        } => commands::deploy::cmd_deploy(&config_path, workspace, yes, ui, settings),
        Commands::Destroy {
            config_path,
            workspace,
            clean_workspace,
            yes,
        } => commands::destroy::cmd_destroy(
            &config_path,
            workspace,
            clean_workspace,
            yes,
            ui,
            settings,
        ),
        Commands::Init {
            provider,
            project_id,
        } => commands::init::cmd_init(provider, project_id, ui, settings),
        Commands::Doctor { project_id } => commands::doctor::cmd_doctor(project_id, ui, settings),
        Commands::Status {
            config_path,
            workspace,
            show_credentials,
        } => commands::status::cmd_status(
            config_path.as_deref(),
            workspace,
            show_credentials,
            ui,
            settings,
        ),
        Commands::Generate {
            name,
            provider,
            deployment_type,
            project_id,
            region,
            zone,
            output,
        } => commands::generate::cmd_generate(
            GenerateArgs {
                name,
                provider,
                deployment_type,
                project_id,
                region,
                zone,
                output,
            },
            ui,
            settings,
        ),
    }
}
