//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - Global flags (--json, --color, --verbose, --no-animation) are inherited by all subcommands
//! - `generate` prompts for missing values only when stdin is a terminal

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::value_objects::Cloud;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// DeployML - deploy MLOps stacks to the cloud with Terraform
#[derive(Parser, Debug)]
#[command(name = "deployml")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output NDJSON events for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorWhen>,

    /// Disable animations (spinners, progress bars, live updates)
    #[arg(long, global = true)]
    pub no_animation: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render, plan and apply a stack config
    Deploy {
        /// Path to the stack YAML file
        #[arg(short, long)]
        config_path: PathBuf,

        /// Workspace name (defaults to the config's name)
        #[arg(short, long)]
        workspace: Option<String>,

        /// Skip confirmation prompts
        #[arg(short, long)]
        yes: bool,
    },

    /// Destroy the resources of a deployed stack
    Destroy {
        /// Path to the stack YAML file
        #[arg(short, long)]
        config_path: PathBuf,

        /// Workspace name (defaults to the config's name)
        #[arg(short, long)]
        workspace: Option<String>,

        /// Remove the whole workspace directory afterwards
        #[arg(long)]
        clean_workspace: bool,

        /// Skip confirmation prompts
        #[arg(short, long)]
        yes: bool,
    },

    /// Enable the cloud APIs a deployment needs
    Init {
        /// Cloud provider
        #[arg(short, long, value_enum)]
        provider: Cloud,

        /// Cloud project (required for GCP)
        #[arg(long)]
        project_id: Option<String>,
    },

    /// Check that required tools are installed and authenticated
    Doctor {
        /// Also list required GCP APIs missing from this project
        #[arg(long)]
        project_id: Option<String>,
    },

    /// Show the state of a workspace and its deployed services
    Status {
        /// Path to the stack YAML file
        #[arg(short, long)]
        config_path: Option<PathBuf>,

        /// Workspace name
        #[arg(short, long)]
        workspace: Option<String>,

        /// Include database passwords in the output
        #[arg(long)]
        show_credentials: bool,
    },

    /// Write a starter stack config
    Generate {
        /// Stack name
        #[arg(short, long)]
        name: Option<String>,

        /// Cloud provider
        #[arg(short, long, value_enum)]
        provider: Option<Cloud>,

        /// Deployment type (cloud_run, cloud_vm)
        #[arg(short, long)]
        deployment_type: Option<String>,

        /// Cloud project (required for GCP)
        #[arg(long)]
        project_id: Option<String>,

        /// Region
        #[arg(short, long)]
        region: Option<String>,

        /// Zone (cloud_vm only)
        #[arg(short, long)]
        zone: Option<String>,

        /// Output file (defaults to <name>.yaml)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
