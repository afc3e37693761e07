//! CLI argument parsing with clap derive

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use crate::app::{AppContext, OutputFlags};
use crate::commands;

/// Setup Internet of Agents server
#[derive(Parser)]
#[command(name = "nanda-sdk", version)]
pub struct Cli {
    #[command(flatten)]
    pub setup: commands::setup::SetupArgs,

    /// Check installation and PATH setup
    #[arg(long)]
    pub check_install: bool,

    /// Check ansible installation
    #[arg(long)]
    pub check_ansible: bool,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or the request
    /// parameters are invalid.
    pub async fn run(self) -> Result<ExitCode> {
        let Cli {
            setup,
            check_install,
            check_ansible,
            quiet,
            no_color,
        } = self;
        let app = AppContext::new(&OutputFlags { no_color, quiet })?;

        if check_install {
            commands::check::check_install(&app).await;
            return Ok(ExitCode::SUCCESS);
        }
        if check_ansible {
            commands::check::check_ansible(&app).await;
            return Ok(ExitCode::SUCCESS);
        }
        commands::setup::run(&app, setup).await
    }
}
