//! WebAC CLI
//!
//! Command-line access checks over a resource tree dataset.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use webac_cli::cli::{Cli, Command};
use webac_cli::commands::{cmd_check, cmd_modes};
use webac_cli::config_handlers::handle_config_command;
use webac_cli::WebacConfig;

/// Exit status for a denied check.
const EXIT_DENIED: u8 = 2;

fn init_logging(config: &WebacConfig, verbose: bool) {
    let fallback = if verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Config commands must work even when the config file is broken.
    if let Command::Config { action } = cli.command {
        handle_config_command(cli.config.as_deref(), action)?;
        return Ok(ExitCode::SUCCESS);
    }

    let config = WebacConfig::load(cli.config.as_deref())?;
    init_logging(&config, cli.verbose);
    tracing::debug!(?config, "Configuration loaded");

    let mut out = std::io::stdout().lock();
    match cli.command {
        Command::Check(args) => {
            let decision = cmd_check(&config, &args, &mut out).await?;
            if decision.is_granted() {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::from(EXIT_DENIED))
            }
        }
        Command::Modes(args) => {
            cmd_modes(&config, &args, &mut out).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Config { .. } => Ok(ExitCode::SUCCESS),
    }
}
