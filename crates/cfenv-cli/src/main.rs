//! cfenv CLI
//!
//! Inspect the Cloud Foundry environment an application would see: the
//! resolved port and URLs, the application record, bound services and their
//! connection URLs.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;

use cfenv_core::{AppEnv, AppEnvOptions};
use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    if let Err(e) = cfenv_core::logging::init_with_default(level) {
        eprintln!("{}: could not set up logging: {}", "warning".yellow(), e);
    }
    tracing::debug!("Verbose mode enabled");

    let options = match &cli.options {
        Some(path) => commands::load_options(path)?,
        None => AppEnvOptions::default(),
    };
    let app_env = AppEnv::from_process(&options)?;

    execute_command(&app_env, cli.command)
}

fn execute_command(app_env: &AppEnv, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Show { json } => commands::run_show(app_env, json),
        Commands::App { json } => commands::run_app(app_env, json),
        Commands::Services { service_type, json } => {
            commands::run_services(app_env, service_type.as_deref(), json)
        }
        Commands::Service { spec } => commands::run_service(app_env, &spec),
        Commands::Creds { spec } => commands::run_creds(app_env, &spec),
        Commands::Url(args) => commands::run_url(app_env, &args),
    }
}
