//! Service listing and lookup commands

use cfenv_core::{AppEnv, Service};
use colored::Colorize;

use crate::error::{CliError, Result};

/// Run the services command
pub fn run_services(app_env: &AppEnv, service_type: Option<&str>, as_json: bool) -> Result<()> {
    let services: Vec<Service> = match service_type {
        Some(spec) => app_env.get_services_of_type(spec),
        None => app_env.get_services().into_values().collect(),
    };

    if as_json {
        println!("{}", serde_json::to_string_pretty(&services)?);
        return Ok(());
    }

    println!("{}:", "Services".bold());
    if services.is_empty() {
        println!("  {}", "None".dimmed());
        return Ok(());
    }

    for service in &services {
        println!(
            "  {} {} ({}, plan {})",
            "+".green(),
            service.name.cyan(),
            service.label,
            service.plan
        );
    }

    Ok(())
}

/// Run the service command
pub fn run_service(app_env: &AppEnv, spec: &str) -> Result<()> {
    let service = app_env
        .get_service(spec)
        .ok_or_else(|| not_found(spec))?;
    println!("{}", serde_json::to_string_pretty(&service)?);
    Ok(())
}

/// Run the creds command
pub fn run_creds(app_env: &AppEnv, spec: &str) -> Result<()> {
    let creds = app_env
        .get_service_creds(spec)
        .ok_or_else(|| not_found(spec))?;
    println!("{}", serde_json::to_string_pretty(&creds)?);
    Ok(())
}

pub(crate) fn not_found(spec: &str) -> CliError {
    CliError::user(format!("No service matches '{spec}'"))
}
