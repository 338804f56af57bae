//! Show command implementation

use cfenv_core::AppEnv;
use colored::Colorize;
use serde_json::json;

use crate::error::Result;

/// Run the show command
pub fn run_show(app_env: &AppEnv, as_json: bool) -> Result<()> {
    if as_json {
        let value = json!({
            "isLocal": app_env.is_local(),
            "port": app_env.port(),
            "name": app_env.name(),
            "bind": app_env.bind(),
            "urls": app_env.urls(),
            "url": app_env.url(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let mode = if app_env.is_local() {
        "local".yellow()
    } else {
        "platform".green()
    };

    println!("{}", "Application Environment".bold());
    println!();
    println!("{}:   {}", "Mode".dimmed(), mode);
    println!(
        "{}:   {}",
        "Name".dimmed(),
        app_env.name().unwrap_or("(unnamed)").cyan()
    );
    println!("{}:   {}", "Port".dimmed(), app_env.port());
    println!("{}:   {}", "Bind".dimmed(), app_env.bind());
    println!();

    println!("{}:", "URLs".bold());
    for url in app_env.urls() {
        println!("  {} {}", "+".green(), url);
    }

    Ok(())
}
