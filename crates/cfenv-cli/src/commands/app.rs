//! App command implementation

use cfenv_core::AppEnv;
use colored::Colorize;

use crate::error::Result;

/// Run the app command
///
/// Incomplete metadata is not an error; the record is simply unavailable.
pub fn run_app(app_env: &AppEnv, as_json: bool) -> Result<()> {
    let Some(app) = app_env.get_app() else {
        if as_json {
            println!("null");
        } else {
            println!("{}", "Application record not available".yellow());
            println!("VCAP_APPLICATION is missing or incomplete.");
        }
        return Ok(());
    };

    if as_json {
        println!("{}", serde_json::to_string_pretty(&app)?);
        return Ok(());
    }

    println!("{}", "Application".bold());
    println!();
    println!("{}:       {}", "Name".dimmed(), app.name.cyan());
    println!("{}:         {}", "ID".dimmed(), app.id);
    println!("{}:    {}", "Version".dimmed(), app.version);
    println!(
        "{}:   {} (index {})",
        "Instance".dimmed(),
        app.instance_id,
        app.instance_index
    );
    println!("{}:      {}", "Space".dimmed(), app.space_id);
    println!("{}:       {}", "Port".dimmed(), app.port);
    println!(
        "{}:     mem {} MB, disk {} MB, fds {}",
        "Limits".dimmed(),
        app.limits.memory,
        app.limits.disk,
        app.limits.fds
    );
    if let Some(started_at) = app.started_at {
        println!("{}: {}", "Started at".dimmed(), started_at);
    }
    println!();

    println!("{}:", "URIs".bold());
    if app.uris.is_empty() {
        println!("  {}", "None".dimmed());
    }
    for uri in &app.uris {
        println!("  {} {}", "+".green(), uri);
    }

    Ok(())
}
