//! Url command implementation

use cfenv_core::{AppEnv, QueryItem, UrlSubstitutions};

use crate::cli::UrlArgs;
use crate::commands::services::not_found;
use crate::error::{CliError, Result};

/// Run the url command
pub fn run_url(app_env: &AppEnv, args: &UrlArgs) -> Result<()> {
    let service = app_env
        .get_service(&args.spec)
        .ok_or_else(|| not_found(&args.spec))?;

    let substitutions = build_substitutions(args)?;
    tracing::debug!(?substitutions, service = %service.name, "Building service URL");

    // Resolve by the matched name so a regex spec cannot select a different service.
    let url = app_env
        .get_service_url_with(&service.name, &substitutions)
        .ok_or_else(|| {
            CliError::user(format!(
                "Service '{}' has no usable URL in its credentials",
                service.name
            ))
        })?;

    println!("{url}");
    Ok(())
}

/// Merge `--substitutions` JSON with the individual flags. Flags win.
fn build_substitutions(args: &UrlArgs) -> Result<UrlSubstitutions> {
    let mut subs = match &args.substitutions {
        Some(raw) => {
            let value: serde_json::Value = serde_json::from_str(raw)?;
            UrlSubstitutions::from_json(&value)
        }
        None => UrlSubstitutions::default(),
    };

    if args.url_field.is_some() {
        subs.url_field.clone_from(&args.url_field);
    }
    if args.user.is_some() {
        subs.user.clone_from(&args.user);
    }
    if args.password.is_some() {
        subs.password.clone_from(&args.password);
    }
    if args.port.is_some() {
        subs.port = args.port;
    }
    if args.host.is_some() {
        subs.host.clone_from(&args.host);
    }
    if args.scheme.is_some() {
        subs.scheme.clone_from(&args.scheme);
    }
    if args.query.is_some() {
        subs.query.clone_from(&args.query);
    }
    if !args.query_items.is_empty() {
        subs.query_items = Some(args.query_items.iter().map(|s| parse_query_item(s)).collect());
    }

    Ok(subs)
}

fn parse_query_item(raw: &str) -> QueryItem {
    match raw.split_once('=') {
        Some((name, value)) => QueryItem::new(name, value),
        None => QueryItem {
            name: raw.to_string(),
            value: None,
        },
    }
}
