use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize a tracing subscriber with default configuration.
///
/// Logs go to stderr so they never mix with values an app or the CLI
/// prints on stdout. `RUST_LOG` selects the level, defaulting to `info`.
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_with_default(Level::INFO)
}

/// Like [`init`], with `default` as the level when `RUST_LOG` is unset.
pub fn init_with_default(default: Level) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .compact();

    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default.as_str().to_lowercase()))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
