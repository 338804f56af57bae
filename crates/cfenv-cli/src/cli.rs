//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// cfenv - Inspect the Cloud Foundry environment of an application
#[derive(Parser, Debug)]
#[command(name = "cfenv")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// JSON options file, used for local runs
    #[arg(short, long, global = true, env = "CFENV_OPTIONS")]
    pub options: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Show the resolved environment: port, bind address, URLs
    Show {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Show the application record from VCAP_APPLICATION
    App {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// List bound services
    ///
    /// Examples:
    ///   cfenv services                      # All services
    ///   cfenv services --type cleardb       # Services of one type
    ///   cfenv services --type '^redis'      # Types matching a regex
    Services {
        /// Service type key or regex over type keys
        #[arg(short = 't', long = "type")]
        service_type: Option<String>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Show one service as JSON
    Service {
        /// Service name or case-insensitive regex
        spec: String,
    },

    /// Show the credentials of one service as JSON
    Creds {
        /// Service name or case-insensitive regex
        spec: String,
    },

    /// Print the connection URL of a service
    ///
    /// Examples:
    ///   cfenv url orders-db
    ///   cfenv url orders-db --host localhost --port 3307
    ///   cfenv url cache --substitutions '{"queryItems": [{"name": "ssl", "value": "true"}]}'
    Url(UrlArgs),
}

/// Arguments of the `url` command.
///
/// Flags take precedence over the same key in `--substitutions`.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct UrlArgs {
    /// Service name or case-insensitive regex
    pub spec: String,

    /// Substitutions as a JSON object
    #[arg(short, long)]
    pub substitutions: Option<String>,

    /// Credentials field holding the base URL (default: url, then uri)
    #[arg(long)]
    pub url_field: Option<String>,

    /// Replace the user name
    #[arg(long)]
    pub user: Option<String>,

    /// Replace the password
    #[arg(long)]
    pub password: Option<String>,

    /// Replace the port
    #[arg(long)]
    pub port: Option<u16>,

    /// Replace the host
    #[arg(long)]
    pub host: Option<String>,

    /// Replace the scheme
    #[arg(long)]
    pub scheme: Option<String>,

    /// Replace the query with a raw query string
    #[arg(long)]
    pub query: Option<String>,

    /// Replace the query with NAME=VALUE items (repeatable)
    #[arg(long = "query-item", value_name = "NAME=VALUE")]
    pub query_items: Vec<String>,
}
