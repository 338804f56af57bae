//! Application metadata from `VCAP_APPLICATION`.
//!
//! See <https://docs.cloudfoundry.org/devguide/deploy-apps/environment-variable.html#VCAP-APPLICATION>.
//!
//! Besides the [`App`] record this module derives the values the facade
//! exposes directly: the listen port, the app name, the bind address and the
//! app's public URLs.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::env::{EnvSnapshot, PORT_VARIABLES};
use crate::error::{Error, FieldError, Result};
use crate::json::{i64_field, object_field, str_field, string_array_field, string_field};
use crate::options::AppEnvOptions;

/// Port used when no port variable is set.
pub const DEFAULT_PORT: u16 = 8090;

/// Bind address used when the metadata carries no `host`.
pub const DEFAULT_BIND: &str = "0.0.0.0";

/// Format of the `started_at` field, e.g. `2016-03-04 02:43:07 +0000`.
pub const STARTED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Resource limits of an app instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Limits {
    /// Memory limit in MB
    pub memory: u64,
    /// Disk limit in MB
    pub disk: u64,
    /// File descriptor limit
    pub fds: u64,
}

/// A fully described application instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct App {
    pub id: String,
    pub name: String,
    pub uris: Vec<String>,
    pub version: String,
    pub instance_id: String,
    pub instance_index: u32,
    pub limits: Limits,
    pub port: u16,
    pub space_id: String,
    /// Not provided on Diego cells
    pub started_at: Option<DateTime<FixedOffset>>,
}

impl App {
    /// Read an app record from `VCAP_APPLICATION` metadata.
    ///
    /// Every field except `uris` and `started_at` is required.
    pub fn from_json(metadata: &Map<String, Value>) -> std::result::Result<Self, FieldError> {
        AppFields::from_json(metadata).finalize()
    }

    /// `started_at` as seconds since the Unix epoch.
    pub fn started_at_ts(&self) -> Option<i64> {
        self.started_at.map(|ts| ts.timestamp())
    }
}

/// Optional fields of an [`App`], finalized all-or-nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppFields {
    pub id: Option<String>,
    pub name: Option<String>,
    pub uris: Option<Vec<String>>,
    pub version: Option<String>,
    pub instance_id: Option<String>,
    pub instance_index: Option<u32>,
    pub limits: Option<Limits>,
    pub port: Option<u16>,
    pub space_id: Option<String>,
    pub started_at: Option<DateTime<FixedOffset>>,
}

impl AppFields {
    /// Collect whatever fields `metadata` carries with the right type.
    pub fn from_json(metadata: &Map<String, Value>) -> Self {
        let limits = object_field(metadata, "limits").and_then(|limits| {
            Some(Limits {
                memory: u64::try_from(i64_field(limits, "mem")?).ok()?,
                disk: u64::try_from(i64_field(limits, "disk")?).ok()?,
                fds: u64::try_from(i64_field(limits, "fds")?).ok()?,
            })
        });

        let started_at = str_field(metadata, "started_at").and_then(|raw| {
            DateTime::parse_from_str(raw, STARTED_AT_FORMAT)
                .inspect_err(|e| tracing::debug!(raw, error = %e, "Unparsable started_at"))
                .ok()
        });

        Self {
            id: string_field(metadata, "application_id"),
            name: string_field(metadata, "application_name"),
            uris: string_array_field(metadata, "uris"),
            version: string_field(metadata, "version"),
            instance_id: string_field(metadata, "instance_id"),
            instance_index: i64_field(metadata, "instance_index")
                .and_then(|i| u32::try_from(i).ok()),
            limits,
            port: i64_field(metadata, "port").and_then(|p| u16::try_from(p).ok()),
            space_id: string_field(metadata, "space_id"),
            started_at,
        }
    }

    /// Build the record, failing on the first missing required field.
    pub fn finalize(self) -> std::result::Result<App, FieldError> {
        Ok(App {
            id: self.id.ok_or(FieldError::missing("application_id"))?,
            name: self.name.ok_or(FieldError::missing("application_name"))?,
            uris: self.uris.unwrap_or_default(),
            version: self.version.ok_or(FieldError::missing("version"))?,
            instance_id: self.instance_id.ok_or(FieldError::missing("instance_id"))?,
            instance_index: self
                .instance_index
                .ok_or(FieldError::missing("instance_index"))?,
            limits: self.limits.ok_or(FieldError::missing("limits"))?,
            port: self.port.ok_or(FieldError::missing("port"))?,
            space_id: self.space_id.ok_or(FieldError::missing("space_id"))?,
            started_at: self.started_at,
        })
    }
}

/// Resolve the listen port.
///
/// Port variables are checked in precedence order. Without any of them the
/// port falls back to [`DEFAULT_PORT`], unless platform metadata names the
/// app: a named platform instance is always handed a port, so its absence
/// is an error.
pub(crate) fn resolve_port(
    env: &EnvSnapshot,
    app: &Map<String, Value>,
    is_local: bool,
) -> Result<u16> {
    match env.first_of(&PORT_VARIABLES) {
        Some((name, raw)) => raw
            .parse::<u16>()
            .map_err(|e| Error::invalid_value(name, format!("{raw:?} is not a port: {e}"))),
        None if !is_local && str_field(app, "name").is_some() => Err(Error::VariableNotFound {
            name: PORT_VARIABLES.join(" | "),
        }),
        None => Ok(DEFAULT_PORT),
    }
}

/// The app name: options first, then the metadata's `name`.
pub(crate) fn resolve_name(app: &Map<String, Value>, options: &AppEnvOptions) -> Option<String> {
    options
        .name
        .clone()
        .or_else(|| string_field(app, "name"))
}

pub(crate) fn resolve_bind(app: &Map<String, Value>) -> String {
    str_field(app, "host").unwrap_or(DEFAULT_BIND).to_string()
}

/// The app's public URLs.
///
/// Local runs are only reachable on localhost, so any routes in the
/// metadata are ignored.
pub(crate) fn resolve_urls(
    app: &Map<String, Value>,
    is_local: bool,
    port: u16,
    options: &AppEnvOptions,
) -> Vec<String> {
    let scheme = options
        .protocol
        .as_deref()
        .unwrap_or(if is_local { "http" } else { "https" });

    let uris = if is_local {
        vec![format!("localhost:{port}")]
    } else {
        match string_array_field(app, "uris") {
            Some(uris) if !uris.is_empty() => uris,
            _ => vec!["localhost".to_string()],
        }
    };

    uris.into_iter()
        .map(|uri| format!("{scheme}://{uri}"))
        .collect()
}
