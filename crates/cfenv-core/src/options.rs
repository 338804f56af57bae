//! Construction-time options for [`AppEnv`](crate::AppEnv).
//!
//! Options carry substitute platform documents for local runs plus a couple
//! of overrides. They mirror the JSON document callers usually keep next to
//! their app:
//!
//! ```json
//! {
//!   "name": "my-app",
//!   "protocol": "https",
//!   "vcap": {
//!     "application": { "application_name": "my-app" },
//!     "services": { "user-provided": [] }
//!   }
//! }
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;

/// Substitute platform documents, used only when running locally.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VcapOptions {
    /// Stands in for `VCAP_APPLICATION`
    #[serde(default)]
    pub application: Option<Value>,
    /// Stands in for `VCAP_SERVICES`
    #[serde(default)]
    pub services: Option<Value>,
}

/// Options accepted by [`AppEnv::new`](crate::AppEnv::new).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppEnvOptions {
    /// Substitute platform documents
    #[serde(default)]
    pub vcap: Option<VcapOptions>,
    /// Application name, overrides the metadata's `name`
    #[serde(default)]
    pub name: Option<String>,
    /// URL scheme for the app's URLs (`http` or `https`)
    #[serde(default)]
    pub protocol: Option<String>,
}

impl AppEnvOptions {
    /// Read options from an already decoded JSON document.
    pub fn from_json(value: &Value) -> Result<Self, Error> {
        Self::deserialize(value).map_err(|e| Error::InvalidOptions {
            message: e.to_string(),
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = Some(protocol.into());
        self
    }

    pub fn with_application(mut self, application: Value) -> Self {
        self.vcap.get_or_insert_with(VcapOptions::default).application = Some(application);
        self
    }

    pub fn with_services(mut self, services: Value) -> Self {
        self.vcap.get_or_insert_with(VcapOptions::default).services = Some(services);
        self
    }

    pub(crate) fn application(&self) -> Option<&Value> {
        self.vcap.as_ref().and_then(|v| v.application.as_ref())
    }

    pub(crate) fn services(&self) -> Option<&Value> {
        self.vcap.as_ref().and_then(|v| v.services.as_ref())
    }
}

impl FromStr for AppEnvOptions {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        serde_json::from_str(s).map_err(|e| Error::InvalidOptions {
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_has_no_documents() {
        let options = AppEnvOptions::default();
        assert!(options.application().is_none());
        assert!(options.services().is_none());
    }

    #[test]
    fn test_from_json() {
        let options = AppEnvOptions::from_json(&json!({
            "name": "demo",
            "protocol": "https",
            "vcap": {"application": {"port": 1}}
        }))
        .unwrap();
        assert_eq!(options.name.as_deref(), Some("demo"));
        assert_eq!(options.protocol.as_deref(), Some("https"));
        assert_eq!(options.application(), Some(&json!({"port": 1})));
        assert!(options.services().is_none());
    }

    #[test]
    fn test_from_str_rejects_wrong_shape() {
        let err = r#"{"name": 42}"#.parse::<AppEnvOptions>().unwrap_err();
        assert!(matches!(err, Error::InvalidOptions { .. }));
    }

    #[test]
    fn test_builders() {
        let options = AppEnvOptions::default()
            .with_name("n")
            .with_services(json!({"x": []}));
        assert_eq!(options.name.as_deref(), Some("n"));
        assert_eq!(options.services(), Some(&json!({"x": []})));
    }
}
