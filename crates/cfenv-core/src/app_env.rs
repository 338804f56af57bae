//! The application environment facade.
//!
//! [`AppEnv`] is built once at startup and answers everything an app needs
//! to know about where it runs: whether this is a local run, which port and
//! address to bind, its public URLs, and the services bound to it.
//!
//! Sources, per platform document:
//!
//! 1. The environment variable (`VCAP_APPLICATION` / `VCAP_SERVICES`), if set
//! 2. On a local run, the matching `vcap` document from the options, if it
//!    is a JSON object
//! 3. Otherwise an empty document
//!
//! A local run is one without `VCAP_APPLICATION`.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::app::{self, App};
use crate::env::{EnvSnapshot, VCAP_APPLICATION, VCAP_SERVICES};
use crate::error::{Error, Result};
use crate::options::AppEnvOptions;
use crate::resolver::{ServiceResolver, UrlSubstitutions};
use crate::service::{Service, ServiceCatalog};

/// Resolved application environment. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct AppEnv {
    is_local: bool,
    port: u16,
    name: Option<String>,
    bind: String,
    urls: Vec<String>,
    app: Value,
    services: Value,
}

impl AppEnv {
    /// Resolve the environment from `env` and `options`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidValue`] if a platform variable is not a JSON object
    ///   or a port variable is not a valid port
    /// - [`Error::VariableNotFound`] if no port is set for a named platform app
    pub fn new(env: &EnvSnapshot, options: &AppEnvOptions) -> Result<Self> {
        let is_local = !env.contains(VCAP_APPLICATION);

        let app = load_document(env, VCAP_APPLICATION, is_local, options.application())?;
        let services = load_document(env, VCAP_SERVICES, is_local, options.services())?;

        // Both documents are objects at this point.
        let app_object = app.as_object().cloned().unwrap_or_default();

        let port = app::resolve_port(env, &app_object, is_local)?;
        let name = app::resolve_name(&app_object, options);
        let bind = app::resolve_bind(&app_object);
        let urls = app::resolve_urls(&app_object, is_local, port, options);

        tracing::debug!(is_local, port, ?name, %bind, ?urls, "Resolved application environment");

        Ok(Self {
            is_local,
            port,
            name,
            bind,
            urls,
            app,
            services,
        })
    }

    /// Resolve the environment of the current process.
    pub fn from_process(options: &AppEnvOptions) -> Result<Self> {
        Self::new(&EnvSnapshot::from_process(), options)
    }

    /// Whether the app runs outside the platform.
    pub fn is_local(&self) -> bool {
        self.is_local
    }

    /// Port to listen on.
    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Address to bind to.
    pub fn bind(&self) -> &str {
        &self.bind
    }

    /// Public URLs of the app.
    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    /// The first public URL.
    pub fn url(&self) -> &str {
        // resolve_urls never returns an empty list
        self.urls.first().map_or("", String::as_str)
    }

    /// Raw application metadata.
    pub fn app(&self) -> &Value {
        &self.app
    }

    /// Raw service catalog.
    pub fn services(&self) -> &Value {
        &self.services
    }

    /// The application record, if the metadata describes the app fully.
    pub fn get_app(&self) -> Option<App> {
        let metadata = self.app.as_object()?;
        App::from_json(metadata)
            .inspect_err(|e| tracing::debug!(error = %e, "Application metadata is incomplete"))
            .ok()
    }

    pub fn catalog(&self) -> ServiceCatalog<'_> {
        ServiceCatalog::new(&self.services)
    }

    pub fn resolver(&self) -> ServiceResolver<'_> {
        ServiceResolver::new(self.catalog())
    }

    /// All bound services keyed by name.
    pub fn get_services(&self) -> BTreeMap<String, Service> {
        self.catalog().by_name()
    }

    /// All bound services grouped by type key.
    pub fn get_services_by_type(&self) -> BTreeMap<String, Vec<Service>> {
        self.catalog().by_type()
    }

    /// Services of the type `spec`, a literal type key or a regex.
    pub fn get_services_of_type(&self, spec: &str) -> Vec<Service> {
        self.catalog().of_type(spec)
    }

    /// See [`ServiceResolver::get_service`].
    pub fn get_service(&self, spec: &str) -> Option<Service> {
        self.resolver().get_service(spec)
    }

    /// See [`ServiceResolver::get_service_creds`].
    pub fn get_service_creds(&self, spec: &str) -> Option<Map<String, Value>> {
        self.resolver().get_service_creds(spec)
    }

    /// See [`ServiceResolver::get_service_url`].
    pub fn get_service_url(&self, spec: &str, substitutions: Option<&Value>) -> Option<String> {
        self.resolver().get_service_url(spec, substitutions)
    }

    /// See [`ServiceResolver::get_service_url_with`].
    pub fn get_service_url_with(
        &self,
        spec: &str,
        substitutions: &UrlSubstitutions,
    ) -> Option<String> {
        self.resolver().get_service_url_with(spec, substitutions)
    }
}

fn load_document(
    env: &EnvSnapshot,
    variable: &str,
    is_local: bool,
    fallback: Option<&Value>,
) -> Result<Value> {
    if let Some(raw) = env.get(variable) {
        tracing::debug!(variable, "Reading platform document from environment");
        let value: Value = serde_json::from_str(raw)
            .map_err(|e| Error::invalid_value(variable, format!("not valid JSON: {e}")))?;
        if !value.is_object() {
            return Err(Error::invalid_value(variable, "not a JSON object"));
        }
        return Ok(value);
    }

    match fallback {
        Some(value) if is_local => {
            if !value.is_object() {
                tracing::warn!(
                    variable,
                    %value,
                    "Substitute document is not a JSON object, ignoring"
                );
                return Ok(Value::Object(Map::new()));
            }
            tracing::debug!(variable, "Using platform document from options");
            Ok(value.clone())
        }
        _ => Ok(Value::Object(Map::new())),
    }
}
