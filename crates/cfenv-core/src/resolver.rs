//! Service lookup and service URL construction.
//!
//! A lookup `spec` is first tried as an exact service name. When no service
//! has that name, it is compiled as a case-insensitive regular expression and
//! tested against every service name in catalog order; the first match wins.
//!
//! [`ServiceResolver::get_service_url`] then rebuilds a connection URL from
//! the service's credentials, replacing individual components on request.

use regex::RegexBuilder;
use serde_json::{Map, Value};

use crate::service::{Service, ServiceCatalog};
use crate::uri::{QueryItem, UrlComponents};

/// Keys understood in a substitutions document.
const KNOWN_KEYS: [&str; 8] = [
    "url",
    "user",
    "password",
    "port",
    "host",
    "scheme",
    "query",
    "queryItems",
];

/// Keys that name URL components which are never replaced.
const RESERVED_KEYS: [&str; 2] = ["fragment", "path"];

/// Component overrides for [`ServiceResolver::get_service_url`].
///
/// Overrides are applied in a fixed order: user, password, port, host,
/// scheme, query, query items. `query` and `query_items` both replace the
/// query; when both are given the items are applied last and win.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlSubstitutions {
    /// Name of the credentials field holding the base URL, instead of `url`/`uri`
    pub url_field: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub port: Option<u16>,
    pub host: Option<String>,
    pub scheme: Option<String>,
    /// Raw query string
    pub query: Option<String>,
    pub query_items: Option<Vec<QueryItem>>,
}

impl UrlSubstitutions {
    /// Read substitutions from a JSON object.
    ///
    /// Values of the wrong type and unknown keys are ignored with a warning.
    pub fn from_json(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            if !value.is_null() {
                tracing::warn!(%value, "Substitutions are not an object, ignoring");
            }
            return Self::default();
        };

        for key in object.keys() {
            if RESERVED_KEYS.contains(&key.as_str()) {
                tracing::debug!(
                    key = key.as_str(),
                    "URL component cannot be substituted, ignoring"
                );
            } else if !KNOWN_KEYS.contains(&key.as_str()) {
                tracing::warn!(key = key.as_str(), "Unknown URL substitution, ignoring");
            }
        }

        Self {
            url_field: string_substitution(object, "url"),
            user: string_substitution(object, "user"),
            password: string_substitution(object, "password"),
            port: port_substitution(object),
            host: string_substitution(object, "host"),
            scheme: string_substitution(object, "scheme"),
            query: string_substitution(object, "query"),
            query_items: query_items_substitution(object),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply the overrides to `url` in their fixed order.
    pub fn apply(&self, url: &mut UrlComponents) {
        if let Some(user) = &self.user {
            url.set_user(user);
        }
        if let Some(password) = &self.password {
            url.set_password(password);
        }
        if let Some(port) = self.port {
            url.set_port(port);
        }
        if let Some(host) = &self.host {
            url.set_host(host);
        }
        if let Some(scheme) = &self.scheme {
            if let Err(e) = url.set_scheme(scheme) {
                tracing::warn!(error = %e, "Ignoring scheme substitution");
            }
        }
        if let Some(query) = &self.query {
            url.set_query(query);
        }
        if let Some(items) = &self.query_items {
            if !items.is_empty() {
                url.set_query_items(items);
            }
        }
    }
}

fn string_substitution(object: &Map<String, Value>, key: &str) -> Option<String> {
    let value = object.get(key)?;
    match value.as_str() {
        Some(s) => Some(s.to_string()),
        None => {
            tracing::warn!(key, %value, "Substitution is not a string, ignoring");
            None
        }
    }
}

fn port_substitution(object: &Map<String, Value>) -> Option<u16> {
    let value = object.get("port")?;
    match value.as_u64().and_then(|p| u16::try_from(p).ok()) {
        Some(port) => Some(port),
        None => {
            tracing::warn!(%value, "Port substitution is not a valid port, ignoring");
            None
        }
    }
}

fn query_items_substitution(object: &Map<String, Value>) -> Option<Vec<QueryItem>> {
    let value = object.get("queryItems")?;
    let Some(entries) = value.as_array() else {
        tracing::warn!(%value, "queryItems is not an array, ignoring");
        return None;
    };

    Some(
        entries
            .iter()
            .filter_map(|entry| {
                let name = entry.get("name").and_then(Value::as_str)?;
                let value = entry.get("value").and_then(Value::as_str);
                Some(QueryItem {
                    name: name.to_string(),
                    value: value.map(str::to_string),
                })
            })
            .collect(),
    )
}

/// Looks up services in a catalog and builds their URLs.
#[derive(Debug, Clone, Copy)]
pub struct ServiceResolver<'a> {
    catalog: ServiceCatalog<'a>,
}

impl<'a> ServiceResolver<'a> {
    pub fn new(catalog: ServiceCatalog<'a>) -> Self {
        Self { catalog }
    }

    /// Find a service by exact name, then by case-insensitive regex.
    ///
    /// An invalid regex is logged and treated as no match.
    pub fn get_service(&self, spec: &str) -> Option<Service> {
        if let Some(service) = self.catalog.by_name().remove(spec) {
            return Some(service);
        }

        let regex = match RegexBuilder::new(spec).case_insensitive(true).build() {
            Ok(regex) => regex,
            Err(e) => {
                tracing::warn!(spec, error = %e, "Invalid service pattern");
                return None;
            }
        };

        self.catalog
            .iter()
            .map(|(_, service)| service)
            .find(|service| regex.is_match(&service.name))
    }

    /// Credentials of the service matching `spec`.
    ///
    /// `None` when no service matches; an empty map when the service has
    /// no credentials.
    pub fn get_service_creds(&self, spec: &str) -> Option<Map<String, Value>> {
        self.get_service(spec)
            .map(|service| service.credentials.unwrap_or_default())
    }

    /// Build the URL of the service matching `spec`, applying `substitutions`.
    ///
    /// `substitutions` is a JSON object with any of the keys `url`, `user`,
    /// `password`, `port`, `host`, `scheme`, `query` and `queryItems`. `url`
    /// names the credentials field to read the base URL from; the others
    /// replace the matching URL component.
    ///
    /// Returns `None` when no service matches, the service has no
    /// credentials or no usable base URL, or the base URL does not parse.
    pub fn get_service_url(&self, spec: &str, substitutions: Option<&Value>) -> Option<String> {
        let substitutions = substitutions
            .map(UrlSubstitutions::from_json)
            .unwrap_or_default();
        self.get_service_url_with(spec, &substitutions)
    }

    /// Typed variant of [`get_service_url`](Self::get_service_url).
    pub fn get_service_url_with(
        &self,
        spec: &str,
        substitutions: &UrlSubstitutions,
    ) -> Option<String> {
        let service = self.get_service(spec)?;
        let credentials = service.credentials.as_ref()?;

        let base = match &substitutions.url_field {
            Some(field) => credentials.get(field).and_then(Value::as_str),
            None => credentials
                .get("url")
                .and_then(Value::as_str)
                .or_else(|| credentials.get("uri").and_then(Value::as_str)),
        };
        let Some(base) = base else {
            tracing::debug!(service = %service.name, "Service credentials carry no URL");
            return None;
        };

        let mut url = match UrlComponents::parse(base) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!(service = %service.name, error = %e, "Service URL does not parse");
                return None;
            }
        };

        substitutions.apply(&mut url);
        Some(url.to_string())
    }
}
