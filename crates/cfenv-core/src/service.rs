//! Bound services from `VCAP_SERVICES`.
//!
//! The catalog is a JSON object keyed by service type (usually the broker's
//! label), each key holding an array of service instances:
//!
//! ```json
//! {
//!   "cloudantNoSQLDB": [
//!     { "name": "db", "label": "cloudantNoSQLDB", "plan": "Shared",
//!       "tags": ["data_management"], "credentials": { "url": "https://..." } }
//!   ]
//! }
//! ```
//!
//! Iteration follows document order: type keys as they appear, then each
//! key's array in order.

use std::collections::BTreeMap;

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::FieldError;
use crate::json::{object_field, string_array_field, string_field};

/// Plan reported for services whose entry has none.
pub const DEFAULT_PLAN: &str = "N/A";

/// A bound service instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Service {
    pub name: String,
    pub label: String,
    pub plan: String,
    pub tags: Vec<String>,
    pub credentials: Option<Map<String, Value>>,
}

impl Service {
    /// Read a service from one catalog entry.
    pub fn from_json(entry: &Map<String, Value>) -> Result<Self, FieldError> {
        ServiceFields::from_json(entry).finalize()
    }

    /// A string credential, e.g. `url` or `username`.
    pub fn credential(&self, key: &str) -> Option<&str> {
        self.credentials.as_ref()?.get(key)?.as_str()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Optional fields of a [`Service`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceFields {
    pub name: Option<String>,
    pub label: Option<String>,
    pub plan: Option<String>,
    pub tags: Option<Vec<String>>,
    pub credentials: Option<Map<String, Value>>,
}

impl ServiceFields {
    pub fn from_json(entry: &Map<String, Value>) -> Self {
        Self {
            name: string_field(entry, "name"),
            label: string_field(entry, "label"),
            plan: string_field(entry, "plan"),
            tags: string_array_field(entry, "tags"),
            credentials: object_field(entry, "credentials").cloned(),
        }
    }

    /// Build the service. `name` and `label` are required; `plan` and
    /// `tags` fall back to defaults.
    pub fn finalize(self) -> Result<Service, FieldError> {
        Ok(Service {
            name: self.name.ok_or(FieldError::missing("name"))?,
            label: self.label.ok_or(FieldError::missing("label"))?,
            plan: self.plan.unwrap_or_else(|| DEFAULT_PLAN.to_string()),
            tags: self.tags.unwrap_or_default(),
            credentials: self.credentials,
        })
    }
}

/// Read-only view over a decoded `VCAP_SERVICES` document.
#[derive(Debug, Clone, Copy)]
pub struct ServiceCatalog<'a> {
    types: Option<&'a Map<String, Value>>,
}

impl<'a> ServiceCatalog<'a> {
    /// Wrap a services document. Anything but a JSON object is an empty catalog.
    pub fn new(services: &'a Value) -> Self {
        Self {
            types: services.as_object(),
        }
    }

    /// Every valid service, in document order, tagged with its type key.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, Service)> + 'a {
        self.types
            .into_iter()
            .flat_map(|types| types.iter())
            .flat_map(|(key, entries)| {
                parse_entries(key, entries).map(move |service| (key.as_str(), service))
            })
    }

    /// All services keyed by name.
    ///
    /// A catalog should never hold two services with the same name; if it
    /// does, the later one wins.
    pub fn by_name(&self) -> BTreeMap<String, Service> {
        self.iter()
            .map(|(_, service)| (service.name.clone(), service))
            .collect()
    }

    /// All services grouped by their type key, array order preserved.
    pub fn by_type(&self) -> BTreeMap<String, Vec<Service>> {
        let mut grouped: BTreeMap<String, Vec<Service>> = BTreeMap::new();
        for (key, service) in self.iter() {
            grouped.entry(key.to_string()).or_default().push(service);
        }
        grouped
    }

    /// Services of one type.
    ///
    /// `spec` is first looked up as a literal type key. Otherwise it is
    /// compiled as a case-sensitive regex and the services of every
    /// matching key are returned, flattened in document order. An invalid
    /// regex yields no services.
    pub fn of_type(&self, spec: &str) -> Vec<Service> {
        let Some(types) = self.types else {
            return Vec::new();
        };

        if let Some(entries) = types.get(spec) {
            return parse_entries(spec, entries).collect();
        }

        let regex = match Regex::new(spec) {
            Ok(regex) => regex,
            Err(e) => {
                tracing::warn!(spec, error = %e, "Invalid service type pattern");
                return Vec::new();
            }
        };

        types
            .iter()
            .filter(|(key, _)| regex.is_match(key))
            .flat_map(|(key, entries)| parse_entries(key, entries))
            .collect()
    }

    /// Number of type keys in the catalog.
    pub fn type_count(&self) -> usize {
        self.types.map_or(0, Map::len)
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

fn parse_entries<'a>(key: &'a str, entries: &'a Value) -> impl Iterator<Item = Service> + 'a {
    let entries: &[Value] = match entries.as_array() {
        Some(entries) => entries.as_slice(),
        None => {
            tracing::debug!(key, "Service type is not an array, skipping");
            &[]
        }
    };

    entries.iter().filter_map(move |entry| {
        let Some(entry) = entry.as_object() else {
            tracing::debug!(key, "Service entry is not an object, skipping");
            return None;
        };
        Service::from_json(entry)
            .inspect_err(|e| tracing::debug!(key, error = %e, "Skipping service entry"))
            .ok()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn catalog_doc() -> Value {
        json!({
            "mysql": [
                {"name": "orders-db", "label": "mysql", "plan": "small", "tags": ["sql"],
                 "credentials": {"uri": "mysql://u:p@db:3306/orders"}},
                {"name": "users-db", "label": "mysql"}
            ],
            "redis": [
                {"name": "cache", "label": "redis", "tags": ["kv", 3]}
            ],
            "user-provided": [
                {"label": "user-provided"},
                "not-an-object"
            ],
            "broken": {"name": "x"}
        })
    }

    #[test]
    fn test_service_defaults() {
        let entry = json!({"name": "a", "label": "b"});
        let service = Service::from_json(entry.as_object().unwrap()).unwrap();
        assert_eq!(service.plan, DEFAULT_PLAN);
        assert!(service.tags.is_empty());
        assert_eq!(service.credentials, None);
    }

    #[test]
    fn test_service_requires_name_and_label() {
        let entry = json!({"name": "a"});
        assert_eq!(
            Service::from_json(entry.as_object().unwrap()).unwrap_err(),
            FieldError { field: "label" }
        );
    }

    #[test]
    fn test_by_name_skips_invalid_entries() {
        let doc = catalog_doc();
        let services = ServiceCatalog::new(&doc).by_name();
        let names: Vec<_> = services.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["cache", "orders-db", "users-db"]);
        assert_eq!(services["cache"].tags, vec!["kv"]);
        assert_eq!(
            services["orders-db"].credential("uri"),
            Some("mysql://u:p@db:3306/orders")
        );
    }

    #[test]
    fn test_by_name_last_write_wins() {
        let doc = json!({
            "a": [{"name": "dup", "label": "a"}],
            "b": [{"name": "dup", "label": "b"}]
        });
        let services = ServiceCatalog::new(&doc).by_name();
        assert_eq!(services.len(), 1);
        assert_eq!(services["dup"].label, "b");
    }

    #[test]
    fn test_by_type_groups_in_order() {
        let doc = catalog_doc();
        let grouped = ServiceCatalog::new(&doc).by_type();
        let mysql: Vec<_> = grouped["mysql"].iter().map(|s| s.name.as_str()).collect();
        assert_eq!(mysql, vec!["orders-db", "users-db"]);
        assert!(!grouped.contains_key("user-provided"));
    }

    #[test]
    fn test_of_type_literal_and_regex() {
        let doc = catalog_doc();
        let catalog = ServiceCatalog::new(&doc);

        assert_eq!(catalog.of_type("redis").len(), 1);

        let names: Vec<_> = catalog
            .of_type("^(mysql|redis)$")
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["orders-db", "users-db", "cache"]);

        assert!(catalog.of_type("MYSQL").is_empty());
        assert!(catalog.of_type("(unclosed").is_empty());
    }

    #[test]
    fn test_non_object_document_is_empty() {
        let doc = json!([1, 2]);
        let catalog = ServiceCatalog::new(&doc);
        assert!(catalog.is_empty());
        assert_eq!(catalog.type_count(), 0);
        assert!(catalog.of_type("anything").is_empty());
    }
}
