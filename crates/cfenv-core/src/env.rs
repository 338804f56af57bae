//! Environment snapshot supplied by the host process.

use std::collections::BTreeMap;

/// Env var: JSON application metadata injected by the platform.
///
/// Its presence is the only signal that the app runs on the platform.
pub const VCAP_APPLICATION: &str = "VCAP_APPLICATION";
/// Env var: JSON catalog of bound services.
pub const VCAP_SERVICES: &str = "VCAP_SERVICES";
/// Env var: port the app should listen on.
pub const PORT: &str = "PORT";
/// Env var: instance port on Diego cells.
pub const CF_INSTANCE_PORT: &str = "CF_INSTANCE_PORT";
/// Env var: legacy DEA port variable.
pub const VCAP_APP_PORT: &str = "VCAP_APP_PORT";

/// Port variables, in precedence order.
pub const PORT_VARIABLES: [&str; 3] = [PORT, CF_INSTANCE_PORT, VCAP_APP_PORT];

/// A flat, immutable mapping of environment variable names to values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: BTreeMap<String, String>,
}

impl EnvSnapshot {
    /// An empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot from name/value pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Capture the current process environment.
    ///
    /// Variables whose name or value is not valid Unicode are skipped.
    pub fn from_process() -> Self {
        Self::from_pairs(std::env::vars())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Return a copy of this snapshot with `name` set to `value`.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// The first variable of `names` that is set, with its value.
    pub fn first_of<'a>(&'a self, names: &[&'a str]) -> Option<(&'a str, &'a str)> {
        names
            .iter()
            .find_map(|name| self.get(name).map(|value| (*name, value)))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvSnapshot {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::from_pairs(iter)
    }
}
