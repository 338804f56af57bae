//! Environment variable sets for tests.

use serde_json::Value;

use crate::fixtures;

/// Variables of a `swift-test` instance running on the platform.
pub fn platform_vars() -> Vec<(String, String)> {
    vec![
        (
            "VCAP_APPLICATION".to_string(),
            fixtures::vcap_application().to_string(),
        ),
        (
            "VCAP_SERVICES".to_string(),
            fixtures::vcap_services().to_string(),
        ),
        ("PORT".to_string(), fixtures::APP_PORT.to_string()),
    ]
}

/// Platform variables with a custom services catalog.
pub fn platform_vars_with_services(services: &Value) -> Vec<(String, String)> {
    platform_vars()
        .into_iter()
        .map(|(name, value)| {
            if name == "VCAP_SERVICES" {
                (name, services.to_string())
            } else {
                (name, value)
            }
        })
        .collect()
}

/// Names of every variable the library reads, for clearing a child
/// process environment.
pub const ALL_VARS: [&str; 5] = [
    "VCAP_APPLICATION",
    "VCAP_SERVICES",
    "PORT",
    "CF_INSTANCE_PORT",
    "VCAP_APP_PORT",
];
