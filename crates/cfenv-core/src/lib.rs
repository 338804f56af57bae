//! Cloud Foundry application environment for Rust services.
//!
//! This crate turns the metadata a Cloud Foundry-style platform injects into
//! an application's environment (`VCAP_APPLICATION`, `VCAP_SERVICES`, the
//! port variables) into typed values:
//!
//! - [`AppEnv`] - the facade built once at startup from an [`EnvSnapshot`]
//!   and optional [`AppEnvOptions`] (used for local runs)
//! - [`App`] - the application record described by `VCAP_APPLICATION`
//! - [`Service`] / [`ServiceCatalog`] - bound services described by `VCAP_SERVICES`
//! - [`ServiceResolver`] - service lookup by name or regex and service URL rebuilding
//!
//! The crate never reads the process environment itself; the caller supplies
//! a snapshot, which keeps every operation a pure function of its inputs.
//!
//! # Example
//!
//! ```
//! use cfenv_core::{AppEnv, AppEnvOptions, EnvSnapshot};
//!
//! let env = EnvSnapshot::from_pairs([("PORT", "61263")]);
//! let app_env = AppEnv::new(&env, &AppEnvOptions::default()).unwrap();
//!
//! assert!(app_env.is_local());
//! assert_eq!(app_env.port(), 61263);
//! assert_eq!(app_env.url(), "http://localhost:61263");
//! ```

pub mod app;
pub mod app_env;
pub mod env;
pub mod error;
pub mod json;
pub mod logging;
pub mod options;
pub mod resolver;
pub mod service;
pub mod uri;

pub use app::{App, AppFields, Limits};
pub use app_env::AppEnv;
pub use env::EnvSnapshot;
pub use error::{Error, FieldError, Result};
pub use options::{AppEnvOptions, VcapOptions};
pub use resolver::{ServiceResolver, UrlSubstitutions};
pub use service::{Service, ServiceCatalog, ServiceFields};
pub use uri::{QueryItem, UrlComponents, UrlError};
