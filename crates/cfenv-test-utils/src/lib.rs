//! Shared test fixtures for the cfenv workspace.
//!
//! This crate is a dev-dependency only and never published. It deliberately
//! does not depend on `cfenv-core`, so it can serve that crate's integration
//! tests and the CLI tests alike; fixtures are plain JSON values and
//! environment variable pairs.
//!
//! # Modules
//!
//! - [`fixtures`] - platform documents modelled on a real deployment
//! - [`env`] - environment variable sets for local and platform runs

pub mod env;
pub mod fixtures;
