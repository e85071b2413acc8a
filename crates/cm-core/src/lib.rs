//! Confmend startup configuration maintenance.
//!
//! This crate wires the reconciliation engine (`cm-reconcile`) to the outside
//! world. It owns everything the engine deliberately does not:
//! - YAML persistence of configuration trees
//! - one-time conversion of the legacy flat configuration format
//! - idempotent synchronization of packaged default files and binary assets
//! - the application's migration rule table
//! - run orchestration, change logging, and the CLI surface

pub mod assets;
pub mod error;
pub mod exit_codes;
pub mod legacy;
pub mod logging;
pub mod rules;
pub mod runner;
pub mod store;

pub use error::{CoreError, Result};
pub use exit_codes::ExitCode;
pub use runner::{run, RunOptions, RunReport};
