//! Logging initialization for the confmend CLI.
//!
//! stdout is reserved for report payloads; all log output goes to stderr.
//! `RUST_LOG` overrides the verbosity flags when set.

use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

/// Initialize the logging subsystem. Call once at startup.
pub fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "cm_core={level},cm_reconcile={level},cm_tree={level},confmend={level}"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}
