//! Exit codes for the confmend CLI.
//!
//! Exit codes communicate the run outcome without requiring output parsing:
//! - 0-1: operational outcomes
//! - 10-19: user/environment errors (recoverable by user action)
//! - 20+: internal errors (bugs, should be reported)

use crate::error::CoreError;

/// Exit codes for confmend operations.
///
/// These codes are a stable contract for automation. Changes require
/// a major version bump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Nothing to do: configuration already reconciled.
    Clean = 0,

    /// Changes were applied (`run`) or are pending (`check`).
    Changed = 1,

    /// Invalid arguments.
    ArgsError = 10,

    /// A configuration file is unreadable, unparsable, or unwritable.
    ConfigError = 11,

    /// Legacy configuration conversion failed.
    LegacyError = 12,

    /// A migration rule or its transform is broken; the raw configuration
    /// file needs human attention.
    MigrationError = 13,

    /// Unexpected internal error.
    Internal = 20,
}

impl ExitCode {
    /// Terminate the process with this code.
    pub fn exit(self) -> ! {
        std::process::exit(self as i32)
    }
}

impl From<&CoreError> for ExitCode {
    fn from(err: &CoreError) -> Self {
        match err.code() {
            11 => ExitCode::ConfigError,
            12 => ExitCode::LegacyError,
            13 => ExitCode::MigrationError,
            _ => ExitCode::Internal,
        }
    }
}
