//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with help text.

use miette::Diagnostic;
use thiserror::Error;

use vmsfix_config::ConfigError;
use vmsfix_core::{CoreError, EntityKind};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const UNSUPPORTED: i32 = 5;
    pub const INCOMPLETE: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to server at {url}")]
    #[diagnostic(
        code(vmsfix::connection_failed),
        help(
            "Check that the server is running and reachable.\n\
             Reason: {reason}"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Server at {origin} did not answer after {attempts} attempts")]
    #[diagnostic(
        code(vmsfix::not_ready),
        help("Raise ready_attempts or ready_interval_secs in your profile.")
    )]
    NotReady { origin: String, attempts: u32 },

    // ── RPC ──────────────────────────────────────────────────────────
    #[error("{method} failed: {message}")]
    #[diagnostic(code(vmsfix::rpc))]
    Rpc {
        method: String,
        message: String,
        status: Option<u16>,
    },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{kind} '{name}' not found")]
    #[diagnostic(
        code(vmsfix::not_found),
        help("Run: vmsfix list {kind} to see what the server reports")
    )]
    NotFound { kind: EntityKind, name: String },

    #[error("Operation '{operation}' is not supported")]
    #[diagnostic(
        code(vmsfix::unsupported),
        help("Archives and detectors are read-only; remove their cameras instead.")
    )]
    Unsupported { operation: String },

    #[error("{survivors} {kind} not confirmed deleted after annihilation")]
    #[diagnostic(
        code(vmsfix::incomplete),
        help("Re-run with -v to see which delete call failed.")
    )]
    Incomplete { kind: EntityKind, survivors: usize },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(vmsfix::validation))]
    Validation { field: String, reason: String },

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(vmsfix::profile_not_found),
        help("Add a [profiles.{name}] table to {path}")
    )]
    ProfileNotFound { name: String, path: String },

    #[error("No root password configured for profile '{profile}'")]
    #[diagnostic(
        code(vmsfix::no_credentials),
        help("Set VMSFIX_PASSWORD, store it in the system keyring, or add password to the profile.")
    )]
    NoCredentials { profile: String },

    #[error("Failed to load configuration: {message}")]
    #[diagnostic(code(vmsfix::config))]
    Config { message: String },

    #[error("{message}")]
    #[diagnostic(code(vmsfix::fixture))]
    Fixture { message: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON output failed: {0}")]
    #[diagnostic(code(vmsfix::json))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::NotReady { .. } => exit_code::TIMEOUT,
            Self::Rpc {
                status: Some(401 | 403),
                ..
            }
            | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } | Self::ProfileNotFound { .. } => exit_code::NOT_FOUND,
            Self::Unsupported { .. } => exit_code::UNSUPPORTED,
            Self::Incomplete { .. } => exit_code::INCOMPLETE,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => Self::ConnectionFailed { url, reason },
            CoreError::NotReady { origin, attempts } => Self::NotReady { origin, attempts },
            CoreError::Rpc {
                method,
                message,
                status,
            } => Self::Rpc {
                method,
                message,
                status,
            },
            CoreError::Rejected { method, failed } => Self::Rpc {
                method,
                message: format!("rejected: {}", failed.join(", ")),
                status: None,
            },
            CoreError::NotFound { kind, name } => Self::NotFound { kind, name },
            CoreError::NoHosts => Self::Rpc {
                method: "GET /hosts".into(),
                message: "server reported no hosts".into(),
                status: None,
            },
            CoreError::Unsupported { operation } => Self::Unsupported { operation },
            CoreError::Config { message } => Self::Validation {
                field: "config".into(),
                reason: message,
            },
            CoreError::Io(e) => Self::Io(e),
            other @ (CoreError::Unconfirmed { .. }
            | CoreError::Image { .. }
            | CoreError::Internal(_)) => Self::Fixture {
                message: other.to_string(),
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::UnknownProfile { profile } => Self::ProfileNotFound {
                name: profile,
                path: vmsfix_config::config_path().display().to_string(),
            },
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            other => Self::Config {
                message: other.to_string(),
            },
        }
    }
}
