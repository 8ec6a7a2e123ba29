// ── Core error types ──
//
// Fixture-level errors from vmsfix-core. Soft RPC failures normally surface
// as `Outcome::Failure`; these variants are what the strict policy, name
// resolution and local I/O produce. The `From<vmsfix_api::Error>` impl
// translates transport-layer errors.

use thiserror::Error;

use crate::model::EntityKind;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to server at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Server at {origin} not ready after {attempts} attempts")]
    NotReady { origin: String, attempts: u32 },

    // ── RPC errors ───────────────────────────────────────────────────
    #[error("RPC {method} failed: {message}")]
    Rpc {
        method: String,
        message: String,
        /// HTTP status code, if the server answered.
        status: Option<u16>,
    },

    #[error("RPC {method} rejected: {}", failed.join(", "))]
    Rejected { method: String, failed: Vec<String> },

    #[error("{kind} {id} was minted but the server did not confirm it: {reason}")]
    Unconfirmed {
        kind: EntityKind,
        id: String,
        reason: String,
    },

    // ── Lookup errors ────────────────────────────────────────────────
    #[error("{kind} '{name}' not found in snapshot")]
    NotFound { kind: EntityKind, name: String },

    #[error("Server reported no hosts")]
    NoHosts,

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Operation not supported: {operation}")]
    Unsupported { operation: String },

    // ── Local fixture inputs ─────────────────────────────────────────
    #[error("Cannot read image {path}: {message}")]
    Image { path: String, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rpc { status, .. } => *status,
            _ => None,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<vmsfix_api::Error> for CoreError {
    fn from(err: vmsfix_api::Error) -> Self {
        match err {
            vmsfix_api::Error::Transport(ref e) => {
                if e.is_connect() || e.is_timeout() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Rpc {
                        method: e.url().map(|u| u.path().to_owned()).unwrap_or_default(),
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            vmsfix_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            vmsfix_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            vmsfix_api::Error::InvalidCredentials(msg) => CoreError::Config {
                message: format!("Invalid credentials: {msg}"),
            },
            vmsfix_api::Error::Rpc {
                method,
                status,
                body,
            } => CoreError::Rpc {
                method,
                message: if body.is_empty() {
                    format!("HTTP {status}")
                } else {
                    format!("HTTP {status}: {body}")
                },
                status: Some(status),
            },
            vmsfix_api::Error::Rejected { method, failed } => {
                CoreError::Rejected { method, failed }
            }
            vmsfix_api::Error::Http { path, status, body } => CoreError::Rpc {
                method: format!("GET /{path}"),
                message: format!("HTTP {status}: {body}"),
                status: Some(status),
            },
            vmsfix_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
