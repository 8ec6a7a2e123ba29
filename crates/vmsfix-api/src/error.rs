use thiserror::Error;

/// Top-level error type for the `vmsfix-api` crate.
///
/// Covers transport failures, non-2xx RPC replies, REST endpoint failures
/// and payload decoding. `vmsfix-core` maps these into fixture-level errors
/// and outcomes.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS or client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// Credentials could not be encoded into an `Authorization` header.
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    // ── RPC ─────────────────────────────────────────────────────────
    /// The `/grpc` endpoint answered with a non-2xx status.
    #[error("RPC {method} failed (HTTP {status})")]
    Rpc {
        method: String,
        status: u16,
        body: String,
    },

    /// A configuration change was accepted over HTTP but the server listed
    /// some units as failed.
    #[error("RPC {method} rejected units: {}", failed.join(", "))]
    Rejected { method: String, failed: Vec<String> },

    // ── REST ────────────────────────────────────────────────────────
    /// An auxiliary REST endpoint answered with a non-2xx status.
    #[error("GET {path} failed (HTTP {status})")]
    Http {
        path: String,
        status: u16,
        body: String,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// HTTP status attached to this error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rpc { status, .. } | Self::Http { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Rpc { status, .. } | Self::Http { status, .. } => {
                matches!(status, 502..=504)
            }
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
