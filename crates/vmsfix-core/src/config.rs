// ── Runtime fixture configuration ──
//
// These types describe *how* to reach the server under test and how strict
// the fixture layer is about failures. They never touch disk: vmsfix-config
// (or a test harness) constructs a `FixtureConfig` and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use vmsfix_api::RootCredentials;
use vmsfix_api::transport::TlsMode;

use crate::readiness::PollConfig;

pub const DEFAULT_ORIGIN: &str = "http://127.0.0.1:80";

/// What a failed RPC call turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Log the failure and hand back `Outcome::Failure` /
    /// `Creation::Unconfirmed`; keep going.
    #[default]
    Lenient,
    /// Return the failure as `Err(CoreError)`.
    Strict,
}

/// How teardown treats ids the server may no longer know.
///
/// Whether the batch delete RPCs tolerate unknown ids is unverified server
/// behavior, so it is a setting rather than an assumption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteTolerance {
    /// Send every requested id in one batch and trust the server to
    /// delete what exists and ignore the rest.
    AssumePartial,
    /// Refresh first, only send ids the server currently reports, and
    /// report anything still present afterwards.
    #[default]
    Verify,
}

/// Configuration for one fixture context (one test worker).
#[derive(Debug, Clone)]
pub struct FixtureConfig {
    /// Server origin, including any web prefix (e.g. `http://10.0.0.5:80`).
    pub origin: Url,
    /// Root account used for every management call.
    pub credentials: RootCredentials,
    /// TLS verification strategy.
    pub tls: TlsMode,
    /// Request timeout.
    pub timeout: Duration,
    pub policy: FailurePolicy,
    pub delete_tolerance: DeleteTolerance,
    /// Readiness polling after server configuration changes.
    pub readiness: PollConfig,
    /// Directory holding fixture inputs such as raster map images.
    pub test_data_dir: PathBuf,
}

impl FixtureConfig {
    pub fn new(origin: Url) -> Self {
        Self {
            origin,
            credentials: RootCredentials::default(),
            tls: TlsMode::default(),
            timeout: Duration::from_secs(30),
            policy: FailurePolicy::default(),
            delete_tolerance: DeleteTolerance::default(),
            readiness: PollConfig::default(),
            test_data_dir: PathBuf::from("test-data"),
        }
    }

    pub fn strict(mut self) -> Self {
        self.policy = FailurePolicy::Strict;
        self
    }
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self::new(Url::parse(DEFAULT_ORIGIN).expect("default origin is a valid URL"))
    }
}
