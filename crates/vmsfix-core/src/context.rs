// ── Fixture context ──
//
// One context per test worker. It owns the RPC client, the runtime
// configuration and the snapshot; every entity manager is an inherent
// method on it (see `crate::manager`). Calls are sequential: each method
// takes `&mut self` and awaits one request at a time.

use std::fmt;

use tracing::{info, warn};
use url::Url;

use vmsfix_api::RpcClient;
use vmsfix_api::transport::TransportConfig;

use crate::config::{FailurePolicy, FixtureConfig};
use crate::error::CoreError;
use crate::model::EntityKind;
use crate::outcome::{Creation, Failure, Outcome};
use crate::store::Snapshot;

/// Everything one test worker needs to set up and tear down fixtures.
#[derive(Debug)]
pub struct FixtureContext {
    pub(crate) client: RpcClient,
    pub(crate) config: FixtureConfig,
    pub(crate) snapshot: Snapshot,
    /// First entry of `GET /hosts`, fetched lazily.
    pub(crate) active_host: Option<String>,
}

impl FixtureContext {
    /// Build a context from configuration. Does not contact the server.
    pub fn new(config: FixtureConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            tls: config.tls.clone(),
            timeout: config.timeout,
        };
        let client = RpcClient::new(
            config.origin.clone(),
            config.credentials.clone(),
            &transport,
        )?;
        Ok(Self::with_client(client, config))
    }

    /// Build a context around an existing client.
    pub fn with_client(client: RpcClient, config: FixtureConfig) -> Self {
        Self {
            client,
            config,
            snapshot: Snapshot::new(),
            active_host: None,
        }
    }

    pub fn client(&self) -> &RpcClient {
        &self.client
    }

    pub fn config(&self) -> &FixtureConfig {
        &self.config
    }

    /// The last collected entity lists. Never refreshed implicitly by reads.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Origin the client currently talks to. Differs from the configured
    /// origin while the web server is moved.
    pub fn origin(&self) -> &Url {
        self.client.origin()
    }

    /// Point the client at a new origin, keeping credentials and transport.
    pub(crate) fn retarget(&mut self, origin: Url) -> Result<(), CoreError> {
        self.client = self.client.with_origin(origin)?;
        Ok(())
    }

    // ── Outcome classification ───────────────────────────────────────

    /// Classify a call result under the configured failure policy.
    ///
    /// Failures are logged with their status either way. Lenient turns them
    /// into `Outcome::Failure`; strict returns them as `Err`.
    pub(crate) fn settle<T>(
        &self,
        method: &str,
        result: Result<T, vmsfix_api::Error>,
    ) -> Result<Outcome<T>, CoreError> {
        match result {
            Ok(value) => Ok(Outcome::Success(value)),
            Err(err) => {
                warn!(method, status = ?err.status(), error = %err, "RPC call failed");
                match self.config.policy {
                    FailurePolicy::Strict => Err(err.into()),
                    FailurePolicy::Lenient => {
                        Ok(Outcome::Failure(Failure::from_api(method, &err)))
                    }
                }
            }
        }
    }

    /// Settle a create call and log it with the minted id and name.
    pub(crate) fn settle_creation<I: fmt::Display>(
        &self,
        kind: EntityKind,
        method: &str,
        minted: I,
        name: &str,
        result: Result<(), vmsfix_api::Error>,
    ) -> Result<Creation<I>, CoreError> {
        let outcome = self.settle(method, result)?;
        match outcome.failure() {
            None => info!(%kind, id = %minted, name, "created"),
            Some(failure) => {
                warn!(%kind, id = %minted, name, reason = %failure, "creation not confirmed");
            }
        }
        Ok(Creation::from_outcome(minted, outcome))
    }
}
