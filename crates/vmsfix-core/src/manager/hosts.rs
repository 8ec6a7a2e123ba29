// ── Host manager ──

use tracing::info;

use crate::context::FixtureContext;
use crate::error::CoreError;
use crate::outcome::Outcome;

const HOSTS_PATH: &str = "GET /hosts";

impl FixtureContext {
    /// Host names of the domain. The first entry is the active host.
    pub async fn hosts(&mut self) -> Result<Outcome<Vec<String>>, CoreError> {
        let result = self.client.hosts().await;
        let outcome = self.settle(HOSTS_PATH, result)?;
        if let Outcome::Success(hosts) = &outcome {
            self.active_host = hosts.first().cloned();
        }
        Ok(outcome)
    }

    /// Name of the active host, fetched once and cached.
    ///
    /// Unit uids cannot be built without it, so failure is always an error.
    pub async fn active_host(&mut self) -> Result<String, CoreError> {
        if let Some(host) = &self.active_host {
            return Ok(host.clone());
        }
        let host = self
            .client
            .hosts()
            .await?
            .into_iter()
            .next()
            .ok_or(CoreError::NoHosts)?;
        info!(host = %host, "resolved active host");
        self.active_host = Some(host.clone());
        Ok(host)
    }

    /// `hosts/{active host}/{unit}`, or `hosts/{active host}` for an
    /// empty unit.
    pub async fn unit_uid(&mut self, unit: &str) -> Result<String, CoreError> {
        let host = self.active_host().await?;
        Ok(if unit.is_empty() {
            format!("hosts/{host}")
        } else {
            format!("hosts/{host}/{unit}")
        })
    }
}
