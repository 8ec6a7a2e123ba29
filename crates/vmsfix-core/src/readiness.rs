// ── Readiness poller ──
//
// After a web-server change the server restarts its HTTP front end. The
// poller probes `GET /product/version` a bounded number of times with a
// fixed delay between attempts. There is no delay before the first probe
// and none after the last.

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use url::Url;

use vmsfix_api::RpcClient;

use crate::context::FixtureContext;
use crate::error::CoreError;

/// Bounds of one readiness wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollConfig {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            max_attempts: 24,
            interval: Duration::from_secs(5),
        }
    }
}

/// Where a poller currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    /// Probing; `attempt` is 1-based.
    Polling { attempt: u32 },
    /// Terminal.
    Ready,
}

/// Result of a readiness wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Readiness {
    Ready { attempts: u32 },
    TimedOut { attempts: u32 },
}

impl Readiness {
    pub fn is_ready(self) -> bool {
        matches!(self, Self::Ready { .. })
    }

    /// Number of probes issued.
    pub fn attempts(self) -> u32 {
        match self {
            Self::Ready { attempts } | Self::TimedOut { attempts } => attempts,
        }
    }

    /// Turn a timeout into `CoreError::NotReady`.
    pub fn require(self, origin: &Url) -> Result<u32, CoreError> {
        match self {
            Self::Ready { attempts } => Ok(attempts),
            Self::TimedOut { attempts } => Err(CoreError::NotReady {
                origin: origin.to_string(),
                attempts,
            }),
        }
    }
}

/// A single liveness check.
pub trait Probe {
    fn probe(&self) -> impl Future<Output = bool> + Send;
}

impl Probe for RpcClient {
    async fn probe(&self) -> bool {
        match self.product_version().await {
            Ok(_) => true,
            Err(err) => {
                debug!(error = %err, "readiness probe failed");
                false
            }
        }
    }
}

/// Bounded retry loop around a [`Probe`].
#[derive(Debug)]
pub struct ReadinessPoller<P> {
    probe: P,
    config: PollConfig,
    state: PollState,
}

impl<P: Probe> ReadinessPoller<P> {
    pub fn new(probe: P, config: PollConfig) -> Self {
        Self {
            probe,
            config,
            state: PollState::Polling { attempt: 0 },
        }
    }

    pub fn state(&self) -> PollState {
        self.state
    }

    /// Probe until ready or out of attempts.
    ///
    /// `k` failures followed by a success cost `k + 1` probes and `k`
    /// delays; a probe that never succeeds is called exactly
    /// `max_attempts` times.
    pub async fn wait(&mut self) -> Readiness {
        let max = self.config.max_attempts;
        for attempt in 1..=max {
            self.state = PollState::Polling { attempt };
            if self.probe.probe().await {
                self.state = PollState::Ready;
                info!(attempt, "server ready");
                return Readiness::Ready { attempts: attempt };
            }
            debug!(attempt, max, "server not ready yet");
            if attempt < max {
                tokio::time::sleep(self.config.interval).await;
            }
        }
        warn!(attempts = max, "server did not become ready");
        Readiness::TimedOut { attempts: max }
    }
}

impl FixtureContext {
    /// Poll the current origin with the configured bounds.
    pub async fn wait_until_ready(&self) -> Readiness {
        ReadinessPoller::new(self.client.clone(), self.config.readiness)
            .wait()
            .await
    }
}
