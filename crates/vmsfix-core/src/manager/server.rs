// ── Web server manager ──
//
// Moving the web server's port or URL prefix restarts its HTTP front end.
// The change is sent to the current origin, the client is then retargeted
// at the new origin and the readiness poller waits for it to answer.

use tracing::info;
use url::Url;

use vmsfix_api::models::{ChangeConfigRequest, ChangedUnit, Property};
use vmsfix_api::rpc::config::CHANGE_CONFIG;

use crate::context::FixtureContext;
use crate::error::CoreError;
use crate::outcome::Outcome;
use crate::readiness::Readiness;

const HTTP_SERVER_UNIT: &str = "HttpServer.0";

/// `origin` with its port and path replaced. An empty prefix means the
/// server root.
pub(crate) fn moved_origin(origin: &Url, port: u16, prefix: &str) -> Result<Url, CoreError> {
    let mut moved = origin.clone();
    moved.set_port(Some(port)).map_err(|()| CoreError::Config {
        message: format!("origin {origin} cannot carry a port"),
    })?;
    let prefix = prefix.trim_matches('/');
    moved.set_path(&format!("/{prefix}"));
    Ok(moved)
}

impl FixtureContext {
    /// Move the web server to `port` under `prefix` and wait for it.
    ///
    /// A rejected change leaves the client where it was. Readiness is
    /// reported, not enforced; use [`Readiness::require`] to fail on a
    /// timeout.
    pub async fn change_web_server(
        &mut self,
        port: u16,
        prefix: &str,
    ) -> Result<Outcome<Readiness>, CoreError> {
        let request = ChangeConfigRequest {
            changed: vec![ChangedUnit {
                uid: self.unit_uid(HTTP_SERVER_UNIT).await?,
                properties: vec![
                    Property::int("port", i32::from(port)),
                    Property::string("prefix", prefix.trim_matches('/')),
                ],
            }],
            ..ChangeConfigRequest::default()
        };
        let result = self.client.change_config(&request).await.map(drop);
        if let Outcome::Failure(failure) = self.settle(CHANGE_CONFIG, result)? {
            return Ok(Outcome::Failure(failure));
        }

        let origin = moved_origin(&self.config.origin, port, prefix)?;
        info!(origin = %origin, "web server moved");
        self.retarget(origin)?;
        Ok(Outcome::Success(self.wait_until_ready().await))
    }

    /// Move the web server back to the configured origin's port and path.
    pub async fn restore_web_server(&mut self) -> Result<Outcome<Readiness>, CoreError> {
        let origin = &self.config.origin;
        let port = origin.port_or_known_default().ok_or_else(|| CoreError::Config {
            message: format!("origin {origin} has no port"),
        })?;
        let prefix = origin.path().trim_matches('/').to_owned();
        self.change_web_server(port, &prefix).await
    }
}
