// RPC-over-HTTP client
//
// Wraps `reqwest::Client` with envelope construction, Basic auth and
// origin-relative URL building. Service endpoints (groups, security, maps...)
// are implemented as inherent methods in sibling files.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::auth::RootCredentials;
use crate::error::Error;
use crate::rpc::models::RpcEnvelope;
use crate::transport::TransportConfig;

/// Path of the single RPC endpoint, relative to the origin.
const RPC_PATH: &str = "grpc";

/// HTTP client for the management RPC endpoint.
///
/// No retry is performed here; a non-2xx reply becomes [`Error::Rpc`] and
/// the caller decides what to do with it.
#[derive(Debug, Clone)]
pub struct RpcClient {
    http: reqwest::Client,
    origin: Url,
    credentials: RootCredentials,
    transport: TransportConfig,
}

impl RpcClient {
    /// Create a client for `origin` (e.g. `http://10.0.0.5:80` or
    /// `http://10.0.0.5:8000/asip-api`).
    pub fn new(
        origin: Url,
        credentials: RootCredentials,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client_with_headers(credentials.headers()?)?;
        Ok(Self {
            http,
            origin,
            credentials,
            transport: transport.clone(),
        })
    }

    /// Convenience constructor from a string origin with default transport.
    pub fn from_origin(origin: &str, credentials: RootCredentials) -> Result<Self, Error> {
        Self::new(Url::parse(origin)?, credentials, &TransportConfig::default())
    }

    /// A client with the same credentials and transport aimed at a
    /// different origin. Used after the web server port or prefix moves.
    pub fn with_origin(&self, origin: Url) -> Result<Self, Error> {
        Self::new(origin, self.credentials.clone(), &self.transport)
    }

    /// The server origin this client talks to.
    pub fn origin(&self) -> &Url {
        &self.origin
    }

    /// The root credentials in use.
    pub fn credentials(&self) -> &RootCredentials {
        &self.credentials
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Join a path onto the origin, preserving any origin prefix.
    ///
    /// `http://host:8000/asip-api` + `grpc` → `http://host:8000/asip-api/grpc`
    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        let base = self.origin.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send one RPC envelope and return the parsed JSON body.
    ///
    /// An empty 2xx body yields `Value::Null`.
    pub async fn call(
        &self,
        method: &str,
        data: &impl Serialize,
    ) -> Result<serde_json::Value, Error> {
        let url = self.url(RPC_PATH)?;
        debug!(method, "POST {}", url);

        let resp = self
            .http
            .post(url)
            .json(&RpcEnvelope { method, data })
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;

        if !status.is_success() {
            warn!(method, status = status.as_u16(), "RPC call failed");
            return Err(Error::Rpc {
                method: method.to_owned(),
                status: status.as_u16(),
                body,
            });
        }

        if body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }

    /// Send one RPC envelope and decode the reply into `T`.
    pub async fn call_typed<T: DeserializeOwned>(
        &self,
        method: &str,
        data: &impl Serialize,
    ) -> Result<T, Error> {
        let value = self.call(method, data).await?;
        T::deserialize(&value).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body: value.to_string(),
        })
    }

    /// GET an auxiliary REST endpoint and decode the JSON reply.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;

        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;

        if !status.is_success() {
            return Err(Error::Http {
                path: path.to_owned(),
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }
}
