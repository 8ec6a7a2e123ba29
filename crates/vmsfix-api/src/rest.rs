// Auxiliary REST endpoints
//
// `/hosts` names the servers of the domain; `/product/version` doubles as
// the liveness probe after a server restart.

use tracing::debug;

use crate::error::Error;
use crate::rpc::client::RpcClient;

impl RpcClient {
    /// `GET /hosts`: host names of the domain, active host first.
    pub async fn hosts(&self) -> Result<Vec<String>, Error> {
        debug!("listing hosts");
        self.get_json("hosts").await
    }

    /// `GET /product/version`: raw version document.
    pub async fn product_version(&self) -> Result<serde_json::Value, Error> {
        self.get_json("product/version").await
    }
}
