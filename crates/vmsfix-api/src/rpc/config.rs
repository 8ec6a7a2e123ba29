// ConfigurationService endpoints
//
// Unit-tree mutations: adding devices under a host, changing unit
// properties (camera display id/name, web server port) and removing units.

use tracing::debug;

use crate::error::Error;
use crate::rpc::client::RpcClient;
use crate::rpc::models::{ChangeConfigRequest, ChangeConfigResponse};

pub const CHANGE_CONFIG: &str = "axxonsoft.bl.config.ConfigurationService.ChangeConfig";

impl RpcClient {
    /// Apply a batch of unit additions, changes and removals.
    ///
    /// An HTTP success whose reply lists `failed` uids is reported as
    /// [`Error::Rejected`].
    pub async fn change_config(
        &self,
        request: &ChangeConfigRequest,
    ) -> Result<ChangeConfigResponse, Error> {
        debug!(
            added = request.added.len(),
            changed = request.changed.len(),
            removed = request.removed.len(),
            "changing configuration"
        );
        let resp: ChangeConfigResponse = self.call_typed(CHANGE_CONFIG, request).await?;
        if resp.failed.is_empty() {
            Ok(resp)
        } else {
            Err(Error::Rejected {
                method: CHANGE_CONFIG.to_owned(),
                failed: resp.failed,
            })
        }
    }
}
