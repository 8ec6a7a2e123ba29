// LogicService endpoints (macros)

use tracing::debug;

use crate::error::Error;
use crate::rpc::client::RpcClient;
use crate::rpc::models::{
    ChangeMacrosRequest, ItemsResponse, ListMacrosRequest, MacroItem, ViewMode,
};

pub const LIST_MACROS: &str = "axxonsoft.bl.logic.LogicService.ListMacros";
pub const CHANGE_MACROS: &str = "axxonsoft.bl.logic.LogicService.ChangeMacros";

impl RpcClient {
    pub async fn list_macros(&self) -> Result<Vec<MacroItem>, Error> {
        debug!("listing macros");
        let resp: ItemsResponse<MacroItem> = self
            .call_typed(
                LIST_MACROS,
                &ListMacrosRequest {
                    view_mode: ViewMode::Stripped,
                },
            )
            .await?;
        Ok(resp.items)
    }

    pub async fn change_macros(&self, request: &ChangeMacrosRequest) -> Result<(), Error> {
        debug!(removed = request.removed_macros.len(), "changing macros");
        self.call(CHANGE_MACROS, request).await?;
        Ok(())
    }
}
