// LayoutManager endpoints
//
// Layout creation, edits, removal, ordering and the default flag all go
// through `Update`.

use tracing::debug;

use crate::error::Error;
use crate::rpc::client::RpcClient;
use crate::rpc::models::{LayoutsResponse, ListRequest, UpdateLayoutsRequest, ViewMode};

pub const LIST_LAYOUTS: &str = "axxonsoft.bl.layout.LayoutManager.ListLayouts";
pub const UPDATE_LAYOUTS: &str = "axxonsoft.bl.layout.LayoutManager.Update";

impl RpcClient {
    pub async fn list_layouts(&self, view: ViewMode) -> Result<LayoutsResponse, Error> {
        debug!("listing layouts");
        self.call_typed(LIST_LAYOUTS, &ListRequest { view }).await
    }

    pub async fn update_layouts(&self, request: &UpdateLayoutsRequest) -> Result<(), Error> {
        debug!(
            created = request.created.len(),
            changed = request.changed.len(),
            removed = request.removed.len(),
            reorder = request.order.is_some(),
            "updating layouts"
        );
        self.call(UPDATE_LAYOUTS, request).await?;
        Ok(())
    }
}
