// MapService endpoints

use tracing::debug;

use crate::error::Error;
use crate::rpc::client::RpcClient;
use crate::rpc::models::{
    ChangeMapsRequest, ChangeMarkersRequest, ItemsResponse, ListRequest, MapItem, ViewMode,
};

pub const LIST_MAPS: &str = "axxonsoft.bl.maps.MapService.ListMaps";
pub const CHANGE_MAPS: &str = "axxonsoft.bl.maps.MapService.ChangeMaps";
pub const CHANGE_MARKERS: &str = "axxonsoft.bl.maps.MapService.ChangeMarkers";

impl RpcClient {
    pub async fn list_maps(&self, view: ViewMode) -> Result<Vec<MapItem>, Error> {
        debug!("listing maps");
        let resp: ItemsResponse<MapItem> =
            self.call_typed(LIST_MAPS, &ListRequest { view }).await?;
        Ok(resp.items)
    }

    pub async fn change_maps(&self, request: &ChangeMapsRequest) -> Result<(), Error> {
        debug!(
            created = request.created.len(),
            removed = request.removed.len(),
            "changing maps"
        );
        self.call(CHANGE_MAPS, request).await?;
        Ok(())
    }

    pub async fn change_markers(&self, request: &ChangeMarkersRequest) -> Result<(), Error> {
        debug!(
            map_id = %request.map_id,
            created = request.created.len(),
            removed = request.removed.len(),
            "changing markers"
        );
        self.call(CHANGE_MARKERS, request).await?;
        Ok(())
    }
}
