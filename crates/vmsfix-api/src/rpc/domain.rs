// DomainService endpoints
//
// Read-only listings of cameras (with their detectors) and archives.

use tracing::debug;

use crate::error::Error;
use crate::rpc::client::RpcClient;
use crate::rpc::models::{ArchiveItem, CameraItem, ItemsResponse, ListRequest, ViewMode};

pub const LIST_CAMERAS: &str = "axxonsoft.bl.domain.DomainService.ListCameras";
pub const LIST_ARCHIVES: &str = "axxonsoft.bl.domain.DomainService.ListArchives";

impl RpcClient {
    /// List every camera known to the domain.
    pub async fn list_cameras(&self, view: ViewMode) -> Result<Vec<CameraItem>, Error> {
        debug!("listing cameras");
        let resp: ItemsResponse<CameraItem> =
            self.call_typed(LIST_CAMERAS, &ListRequest { view }).await?;
        Ok(resp.items)
    }

    /// List every archive known to the domain.
    pub async fn list_archives(&self, view: ViewMode) -> Result<Vec<ArchiveItem>, Error> {
        debug!("listing archives");
        let resp: ItemsResponse<ArchiveItem> =
            self.call_typed(LIST_ARCHIVES, &ListRequest { view }).await?;
        Ok(resp.items)
    }
}
