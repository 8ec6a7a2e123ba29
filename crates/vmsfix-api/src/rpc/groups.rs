// GroupManager endpoints
//
// Camera groups form a tree through the `parent` field. Creation, renaming,
// re-parenting and removal all go through one batch method.

use tracing::debug;

use crate::error::Error;
use crate::rpc::client::RpcClient;
use crate::rpc::models::{
    ChangeGroupsRequest, GroupItem, GroupsResponse, ListRequest, MembershipRequest, ViewMode,
};

pub const LIST_GROUPS: &str = "axxonsoft.bl.groups.GroupManager.ListGroups";
pub const CHANGE_GROUPS: &str = "axxonsoft.bl.groups.GroupManager.ChangeGroups";
pub const SET_OBJECTS_MEMBERSHIP: &str = "axxonsoft.bl.groups.GroupManager.SetObjectsMembership";

impl RpcClient {
    /// List all groups as a flat list (tree links are in `parent`).
    pub async fn list_groups(&self, view: ViewMode) -> Result<Vec<GroupItem>, Error> {
        debug!("listing groups");
        let resp: GroupsResponse = self.call_typed(LIST_GROUPS, &ListRequest { view }).await?;
        Ok(resp.groups)
    }

    /// Apply a batch of group additions, changes and removals.
    pub async fn change_groups(&self, request: &ChangeGroupsRequest) -> Result<(), Error> {
        debug!(
            added = request.added_groups.len(),
            changed = request.changed_groups_info.len(),
            removed = request.removed_groups.len(),
            "changing groups"
        );
        self.call(CHANGE_GROUPS, request).await?;
        Ok(())
    }

    /// Add or remove objects (camera access points) from groups.
    pub async fn set_objects_membership(&self, request: &MembershipRequest) -> Result<(), Error> {
        debug!(
            added = request.added_objects.len(),
            removed = request.removed_objects.len(),
            "changing group membership"
        );
        self.call(SET_OBJECTS_MEMBERSHIP, request).await?;
        Ok(())
    }
}
