// SecurityService endpoints
//
// Roles, users, role assignments, passwords and permission documents.

use tracing::debug;

use crate::error::Error;
use crate::rpc::client::RpcClient;
use crate::rpc::models::{
    ChangeSecurityRequest, SecurityConfig, SetGlobalPermissionsRequest,
    SetObjectPermissionsRequest,
};

pub const LIST_CONFIG: &str = "axxonsoft.bl.security.SecurityService.ListConfig";
pub const CHANGE_CONFIG: &str = "axxonsoft.bl.security.SecurityService.ChangeConfig";
pub const SET_GLOBAL_PERMISSIONS: &str =
    "axxonsoft.bl.security.SecurityService.SetGlobalPermissions";
pub const SET_OBJECT_PERMISSIONS: &str =
    "axxonsoft.bl.security.SecurityService.SetObjectPermissions";

impl RpcClient {
    /// Fetch roles, users and their assignments in one call.
    pub async fn list_security_config(&self) -> Result<SecurityConfig, Error> {
        debug!("listing security config");
        self.call_typed(LIST_CONFIG, &serde_json::json!({})).await
    }

    /// Apply a batch of role/user additions, assignments, password changes
    /// and removals.
    pub async fn change_security_config(
        &self,
        request: &ChangeSecurityRequest,
    ) -> Result<(), Error> {
        debug!(
            added_roles = request.added_roles.len(),
            added_users = request.added_users.len(),
            assignments = request.added_users_assignments.len(),
            removed_roles = request.removed_roles.len(),
            removed_users = request.removed_users.len(),
            "changing security config"
        );
        self.call(CHANGE_CONFIG, request).await?;
        Ok(())
    }

    /// Replace the global permission document of one or more roles.
    pub async fn set_global_permissions(
        &self,
        request: &SetGlobalPermissionsRequest,
    ) -> Result<(), Error> {
        debug!(roles = request.permissions.len(), "setting global permissions");
        self.call(SET_GLOBAL_PERMISSIONS, request).await?;
        Ok(())
    }

    /// Set per-object access levels for one role.
    pub async fn set_object_permissions(
        &self,
        request: &SetObjectPermissionsRequest,
    ) -> Result<(), Error> {
        debug!(role_id = %request.role_id, "setting object permissions");
        self.call(SET_OBJECT_PERMISSIONS, request).await?;
        Ok(())
    }
}
