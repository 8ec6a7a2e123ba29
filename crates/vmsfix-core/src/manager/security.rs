// ── Role and user manager ──
//
// Roles, users, assignments and passwords all go through the security
// service's single batch call. Names and logins are resolved through the
// snapshot before anything is sent.

use std::collections::BTreeMap;

use tracing::debug;

use vmsfix_api::models::{
    ANY_TIMEZONE, CameraAccess, ChangeSecurityRequest, GlobalPermissions, ObjectPermissions,
    RoleItem, SetGlobalPermissionsRequest, SetObjectPermissionsRequest, UserAssignment, UserItem,
    UserPassword,
};
use vmsfix_api::rpc::security::{
    CHANGE_CONFIG, LIST_CONFIG, SET_GLOBAL_PERMISSIONS, SET_OBJECT_PERMISSIONS,
};

use super::{dedup_keys, mint_id};
use crate::context::FixtureContext;
use crate::convert::split_security_config;
use crate::error::CoreError;
use crate::model::{EntityKind, Role, User};
use crate::outcome::{Creation, Outcome};
use crate::store::Collected;

impl FixtureContext {
    /// Roles and users in one fetch; both snapshot slices are replaced.
    pub async fn list_security_config(
        &mut self,
    ) -> Result<Outcome<(Vec<Role>, Vec<User>)>, CoreError> {
        let result = self.client.list_security_config().await;
        let outcome = self.settle(LIST_CONFIG, result)?.map(split_security_config);
        if let Outcome::Success((roles, users)) = &outcome {
            self.snapshot.store(Collected::Roles(roles.clone()));
            self.snapshot.store(Collected::Users(users.clone()));
        }
        Ok(outcome)
    }

    async fn change_security(
        &mut self,
        request: &ChangeSecurityRequest,
    ) -> Result<Outcome<()>, CoreError> {
        let result = self.client.change_security_config(request).await;
        self.settle(CHANGE_CONFIG, result)
    }

    // ── Roles ────────────────────────────────────────────────────────

    pub async fn create_role(&mut self, name: &str) -> Result<Creation<String>, CoreError> {
        let id = mint_id();
        let request = ChangeSecurityRequest {
            added_roles: vec![RoleItem {
                index: id.clone(),
                name: name.to_owned(),
                comment: String::new(),
                timezone_id: ANY_TIMEZONE.to_string(),
            }],
            ..ChangeSecurityRequest::default()
        };
        let result = self.client.change_security_config(&request).await;
        let creation = self.settle_creation(EntityKind::Roles, CHANGE_CONFIG, id, name, result)?;
        self.collect(Some(EntityKind::Roles)).await?;
        Ok(creation)
    }

    /// Replace the role-wide permission document of `role`.
    pub async fn set_role_permissions(
        &mut self,
        role: &str,
        permissions: GlobalPermissions,
    ) -> Result<Outcome<()>, CoreError> {
        let role_id = self.snapshot.role_id(role)?.to_owned();
        debug!(role, role_id = %role_id, "setting role permissions");
        let request = SetGlobalPermissionsRequest {
            permissions: BTreeMap::from([(role_id, permissions)]),
        };
        let result = self.client.set_global_permissions(&request).await;
        self.settle(SET_GLOBAL_PERMISSIONS, result)
    }

    /// Grant `role` the given access to specific cameras.
    pub async fn set_camera_permissions(
        &mut self,
        role: &str,
        display_ids: &[&str],
        access: CameraAccess,
    ) -> Result<Outcome<()>, CoreError> {
        let role_id = self.snapshot.role_id(role)?.to_owned();
        let camera_access = display_ids
            .iter()
            .map(|id| {
                self.snapshot
                    .camera_by_display_id(id)
                    .map(|c| (c.access_point.clone(), access))
            })
            .collect::<Result<BTreeMap<_, _>, _>>()?;
        let request = SetObjectPermissionsRequest {
            role_id,
            permissions: ObjectPermissions {
                camera_access,
                ..ObjectPermissions::default()
            },
        };
        let result = self.client.set_object_permissions(&request).await;
        self.settle(SET_OBJECT_PERMISSIONS, result)
    }

    pub async fn delete_roles(&mut self, ids: &[String]) -> Result<Outcome<()>, CoreError> {
        let ids = dedup_keys(ids.iter().cloned());
        if ids.is_empty() {
            return Ok(Outcome::Success(()));
        }
        let outcome = self
            .change_security(&ChangeSecurityRequest {
                removed_roles: ids,
                ..ChangeSecurityRequest::default()
            })
            .await?;
        self.collect(Some(EntityKind::Roles)).await?;
        Ok(outcome)
    }

    // ── Users ────────────────────────────────────────────────────────

    /// Create an enabled user without roles or password.
    pub async fn create_user(&mut self, login: &str) -> Result<Creation<String>, CoreError> {
        let id = mint_id();
        let request = ChangeSecurityRequest {
            added_users: vec![UserItem {
                index: id.clone(),
                login: login.to_owned(),
                name: login.to_owned(),
                comment: String::new(),
                enabled: true,
                restrictions: None,
            }],
            ..ChangeSecurityRequest::default()
        };
        let result = self.client.change_security_config(&request).await;
        let creation = self.settle_creation(EntityKind::Users, CHANGE_CONFIG, id, login, result)?;
        self.collect(Some(EntityKind::Users)).await?;
        Ok(creation)
    }

    pub async fn assign_role(&mut self, login: &str, role: &str) -> Result<Outcome<()>, CoreError> {
        let assignment = UserAssignment {
            user_id: self.snapshot.user_id(login)?.to_owned(),
            role_id: self.snapshot.role_id(role)?.to_owned(),
        };
        debug!(login, role, "assigning role");
        let outcome = self
            .change_security(&ChangeSecurityRequest {
                added_users_assignments: vec![assignment],
                ..ChangeSecurityRequest::default()
            })
            .await?;
        self.collect(Some(EntityKind::Users)).await?;
        Ok(outcome)
    }

    pub async fn set_user_password(
        &mut self,
        login: &str,
        password: &str,
    ) -> Result<Outcome<()>, CoreError> {
        let user_index = self.snapshot.user_id(login)?.to_owned();
        debug!(login, "setting user password");
        self.change_security(&ChangeSecurityRequest {
            user_passwords: vec![UserPassword {
                user_index,
                password: password.to_owned(),
            }],
            ..ChangeSecurityRequest::default()
        })
        .await
    }

    pub async fn delete_users(&mut self, ids: &[String]) -> Result<Outcome<()>, CoreError> {
        let ids = dedup_keys(ids.iter().cloned());
        if ids.is_empty() {
            return Ok(Outcome::Success(()));
        }
        let outcome = self
            .change_security(&ChangeSecurityRequest {
                removed_users: ids,
                ..ChangeSecurityRequest::default()
            })
            .await?;
        self.collect(Some(EntityKind::Users)).await?;
        Ok(outcome)
    }
}
