// ── Group manager ──

use tracing::debug;

use vmsfix_api::models::{
    ChangeGroupsRequest, GroupChange, GroupItem, GroupMembership, MembershipRequest, ViewMode,
};
use vmsfix_api::rpc::groups::{CHANGE_GROUPS, LIST_GROUPS, SET_OBJECTS_MEMBERSHIP};

use super::{dedup_keys, mint_id};
use crate::context::FixtureContext;
use crate::error::CoreError;
use crate::model::{EntityKind, Group};
use crate::outcome::{Creation, Outcome};
use crate::store::Collected;

impl FixtureContext {
    /// Create a group, under `parent` (a group name) or at the root.
    pub async fn create_group(
        &mut self,
        name: &str,
        parent: Option<&str>,
    ) -> Result<Creation<String>, CoreError> {
        let parent = match parent {
            Some(parent) => self.snapshot.group_id(parent)?.to_owned(),
            None => String::new(),
        };
        let id = mint_id();
        let request = ChangeGroupsRequest {
            added_groups: vec![GroupItem {
                group_id: id.clone(),
                name: name.to_owned(),
                description: String::new(),
                parent,
            }],
            ..ChangeGroupsRequest::default()
        };
        let result = self.client.change_groups(&request).await;
        let creation = self.settle_creation(EntityKind::Groups, CHANGE_GROUPS, id, name, result)?;
        self.collect(Some(EntityKind::Groups)).await?;
        Ok(creation)
    }

    pub async fn list_groups(&mut self) -> Result<Outcome<Vec<Group>>, CoreError> {
        let result = self.client.list_groups(ViewMode::Full).await;
        let outcome = self
            .settle(LIST_GROUPS, result)?
            .map(|items| items.into_iter().map(Group::from).collect::<Vec<_>>());
        if let Outcome::Success(groups) = &outcome {
            self.snapshot.store(Collected::Groups(groups.clone()));
        }
        Ok(outcome)
    }

    pub async fn rename_group(
        &mut self,
        name: &str,
        new_name: &str,
    ) -> Result<Outcome<()>, CoreError> {
        let group_id = self.snapshot.group_id(name)?.to_owned();
        self.change_group(GroupChange {
            group_id,
            name: Some(new_name.to_owned()),
            description: None,
            parent: None,
        })
        .await
    }

    /// Move a group under `parent`, or to the root when `None`. Cycles are
    /// left for the server to reject.
    pub async fn set_group(
        &mut self,
        name: &str,
        parent: Option<&str>,
    ) -> Result<Outcome<()>, CoreError> {
        let group_id = self.snapshot.group_id(name)?.to_owned();
        let parent = match parent {
            Some(parent) => self.snapshot.group_id(parent)?.to_owned(),
            None => String::new(),
        };
        self.change_group(GroupChange {
            group_id,
            name: None,
            description: None,
            parent: Some(parent),
        })
        .await
    }

    async fn change_group(&mut self, change: GroupChange) -> Result<Outcome<()>, CoreError> {
        debug!(group_id = %change.group_id, "changing group");
        let request = ChangeGroupsRequest {
            changed_groups_info: vec![change],
            ..ChangeGroupsRequest::default()
        };
        let result = self.client.change_groups(&request).await;
        let outcome = self.settle(CHANGE_GROUPS, result)?;
        self.collect(Some(EntityKind::Groups)).await?;
        Ok(outcome)
    }

    // ── Membership ───────────────────────────────────────────────────

    pub async fn add_cameras_to_group(
        &mut self,
        group: &str,
        display_ids: &[&str],
    ) -> Result<Outcome<()>, CoreError> {
        let members = self.memberships(group, display_ids)?;
        self.set_membership(MembershipRequest {
            added_objects: members,
            removed_objects: Vec::new(),
        })
        .await
    }

    pub async fn remove_cameras_from_group(
        &mut self,
        group: &str,
        display_ids: &[&str],
    ) -> Result<Outcome<()>, CoreError> {
        let members = self.memberships(group, display_ids)?;
        self.set_membership(MembershipRequest {
            added_objects: Vec::new(),
            removed_objects: members,
        })
        .await
    }

    /// Resolve a group name and camera display ids into membership pairs
    /// keyed by the cameras' access points.
    fn memberships(
        &self,
        group: &str,
        display_ids: &[&str],
    ) -> Result<Vec<GroupMembership>, CoreError> {
        let group_id = self.snapshot.group_id(group)?;
        display_ids
            .iter()
            .map(|id| {
                let camera = self.snapshot.camera_by_display_id(id)?;
                Ok(GroupMembership {
                    group_id: group_id.to_owned(),
                    object: camera.access_point.clone(),
                })
            })
            .collect()
    }

    async fn set_membership(&self, request: MembershipRequest) -> Result<Outcome<()>, CoreError> {
        let result = self.client.set_objects_membership(&request).await;
        self.settle(SET_OBJECTS_MEMBERSHIP, result)
    }

    // ── Delete ───────────────────────────────────────────────────────

    pub async fn delete_groups(&mut self, ids: &[String]) -> Result<Outcome<()>, CoreError> {
        let ids = dedup_keys(ids.iter().cloned());
        if ids.is_empty() {
            return Ok(Outcome::Success(()));
        }
        let request = ChangeGroupsRequest {
            removed_groups: ids,
            ..ChangeGroupsRequest::default()
        };
        let result = self.client.change_groups(&request).await;
        let outcome = self.settle(CHANGE_GROUPS, result)?;
        self.collect(Some(EntityKind::Groups)).await?;
        Ok(outcome)
    }
}
