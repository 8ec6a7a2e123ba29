// ── Annihilator ──
//
// Idempotent teardown of one entity kind, either everything the server
// reports or an explicit set of snapshot ids. Whether the batch delete
// calls tolerate unknown ids is unverified, so `DeleteTolerance` decides
// between trusting the server and checking first.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::config::DeleteTolerance;
use crate::context::FixtureContext;
use crate::error::CoreError;
use crate::manager::dedup_keys;
use crate::model::{Camera, EntityKind, Group, Layout, Macro, Map, Role, User};
use crate::outcome::Outcome;
use crate::store::Snapshot;

/// Which records of a kind to delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Everything the server currently reports.
    All,
    /// Snapshot ids: display ids for cameras, entity ids otherwise.
    Ids(Vec<String>),
}

impl Selection {
    pub fn ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Ids(ids.into_iter().map(Into::into).collect())
    }
}

/// A snapshot record that can be torn down.
pub trait Annihilable {
    const KIND: EntityKind;

    /// Id the record is listed under in the snapshot.
    fn snapshot_id(&self) -> &str;

    /// Key the kind's delete call expects.
    fn delete_key(&self) -> String {
        self.snapshot_id().to_owned()
    }
}

impl Annihilable for Camera {
    const KIND: EntityKind = EntityKind::Cameras;

    fn snapshot_id(&self) -> &str {
        &self.display_id
    }

    /// Channels collapse to their parent device.
    fn delete_key(&self) -> String {
        self.address.device_uid().to_owned()
    }
}

impl Annihilable for Group {
    const KIND: EntityKind = EntityKind::Groups;

    fn snapshot_id(&self) -> &str {
        &self.id
    }
}

impl Annihilable for User {
    const KIND: EntityKind = EntityKind::Users;

    fn snapshot_id(&self) -> &str {
        &self.id
    }
}

impl Annihilable for Role {
    const KIND: EntityKind = EntityKind::Roles;

    fn snapshot_id(&self) -> &str {
        &self.id
    }
}

impl Annihilable for Map {
    const KIND: EntityKind = EntityKind::Maps;

    fn snapshot_id(&self) -> &str {
        &self.id
    }
}

impl Annihilable for Layout {
    const KIND: EntityKind = EntityKind::Layouts;

    fn snapshot_id(&self) -> &str {
        &self.id
    }
}

impl Annihilable for Macro {
    const KIND: EntityKind = EntityKind::Macros;

    fn snapshot_id(&self) -> &str {
        &self.id
    }
}

/// What one annihilation did.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnihilationReport {
    pub kind: EntityKind,
    /// Snapshot ids selected for deletion.
    pub requested: Vec<String>,
    /// Delete keys actually sent.
    pub deleted: Vec<String>,
    /// Requested ids that were not sent: unknown to the server, or the
    /// root account.
    pub skipped: Vec<String>,
    /// Requested ids still reported after the delete.
    pub survivors: Vec<String>,
    /// Requested ids that could not be turned into a delete key because
    /// the kind's list could not be refreshed. Nothing was sent for them.
    pub unresolved: Vec<String>,
    pub outcome: Outcome<()>,
}

impl AnnihilationReport {
    /// The delete call succeeded, nothing requested survived and every
    /// requested id was accounted for.
    pub fn is_clean(&self) -> bool {
        self.outcome.is_success() && self.survivors.is_empty() && self.unresolved.is_empty()
    }
}

/// Snapshot ids of `kind`, in snapshot order.
fn present_ids(snapshot: &Snapshot, kind: EntityKind) -> Vec<String> {
    snapshot
        .slice(kind)
        .entries()
        .into_iter()
        .map(|e| e.id)
        .collect()
}

/// Delete key for a snapshot id. Only cameras differ from their id, and
/// only cameras present in the snapshot can be translated.
fn delete_key(snapshot: &Snapshot, kind: EntityKind, id: &str) -> Option<String> {
    match kind {
        EntityKind::Cameras => snapshot
            .camera_by_display_id(id)
            .ok()
            .map(|camera| camera.delete_key()),
        _ => Some(id.to_owned()),
    }
}

impl FixtureContext {
    /// Delete the selected records of `kind` and report what happened.
    pub async fn annihilate(
        &mut self,
        kind: EntityKind,
        selection: Selection,
    ) -> Result<AnnihilationReport, CoreError> {
        if !kind.is_deletable() {
            return Err(CoreError::Unsupported {
                operation: format!("annihilate {kind}"),
            });
        }

        let tolerance = self.config.delete_tolerance;
        let (requested, refreshed) = match selection {
            Selection::All => {
                let refreshed = self.fetch(kind).await?;
                (present_ids(&self.snapshot, kind), refreshed)
            }
            Selection::Ids(ids) => {
                // Users need the root account, cameras need their delete keys.
                let refreshed = if tolerance == DeleteTolerance::Verify
                    || matches!(kind, EntityKind::Users | EntityKind::Cameras)
                {
                    self.fetch(kind).await?
                } else {
                    false
                };
                (ids, refreshed)
            }
        };

        let protected = self.protected_ids(kind);
        let present: HashSet<String> = present_ids(&self.snapshot, kind).into_iter().collect();
        let mut keys = Vec::new();
        let mut skipped = Vec::new();
        let mut unresolved = Vec::new();
        for id in &requested {
            if protected.contains(id) {
                debug!(%kind, id = %id, "not deleting the root account");
                skipped.push(id.clone());
                continue;
            }
            let absent = !present.contains(id);
            if tolerance == DeleteTolerance::Verify && absent {
                // Only a fresh list proves the id is gone.
                if refreshed {
                    skipped.push(id.clone());
                } else {
                    unresolved.push(id.clone());
                }
                continue;
            }
            match delete_key(&self.snapshot, kind, id) {
                Some(key) => keys.push(key),
                None if refreshed => skipped.push(id.clone()),
                None => unresolved.push(id.clone()),
            }
        }
        if !unresolved.is_empty() {
            warn!(%kind, unresolved = unresolved.len(), "ids not resolvable from a stale snapshot");
        }
        if !skipped.is_empty() {
            debug!(%kind, skipped = skipped.len(), "skipping ids");
        }

        let keys = dedup_keys(keys);
        let outcome = self.delete_keys(kind, &keys).await?;

        let remaining: HashSet<String> = present_ids(&self.snapshot, kind).into_iter().collect();
        let survivors: Vec<String> = requested
            .iter()
            .filter(|id| {
                !skipped.contains(id) && !unresolved.contains(id) && remaining.contains(*id)
            })
            .cloned()
            .collect();

        let report = AnnihilationReport {
            kind,
            requested,
            deleted: keys,
            skipped,
            survivors,
            unresolved,
            outcome,
        };
        if report.is_clean() {
            info!(%kind, deleted = report.deleted.len(), "annihilated");
        } else {
            warn!(
                %kind,
                survivors = report.survivors.len(),
                unresolved = report.unresolved.len(),
                failed = !report.outcome.is_success(),
                "annihilation incomplete"
            );
        }
        Ok(report)
    }

    /// Annihilate specific records, e.g. the ones a test created.
    pub async fn annihilate_records<T: Annihilable>(
        &mut self,
        records: &[T],
    ) -> Result<AnnihilationReport, CoreError> {
        let ids = records.iter().map(|r| r.snapshot_id().to_owned()).collect();
        self.annihilate(T::KIND, Selection::Ids(ids)).await
    }

    /// Ids that must survive any teardown: the account the context itself
    /// authenticates with.
    fn protected_ids(&self, kind: EntityKind) -> HashSet<String> {
        if kind != EntityKind::Users {
            return HashSet::new();
        }
        self.snapshot
            .user(&self.config.credentials.login)
            .map(|u| HashSet::from([u.id.clone()]))
            .unwrap_or_default()
    }

    async fn delete_keys(
        &mut self,
        kind: EntityKind,
        keys: &[String],
    ) -> Result<Outcome<()>, CoreError> {
        match kind {
            EntityKind::Cameras => self.remove_camera_devices(keys).await,
            EntityKind::Groups => self.delete_groups(keys).await,
            EntityKind::Users => self.delete_users(keys).await,
            EntityKind::Roles => self.delete_roles(keys).await,
            EntityKind::Maps => self.delete_maps(keys).await,
            EntityKind::Layouts => self.delete_layouts(keys).await,
            EntityKind::Macros => self.delete_macros(keys).await,
            EntityKind::Archives | EntityKind::Detectors => Err(CoreError::Unsupported {
                operation: format!("delete {kind}"),
            }),
        }
    }
}
