// ── Snapshot refresh ──
//
// Explicit collection of entity lists into the context's snapshot. Each
// kind is fetched through its manager's list call, which stores the slice
// on success. A failed list under the lenient policy keeps the previous
// slice and logs a warning.

use strum::IntoEnumIterator;
use tracing::{debug, warn};

use super::SnapshotSlice;
use crate::context::FixtureContext;
use crate::error::CoreError;
use crate::model::EntityKind;
use crate::outcome::Outcome;

impl FixtureContext {
    /// Refresh one kind, or every kind when `kind` is `None`.
    pub async fn collect(&mut self, kind: Option<EntityKind>) -> Result<(), CoreError> {
        match kind {
            Some(kind) => {
                self.fetch(kind).await?;
            }
            None => {
                for kind in EntityKind::iter() {
                    self.fetch(kind).await?;
                }
            }
        }
        Ok(())
    }

    /// Refresh one kind and return its (possibly stale) slice.
    pub async fn refresh(&mut self, kind: EntityKind) -> Result<SnapshotSlice<'_>, CoreError> {
        self.fetch(kind).await?;
        Ok(self.snapshot.slice(kind))
    }

    /// Run the list call for `kind`; reports whether the slice was replaced.
    pub(crate) async fn fetch(&mut self, kind: EntityKind) -> Result<bool, CoreError> {
        let outcome = match kind {
            EntityKind::Cameras => self.list_cameras().await?.map(drop),
            EntityKind::Detectors => self.list_detectors().await?.map(drop),
            EntityKind::Groups => self.list_groups().await?.map(drop),
            EntityKind::Users | EntityKind::Roles => self.list_security_config().await?.map(drop),
            EntityKind::Maps => self.list_maps().await?.map(drop),
            EntityKind::Layouts => self.list_layouts().await?.map(drop),
            EntityKind::Archives => self.list_archives().await?.map(drop),
            EntityKind::Macros => self.list_macros().await?.map(drop),
        };

        match outcome {
            Outcome::Success(()) => {
                debug!(%kind, count = self.snapshot.slice(kind).len(), "snapshot refreshed");
                Ok(true)
            }
            Outcome::Failure(failure) => {
                warn!(%kind, reason = %failure, "keeping stale snapshot slice");
                Ok(false)
            }
        }
    }
}
