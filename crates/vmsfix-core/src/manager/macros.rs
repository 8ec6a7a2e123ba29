// ── Macro manager ──
//
// Macros are never created by fixtures, but tests that record them through
// the UI leave them behind, so they can be listed and deleted.

use vmsfix_api::models::ChangeMacrosRequest;
use vmsfix_api::rpc::logic::{CHANGE_MACROS, LIST_MACROS};

use super::dedup_keys;
use crate::context::FixtureContext;
use crate::error::CoreError;
use crate::model::{EntityKind, Macro};
use crate::outcome::Outcome;
use crate::store::Collected;

impl FixtureContext {
    pub async fn list_macros(&mut self) -> Result<Outcome<Vec<Macro>>, CoreError> {
        let result = self.client.list_macros().await;
        let outcome = self
            .settle(LIST_MACROS, result)?
            .map(|items| items.into_iter().map(Macro::from).collect::<Vec<_>>());
        if let Outcome::Success(macros) = &outcome {
            self.snapshot.store(Collected::Macros(macros.clone()));
        }
        Ok(outcome)
    }

    pub async fn delete_macros(&mut self, ids: &[String]) -> Result<Outcome<()>, CoreError> {
        let ids = dedup_keys(ids.iter().cloned());
        if ids.is_empty() {
            return Ok(Outcome::Success(()));
        }
        let request = ChangeMacrosRequest {
            removed_macros: ids,
        };
        let result = self.client.change_macros(&request).await;
        let outcome = self.settle(CHANGE_MACROS, result)?;
        self.collect(Some(EntityKind::Macros)).await?;
        Ok(outcome)
    }
}
