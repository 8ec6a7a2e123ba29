// ── Archive listing ──
//
// Archives are read-only from the fixture layer's point of view.

use vmsfix_api::models::ViewMode;
use vmsfix_api::rpc::domain::LIST_ARCHIVES;

use crate::context::FixtureContext;
use crate::error::CoreError;
use crate::model::Archive;
use crate::outcome::Outcome;
use crate::store::Collected;

impl FixtureContext {
    pub async fn list_archives(&mut self) -> Result<Outcome<Vec<Archive>>, CoreError> {
        let result = self.client.list_archives(ViewMode::Full).await;
        let outcome = self
            .settle(LIST_ARCHIVES, result)?
            .map(|items| items.into_iter().map(Archive::from).collect::<Vec<_>>());
        if let Outcome::Success(archives) = &outcome {
            self.snapshot.store(Collected::Archives(archives.clone()));
        }
        Ok(outcome)
    }
}
