// ── Entity managers ──
//
// One file per entity family, each an inherent `impl FixtureContext`
// block. Common shape: create mints an id client-side, sends it, settles
// the outcome under the failure policy and refreshes the kind; lists store
// what they fetch; deletes refresh afterwards.

pub mod archives;
pub mod cameras;
pub mod groups;
pub mod hosts;
pub mod layouts;
pub mod macros;
pub mod maps;
pub mod security;
pub mod server;

use uuid::Uuid;

/// Fresh client-side identifier. Never reused.
pub(crate) fn mint_id() -> String {
    Uuid::new_v4().to_string()
}

/// Order-preserving dedup of owned keys.
pub(crate) fn dedup_keys<I>(keys: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = std::collections::HashSet::new();
    keys.into_iter().filter(|k| seen.insert(k.clone())).collect()
}
