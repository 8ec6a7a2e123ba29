// ── Snapshot store ──
//
// `Snapshot` holds the data; `refresh` holds the logic that fetches a kind
// from the server and swaps its slice in.

mod refresh;
mod snapshot;

pub(crate) use snapshot::Collected;
pub use snapshot::{Snapshot, SnapshotEntry, SnapshotSlice};
