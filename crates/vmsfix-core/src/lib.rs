// vmsfix-core: Fixture layer between vmsfix-api and the end-to-end tests.

pub mod annihilate;
pub mod config;
pub mod context;
pub mod convert;
pub mod error;
pub mod manager;
pub mod model;
pub mod outcome;
pub mod readiness;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use annihilate::{Annihilable, AnnihilationReport, Selection};
pub use config::{DeleteTolerance, FailurePolicy, FixtureConfig};
pub use context::FixtureContext;
pub use error::CoreError;
pub use manager::cameras::CameraBatch;
pub use manager::layouts::LayoutSpec;
pub use outcome::{Creation, Failure, Outcome};
pub use readiness::{PollConfig, PollState, Probe, Readiness, ReadinessPoller};
pub use store::{Snapshot, SnapshotEntry, SnapshotSlice};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Archive, Camera, CameraAddress, DeviceLayout, DisplayIdPlan, Detector, EntityKind, Group,
    Layout, Macro, Map, Role, User,
};

// Wire-level types callers build requests with.
pub use vmsfix_api::models::{
    CameraAccess, GeoPoint, GlobalPermissions, MarkerPosition, PanelKind,
};
pub use vmsfix_api::{RootCredentials, RpcClient};
