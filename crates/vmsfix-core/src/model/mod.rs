// ── Domain model ──
//
// Snapshot records as the fixture layer sees them, converted from the
// wire types in `vmsfix_api::models` by `crate::convert`.

mod camera;
mod entities;
mod kind;

pub use camera::{Camera, CameraAddress, DeviceLayout, DisplayIdPlan, plan_display_ids};
pub(crate) use camera::next_free_display_id;
pub use entities::{Archive, Detector, Group, Layout, Macro, Map, Role, User};
pub use kind::EntityKind;
