// ── Non-camera snapshot records ──

use serde::{Deserialize, Serialize};

use vmsfix_api::models::{LayoutCell, MapKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub description: String,
    /// `None` for root groups.
    pub parent: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: String,
    pub name: String,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub login: String,
    pub name: String,
    pub enabled: bool,
    /// Ids of the roles assigned to this user.
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Map {
    pub id: String,
    pub name: String,
    pub kind: MapKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub id: String,
    pub name: String,
    pub rows: u32,
    pub columns: u32,
    pub cells: Vec<LayoutCell>,
    /// Role ids the layout is shared with.
    pub shared_with: Vec<String>,
    pub is_default: bool,
    /// Position in the server's layout list.
    pub order: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Archive {
    pub access_point: String,
    pub name: String,
    pub is_embedded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Macro {
    pub id: String,
    pub name: String,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detector {
    pub access_point: String,
    pub display_id: String,
    pub name: String,
    pub detector_type: Option<String>,
    pub is_activated: bool,
    /// Video endpoint of the camera the detector runs on.
    pub camera_access_point: String,
}
