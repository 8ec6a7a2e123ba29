// RPC request and response types
//
// Request types serialize into the `data` half of the envelope. Response
// records use `#[serde(default)]` liberally and keep unknown fields in
// `extra` because reply shapes vary between server builds.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ── Envelope ─────────────────────────────────────────────────────────

/// The body of every RPC call:
/// ```json
/// { "method": "axxonsoft.bl.groups.GroupManager.ChangeGroups", "data": { ... } }
/// ```
#[derive(Debug, Serialize)]
pub struct RpcEnvelope<'a, T: Serialize> {
    pub method: &'a str,
    pub data: &'a T,
}

/// View mode parameter accepted by the `List*` methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewMode {
    #[serde(rename = "VIEW_MODE_FULL")]
    Full,
    #[serde(rename = "VIEW_MODE_STRIPPED")]
    Stripped,
    #[serde(rename = "VIEW_MODE_TREE")]
    Tree,
}

/// `{ "view": "VIEW_MODE_FULL" }`
#[derive(Debug, Clone, Serialize)]
pub struct ListRequest {
    pub view: ViewMode,
}

/// Generic `{ "items": [...] }` list reply.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemsResponse<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

// ── Configuration units ──────────────────────────────────────────────

/// Typed value of a unit property; serializes as `value_string`,
/// `value_bool` or `value_int32` next to the property id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyValue {
    ValueString(String),
    ValueBool(bool),
    ValueInt32(i32),
}

/// One `{ "id": "display_name", "value_string": "Lobby" }` property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: String,
    #[serde(flatten)]
    pub value: PropertyValue,
}

impl Property {
    pub fn string(id: &str, value: impl Into<String>) -> Self {
        Self {
            id: id.to_owned(),
            value: PropertyValue::ValueString(value.into()),
        }
    }

    pub fn bool(id: &str, value: bool) -> Self {
        Self {
            id: id.to_owned(),
            value: PropertyValue::ValueBool(value),
        }
    }

    pub fn int(id: &str, value: i32) -> Self {
        Self {
            id: id.to_owned(),
            value: PropertyValue::ValueInt32(value),
        }
    }
}

/// A unit to create under a parent uid (a device under a host, a channel
/// under a device).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitSpec {
    #[serde(rename = "type")]
    pub unit_type: String,
    pub properties: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub units: Vec<UnitSpec>,
}

/// `{ "uid": "hosts/Server1", "units": [...] }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddedUnits {
    pub uid: String,
    pub units: Vec<UnitSpec>,
}

/// `{ "uid": "hosts/Server1/DeviceIpint.3", "properties": [...] }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangedUnit {
    pub uid: String,
    pub properties: Vec<Property>,
}

/// `{ "uid": "hosts/Server1/DeviceIpint.3" }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RemovedUnit {
    pub uid: String,
}

/// Batch request for `ConfigurationService.ChangeConfig`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChangeConfigRequest {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub added: Vec<AddedUnits>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub changed: Vec<ChangedUnit>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub removed: Vec<RemovedUnit>,
}

/// Reply of `ConfigurationService.ChangeConfig`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChangeConfigResponse {
    /// Uids the server refused to add, change or remove.
    #[serde(default)]
    pub failed: Vec<String>,
    /// Uids of freshly added units.
    #[serde(default)]
    pub added: Vec<String>,
}

// ── Cameras / archives ───────────────────────────────────────────────

/// Camera entry from `DomainService.ListCameras`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraItem {
    pub access_point: String,
    #[serde(default)]
    pub display_id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub is_activated: bool,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub detectors: Vec<DetectorItem>,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Detector nested inside a camera entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorItem {
    pub access_point: String,
    #[serde(default)]
    pub display_id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default, rename = "type")]
    pub detector_type: Option<String>,
    #[serde(default)]
    pub is_activated: bool,
}

/// Archive entry from `DomainService.ListArchives`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveItem {
    pub access_point: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub is_embedded: bool,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── Groups ───────────────────────────────────────────────────────────

/// Group record, used both in `ListGroups` replies and `added_groups`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupItem {
    pub group_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Parent group id; empty for root groups.
    #[serde(default)]
    pub parent: String,
}

/// Partial group update for `changed_groups_info`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupChange {
    pub group_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

/// Batch request for `GroupManager.ChangeGroups`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChangeGroupsRequest {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub added_groups: Vec<GroupItem>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub changed_groups_info: Vec<GroupChange>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub removed_groups: Vec<String>,
}

/// `{ "group_id": ..., "object": <access point> }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupMembership {
    pub group_id: String,
    pub object: String,
}

/// Batch request for `GroupManager.SetObjectsMembership`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MembershipRequest {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub added_objects: Vec<GroupMembership>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub removed_objects: Vec<GroupMembership>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroupsResponse {
    #[serde(default)]
    pub groups: Vec<GroupItem>,
}

// ── Security: roles, users, permissions ──────────────────────────────

/// Nil timezone used for roles without a schedule restriction.
pub const ANY_TIMEZONE: Uuid = Uuid::nil();

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleItem {
    pub index: String,
    pub name: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub timezone_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserItem {
    pub index: String,
    pub login: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub restrictions: Option<serde_json::Value>,
}

/// `{ "user_id": ..., "role_id": ... }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAssignment {
    pub user_id: String,
    pub role_id: String,
}

/// `{ "user_index": ..., "password": ... }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserPassword {
    pub user_index: String,
    pub password: String,
}

/// Batch request for `SecurityService.ChangeConfig`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChangeSecurityRequest {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub added_roles: Vec<RoleItem>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub added_users: Vec<UserItem>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub added_users_assignments: Vec<UserAssignment>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub user_passwords: Vec<UserPassword>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub removed_roles: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub removed_users: Vec<String>,
}

/// Reply of `SecurityService.ListConfig`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecurityConfig {
    #[serde(default)]
    pub roles: Vec<RoleItem>,
    #[serde(default)]
    pub users: Vec<UserItem>,
    #[serde(default)]
    pub user_assignments: Vec<UserAssignment>,
}

/// Camera access level, per role or per camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CameraAccess {
    #[default]
    #[serde(rename = "CAMERA_ACCESS_FORBID")]
    Forbid,
    #[serde(rename = "CAMERA_ACCESS_MONITORING")]
    Monitoring,
    #[serde(rename = "CAMERA_ACCESS_ARCHIVE")]
    Archive,
    #[serde(rename = "CAMERA_ACCESS_MONITORING_ON_PROTECTION")]
    MonitoringOnProtection,
    #[serde(rename = "CAMERA_ACCESS_CONTROL")]
    Control,
    #[serde(rename = "CAMERA_ACCESS_FULL")]
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MapAccess {
    #[default]
    #[serde(rename = "MAP_ACCESS_FORBID")]
    Forbid,
    #[serde(rename = "MAP_ACCESS_VIEW_ONLY")]
    ViewOnly,
    #[serde(rename = "MAP_ACCESS_VIEW_SCALE")]
    ViewScale,
    #[serde(rename = "MAP_ACCESS_FULL")]
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ArchiveAccess {
    #[default]
    #[serde(rename = "ARCHIVE_ACCESS_FORBID")]
    Forbid,
    #[serde(rename = "ARCHIVE_ACCESS_VIEW")]
    View,
    #[serde(rename = "ARCHIVE_ACCESS_FULL")]
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MicrophoneAccess {
    #[default]
    #[serde(rename = "MICROPHONE_ACCESS_FORBID")]
    Forbid,
    #[serde(rename = "MICROPHONE_ACCESS_MONITORING")]
    Monitoring,
    #[serde(rename = "MICROPHONE_ACCESS_FULL")]
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TelemetryPriority {
    #[default]
    #[serde(rename = "TELEMETRY_PRIORITY_NO_ACCESS")]
    NoAccess,
    #[serde(rename = "TELEMETRY_PRIORITY_LOWEST")]
    Lowest,
    #[serde(rename = "TELEMETRY_PRIORITY_NORMAL")]
    Normal,
    #[serde(rename = "TELEMETRY_PRIORITY_HIGHEST")]
    Highest,
}

/// Role-wide permission document for `SecurityService.SetGlobalPermissions`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GlobalPermissions {
    #[serde(default)]
    pub feature_access: Vec<String>,
    #[serde(default)]
    pub default_camera_access: CameraAccess,
    #[serde(default)]
    pub default_archive_access: ArchiveAccess,
    #[serde(default)]
    pub default_microphone_access: MicrophoneAccess,
    #[serde(default)]
    pub default_telemetry_priority: TelemetryPriority,
    #[serde(default)]
    pub maps_access: MapAccess,
    #[serde(default)]
    pub unrestricted_access: bool,
}

impl GlobalPermissions {
    /// Every feature flag the web client checks.
    pub const ALL_FEATURES: &'static [&'static str] = &[
        "FEATURE_ACCESS_DEVICES_SETUP",
        "FEATURE_ACCESS_ARCHIVES_SETUP",
        "FEATURE_ACCESS_DETECTORS_SETUP",
        "FEATURE_ACCESS_USERS_RIGHTS_SETUP",
        "FEATURE_ACCESS_LAYOUTS_TAB",
        "FEATURE_ACCESS_SETTINGS_SETUP",
        "FEATURE_ACCESS_EXPORT",
        "FEATURE_ACCESS_WEB_UI_LOGIN",
        "FEATURE_ACCESS_EDIT_PTZ_PRESETS",
        "FEATURE_ACCESS_ALLOW_BUTTON_MENU_CAMERA",
        "FEATURE_ACCESS_CHANGING_LAYOUTS",
        "FEATURE_ACCESS_SEARCH",
    ];

    /// Administrator-equivalent permissions.
    pub fn full() -> Self {
        Self {
            feature_access: Self::ALL_FEATURES.iter().map(|f| (*f).to_owned()).collect(),
            default_camera_access: CameraAccess::Full,
            default_archive_access: ArchiveAccess::Full,
            default_microphone_access: MicrophoneAccess::Full,
            default_telemetry_priority: TelemetryPriority::Highest,
            maps_access: MapAccess::Full,
            unrestricted_access: true,
        }
    }
}

/// `{ "permissions": { "<role id>": { ... } } }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SetGlobalPermissionsRequest {
    pub permissions: BTreeMap<String, GlobalPermissions>,
}

/// Per-object access levels keyed by access point.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ObjectPermissions {
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub camera_access: BTreeMap<String, CameraAccess>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub archive_access: BTreeMap<String, ArchiveAccess>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub microphone_access: BTreeMap<String, MicrophoneAccess>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub telemetry_priority: BTreeMap<String, TelemetryPriority>,
}

/// Request for `SecurityService.SetObjectPermissions`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SetObjectPermissionsRequest {
    pub role_id: String,
    pub permissions: ObjectPermissions,
}

// ── Maps ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Background image metadata of a raster map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapImage {
    pub file_name: String,
    pub width: u32,
    pub height: u32,
    /// File size in bytes.
    pub size: u64,
}

/// Map geometry: geographic (tile server) or raster (uploaded image).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MapKind {
    #[serde(rename = "MAP_TYPE_GEO")]
    Geo { center: GeoPoint, zoom: u8 },
    #[serde(rename = "MAP_TYPE_RASTER")]
    Raster { image: MapImage },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapItem {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub kind: MapKind,
}

/// Batch request for `MapService.ChangeMaps`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChangeMapsRequest {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub created: Vec<MapItem>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub removed: Vec<String>,
}

/// Position of a marker on its map: pixels on raster maps, coordinates on
/// geo maps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerPosition {
    Pixel { x: f64, y: f64 },
    Geo(GeoPoint),
}

/// What a marker points at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerTarget {
    /// A camera endpoint (access point).
    Camera { access_point: String },
    /// Another map the operator jumps to.
    Transition { map_id: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerItem {
    pub id: String,
    pub position: MarkerPosition,
    pub target: MarkerTarget,
}

/// Batch request for `MapService.ChangeMarkers`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeMarkersRequest {
    pub map_id: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub created: Vec<MarkerItem>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub removed: Vec<String>,
}

// ── Layouts ──────────────────────────────────────────────────────────

/// Non-video panels a layout cell can host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PanelKind {
    #[serde(rename = "PANEL_MAP")]
    Map,
    #[serde(rename = "PANEL_ALARMS")]
    Alarms,
    #[serde(rename = "PANEL_WEB_PAGE")]
    WebPage,
    #[serde(rename = "PANEL_EVENTS")]
    Events,
}

/// Content of one layout cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellContent {
    Empty,
    Camera { access_point: String },
    Panel { panel: PanelKind },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutCell {
    pub row: u32,
    pub column: u32,
    pub content: CellContent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutItem {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub rows: u32,
    #[serde(default)]
    pub columns: u32,
    #[serde(default)]
    pub cells: Vec<LayoutCell>,
    #[serde(default)]
    pub is_user_defined: bool,
    /// Role ids the layout is shared with.
    #[serde(default)]
    pub shared_with: Vec<String>,
}

/// Batch request for `LayoutManager.Update`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateLayoutsRequest {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub created: Vec<LayoutItem>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub changed: Vec<LayoutItem>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub removed: Vec<String>,
    /// Full display order of the user's layouts, when changing it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_layout_id: Option<String>,
}

/// Reply of `LayoutManager.ListLayouts`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LayoutsResponse {
    #[serde(default)]
    pub items: Vec<LayoutItem>,
    /// Id of the current default layout.
    #[serde(default)]
    pub current: Option<String>,
}

// ── Macros ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacroItem {
    pub guid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// `{ "view_mode": "VIEW_MODE_STRIPPED" }`
#[derive(Debug, Clone, Serialize)]
pub struct ListMacrosRequest {
    pub view_mode: ViewMode,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChangeMacrosRequest {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub removed_macros: Vec<String>,
}
