// ── Wire → domain conversion ──
//
// Maps `vmsfix_api::models` reply types into snapshot records. Conversions
// are infallible: missing optional fields fall back to defaults.

use vmsfix_api::models::{
    ArchiveItem, CameraItem, GroupItem, LayoutItem, MacroItem, MapItem, RoleItem,
    SecurityConfig,
};

use crate::model::{
    Archive, Camera, CameraAddress, Detector, Group, Layout, Macro, Map, Role, User,
};

/// Channels are recognised by a dotted display id only; see
/// [`CameraAddress`].
impl From<CameraItem> for Camera {
    fn from(item: CameraItem) -> Self {
        let is_ip_server = item.display_id.contains('.');
        Self {
            address: CameraAddress::from_access_point(&item.access_point, is_ip_server),
            display_id: item.display_id,
            display_name: item.display_name,
            access_point: item.access_point,
            is_activated: item.is_activated,
            vendor: item.vendor,
            model: item.model,
        }
    }
}

/// Flatten the detectors nested in camera entries.
pub(crate) fn detectors_of(items: &[CameraItem]) -> Vec<Detector> {
    items
        .iter()
        .flat_map(|camera| {
            camera.detectors.iter().map(|d| Detector {
                access_point: d.access_point.clone(),
                display_id: d.display_id.clone(),
                name: d.display_name.clone(),
                detector_type: d.detector_type.clone(),
                is_activated: d.is_activated,
                camera_access_point: camera.access_point.clone(),
            })
        })
        .collect()
}

impl From<GroupItem> for Group {
    fn from(item: GroupItem) -> Self {
        Self {
            id: item.group_id,
            name: item.name,
            description: item.description,
            parent: Some(item.parent).filter(|p| !p.is_empty()),
        }
    }
}

impl From<RoleItem> for Role {
    fn from(item: RoleItem) -> Self {
        Self {
            id: item.index,
            name: item.name,
            comment: item.comment,
        }
    }
}

/// Split a security config reply into roles and users, attaching each
/// user's role assignments.
pub(crate) fn split_security_config(config: SecurityConfig) -> (Vec<Role>, Vec<User>) {
    let roles = config.roles.into_iter().map(Role::from).collect();
    let users = config
        .users
        .into_iter()
        .map(|u| User {
            roles: config
                .user_assignments
                .iter()
                .filter(|a| a.user_id == u.index)
                .map(|a| a.role_id.clone())
                .collect(),
            id: u.index,
            login: u.login,
            name: u.name,
            enabled: u.enabled,
        })
        .collect();
    (roles, users)
}

impl From<MapItem> for Map {
    fn from(item: MapItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
            kind: item.kind,
        }
    }
}

/// Convert a layout list, marking the default and recording list order.
pub(crate) fn layouts_of(items: Vec<LayoutItem>, current: Option<&str>) -> Vec<Layout> {
    items
        .into_iter()
        .enumerate()
        .map(|(order, item)| Layout {
            is_default: current == Some(item.id.as_str()),
            id: item.id,
            name: item.display_name,
            rows: item.rows,
            columns: item.columns,
            cells: item.cells,
            shared_with: item.shared_with,
            order,
        })
        .collect()
}

impl From<&Layout> for LayoutItem {
    fn from(layout: &Layout) -> Self {
        Self {
            id: layout.id.clone(),
            display_name: layout.name.clone(),
            rows: layout.rows,
            columns: layout.columns,
            cells: layout.cells.clone(),
            is_user_defined: true,
            shared_with: layout.shared_with.clone(),
        }
    }
}

impl From<ArchiveItem> for Archive {
    fn from(item: ArchiveItem) -> Self {
        Self {
            access_point: item.access_point,
            name: item.display_name,
            is_embedded: item.is_embedded,
        }
    }
}

impl From<MacroItem> for Macro {
    fn from(item: MacroItem) -> Self {
        Self {
            id: item.guid,
            name: item.name,
            enabled: item.enabled,
        }
    }
}
