// ── Configuration snapshot ──
//
// Per-context mirror of the server's entity lists. It is a cache, not the
// source of truth: slices only change when a kind is explicitly collected,
// and every name lookup reads the last collected slice.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::CoreError;
use crate::model::{
    Archive, Camera, Detector, EntityKind, Group, Layout, Macro, Map, Role, User,
    next_free_display_id,
};

/// Last fetched entity lists, one slice per [`EntityKind`].
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    cameras: Vec<Camera>,
    groups: Vec<Group>,
    users: Vec<User>,
    roles: Vec<Role>,
    maps: Vec<Map>,
    layouts: Vec<Layout>,
    archives: Vec<Archive>,
    macros: Vec<Macro>,
    detectors: Vec<Detector>,
    collected_at: BTreeMap<EntityKind, DateTime<Utc>>,
}

/// A freshly fetched slice, ready to replace the stored one.
#[derive(Debug, Clone)]
pub(crate) enum Collected {
    Cameras(Vec<Camera>),
    Groups(Vec<Group>),
    Users(Vec<User>),
    Roles(Vec<Role>),
    Maps(Vec<Map>),
    Layouts(Vec<Layout>),
    Archives(Vec<Archive>),
    Macros(Vec<Macro>),
    Detectors(Vec<Detector>),
}

impl Collected {
    pub(crate) fn kind(&self) -> EntityKind {
        match self {
            Self::Cameras(_) => EntityKind::Cameras,
            Self::Groups(_) => EntityKind::Groups,
            Self::Users(_) => EntityKind::Users,
            Self::Roles(_) => EntityKind::Roles,
            Self::Maps(_) => EntityKind::Maps,
            Self::Layouts(_) => EntityKind::Layouts,
            Self::Archives(_) => EntityKind::Archives,
            Self::Macros(_) => EntityKind::Macros,
            Self::Detectors(_) => EntityKind::Detectors,
        }
    }
}

/// Borrowed view of one stored slice. Serializes as the bare record list.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum SnapshotSlice<'a> {
    Cameras(&'a [Camera]),
    Groups(&'a [Group]),
    Users(&'a [User]),
    Roles(&'a [Role]),
    Maps(&'a [Map]),
    Layouts(&'a [Layout]),
    Archives(&'a [Archive]),
    Macros(&'a [Macro]),
    Detectors(&'a [Detector]),
}

/// Kind-independent `(id, name)` view of a snapshot record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotEntry {
    pub id: String,
    pub name: String,
}

impl SnapshotSlice<'_> {
    pub fn len(&self) -> usize {
        match self {
            Self::Cameras(s) => s.len(),
            Self::Groups(s) => s.len(),
            Self::Users(s) => s.len(),
            Self::Roles(s) => s.len(),
            Self::Maps(s) => s.len(),
            Self::Layouts(s) => s.len(),
            Self::Archives(s) => s.len(),
            Self::Macros(s) => s.len(),
            Self::Detectors(s) => s.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ids and human-readable names, in snapshot order.
    pub fn entries(&self) -> Vec<SnapshotEntry> {
        fn entry(id: &str, name: &str) -> SnapshotEntry {
            SnapshotEntry {
                id: id.to_owned(),
                name: name.to_owned(),
            }
        }

        match self {
            Self::Cameras(s) => s
                .iter()
                .map(|c| entry(&c.display_id, &c.display_name))
                .collect(),
            Self::Groups(s) => s.iter().map(|g| entry(&g.id, &g.name)).collect(),
            Self::Users(s) => s.iter().map(|u| entry(&u.id, &u.login)).collect(),
            Self::Roles(s) => s.iter().map(|r| entry(&r.id, &r.name)).collect(),
            Self::Maps(s) => s.iter().map(|m| entry(&m.id, &m.name)).collect(),
            Self::Layouts(s) => s.iter().map(|l| entry(&l.id, &l.name)).collect(),
            Self::Archives(s) => s.iter().map(|a| entry(&a.access_point, &a.name)).collect(),
            Self::Macros(s) => s.iter().map(|m| entry(&m.id, &m.name)).collect(),
            Self::Detectors(s) => s.iter().map(|d| entry(&d.access_point, &d.name)).collect(),
        }
    }
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Slice accessors ──────────────────────────────────────────────

    pub fn cameras(&self) -> &[Camera] {
        &self.cameras
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn maps(&self) -> &[Map] {
        &self.maps
    }

    pub fn layouts(&self) -> &[Layout] {
        &self.layouts
    }

    pub fn archives(&self) -> &[Archive] {
        &self.archives
    }

    pub fn macros(&self) -> &[Macro] {
        &self.macros
    }

    pub fn detectors(&self) -> &[Detector] {
        &self.detectors
    }

    pub fn slice(&self, kind: EntityKind) -> SnapshotSlice<'_> {
        match kind {
            EntityKind::Cameras => SnapshotSlice::Cameras(&self.cameras),
            EntityKind::Groups => SnapshotSlice::Groups(&self.groups),
            EntityKind::Users => SnapshotSlice::Users(&self.users),
            EntityKind::Roles => SnapshotSlice::Roles(&self.roles),
            EntityKind::Maps => SnapshotSlice::Maps(&self.maps),
            EntityKind::Layouts => SnapshotSlice::Layouts(&self.layouts),
            EntityKind::Archives => SnapshotSlice::Archives(&self.archives),
            EntityKind::Macros => SnapshotSlice::Macros(&self.macros),
            EntityKind::Detectors => SnapshotSlice::Detectors(&self.detectors),
        }
    }

    // ── Metadata ─────────────────────────────────────────────────────

    /// When `kind` was last collected, or `None` if never.
    pub fn collected_at(&self, kind: EntityKind) -> Option<DateTime<Utc>> {
        self.collected_at.get(&kind).copied()
    }

    pub fn is_collected(&self, kind: EntityKind) -> bool {
        self.collected_at.contains_key(&kind)
    }

    // ── Mutation ─────────────────────────────────────────────────────

    /// Replace one slice wholesale and stamp its collection time.
    pub(crate) fn store(&mut self, collected: Collected) {
        let kind = collected.kind();
        match collected {
            Collected::Cameras(v) => self.cameras = v,
            Collected::Groups(v) => self.groups = v,
            Collected::Users(v) => self.users = v,
            Collected::Roles(v) => self.roles = v,
            Collected::Maps(v) => self.maps = v,
            Collected::Layouts(v) => self.layouts = v,
            Collected::Archives(v) => self.archives = v,
            Collected::Macros(v) => self.macros = v,
            Collected::Detectors(v) => self.detectors = v,
        }
        self.collected_at.insert(kind, Utc::now());
    }

    // ── Name resolution ──────────────────────────────────────────────

    pub fn user(&self, login: &str) -> Result<&User, CoreError> {
        self.users
            .iter()
            .find(|u| u.login == login)
            .ok_or_else(|| not_found(EntityKind::Users, login))
    }

    pub fn user_id(&self, login: &str) -> Result<&str, CoreError> {
        self.user(login).map(|u| u.id.as_str())
    }

    pub fn role(&self, name: &str) -> Result<&Role, CoreError> {
        self.roles
            .iter()
            .find(|r| r.name == name)
            .ok_or_else(|| not_found(EntityKind::Roles, name))
    }

    pub fn role_id(&self, name: &str) -> Result<&str, CoreError> {
        self.role(name).map(|r| r.id.as_str())
    }

    pub fn group_id(&self, name: &str) -> Result<&str, CoreError> {
        self.groups
            .iter()
            .find(|g| g.name == name)
            .map(|g| g.id.as_str())
            .ok_or_else(|| not_found(EntityKind::Groups, name))
    }

    pub fn map_id(&self, name: &str) -> Result<&str, CoreError> {
        self.maps
            .iter()
            .find(|m| m.name == name)
            .map(|m| m.id.as_str())
            .ok_or_else(|| not_found(EntityKind::Maps, name))
    }

    pub fn layout_id(&self, name: &str) -> Result<&str, CoreError> {
        self.layouts
            .iter()
            .find(|l| l.name == name)
            .map(|l| l.id.as_str())
            .ok_or_else(|| not_found(EntityKind::Layouts, name))
    }

    pub fn layout(&self, id: &str) -> Result<&Layout, CoreError> {
        self.layouts
            .iter()
            .find(|l| l.id == id)
            .ok_or_else(|| not_found(EntityKind::Layouts, id))
    }

    pub fn camera_by_display_id(&self, display_id: &str) -> Result<&Camera, CoreError> {
        self.cameras
            .iter()
            .find(|c| c.display_id == display_id)
            .ok_or_else(|| not_found(EntityKind::Cameras, display_id))
    }

    /// Next unused top-level camera display id.
    pub fn next_display_id(&self) -> Result<u32, CoreError> {
        next_free_display_id(&self.cameras)
    }
}

fn not_found(kind: EntityKind, name: &str) -> CoreError {
    CoreError::NotFound {
        kind,
        name: name.to_owned(),
    }
}
