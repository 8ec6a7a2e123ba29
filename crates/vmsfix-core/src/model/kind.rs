use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Every entity kind the snapshot mirrors.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Cameras,
    Groups,
    Users,
    Roles,
    Maps,
    Layouts,
    Archives,
    Macros,
    Detectors,
}

impl EntityKind {
    /// Kinds the annihilator can delete. Archives and detectors are
    /// read-only mirrors.
    pub fn is_deletable(self) -> bool {
        !matches!(self, Self::Archives | Self::Detectors)
    }
}
