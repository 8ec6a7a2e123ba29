// ── Camera identity ──
//
// A camera is either a standalone device or one video channel of an
// IP server / NVR. The two are addressed through different units, and
// mixing them up makes property changes land on the wrong object.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// How a camera is addressed for property changes.
///
/// Listed cameras are classified by their display id: `"S.C"` is a channel,
/// anything else a device. `ListCameras` carries no field that marks a
/// channel, so a channel renamed to a flat display id comes back as
/// `Device` on the next refresh and its property changes then target the
/// device unit. Keep the dotted form for channels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraAddress {
    /// Standalone camera: properties live on the device unit.
    Device { camera_binding: String },
    /// IP-server channel: properties live on the channel unit, deletion
    /// goes through the parent device.
    Channel {
        videochannel_id: String,
        device_binding: String,
    },
}

impl CameraAddress {
    /// Derive the address from an endpoint access point such as
    /// `hosts/Server1/DeviceIpint.5/SourceEndpoint.video:2:0`.
    pub fn from_access_point(access_point: &str, is_ip_server: bool) -> Self {
        let mut parts = access_point.splitn(4, '/');
        let segments: Vec<&str> = parts.by_ref().take(3).collect();
        let device_binding = if segments.len() == 3 {
            segments.join("/")
        } else {
            access_point.to_owned()
        };

        if !is_ip_server {
            return Self::Device {
                camera_binding: device_binding,
            };
        }

        let channel = parts
            .next()
            .and_then(|rest| rest.strip_prefix("SourceEndpoint.video:"))
            .and_then(|rest| rest.split(':').next())
            .and_then(|ch| ch.parse::<u32>().ok())
            .unwrap_or(0);

        Self::Channel {
            videochannel_id: format!("{device_binding}/VideoChannel.{channel}"),
            device_binding,
        }
    }

    /// Unit uid that display id and name changes must target.
    pub fn property_uid(&self) -> &str {
        match self {
            Self::Device { camera_binding } => camera_binding,
            Self::Channel {
                videochannel_id, ..
            } => videochannel_id,
        }
    }

    /// Unit uid of the physical device (what deletion removes).
    pub fn device_uid(&self) -> &str {
        match self {
            Self::Device { camera_binding } => camera_binding,
            Self::Channel { device_binding, .. } => device_binding,
        }
    }
}

/// A camera as listed by the domain service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// User-visible id: `"7"` standalone, `"5.2"` for an IP-server channel.
    pub display_id: String,
    pub display_name: String,
    /// Stable video endpoint path.
    pub access_point: String,
    pub address: CameraAddress,
    pub is_activated: bool,
    pub vendor: Option<String>,
    pub model: Option<String>,
}

impl Camera {
    pub fn is_ip_server(&self) -> bool {
        matches!(self.address, CameraAddress::Channel { .. })
    }

    /// Device binding of a standalone camera.
    pub fn camera_binding(&self) -> Option<&str> {
        match &self.address {
            CameraAddress::Device { camera_binding } => Some(camera_binding),
            CameraAddress::Channel { .. } => None,
        }
    }

    /// Channel unit of an IP-server camera.
    pub fn videochannel_id(&self) -> Option<&str> {
        match &self.address {
            CameraAddress::Channel {
                videochannel_id, ..
            } => Some(videochannel_id),
            CameraAddress::Device { .. } => None,
        }
    }

    /// Numeric top-level part of the display id (`"5.2"` → 5).
    pub fn parent_index(&self) -> Option<u32> {
        self.display_id.split('.').next()?.parse().ok()
    }
}

/// Whether a batch creates independent devices or channels of one device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceLayout {
    #[default]
    Standalone,
    /// One multi-channel device (IP server / NVR).
    IpServer,
}

/// Display ids a camera batch will receive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayIdPlan {
    /// `S, S+1, ..., S+N-1`
    Standalone(Vec<String>),
    /// Device `S` with channels `"S.0" .. "S.{N-1}"`.
    IpServer { device: String, channels: Vec<String> },
}

impl DisplayIdPlan {
    /// Display ids of the resulting cameras (channels for an IP server).
    pub fn camera_ids(&self) -> &[String] {
        match self {
            Self::Standalone(ids) => ids,
            Self::IpServer { channels, .. } => channels,
        }
    }
}

impl fmt::Display for DisplayIdPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standalone(ids) => write!(f, "[{}]", ids.join(", ")),
            Self::IpServer { device, channels } => {
                write!(f, "{device}[{}]", channels.join(", "))
            }
        }
    }
}

/// Plan display ids for `count` cameras starting at `start`.
///
/// Fails when `S+N-1` does not fit a `u32`.
pub fn plan_display_ids(
    layout: DeviceLayout,
    start: u32,
    count: u32,
) -> Result<DisplayIdPlan, CoreError> {
    match layout {
        DeviceLayout::Standalone => {
            let ids = (0..count)
                .map(|offset| {
                    start
                        .checked_add(offset)
                        .map(|id| id.to_string())
                        .ok_or_else(|| display_id_overflow(start, count))
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(DisplayIdPlan::Standalone(ids))
        }
        DeviceLayout::IpServer => Ok(DisplayIdPlan::IpServer {
            device: start.to_string(),
            channels: (0..count).map(|ch| format!("{start}.{ch}")).collect(),
        }),
    }
}

/// First free top-level display id: one past the highest numeric id in
/// use, or 1 when no camera has a numeric id.
pub(crate) fn next_free_display_id(cameras: &[Camera]) -> Result<u32, CoreError> {
    match cameras.iter().filter_map(Camera::parent_index).max() {
        None => Ok(1),
        Some(max) => max.checked_add(1).ok_or_else(|| display_id_overflow(max, 1)),
    }
}

fn display_id_overflow(start: u32, count: u32) -> CoreError {
    CoreError::Config {
        message: format!("{count} camera display ids starting at {start} overflow u32"),
    }
}
