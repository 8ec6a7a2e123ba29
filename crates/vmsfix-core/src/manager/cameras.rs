// ── Camera manager ──
//
// Cameras are configuration units under the active host: a `DeviceIpint`
// per standalone camera, or one `DeviceIpint` with nested `VideoChannel`
// units for an IP server. The display id is the client-chosen identifier.

use tracing::debug;

use vmsfix_api::models::{
    AddedUnits, ChangeConfigRequest, ChangedUnit, Property, RemovedUnit, UnitSpec, ViewMode,
};
use vmsfix_api::rpc::config::CHANGE_CONFIG;
use vmsfix_api::rpc::domain::LIST_CAMERAS;

use super::dedup_keys;
use crate::context::FixtureContext;
use crate::convert::detectors_of;
use crate::error::CoreError;
use crate::model::{Camera, Detector, DeviceLayout, DisplayIdPlan, EntityKind, plan_display_ids};
use crate::outcome::{Creation, Outcome};
use crate::store::Collected;

const DEVICE_UNIT: &str = "DeviceIpint";
const CHANNEL_UNIT: &str = "VideoChannel";

/// A batch of virtual cameras to create in one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraBatch {
    vendor: String,
    model: String,
    count: u32,
    start: Option<u32>,
    layout: DeviceLayout,
    ip_address: String,
    port: u16,
    login: String,
    password: String,
    name_prefix: String,
    activated: bool,
}

impl CameraBatch {
    /// `count` standalone virtual cameras, numbered after the highest
    /// display id in the snapshot.
    pub fn new(count: u32) -> Self {
        Self {
            vendor: "Virtual".into(),
            model: "Virtual several streams".into(),
            count,
            start: None,
            layout: DeviceLayout::Standalone,
            ip_address: "0.0.0.0".into(),
            port: 80,
            login: String::new(),
            password: String::new(),
            name_prefix: "Camera".into(),
            activated: true,
        }
    }

    pub fn vendor(mut self, vendor: impl Into<String>, model: impl Into<String>) -> Self {
        self.vendor = vendor.into();
        self.model = model.into();
        self
    }

    /// Fix the first display id instead of deriving it from the snapshot.
    pub fn starting_at(mut self, display_id: u32) -> Self {
        self.start = Some(display_id);
        self
    }

    /// Create one multi-channel device with `count` channels.
    pub fn ip_server(mut self) -> Self {
        self.layout = DeviceLayout::IpServer;
        self
    }

    pub fn address(mut self, ip_address: impl Into<String>, port: u16) -> Self {
        self.ip_address = ip_address.into();
        self.port = port;
        self
    }

    pub fn credentials(mut self, login: impl Into<String>, password: impl Into<String>) -> Self {
        self.login = login.into();
        self.password = password.into();
        self
    }

    pub fn name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.name_prefix = prefix.into();
        self
    }

    pub fn activated(mut self, activated: bool) -> Self {
        self.activated = activated;
        self
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    fn display_name(&self, display_id: &str) -> String {
        format!("{} {display_id}", self.name_prefix)
    }

    fn device_unit(&self, display_id: &str, units: Vec<UnitSpec>) -> UnitSpec {
        UnitSpec {
            unit_type: DEVICE_UNIT.into(),
            properties: vec![
                Property::string("vendor", &self.vendor),
                Property::string("model", &self.model),
                Property::string("display_id", display_id),
                Property::string("display_name", self.display_name(display_id)),
                Property::string("ip_address", &self.ip_address),
                Property::int("port", i32::from(self.port)),
                Property::string("user", &self.login),
                Property::string("password", &self.password),
                Property::bool("enabled", self.activated),
            ],
            units,
        }
    }

    /// Units to add under the host for a planned batch.
    pub(crate) fn units(&self, plan: &DisplayIdPlan) -> Vec<UnitSpec> {
        match plan {
            DisplayIdPlan::Standalone(ids) => ids
                .iter()
                .map(|id| self.device_unit(id, Vec::new()))
                .collect(),
            DisplayIdPlan::IpServer { device, channels } => {
                let channels = channels
                    .iter()
                    .map(|id| UnitSpec {
                        unit_type: CHANNEL_UNIT.into(),
                        properties: vec![
                            Property::string("display_id", id),
                            Property::string("display_name", self.display_name(id)),
                            Property::bool("enabled", self.activated),
                        ],
                        units: Vec::new(),
                    })
                    .collect();
                vec![self.device_unit(device, channels)]
            }
        }
    }
}

impl FixtureContext {
    // ── Create ───────────────────────────────────────────────────────

    /// Create a camera batch. The returned plan lists the display ids the
    /// cameras were created with.
    pub async fn create_cameras(
        &mut self,
        batch: CameraBatch,
    ) -> Result<Creation<DisplayIdPlan>, CoreError> {
        let start = match batch.start {
            Some(start) => start,
            None => {
                if !self.snapshot.is_collected(EntityKind::Cameras) {
                    self.collect(Some(EntityKind::Cameras)).await?;
                }
                self.snapshot.next_display_id()?
            }
        };
        let plan = plan_display_ids(batch.layout, start, batch.count)?;
        if batch.count == 0 {
            debug!("empty camera batch, nothing to create");
            return Ok(Creation::Confirmed(plan));
        }

        let request = ChangeConfigRequest {
            added: vec![AddedUnits {
                uid: self.unit_uid("").await?,
                units: batch.units(&plan),
            }],
            ..ChangeConfigRequest::default()
        };
        let result = self.client.change_config(&request).await.map(drop);
        let label = format!("{} x{}", batch.name_prefix, batch.count);
        let creation =
            self.settle_creation(EntityKind::Cameras, CHANGE_CONFIG, plan, &label, result)?;
        self.collect(Some(EntityKind::Cameras)).await?;
        Ok(creation)
    }

    // ── List ─────────────────────────────────────────────────────────

    pub async fn list_cameras(&mut self) -> Result<Outcome<Vec<Camera>>, CoreError> {
        let result = self.client.list_cameras(ViewMode::Full).await;
        let outcome = self
            .settle(LIST_CAMERAS, result)?
            .map(|items| items.into_iter().map(Camera::from).collect::<Vec<_>>());
        if let Outcome::Success(cameras) = &outcome {
            self.snapshot.store(Collected::Cameras(cameras.clone()));
        }
        Ok(outcome)
    }

    /// Detectors, flattened from the camera list.
    pub async fn list_detectors(&mut self) -> Result<Outcome<Vec<Detector>>, CoreError> {
        let result = self.client.list_cameras(ViewMode::Full).await;
        let outcome = self
            .settle(LIST_CAMERAS, result)?
            .map(|items| detectors_of(&items));
        if let Outcome::Success(detectors) = &outcome {
            self.snapshot.store(Collected::Detectors(detectors.clone()));
        }
        Ok(outcome)
    }

    // ── Modify ───────────────────────────────────────────────────────

    /// Give the camera currently shown as `display_id` a new display id.
    pub async fn change_camera_display_id(
        &mut self,
        display_id: &str,
        new_display_id: &str,
    ) -> Result<Outcome<()>, CoreError> {
        self.change_camera_property(display_id, Property::string("display_id", new_display_id))
            .await
    }

    pub async fn change_camera_name(
        &mut self,
        display_id: &str,
        name: &str,
    ) -> Result<Outcome<()>, CoreError> {
        self.change_camera_property(display_id, Property::string("display_name", name))
            .await
    }

    /// Standalone cameras change through their device binding, IP-server
    /// channels through their video channel unit.
    async fn change_camera_property(
        &mut self,
        display_id: &str,
        property: Property,
    ) -> Result<Outcome<()>, CoreError> {
        let uid = self
            .snapshot
            .camera_by_display_id(display_id)?
            .address
            .property_uid()
            .to_owned();
        debug!(display_id, uid = %uid, property = %property.id, "changing camera");

        let request = ChangeConfigRequest {
            changed: vec![ChangedUnit {
                uid,
                properties: vec![property],
            }],
            ..ChangeConfigRequest::default()
        };
        let result = self.client.change_config(&request).await.map(drop);
        let outcome = self.settle(CHANGE_CONFIG, result)?;
        self.collect(Some(EntityKind::Cameras)).await?;
        Ok(outcome)
    }

    // ── Delete ───────────────────────────────────────────────────────

    /// Delete cameras by display id. Channels of one IP server collapse to
    /// a single device removal.
    pub async fn delete_cameras(
        &mut self,
        display_ids: &[&str],
    ) -> Result<Outcome<()>, CoreError> {
        let uids = display_ids
            .iter()
            .map(|id| {
                self.snapshot
                    .camera_by_display_id(id)
                    .map(|c| c.address.device_uid().to_owned())
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.remove_camera_devices(&uids).await
    }

    /// Remove device units by uid and refresh cameras.
    pub(crate) async fn remove_camera_devices(
        &mut self,
        uids: &[String],
    ) -> Result<Outcome<()>, CoreError> {
        let uids = dedup_keys(uids.iter().cloned());
        if uids.is_empty() {
            return Ok(Outcome::Success(()));
        }
        let request = ChangeConfigRequest {
            removed: uids.into_iter().map(|uid| RemovedUnit { uid }).collect(),
            ..ChangeConfigRequest::default()
        };
        let result = self.client.change_config(&request).await.map(drop);
        let outcome = self.settle(CHANGE_CONFIG, result)?;
        self.collect(Some(EntityKind::Cameras)).await?;
        Ok(outcome)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use vmsfix_api::models::PropertyValue;

    use super::*;

    fn property<'a>(unit: &'a UnitSpec, id: &str) -> Option<&'a PropertyValue> {
        unit.properties.iter().find(|p| p.id == id).map(|p| &p.value)
    }

    #[test]
    fn standalone_batch_builds_one_device_per_camera() {
        let batch = CameraBatch::new(2).name_prefix("Lobby");
        let plan = plan_display_ids(DeviceLayout::Standalone, 7, 2).unwrap();
        let units = batch.units(&plan);

        assert_eq!(units.len(), 2);
        assert!(units.iter().all(|u| u.unit_type == DEVICE_UNIT && u.units.is_empty()));
        assert_eq!(
            property(&units[1], "display_id"),
            Some(&PropertyValue::ValueString("8".into()))
        );
        assert_eq!(
            property(&units[0], "display_name"),
            Some(&PropertyValue::ValueString("Lobby 7".into()))
        );
    }

    #[test]
    fn ip_server_batch_nests_channels_under_one_device() {
        let batch = CameraBatch::new(3).ip_server();
        let plan = plan_display_ids(DeviceLayout::IpServer, 4, 3).unwrap();
        let units = batch.units(&plan);

        assert_eq!(units.len(), 1);
        assert_eq!(
            property(&units[0], "display_id"),
            Some(&PropertyValue::ValueString("4".into()))
        );
        let channels: Vec<_> = units[0]
            .units
            .iter()
            .map(|u| property(u, "display_id").cloned())
            .collect();
        assert_eq!(
            channels,
            ["4.0", "4.1", "4.2"]
                .map(|id| Some(PropertyValue::ValueString(id.into())))
                .to_vec()
        );
        assert!(units[0].units.iter().all(|u| u.unit_type == CHANNEL_UNIT));
    }
}
