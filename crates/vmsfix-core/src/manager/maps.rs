// ── Map manager ──
//
// Geo maps carry a center and zoom; raster maps carry the metadata of a
// background image read from the test-data directory. Markers are created
// per map and point at a camera or at another map.

use std::path::Path;

use tracing::debug;

use vmsfix_api::models::{
    ChangeMapsRequest, ChangeMarkersRequest, GeoPoint, MapImage, MapItem, MapKind, MarkerItem,
    MarkerPosition, MarkerTarget, ViewMode,
};
use vmsfix_api::rpc::maps::{CHANGE_MAPS, CHANGE_MARKERS, LIST_MAPS};

use super::{dedup_keys, mint_id};
use crate::context::FixtureContext;
use crate::error::CoreError;
use crate::model::{EntityKind, Map};
use crate::outcome::{Creation, Outcome};
use crate::store::Collected;

/// Dimensions and byte size of an image file.
pub(crate) fn read_map_image(path: &Path) -> Result<MapImage, CoreError> {
    let (width, height) = image::image_dimensions(path).map_err(|e| CoreError::Image {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    let size = std::fs::metadata(path)?.len();
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(MapImage {
        file_name,
        width,
        height,
        size,
    })
}

impl FixtureContext {
    pub async fn create_geo_map(
        &mut self,
        name: &str,
        center: GeoPoint,
        zoom: u8,
    ) -> Result<Creation<String>, CoreError> {
        self.create_map(name, MapKind::Geo { center, zoom }).await
    }

    /// Create a raster map over `file`, relative to the test-data directory.
    pub async fn create_raster_map(
        &mut self,
        name: &str,
        file: &str,
    ) -> Result<Creation<String>, CoreError> {
        let path = self.config.test_data_dir.join(file);
        let image = read_map_image(&path)?;
        debug!(
            file = %path.display(),
            width = image.width,
            height = image.height,
            size = image.size,
            "read raster map image"
        );
        self.create_map(name, MapKind::Raster { image }).await
    }

    async fn create_map(
        &mut self,
        name: &str,
        kind: MapKind,
    ) -> Result<Creation<String>, CoreError> {
        let id = mint_id();
        let request = ChangeMapsRequest {
            created: vec![MapItem {
                id: id.clone(),
                name: name.to_owned(),
                kind,
            }],
            ..ChangeMapsRequest::default()
        };
        let result = self.client.change_maps(&request).await;
        let creation = self.settle_creation(EntityKind::Maps, CHANGE_MAPS, id, name, result)?;
        self.collect(Some(EntityKind::Maps)).await?;
        Ok(creation)
    }

    pub async fn list_maps(&mut self) -> Result<Outcome<Vec<Map>>, CoreError> {
        let result = self.client.list_maps(ViewMode::Full).await;
        let outcome = self
            .settle(LIST_MAPS, result)?
            .map(|items| items.into_iter().map(Map::from).collect::<Vec<_>>());
        if let Outcome::Success(maps) = &outcome {
            self.snapshot.store(Collected::Maps(maps.clone()));
        }
        Ok(outcome)
    }

    // ── Markers ──────────────────────────────────────────────────────

    /// Place a marker for the camera shown as `display_id` on map `map`.
    pub async fn add_camera_marker(
        &mut self,
        map: &str,
        display_id: &str,
        position: MarkerPosition,
    ) -> Result<Creation<String>, CoreError> {
        let map_id = self.snapshot.map_id(map)?.to_owned();
        let access_point = self
            .snapshot
            .camera_by_display_id(display_id)?
            .access_point
            .clone();
        self.add_marker(map_id, position, MarkerTarget::Camera { access_point }, display_id)
            .await
    }

    /// Place a marker on `map` that jumps to map `target`.
    pub async fn add_transition_marker(
        &mut self,
        map: &str,
        target: &str,
        position: MarkerPosition,
    ) -> Result<Creation<String>, CoreError> {
        let map_id = self.snapshot.map_id(map)?.to_owned();
        let target_id = self.snapshot.map_id(target)?.to_owned();
        self.add_marker(
            map_id,
            position,
            MarkerTarget::Transition { map_id: target_id },
            target,
        )
        .await
    }

    async fn add_marker(
        &mut self,
        map_id: String,
        position: MarkerPosition,
        target: MarkerTarget,
        label: &str,
    ) -> Result<Creation<String>, CoreError> {
        let id = mint_id();
        let request = ChangeMarkersRequest {
            map_id,
            created: vec![MarkerItem {
                id: id.clone(),
                position,
                target,
            }],
            removed: Vec::new(),
        };
        let result = self.client.change_markers(&request).await;
        self.settle_creation(EntityKind::Maps, CHANGE_MARKERS, id, label, result)
    }

    // ── Delete ───────────────────────────────────────────────────────

    pub async fn delete_maps(&mut self, ids: &[String]) -> Result<Outcome<()>, CoreError> {
        let ids = dedup_keys(ids.iter().cloned());
        if ids.is_empty() {
            return Ok(Outcome::Success(()));
        }
        let request = ChangeMapsRequest {
            removed: ids,
            ..ChangeMapsRequest::default()
        };
        let result = self.client.change_maps(&request).await;
        let outcome = self.settle(CHANGE_MAPS, result)?;
        self.collect(Some(EntityKind::Maps)).await?;
        Ok(outcome)
    }
}
