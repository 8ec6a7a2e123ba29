// ── Layout manager ──
//
// Layouts are grids of cells holding a camera, a non-video panel or
// nothing. Cameras are named by display id in a `LayoutSpec` and resolved
// to access points through the snapshot at creation time.

use vmsfix_api::models::{
    CellContent, LayoutCell, LayoutItem, PanelKind, UpdateLayoutsRequest, ViewMode,
};
use vmsfix_api::rpc::layouts::{LIST_LAYOUTS, UPDATE_LAYOUTS};

use super::{dedup_keys, mint_id};
use crate::context::FixtureContext;
use crate::convert::layouts_of;
use crate::error::CoreError;
use crate::model::{EntityKind, Layout};
use crate::outcome::{Creation, Outcome};
use crate::store::{Collected, Snapshot};

#[derive(Debug, Clone, PartialEq, Eq)]
enum CellSpec {
    Camera(String),
    Panel(PanelKind),
}

/// Grid description of a layout to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutSpec {
    name: String,
    rows: u32,
    columns: u32,
    cells: Vec<(u32, u32, CellSpec)>,
}

impl LayoutSpec {
    /// Empty `rows` x `columns` grid.
    pub fn grid(name: impl Into<String>, rows: u32, columns: u32) -> Self {
        Self {
            name: name.into(),
            rows,
            columns,
            cells: Vec::new(),
        }
    }

    /// Smallest near-square grid holding `display_ids`, filled row by row.
    pub fn for_cameras(name: impl Into<String>, display_ids: &[&str]) -> Self {
        let count = u32::try_from(display_ids.len()).unwrap_or(u32::MAX).max(1);
        let mut columns = 1;
        while columns * columns < count {
            columns += 1;
        }
        let rows = count.div_ceil(columns);

        let mut spec = Self::grid(name, rows, columns);
        for (index, id) in (0..).zip(display_ids) {
            spec = spec.camera(index / columns, index % columns, id);
        }
        spec
    }

    /// Put the camera shown as `display_id` into cell (`row`, `column`).
    pub fn camera(mut self, row: u32, column: u32, display_id: &str) -> Self {
        self.cells
            .push((row, column, CellSpec::Camera(display_id.to_owned())));
        self
    }

    pub fn panel(mut self, row: u32, column: u32, panel: PanelKind) -> Self {
        self.cells.push((row, column, CellSpec::Panel(panel)));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full row-major cell list; unset cells are empty, later settings of
    /// the same cell win.
    pub(crate) fn resolve(&self, snapshot: &Snapshot) -> Result<Vec<LayoutCell>, CoreError> {
        let mut cells: Vec<LayoutCell> = (0..self.rows)
            .flat_map(|row| {
                (0..self.columns).map(move |column| LayoutCell {
                    row,
                    column,
                    content: CellContent::Empty,
                })
            })
            .collect();

        for (row, column, spec) in &self.cells {
            if *row >= self.rows || *column >= self.columns {
                return Err(CoreError::Config {
                    message: format!(
                        "layout '{}': cell ({row}, {column}) is outside the {}x{} grid",
                        self.name, self.rows, self.columns
                    ),
                });
            }
            let content = match spec {
                CellSpec::Camera(display_id) => CellContent::Camera {
                    access_point: snapshot
                        .camera_by_display_id(display_id)?
                        .access_point
                        .clone(),
                },
                CellSpec::Panel(panel) => CellContent::Panel { panel: *panel },
            };
            let index = usize::try_from(row * self.columns + column)
                .map_err(|e| CoreError::Internal(e.to_string()))?;
            if let Some(cell) = cells.get_mut(index) {
                cell.content = content;
            }
        }
        Ok(cells)
    }
}

impl FixtureContext {
    pub async fn create_layout(&mut self, spec: LayoutSpec) -> Result<Creation<String>, CoreError> {
        let cells = spec.resolve(&self.snapshot)?;
        let id = mint_id();
        let request = UpdateLayoutsRequest {
            created: vec![LayoutItem {
                id: id.clone(),
                display_name: spec.name.clone(),
                rows: spec.rows,
                columns: spec.columns,
                cells,
                is_user_defined: true,
                shared_with: Vec::new(),
            }],
            ..UpdateLayoutsRequest::default()
        };
        let result = self.client.update_layouts(&request).await;
        let creation =
            self.settle_creation(EntityKind::Layouts, UPDATE_LAYOUTS, id, &spec.name, result)?;
        self.collect(Some(EntityKind::Layouts)).await?;
        Ok(creation)
    }

    pub async fn list_layouts(&mut self) -> Result<Outcome<Vec<Layout>>, CoreError> {
        let result = self.client.list_layouts(ViewMode::Full).await;
        let outcome = self
            .settle(LIST_LAYOUTS, result)?
            .map(|resp| layouts_of(resp.items, resp.current.as_deref()));
        if let Outcome::Success(layouts) = &outcome {
            self.snapshot.store(Collected::Layouts(layouts.clone()));
        }
        Ok(outcome)
    }

    /// Put the named layouts first, in the given order; the rest keep
    /// their current relative order behind them.
    pub async fn order_layouts(&mut self, names: &[&str]) -> Result<Outcome<()>, CoreError> {
        let first = names
            .iter()
            .map(|name| self.snapshot.layout_id(name).map(str::to_owned))
            .collect::<Result<Vec<_>, _>>()?;
        let first = dedup_keys(first);

        let mut current: Vec<&Layout> = self.snapshot.layouts().iter().collect();
        current.sort_by_key(|l| l.order);
        let rest = current
            .into_iter()
            .map(|l| l.id.clone())
            .filter(|id| !first.contains(id));
        let order: Vec<String> = first.iter().cloned().chain(rest).collect();

        self.update_layouts(UpdateLayoutsRequest {
            order: Some(order),
            ..UpdateLayoutsRequest::default()
        })
        .await
    }

    pub async fn set_default_layout(&mut self, name: &str) -> Result<Outcome<()>, CoreError> {
        let id = self.snapshot.layout_id(name)?.to_owned();
        self.update_layouts(UpdateLayoutsRequest {
            default_layout_id: Some(id),
            ..UpdateLayoutsRequest::default()
        })
        .await
    }

    /// Share layout `name` with the named roles, replacing earlier sharing.
    pub async fn share_layout(
        &mut self,
        name: &str,
        roles: &[&str],
    ) -> Result<Outcome<()>, CoreError> {
        let role_ids = roles
            .iter()
            .map(|role| self.snapshot.role_id(role).map(str::to_owned))
            .collect::<Result<Vec<_>, _>>()?;
        let id = self.snapshot.layout_id(name)?;
        let mut item = LayoutItem::from(self.snapshot.layout(id)?);
        item.shared_with = dedup_keys(role_ids);

        self.update_layouts(UpdateLayoutsRequest {
            changed: vec![item],
            ..UpdateLayoutsRequest::default()
        })
        .await
    }

    pub async fn delete_layouts(&mut self, ids: &[String]) -> Result<Outcome<()>, CoreError> {
        let ids = dedup_keys(ids.iter().cloned());
        if ids.is_empty() {
            return Ok(Outcome::Success(()));
        }
        self.update_layouts(UpdateLayoutsRequest {
            removed: ids,
            ..UpdateLayoutsRequest::default()
        })
        .await
    }

    async fn update_layouts(
        &mut self,
        request: UpdateLayoutsRequest,
    ) -> Result<Outcome<()>, CoreError> {
        let result = self.client.update_layouts(&request).await;
        let outcome = self.settle(UPDATE_LAYOUTS, result)?;
        self.collect(Some(EntityKind::Layouts)).await?;
        Ok(outcome)
    }
}
