//! `vmsfix list KIND`.

use tabled::Tabled;

use vmsfix_core::{EntityKind, FixtureContext, SnapshotEntry};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
}

impl From<SnapshotEntry> for EntryRow {
    fn from(entry: SnapshotEntry) -> Self {
        Self {
            id: entry.id,
            name: entry.name,
        }
    }
}

/// Refresh `kind` and print it. JSON output carries the full records.
pub async fn handle(
    ctx: &mut FixtureContext,
    kind: EntityKind,
    format: OutputFormat,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let slice = ctx.refresh(kind).await?;
    let rows: Vec<EntryRow> = slice.entries().into_iter().map(EntryRow::from).collect();
    let out = output::render(format, &slice, &rows)?;
    output::print_output(&out, global.quiet);
    Ok(())
}
