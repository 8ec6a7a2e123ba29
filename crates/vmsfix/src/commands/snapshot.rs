//! `vmsfix snapshot`: collect and summarize.

use serde::Serialize;
use strum::IntoEnumIterator;
use tabled::Tabled;

use vmsfix_core::{EntityKind, FixtureContext, Snapshot};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Serialize, Tabled)]
struct SliceSummary {
    #[tabled(rename = "Kind")]
    kind: EntityKind,
    #[tabled(rename = "Records")]
    records: usize,
    #[tabled(rename = "Collected")]
    collected_at: String,
}

fn summarize(snapshot: &Snapshot, kinds: &[EntityKind]) -> Vec<SliceSummary> {
    kinds
        .iter()
        .map(|&kind| SliceSummary {
            kind,
            records: snapshot.slice(kind).len(),
            collected_at: snapshot
                .collected_at(kind)
                .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                .unwrap_or_default(),
        })
        .collect()
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    ctx: &mut FixtureContext,
    kind: Option<EntityKind>,
    format: OutputFormat,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    ctx.collect(kind).await?;

    let kinds: Vec<EntityKind> = match kind {
        Some(kind) => vec![kind],
        None => EntityKind::iter().collect(),
    };
    let rows = summarize(ctx.snapshot(), &kinds);
    let out = output::render(format, &rows, &rows)?;
    output::print_output(&out, global.quiet);
    Ok(())
}
