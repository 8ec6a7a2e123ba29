//! `vmsfix annihilate KIND (--all | --id ID...)`.

use serde::Serialize;
use tabled::Tabled;

use vmsfix_core::{AnnihilationReport, FixtureContext, Selection};

use crate::cli::{AnnihilateArgs, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

#[derive(Serialize, Tabled)]
struct ReportRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Result")]
    result: &'static str,
}

fn rows(report: &AnnihilationReport) -> Vec<ReportRow> {
    let row = |id: &String, result| ReportRow {
        id: id.clone(),
        result,
    };
    report
        .deleted
        .iter()
        .map(|id| row(id, "deleted"))
        .chain(report.skipped.iter().map(|id| row(id, "skipped")))
        .chain(report.survivors.iter().map(|id| row(id, "survived")))
        .chain(report.unresolved.iter().map(|id| row(id, "unresolved")))
        .collect()
}

pub async fn handle(
    ctx: &mut FixtureContext,
    args: AnnihilateArgs,
    format: OutputFormat,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let selection = if args.all {
        Selection::All
    } else {
        Selection::Ids(args.id)
    };
    let report = ctx.annihilate(args.kind, selection).await?;

    let rows = rows(&report);
    let out = output::render(format, &rows, &rows)?;
    output::print_output(&out, global.quiet);

    if report.is_clean() {
        Ok(())
    } else {
        Err(CliError::Incomplete {
            kind: report.kind,
            survivors: report.survivors.len() + report.unresolved.len(),
        })
    }
}
