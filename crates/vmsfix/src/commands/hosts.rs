//! `vmsfix hosts`.

use tabled::Tabled;

use vmsfix_core::{FixtureContext, Outcome};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct HostRow {
    #[tabled(rename = "Host")]
    name: String,
    #[tabled(rename = "Active")]
    active: String,
}

pub async fn handle(
    ctx: &mut FixtureContext,
    format: OutputFormat,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let hosts = match ctx.hosts().await? {
        Outcome::Success(hosts) => hosts,
        Outcome::Failure(failure) => {
            return Err(CliError::Rpc {
                method: failure.method,
                message: failure.reason,
                status: failure.status,
            });
        }
    };

    let rows: Vec<HostRow> = hosts
        .iter()
        .enumerate()
        .map(|(i, name)| HostRow {
            name: name.clone(),
            active: if i == 0 { "*".into() } else { String::new() },
        })
        .collect();
    let out = output::render(format, &hosts, &rows)?;
    output::print_output(&out, global.quiet);
    Ok(())
}
