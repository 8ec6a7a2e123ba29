//! `vmsfix wait-ready`.

use tracing::info;

use vmsfix_core::FixtureContext;

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub async fn handle(ctx: &FixtureContext, global: &GlobalOpts) -> Result<(), CliError> {
    let attempts = ctx.wait_until_ready().await.require(ctx.origin())?;
    info!(attempts, "server ready");
    if !global.quiet {
        eprintln!("{} ready after {attempts} attempt(s)", ctx.origin());
    }
    Ok(())
}
