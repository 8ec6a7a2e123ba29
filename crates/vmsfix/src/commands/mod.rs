//! Command handlers, one module per subcommand.

pub mod annihilate;
pub mod config_cmd;
pub mod hosts;
pub mod list;
pub mod ready;
pub mod snapshot;

use vmsfix_core::FixtureContext;

use crate::cli::{Command, GlobalOpts, OutputFormat};
use crate::error::CliError;

/// Route a server-bound command to its handler.
pub async fn dispatch(
    cmd: Command,
    ctx: &mut FixtureContext,
    format: OutputFormat,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Snapshot { kind } => snapshot::handle(ctx, kind, format, global).await,
        Command::List { kind } => list::handle(ctx, kind, format, global).await,
        Command::Annihilate(args) => annihilate::handle(ctx, args, format, global).await,
        Command::WaitReady => ready::handle(ctx, global).await,
        Command::Hosts => hosts::handle(ctx, format, global).await,
        Command::Config(_) => unreachable!("config commands are handled without a server"),
    }
}
