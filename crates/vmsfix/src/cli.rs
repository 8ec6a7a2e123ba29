//! Clap derive structures for the `vmsfix` CLI.

use std::str::FromStr;

use clap::{Args, Parser, Subcommand, ValueEnum};
use strum::IntoEnumIterator;

use vmsfix_core::EntityKind;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// vmsfix -- inspect and tear down the VMS an end-to-end suite runs against
#[derive(Debug, Parser)]
#[command(
    name = "vmsfix",
    version,
    about = "Inspect, wait for and clean up a VMS under test",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Server profile to use
    #[arg(long, short = 'p', env = "VMSFIX_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Server origin, including any web prefix (overrides profile)
    #[arg(long, env = "VMSFIX_ORIGIN", global = true)]
    pub origin: Option<String>,

    /// Root login (overrides profile)
    #[arg(long, env = "VMSFIX_LOGIN", global = true)]
    pub login: Option<String>,

    /// Output format (defaults to the config's `defaults.output`)
    #[arg(long, short = 'o', env = "VMSFIX_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default)
    Table,
    /// Pretty-printed JSON
    Json,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Collect entity lists and print how many records each kind holds
    Snapshot {
        /// Only collect this kind
        #[arg(value_parser = parse_kind)]
        kind: Option<EntityKind>,
    },

    /// List the records of one kind
    #[command(alias = "ls")]
    List {
        #[arg(value_parser = parse_kind)]
        kind: EntityKind,
    },

    /// Delete every record of a kind, or the given ids
    Annihilate(AnnihilateArgs),

    /// Poll the server until it answers or the attempt budget runs out
    WaitReady,

    /// Print the hosts of the server's domain
    Hosts,

    /// Inspect the configuration file
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
pub struct AnnihilateArgs {
    #[arg(value_parser = parse_kind)]
    pub kind: EntityKind,

    /// Delete everything the server reports
    #[arg(long, conflicts_with = "id", required_unless_present = "id")]
    pub all: bool,

    /// Snapshot id to delete (display id for cameras); repeatable
    #[arg(long = "id", value_name = "ID", num_args = 1..)]
    pub id: Vec<String>,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the loaded configuration with passwords masked
    Show,
    /// Print the config file location
    Path,
}

fn parse_kind(value: &str) -> Result<EntityKind, String> {
    EntityKind::from_str(value).map_err(|_| {
        let names: Vec<String> = EntityKind::iter().map(|k| k.to_string()).collect();
        format!("expected one of: {}", names.join(", "))
    })
}
