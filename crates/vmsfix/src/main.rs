mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use vmsfix_config::Config;
use vmsfix_core::{FailurePolicy, FixtureConfig, FixtureContext};

use crate::cli::{Cli, Command, GlobalOpts, OutputFormat};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let cfg = vmsfix_config::load_config()?;
    let format = output_format(&cli.global, &cfg);

    match cli.command {
        // Config commands don't need a server
        Command::Config(args) => commands::config_cmd::handle(&args, &cfg, &cli.global),

        cmd => {
            let fixture_config = build_fixture_config(&cli.global, &cfg)?;
            let mut ctx = FixtureContext::new(fixture_config)?;

            tracing::debug!(command = ?cmd, origin = %ctx.origin(), "dispatching command");
            commands::dispatch(cmd, &mut ctx, format, &cli.global).await
        }
    }
}

fn output_format(global: &GlobalOpts, cfg: &Config) -> OutputFormat {
    global.output.unwrap_or(if cfg.defaults.output == "json" {
        OutputFormat::Json
    } else {
        OutputFormat::Table
    })
}

/// Build a `FixtureConfig` from the active profile plus CLI overrides.
///
/// The CLI always runs strict: an operator wants a failed call to stop the
/// command and set the exit code.
fn build_fixture_config(global: &GlobalOpts, cfg: &Config) -> Result<FixtureConfig, CliError> {
    let (name, mut profile) = cfg.profile(global.profile.as_deref())?;
    if let Some(ref origin) = global.origin {
        profile.origin.clone_from(origin);
    }
    if let Some(ref login) = global.login {
        profile.login.clone_from(login);
    }

    let mut config = vmsfix_config::profile_to_fixture_config(&profile, &name, &cfg.defaults)?;
    config.policy = FailurePolicy::Strict;
    Ok(config)
}
