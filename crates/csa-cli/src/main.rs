//! Command-line entry point for create-shuttle-app.

use clap::Parser;
use csa_cli::Cli;
use csa_cli::commands::create::{self, PromptAborted};
use csa_cli::utils::{print_error, show_cursor};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_tracing(cli.quiet, cli.verbose) {
        eprintln!("{err}");
    }

    if let Err(err) = ctrlc::set_handler(|| std::process::exit(0)) {
        tracing::warn!(error = %err, "failed to install signal handler");
    }

    match create::execute(cli.into_options()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.is::<PromptAborted>() => {
            show_cursor();
            println!();
            ExitCode::FAILURE
        }
        Err(err) => {
            print_error(&err);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("CSA_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
