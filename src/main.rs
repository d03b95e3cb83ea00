use anyhow::Context;
use clap::Parser;
use dirsort::cli::{Cli, run_cli};
use dirsort::logging::init_logging;
use std::process::ExitCode;
use tracing::error;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = run_cli(cli.command(), cli.config.as_deref()).context("dirsort aborted");

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
