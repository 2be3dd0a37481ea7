mod cli;
mod config;
mod logging;

use std::process::ExitCode;

use clap::Parser;
use eyre::Result;

use crate::cli::Cli;

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    logging::init();

    let cli = Cli::parse();
    cli.execute()
}
