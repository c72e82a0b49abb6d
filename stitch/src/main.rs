mod commands;
mod ops;
mod reports;
mod telemetry;

use clap::Parser;
use eyre::Result;

use crate::commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    telemetry::init(cli.verbose)?;
    cli.run()
}
