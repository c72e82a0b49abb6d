use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};

use super::{load_config, load_rounds};
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Round files to analyze
    #[arg(required = true)]
    pub rounds: Vec<PathBuf>,

    /// Path to stitch.toml (optional; defaults apply when missing)
    #[arg(short, long, default_value = "stitch.toml")]
    pub config: PathBuf,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let config = load_config(&self.config);
        let rounds = load_rounds(&self.rounds)?;
        let report = ops::check(rounds, &config).wrap_err("Validation failed")?;

        report.render(&mut TerminalOutput::new());

        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}
