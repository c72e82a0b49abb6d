use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};

use super::{load_config, load_rounds};
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct ExplainCommand {
    /// Round file to explain
    pub round: PathBuf,

    /// Path to stitch.toml (optional; defaults apply when missing)
    #[arg(short, long, default_value = "stitch.toml")]
    pub config: PathBuf,
}

impl ExplainCommand {
    pub fn run(&self) -> Result<()> {
        let config = load_config(&self.config);
        let mut rounds = load_rounds(std::slice::from_ref(&self.round))?;
        let Some((path, round)) = rounds.pop() else {
            return Ok(());
        };
        let report = ops::explain(&path, round, config).wrap_err("Pipeline failed")?;
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
