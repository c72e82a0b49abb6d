use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};

use super::{load_config, load_rounds};
use crate::{
    ops::{self, ProcessOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct ProcessCommand {
    /// Round files, processed in order
    #[arg(required = true)]
    pub rounds: Vec<PathBuf>,

    /// Path to stitch.toml (optional; defaults apply when missing)
    #[arg(short, long, default_value = "stitch.toml")]
    pub config: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = "build/generated/stitch")]
    pub output: PathBuf,

    /// Print generated files instead of writing them
    #[arg(long)]
    pub dry_run: bool,

    /// Dump the round state after each phase as JSON into this directory
    #[arg(long, value_name = "DIR")]
    pub snapshot: Option<PathBuf>,

    /// Do not emit shrinker keep rules for adapters
    #[arg(long)]
    pub no_keep_rules: bool,

    /// Write nothing for a round that reported an error
    #[arg(long)]
    pub abort_on_error: bool,
}

impl ProcessCommand {
    pub fn run(&self) -> Result<()> {
        let mut config = load_config(&self.config);
        if self.no_keep_rules {
            config.generate_keep_rules = false;
        }
        if self.abort_on_error {
            config.abort_round_on_error = true;
        }

        let rounds = load_rounds(&self.rounds)?;
        let options = ProcessOptions {
            config,
            output: self.output.clone(),
            dry_run: self.dry_run,
            snapshot: self.snapshot.clone(),
        };
        let report = ops::process(rounds, &options).wrap_err("Processing failed")?;

        report.render(&mut TerminalOutput::new());

        if report.has_errors() {
            std::process::exit(1);
        }
        Ok(())
    }
}
