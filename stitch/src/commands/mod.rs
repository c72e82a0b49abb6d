mod check;
mod completions;
mod explain;
mod process;

use std::path::{Path, PathBuf};

use check::CheckCommand;
use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use explain::ExplainCommand;
use eyre::Result;
use process::ProcessCommand;
use stitch_codegen::EngineConfig;
use stitch_ir::Round;
use stitch_manifest::{EngineConfigFile, RoundFile};

/// Extension trait for exiting on manifest errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for stitch_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "stitch")]
#[command(version)]
#[command(about = "Synthesize DI modules and JSON adapters from declaration rounds")]
pub(crate) struct Cli {
    /// Log more (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Process(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Explain(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run round files through the engine and write the generated files
    Process(ProcessCommand),

    /// Analyze round files without generating anything
    Check(CheckCommand),

    /// Show the pipeline and what each declaration would produce
    Explain(ExplainCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

/// Load `stitch.toml`, falling back to defaults when it does not exist.
pub(crate) fn load_config(path: &Path) -> EngineConfig {
    let file = EngineConfigFile::from_file_or_default(path).unwrap_or_exit();
    EngineConfig::from_file(&file)
}

/// Parse and lower every round file, in order.
pub(crate) fn load_rounds(paths: &[PathBuf]) -> Result<Vec<(PathBuf, Round)>> {
    paths
        .iter()
        .map(|path| {
            let file = RoundFile::from_file(path).unwrap_or_exit();
            let round = stitch_codegen::lower_round(&file)?;
            Ok((path.clone(), round))
        })
        .collect()
}
