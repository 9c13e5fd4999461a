mod config;
mod prename;

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use crate::prename::Prename;

#[derive(Parser)]
#[command(author, version, name = env!("CARGO_BIN_NAME"), about = "Batch prefix renaming for document files")]
struct Args {
    #[command(subcommand)]
    command: Option<PrenameCommand>,

    /// Only print changes without renaming anything
    #[arg(short, long, global = true)]
    print: bool,

    /// Generate shell completion
    #[arg(short = 'l', long, name = "SHELL")]
    completion: Option<Shell>,

    /// Print verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum PrenameCommand {
    /// Add a fixed prefix to document files and directories
    Add {
        /// Prefix to prepend to each name
        prefix: String,

        /// Optional input directory
        #[arg(value_hint = clap::ValueHint::DirPath)]
        path: Option<PathBuf>,
    },
    /// Remove a single-character "X-" prefix from files and directories
    Strip {
        /// Optional input directory
        #[arg(value_hint = clap::ValueHint::DirPath)]
        path: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if let Some(ref shell) = args.completion {
        organize_tools::generate_shell_completion(*shell, Args::command(), true, env!("CARGO_BIN_NAME"))
    } else {
        Prename::new(args)?.run()
    }
}
