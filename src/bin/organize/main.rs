mod config;
mod organize;

use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use clap_complete::Shell;

use crate::organize::Organize;

#[derive(Parser)]
#[command(author, version, name = env!("CARGO_BIN_NAME"), about = "Group files into folders by shared name substrings")]
struct Args {
    /// Optional input directory
    #[arg(value_hint = clap::ValueHint::DirPath)]
    path: Option<PathBuf>,

    /// Print debug information
    #[arg(short = 'D', long)]
    debug: bool,

    /// Target file extension to organize (repeatable)
    #[arg(short = 'x', long = "extension", num_args = 1, action = clap::ArgAction::Append, name = "EXTENSION")]
    extensions: Vec<String>,

    /// Print the run summary as JSON
    #[arg(short, long)]
    json: bool,

    /// Minimum common substring length for grouping
    #[arg(short = 'm', long, name = "LENGTH")]
    min_common: Option<usize>,

    /// Minimum accepted length for a derived folder name
    #[arg(short = 'M', long, name = "LABEL_LENGTH")]
    min_label: Option<usize>,

    /// Only print the planned moves without touching any files
    #[arg(short, long)]
    print: bool,

    /// Generate shell completion
    #[arg(short = 'l', long, name = "SHELL")]
    completion: Option<Shell>,

    /// Print verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if let Some(ref shell) = args.completion {
        organize_tools::generate_shell_completion(*shell, Args::command(), true, env!("CARGO_BIN_NAME"))
    } else {
        Organize::new(args)?.run()
    }
}
