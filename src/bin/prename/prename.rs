use std::fs;
use std::path::PathBuf;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use colored::Colorize;
use regex::Regex;

use organize_tools::{
    path_to_file_extension_string, print_bold, print_error, print_warning, resolve_conflict_free_path,
};

use crate::config::Config;
use crate::{Args, PrenameCommand};

/// Matches a single leading uppercase letter or CJK character followed by
/// a dash. Lowercase letters are not treated as prefixes.
static PREFIX_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z\x{4e00}-\x{9fff}])-(.+)$").expect("valid prefix regex"));

/// Maximum numeric suffixes tried for a conflicting new name.
const MAX_CONFLICT_ATTEMPTS: u32 = 100;

/// Prefix renamer for document files and directories.
#[derive(Debug)]
pub struct Prename {
    root: PathBuf,
    mode: Mode,
    config: Config,
}

#[derive(Debug)]
enum Mode {
    Add { prefix: String },
    Strip,
}

impl Prename {
    pub fn new(args: Args) -> Result<Self> {
        let (mode, path) = match args.command {
            Some(PrenameCommand::Add { ref prefix, ref path }) => (
                Mode::Add {
                    prefix: prefix.clone(),
                },
                path.clone(),
            ),
            Some(PrenameCommand::Strip { ref path }) => (Mode::Strip, path.clone()),
            None => anyhow::bail!("Missing subcommand: use 'add <PREFIX>' or 'strip'"),
        };
        let root = organize_tools::resolve_input_path(path.as_deref())?;
        let config = Config::from_args(&args);
        Ok(Self { root, mode, config })
    }

    pub fn run(&self) -> Result<()> {
        let items = self.collect_items()?;
        if items.is_empty() {
            if self.config.verbose {
                println!("Nothing to rename in {}", self.root.display());
            }
            return Ok(());
        }

        let mut renamed = 0usize;
        let mut skipped = 0usize;
        let mut failures: Vec<(String, String)> = Vec::new();

        for name in &items {
            let Some(new_name) = self.new_name_for(name) else {
                skipped += 1;
                if self.config.verbose {
                    println!("Skipping: {name}");
                }
                continue;
            };

            if self.config.dryrun {
                println!("{name} {} {new_name}", "->".green());
                continue;
            }

            let old_path = self.root.join(name);
            let new_path = self.root.join(&new_name);
            let Some(new_path) = resolve_conflict_free_path(&new_path, MAX_CONFLICT_ATTEMPTS) else {
                print_warning!("Too many name conflicts for '{name}', skipping");
                failures.push((name.clone(), "too many name conflicts".to_string()));
                continue;
            };

            match fs::rename(&old_path, &new_path) {
                Ok(()) => {
                    renamed += 1;
                    if self.config.verbose {
                        println!("{name} {} {}", "->".green(), new_path.display());
                    }
                }
                Err(error) => {
                    print_error!("Failed to rename '{name}': {error}");
                    failures.push((name.clone(), error.to_string()));
                }
            }
        }

        if !self.config.dryrun {
            print_bold!("Renamed {renamed} of {} item(s), {skipped} skipped", items.len());
            if !failures.is_empty() {
                print_warning!("Failures:");
                for (index, (name, reason)) in failures.iter().enumerate() {
                    println!("{:02}. {name} | {reason}", index + 1);
                }
                anyhow::bail!("{} item(s) could not be renamed", failures.len());
            }
        }
        Ok(())
    }

    /// The new name for an item, or `None` when it should be skipped.
    fn new_name_for(&self, name: &str) -> Option<String> {
        match &self.mode {
            Mode::Add { prefix } => {
                if name.starts_with(prefix.as_str()) {
                    None
                } else {
                    Some(format!("{prefix}{name}"))
                }
            }
            Mode::Strip => PREFIX_PATTERN
                .captures(name)
                .map(|captures| captures[2].to_string()),
        }
    }

    /// Collect document files and directories in the root, skipping hidden entries.
    ///
    /// The extension filter only applies to files in add mode; strip mode
    /// considers everything since the prefix pattern already narrows matches.
    fn collect_items(&self) -> Result<Vec<String>> {
        let mut items = Vec::new();
        let entries =
            fs::read_dir(&self.root).with_context(|| format!("Failed to read directory '{}'", self.root.display()))?;
        for entry in entries {
            let entry = entry?;
            let name = organize_tools::os_str_to_string(&entry.file_name());
            if name.starts_with('.') {
                continue;
            }
            let is_file = entry.file_type()?.is_file();
            let include = match &self.mode {
                Mode::Add { .. } => {
                    !is_file || self.config.extensions.contains(&path_to_file_extension_string(&entry.path()))
                }
                Mode::Strip => true,
            };
            if include {
                items.push(name);
            }
        }
        items.sort();
        Ok(items)
    }
}
