use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::ProgressBar;
#[cfg(not(test))]
use indicatif::ProgressStyle;
use serde::Serialize;
use walkdir::WalkDir;

use organize_tools::grouping::{group_files, label_for};
use organize_tools::mover::{FileMove, MoveOutcome, place_group};
use organize_tools::{
    format_duration_seconds, path_to_file_extension_string, path_to_filename_string, print_bold, print_error,
    print_warning,
};

use crate::Args;
use crate::config::Config;

#[cfg(not(test))]
const PROGRESS_BAR_CHARS: &str = "=> ";
#[cfg(not(test))]
const PROGRESS_BAR_TEMPLATE: &str = "[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} groups";

/// File organizer that moves related files into shared subfolders.
#[derive(Debug)]
pub struct Organize {
    root: PathBuf,
    config: Config,
}

/// Placement results for one group.
#[derive(Debug, Serialize)]
struct GroupReport {
    folder: String,
    files: Vec<FileMove>,
}

/// Structured result record for a whole organizing run.
#[derive(Debug, Default, Serialize)]
struct RunSummary {
    finished: String,
    total_files: usize,
    group_count: usize,
    moved: usize,
    skipped: usize,
    errors: usize,
    groups: Vec<GroupReport>,
}

impl RunSummary {
    fn add(&mut self, report: GroupReport) {
        for file in &report.files {
            match &file.outcome {
                MoveOutcome::Moved { .. } => self.moved += 1,
                MoveOutcome::AlreadyPlaced => self.skipped += 1,
                MoveOutcome::ConflictExhausted | MoveOutcome::Failed { .. } => self.errors += 1,
            }
        }
        self.groups.push(report);
    }

    /// Itemized failure list: `(filename, reason)` pairs.
    fn failures(&self) -> Vec<(&str, String)> {
        self.groups
            .iter()
            .flat_map(|group| &group.files)
            .filter_map(|file| match &file.outcome {
                MoveOutcome::ConflictExhausted => {
                    Some((file.file_name.as_str(), "too many name conflicts".to_string()))
                }
                MoveOutcome::Failed { error } => Some((file.file_name.as_str(), error.clone())),
                _ => None,
            })
            .collect()
    }
}

impl Organize {
    pub fn new(args: Args) -> Result<Self> {
        let root = organize_tools::resolve_input_path(args.path.as_deref())?;
        let config = Config::from_args(&args);
        if config.debug {
            eprintln!("Config: {config:#?}");
            eprintln!("Root: {}", root.display());
        }
        Ok(Self { root, config })
    }

    pub fn run(&self) -> Result<()> {
        let start = Instant::now();
        let files = self.collect_target_files()?;
        if files.is_empty() {
            if self.config.verbose {
                println!(
                    "No files with target extensions ({}) found in {}",
                    self.config.extensions.join(", "),
                    self.root.display()
                );
            }
            return Ok(());
        }

        let groups = group_files(&files, &self.config.options);
        if self.config.dryrun {
            self.print_plan(&groups);
            return Ok(());
        }

        let mut summary = RunSummary {
            total_files: files.len(),
            group_count: groups.len(),
            ..RunSummary::default()
        };

        let progress = Self::create_progress_bar(groups.len() as u64);
        for group in &groups {
            let label = label_for(group, &self.config.options);
            match place_group(&self.root, group, &label) {
                Ok(files) => {
                    if self.config.verbose {
                        for file in files.iter().filter(|f| matches!(f.outcome, MoveOutcome::Moved { .. })) {
                            progress.println(format!("  {} -> {label}", file.file_name));
                        }
                    }
                    summary.add(GroupReport { folder: label, files });
                }
                Err(error) => {
                    // Folder creation failed: the whole group is an error,
                    // but sibling groups keep going.
                    print_error!("{error:#}");
                    summary.add(GroupReport {
                        folder: label,
                        files: group
                            .iter()
                            .map(|name| FileMove {
                                file_name: name.clone(),
                                outcome: MoveOutcome::Failed {
                                    error: "failed to create group folder".to_string(),
                                },
                            })
                            .collect(),
                    });
                }
            }
            progress.inc(1);
        }
        progress.finish_and_clear();

        summary.finished = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        if self.config.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            Self::print_summary(&summary, start.elapsed().as_secs_f64());
        }

        if summary.errors > 0 {
            anyhow::bail!("{} file(s) could not be organized", summary.errors);
        }
        Ok(())
    }

    /// List files directly in the root directory that match the target extensions.
    ///
    /// # Errors
    /// An unreadable input directory aborts the whole run.
    fn collect_target_files(&self) -> Result<Vec<String>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(&self.root).min_depth(1).max_depth(1) {
            let entry = entry.with_context(|| format!("Failed to read directory '{}'", self.root.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let extension = path_to_file_extension_string(entry.path());
            if self.config.extensions.contains(&extension) {
                files.push(path_to_filename_string(entry.path()));
            }
        }
        Ok(files)
    }

    fn print_plan(&self, groups: &[Vec<String>]) {
        print_bold!("Planned groups ({}):", groups.len());
        for group in groups {
            let label = label_for(group, &self.config.options);
            println!("{}", label.cyan().bold());
            for name in group {
                println!("  {name}");
            }
        }
    }

    fn print_summary(summary: &RunSummary, duration_seconds: f64) {
        print_bold!("File organization complete ({})", summary.finished);
        println!(
            "{} files in {} groups: {} moved, {} skipped, {} errors ({})",
            summary.total_files,
            summary.group_count,
            summary.moved.to_string().green(),
            summary.skipped,
            if summary.errors > 0 {
                summary.errors.to_string().red().to_string()
            } else {
                summary.errors.to_string()
            },
            format_duration_seconds(duration_seconds)
        );
        let failures = summary.failures();
        if !failures.is_empty() {
            print_warning!("Failures:");
            for (index, (name, reason)) in failures.iter().enumerate() {
                println!("{:02}. {name} | {reason}", index + 1);
            }
        }
    }

    #[cfg(not(test))]
    fn create_progress_bar(total: u64) -> ProgressBar {
        let progress = ProgressBar::new(total);
        progress.set_style(
            ProgressStyle::with_template(PROGRESS_BAR_TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars(PROGRESS_BAR_CHARS),
        );
        progress
    }

    #[cfg(test)]
    fn create_progress_bar(total: u64) -> ProgressBar {
        ProgressBar::hidden().with_message(total.to_string())
    }
}
