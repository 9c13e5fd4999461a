//! End-to-end tests for the grouping and placement pipeline:
//! group a directory listing, derive folder labels and move the files.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use tempfile::tempdir;

use organize_tools::grouping::{GroupingOptions, group_files, label_for};
use organize_tools::mover::{MoveOutcome, place_group};

fn create_files(dir: &Path, names: &[&str]) -> Vec<String> {
    for name in names {
        let mut file = File::create(dir.join(name)).expect("should create test file");
        write!(file, "content of {name}").expect("should write test file");
    }
    names.iter().map(|n| (*n).to_string()).collect()
}

fn run_pipeline(dir: &Path, files: &[String]) -> Vec<(String, Vec<MoveOutcome>)> {
    let options = GroupingOptions::default();
    let groups = group_files(files, &options);
    let mut results = Vec::new();
    for group in &groups {
        let label = label_for(group, &options);
        let moves = place_group(dir, group, &label).expect("should place group");
        results.push((label, moves.into_iter().map(|m| m.outcome).collect()));
    }
    results
}

#[test]
fn pipeline_groups_and_moves_related_files() {
    let dir = tempdir().expect("should create tempdir");
    let files = create_files(
        dir.path(),
        &[
            "[AuthorA] Report2024.pdf",
            "[AuthorB] Report2023.pdf",
            "Linear Algebra vol 1.pdf",
            "Linear Algebra vol 2.pdf",
            "Unrelated Essay.txt",
        ],
    );

    let results = run_pipeline(dir.path(), &files);

    // Every file moved, none skipped or failed.
    for (_, outcomes) in &results {
        for outcome in outcomes {
            assert!(matches!(outcome, MoveOutcome::Moved { .. }), "unexpected: {outcome:?}");
        }
    }

    assert!(dir.path().join("Report/[AuthorA] Report2024.pdf").exists());
    assert!(dir.path().join("Report/[AuthorB] Report2023.pdf").exists());
    assert!(dir.path().join("Linear Algebra vol/Linear Algebra vol 1.pdf").exists());
    assert!(dir.path().join("Linear Algebra vol/Linear Algebra vol 2.pdf").exists());
    assert!(dir.path().join("Unrelated Essay/Unrelated Essay.txt").exists());
}

#[test]
fn pipeline_preserves_every_input_file() {
    let dir = tempdir().expect("should create tempdir");
    let files = create_files(
        dir.path(),
        &["[AuthorA] Report2024.pdf", "[AuthorB] Report2023.pdf", "123.pdf", "456.pdf"],
    );

    run_pipeline(dir.path(), &files);

    // Partition invariant at the filesystem level: every file exists
    // exactly once somewhere under the root.
    let mut found = Vec::new();
    for entry in walkdir::WalkDir::new(dir.path()) {
        let entry = entry.expect("should read entry");
        if entry.file_type().is_file() {
            found.push(entry.file_name().to_string_lossy().to_string());
        }
    }
    found.sort();
    let mut expected = files.clone();
    expected.sort();
    assert_eq!(found, expected);
}

#[test]
fn pipeline_numeric_names_get_stem_folders() {
    let dir = tempdir().expect("should create tempdir");
    let files = create_files(dir.path(), &["123.pdf", "456.pdf"]);

    let results = run_pipeline(dir.path(), &files);

    assert_eq!(results.len(), 2);
    assert!(dir.path().join("123/123.pdf").exists());
    assert!(dir.path().join("456/456.pdf").exists());
}

#[test]
fn pipeline_tolerates_file_vanishing_before_move() {
    let dir = tempdir().expect("should create tempdir");
    let files = create_files(dir.path(), &["[AuthorA] Report2024.pdf", "[AuthorB] Report2023.pdf"]);

    let options = GroupingOptions::default();
    let groups = group_files(&files, &options);
    assert_eq!(groups.len(), 1);

    // A concurrent actor removes one file between grouping and placement.
    fs::remove_file(dir.path().join("[AuthorB] Report2023.pdf")).expect("should remove file");

    let label = label_for(&groups[0], &options);
    let moves = place_group(dir.path(), &groups[0], &label).expect("should place group");

    let outcomes: Vec<_> = moves.iter().map(|m| &m.outcome).collect();
    assert!(outcomes.iter().any(|o| matches!(o, MoveOutcome::Moved { .. })));
    assert!(outcomes.contains(&&MoveOutcome::AlreadyPlaced));
    assert!(!outcomes.iter().any(|o| matches!(o, MoveOutcome::Failed { .. })));
}

#[test]
fn pipeline_never_overwrites_on_conflict() {
    let dir = tempdir().expect("should create tempdir");
    create_files(dir.path(), &["a.pdf"]);
    fs::create_dir(dir.path().join("GroupX")).expect("should create dir");
    let mut existing = File::create(dir.path().join("GroupX/a.pdf")).expect("should create file");
    write!(existing, "existing").expect("should write");

    let moves = place_group(dir.path(), &["a.pdf".to_string()], "GroupX").expect("should place group");

    assert_eq!(
        moves[0].outcome,
        MoveOutcome::Moved {
            destination: dir.path().join("GroupX/a_1.pdf")
        }
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("GroupX/a.pdf")).expect("should read"),
        "existing"
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("GroupX/a_1.pdf")).expect("should read"),
        "content of a.pdf"
    );
}
