use crate::common::command::{
    knot_commit, repository_dir, repository_with_multiple_commits, run_knot_command,
};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;
use std::fs;

#[rstest]
fn checkout_rewrites_the_working_tree(
    repository_with_multiple_commits: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_with_multiple_commits;

    // back to the very first snapshot
    run_knot_command(dir.path(), &["checkout", "master~3"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(
            r"HEAD is now at [0-9a-f]{7} First commit",
        )?);

    assert_eq!(
        fs::read_to_string(dir.path().join("file1.txt"))?,
        "content 1"
    );
    assert!(!dir.path().join("file2.txt").exists());
    assert!(!dir.path().join("file3.txt").exists());
    assert!(!dir.path().join("file4.txt").exists());

    // switching re-attaches and restores the tip snapshot
    run_knot_command(dir.path(), &["switch", "master"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Switched to branch 'master'"));

    assert!(dir.path().join("file2.txt").exists());
    assert!(dir.path().join("file3.txt").exists());
    assert_eq!(
        fs::read_to_string(dir.path().join("file4.txt"))?,
        "content 4"
    );

    Ok(())
}

#[rstest]
fn an_empty_file_round_trips_through_the_store(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;
    run_knot_command(dir.path(), &["init"]).assert().success();

    fs::write(dir.path().join("empty.txt"), "")?;
    run_knot_command(dir.path(), &["add", "empty.txt"])
        .assert()
        .success();
    knot_commit(dir.path(), "Add empty file")
        .assert()
        .success();

    // the zero-byte blob lands in the store under its well-known digest
    let empty_blob = dir
        .path()
        .join(".knot")
        .join("objects")
        .join("blobs")
        .join("da")
        .join("da39a3ee5e6b4b0d3255bfef95601890afd80709");
    assert!(empty_blob.exists());

    fs::write(dir.path().join("empty.txt"), "filled now")?;
    run_knot_command(dir.path(), &["add", "empty.txt"])
        .assert()
        .success();
    knot_commit(dir.path(), "Fill the file").assert().success();

    run_knot_command(dir.path(), &["checkout", "master~1"])
        .assert()
        .success();

    assert_eq!(fs::read_to_string(dir.path().join("empty.txt"))?, "");

    Ok(())
}

#[rstest]
fn untracked_files_survive_a_checkout(
    repository_with_multiple_commits: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_with_multiple_commits;

    fs::write(dir.path().join("notes.txt"), "scratch pad")?;

    run_knot_command(dir.path(), &["checkout", "master~2"])
        .assert()
        .success();

    // only tracked files are migrated, strays stay put
    assert_eq!(
        fs::read_to_string(dir.path().join("notes.txt"))?,
        "scratch pad"
    );
    assert!(!dir.path().join("file3.txt").exists());

    Ok(())
}
