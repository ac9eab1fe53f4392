use crate::common::command::{
    get_ancestor_digest, get_branch_digest, get_head_digest, read_commit_object,
    repository_with_multiple_commits, run_knot_command,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;
use std::fs;

#[rstest]
fn reset_moves_the_current_ref(
    repository_with_multiple_commits: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_with_multiple_commits;

    let old_tip = get_head_digest(dir.path())?;
    let target_digest = get_ancestor_digest(dir.path(), &old_tip, 2)?;

    // leave something staged to prove reset clears it
    write_file(FileSpec::new(
        dir.path().join("scratch.txt"),
        "scratch".to_string(),
    ));
    run_knot_command(dir.path(), &["add", "scratch.txt"])
        .assert()
        .success();

    run_knot_command(dir.path(), &["reset", "master~2"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "HEAD is now at {} Second commit",
            &target_digest[..7]
        )));

    // the branch file moved and HEAD stayed attached to it
    assert_eq!(get_branch_digest(dir.path(), "master")?, target_digest);
    let head_content = fs::read_to_string(dir.path().join(".knot").join("HEAD"))?;
    assert_eq!(head_content.trim(), "ref: refs/heads/master");

    // the tree matches the target snapshot
    assert!(dir.path().join("file2.txt").exists());
    assert!(!dir.path().join("file3.txt").exists());
    assert!(!dir.path().join("file4.txt").exists());

    // the staging area is empty, the staged file is a stray again
    run_knot_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"[0-9a-f]{40} ")?.not())
        .stdout(predicate::str::is_match(r"(?m)^scratch\.txt$")?);

    // the abandoned commits lose their ref but keep their objects
    run_knot_command(dir.path(), &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fourth commit").not());
    assert!(read_commit_object(dir.path(), &old_tip).is_ok());

    Ok(())
}

#[rstest]
fn reset_refuses_a_dirty_tree(
    repository_with_multiple_commits: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_with_multiple_commits;

    fs::write(dir.path().join("file2.txt"), "local edits")?;

    run_knot_command(dir.path(), &["reset", "master~1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "tracked file file2.txt has uncommitted changes",
        ));

    // the branch did not move
    let head_digest = get_head_digest(dir.path())?;
    let log_output = run_knot_command(dir.path(), &["log"]).assert().success();
    let stdout = String::from_utf8(log_output.get_output().stdout.clone())?;
    assert!(stdout.contains(&format!("commit {head_digest}")));
    assert!(stdout.contains("Fourth commit"));

    Ok(())
}
