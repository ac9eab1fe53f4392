use crate::common::command::{
    get_branch_digest, get_head_digest, repository_with_multiple_commits, run_knot_command,
};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;
use std::fs;

#[rstest]
fn checkout_detaches_even_from_a_branch_name(
    repository_with_multiple_commits: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_with_multiple_commits;

    let tip_digest = get_branch_digest(dir.path(), "master")?;

    // naming the branch still moves HEAD to the bare digest
    run_knot_command(dir.path(), &["checkout", "master"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Note: checking out 'master'."))
        .stdout(predicate::str::contains("'detached HEAD' state"))
        .stdout(predicate::str::contains("knot branch <new-branch-name>"))
        .stdout(predicate::str::contains(format!(
            "HEAD is now at {} Fourth commit",
            &tip_digest[..7]
        )));

    let head_content = fs::read_to_string(dir.path().join(".knot").join("HEAD"))?;
    assert_eq!(head_content.trim(), tip_digest.as_str());

    // the branch file itself is untouched
    assert_eq!(get_branch_digest(dir.path(), "master")?, tip_digest);

    Ok(())
}

#[rstest]
fn a_second_checkout_reports_the_previous_position(
    repository_with_multiple_commits: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_with_multiple_commits;

    let tip_digest = get_branch_digest(dir.path(), "master")?;
    run_knot_command(dir.path(), &["checkout", "master"])
        .assert()
        .success();

    // already detached: no notice this time, but the old position is echoed
    run_knot_command(dir.path(), &["checkout", "master~1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Note: checking out").not())
        .stdout(predicate::str::contains(format!(
            "Previous HEAD position was {} Fourth commit",
            &tip_digest[..7]
        )))
        .stdout(predicate::str::is_match(
            r"HEAD is now at [0-9a-f]{7} Third commit",
        )?);

    let head_digest = get_head_digest(dir.path())?;
    assert_ne!(head_digest, tip_digest);

    Ok(())
}
