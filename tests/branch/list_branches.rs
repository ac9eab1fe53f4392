use crate::common::command::{get_head_digest, init_repository_dir, run_knot_command};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn list_branches_marks_the_current_one(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    run_knot_command(repository_dir.path(), &["branch", "dev"])
        .assert()
        .success();
    run_knot_command(repository_dir.path(), &["branch", "feature/login"])
        .assert()
        .success();

    // creating re-attached HEAD, so go back to master before listing
    run_knot_command(repository_dir.path(), &["switch", "master"])
        .assert()
        .success();

    let output = run_knot_command(repository_dir.path(), &["branch"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"(?m)^\* master$")?)
        .stdout(predicate::str::is_match(r"(?m)^  dev$")?)
        .stdout(predicate::str::is_match(r"(?m)^  feature/login$")?);

    // names are listed in sorted order
    let stdout = String::from_utf8(output.get_output().stdout.clone())?;
    let dev_position = stdout.find("dev").unwrap();
    let feature_position = stdout.find("feature/login").unwrap();
    let master_position = stdout.find("master").unwrap();
    assert!(dev_position < feature_position);
    assert!(feature_position < master_position);

    Ok(())
}

#[rstest]
fn a_detached_head_lists_first(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    let tip_digest = get_head_digest(repository_dir.path())?;
    run_knot_command(repository_dir.path(), &["checkout", &tip_digest])
        .assert()
        .success();

    let expected_marker = format!("* (HEAD detached at {})", &tip_digest[..7]);
    let output = run_knot_command(repository_dir.path(), &["branch"])
        .assert()
        .success()
        .stdout(predicate::str::contains(expected_marker.clone()))
        .stdout(predicate::str::is_match(r"(?m)^  master$")?);

    // the detached marker comes before any branch name
    let stdout = String::from_utf8(output.get_output().stdout.clone())?;
    assert!(stdout.starts_with(&expected_marker));

    Ok(())
}
