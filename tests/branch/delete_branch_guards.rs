use crate::common::command::{get_head_digest, init_repository_dir, run_knot_command};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn delete_branch_successfully(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    run_knot_command(repository_dir.path(), &["branch", "feature"])
        .assert()
        .success();
    run_knot_command(repository_dir.path(), &["switch", "master"])
        .assert()
        .success();

    let branch_path = repository_dir
        .path()
        .join(".knot")
        .join("refs")
        .join("heads")
        .join("feature");
    let branch_digest = std::fs::read_to_string(&branch_path)?.trim().to_string();

    run_knot_command(repository_dir.path(), &["branch", "feature", "--delete"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "Deleted branch feature (was {}).",
            &branch_digest[..7]
        )));

    assert!(!branch_path.exists());

    Ok(())
}

#[rstest]
fn delete_prunes_empty_ref_directories(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    run_knot_command(repository_dir.path(), &["branch", "feature/login"])
        .assert()
        .success();
    run_knot_command(repository_dir.path(), &["switch", "master"])
        .assert()
        .success();

    let feature_dir = repository_dir
        .path()
        .join(".knot")
        .join("refs")
        .join("heads")
        .join("feature");
    assert!(feature_dir.join("login").is_file());

    run_knot_command(
        repository_dir.path(),
        &["branch", "feature/login", "--delete"],
    )
    .assert()
    .success();

    // the now-empty feature directory is gone as well
    assert!(!feature_dir.exists());

    Ok(())
}

#[rstest]
fn deleting_the_current_branch_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    run_knot_command(repository_dir.path(), &["branch", "master", "-d"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Cannot delete branch 'master' because HEAD is attached to it",
        ));

    run_knot_command(repository_dir.path(), &["log"])
        .assert()
        .success();

    Ok(())
}

#[rstest]
fn delete_without_a_name_defaults_to_the_current_branch(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    // attached: the default target is the branch HEAD sits on, always in use
    run_knot_command(repository_dir.path(), &["branch", "--delete"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Cannot delete branch 'master' because HEAD is attached to it",
        ));

    // detached: there is no current branch to default to
    let tip_digest = get_head_digest(repository_dir.path())?;
    run_knot_command(repository_dir.path(), &["checkout", &tip_digest])
        .assert()
        .success();

    run_knot_command(repository_dir.path(), &["branch", "--delete"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Cannot default to the current branch because HEAD is detached",
        ));

    Ok(())
}

#[rstest]
fn deleting_a_missing_branch_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    run_knot_command(repository_dir.path(), &["branch", "nonexistent", "-d"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Branch 'nonexistent' does not exist"));

    Ok(())
}
