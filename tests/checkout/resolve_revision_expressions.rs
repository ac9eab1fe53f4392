use crate::common::command::{
    get_ancestor_digest, get_head_digest, repository_with_multiple_commits, run_knot_command,
};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
#[case("master", 0)]
#[case("HEAD", 0)]
#[case("@", 0)]
#[case("master^", 1)]
#[case("HEAD~2", 2)]
#[case("@~3", 3)]
#[case("master~2^", 3)]
#[case("HEAD~4", 4)]
fn resolve_revision_expressions(
    repository_with_multiple_commits: TempDir,
    #[case] revision: &str,
    #[case] generations: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_with_multiple_commits;

    let tip_digest = get_head_digest(dir.path())?;
    let expected_digest = get_ancestor_digest(dir.path(), &tip_digest, generations)?;

    run_knot_command(dir.path(), &["checkout", revision])
        .assert()
        .success();

    assert_eq!(get_head_digest(dir.path())?, expected_digest);

    Ok(())
}

#[rstest]
fn resolve_a_unique_digest_prefix(
    repository_with_multiple_commits: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_with_multiple_commits;

    let target_digest = get_ancestor_digest(dir.path(), &get_head_digest(dir.path())?, 2)?;

    run_knot_command(dir.path(), &["checkout", &target_digest[..7]])
        .assert()
        .success();

    assert_eq!(get_head_digest(dir.path())?, target_digest);

    Ok(())
}

#[rstest]
#[case("master~50")]
#[case("nosuchbranch")]
#[case("abc4")]
fn unresolvable_revisions_fail(
    repository_with_multiple_commits: TempDir,
    #[case] revision: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_with_multiple_commits;

    run_knot_command(dir.path(), &["checkout", revision])
        .assert()
        .failure()
        .stderr(predicate::str::contains(format!(
            "Commit not found for revision '{revision}'"
        )));

    // a failed resolution does not move HEAD
    let head_content = std::fs::read_to_string(dir.path().join(".knot").join("HEAD"))?;
    assert_eq!(head_content.trim(), "ref: refs/heads/master");

    Ok(())
}
