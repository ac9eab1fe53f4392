use crate::common::command::{get_head_digest, init_repository_dir, run_knot_command};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
#[case("feature")]
#[case("feature/login")]
#[case("hot-fix_2")]
#[case("v1.2")]
fn create_branch_attaches_head(
    init_repository_dir: TempDir,
    #[case] name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    let tip_digest = get_head_digest(repository_dir.path())?;

    run_knot_command(repository_dir.path(), &["branch", name])
        .assert()
        .success();

    // the ref file holds the source tip, hierarchical names become directories
    let mut branch_path = repository_dir.path().join(".knot").join("refs").join("heads");
    for segment in name.split('/') {
        branch_path = branch_path.join(segment);
    }
    assert!(branch_path.is_file());
    assert_eq!(
        std::fs::read_to_string(&branch_path)?.trim(),
        tip_digest.as_str()
    );

    // HEAD re-attaches to the new branch
    let head_content =
        std::fs::read_to_string(repository_dir.path().join(".knot").join("HEAD"))?;
    assert_eq!(head_content.trim(), format!("ref: refs/heads/{name}"));

    Ok(())
}

#[rstest]
#[case(".hidden")]
#[case("feat..ure")]
#[case("feat^ure")]
#[case("white space")]
#[case("trailing/")]
fn create_branch_with_invalid_name_fails(
    init_repository_dir: TempDir,
    #[case] name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    run_knot_command(repository_dir.path(), &["branch", name])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid branch name"));

    Ok(())
}

#[rstest]
fn create_duplicate_branch_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    run_knot_command(repository_dir.path(), &["branch", "feature"])
        .assert()
        .success();

    run_knot_command(repository_dir.path(), &["branch", "feature"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("branch feature already exists"));

    Ok(())
}
