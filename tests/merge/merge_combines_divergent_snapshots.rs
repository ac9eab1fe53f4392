use crate::common::command::{
    get_branch_digest, get_head_digest, knot_commit, knot_merge, pinned_author_env,
    read_commit_object, repository_dir, run_knot_command,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;
use std::fs;

/// Merging two branches that touched different files
///
/// History:
///       A (base)
///      / \
///     B   C
///     |   |
///  master  feature
///
/// B edits left.txt, C edits right.txt. The merge commit on master must
/// carry both edits and keep the untouched base file as it was.
#[rstest]
fn merge_combines_divergent_snapshots(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;

    run_knot_command(dir.path(), &["init"]).assert().success();

    // Commit A: the shared base
    write_file(FileSpec::new(
        dir.path().join("base.txt"),
        "base content\n".to_string(),
    ));
    write_file(FileSpec::new(
        dir.path().join("left.txt"),
        "initial\n".to_string(),
    ));
    write_file(FileSpec::new(
        dir.path().join("right.txt"),
        "initial\n".to_string(),
    ));
    run_knot_command(dir.path(), &["add", "."])
        .assert()
        .success();
    knot_commit(dir.path(), "Commit A - base").assert().success();

    // Commit C on feature: edit right.txt
    run_knot_command(dir.path(), &["branch", "feature"])
        .assert()
        .success();
    write_file(FileSpec::new(
        dir.path().join("right.txt"),
        "initial\nfeature change\n".to_string(),
    ));
    run_knot_command(dir.path(), &["add", "."])
        .assert()
        .success();
    knot_commit(dir.path(), "Commit C - feature changes")
        .assert()
        .success();
    let feature_tip = get_head_digest(dir.path())?;

    // Commit B on master: edit left.txt
    run_knot_command(dir.path(), &["switch", "master"])
        .assert()
        .success();
    write_file(FileSpec::new(
        dir.path().join("left.txt"),
        "initial\nmaster change\n".to_string(),
    ));
    run_knot_command(dir.path(), &["add", "."])
        .assert()
        .success();
    knot_commit(dir.path(), "Commit B - master changes")
        .assert()
        .success();
    let master_tip = get_head_digest(dir.path())?;

    // Merge feature into master with the default message
    knot_merge(dir.path(), "feature")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"\[master [0-9a-f]{7}\] Merge commit")?);

    // both edits land, the untouched file stays
    assert_eq!(fs::read_to_string(dir.path().join("base.txt"))?, "base content\n");
    assert_eq!(
        fs::read_to_string(dir.path().join("left.txt"))?,
        "initial\nmaster change\n"
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("right.txt"))?,
        "initial\nfeature change\n"
    );

    // the merge commit lists the current tip first, the incoming tip second
    let merge_digest = get_branch_digest(dir.path(), "master")?;
    let commit_text = read_commit_object(dir.path(), &merge_digest)?;
    let parents = commit_text
        .lines()
        .filter_map(|line| line.strip_prefix("parent "))
        .collect::<Vec<_>>();
    assert_eq!(parents, vec![master_tip.as_str(), feature_tip.as_str()]);

    Ok(())
}

#[rstest]
fn merge_with_a_custom_message(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;

    run_knot_command(dir.path(), &["init"]).assert().success();

    write_file(FileSpec::new(dir.path().join("1.txt"), "one".to_string()));
    run_knot_command(dir.path(), &["add", "."])
        .assert()
        .success();
    knot_commit(dir.path(), "Base").assert().success();

    run_knot_command(dir.path(), &["branch", "feature"])
        .assert()
        .success();
    write_file(FileSpec::new(dir.path().join("2.txt"), "two".to_string()));
    run_knot_command(dir.path(), &["add", "."])
        .assert()
        .success();
    knot_commit(dir.path(), "Feature work").assert().success();

    run_knot_command(dir.path(), &["switch", "master"])
        .assert()
        .success();

    let mut merge_cmd = run_knot_command(dir.path(), &["merge", "feature", "-m", "Bring in feature"]);
    merge_cmd.envs(pinned_author_env());
    merge_cmd
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"\[master [0-9a-f]{7}\] Bring in feature")?);

    // the file only feature knew about is now present
    assert_eq!(fs::read_to_string(dir.path().join("2.txt"))?, "two");

    Ok(())
}
