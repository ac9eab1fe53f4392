use crate::common::command::{knot_commit, knot_merge, repository_dir, run_knot_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

/// After a merge the log keeps to the first-parent chain
///
/// History:
///     A --- B --- M   (master)
///      \        /
///       S -----+      (side)
///
/// M lists B first and S second, so the walk from master shows M, B, A and
/// never S.
#[rstest]
fn log_follows_first_parents_only(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;

    run_knot_command(dir.path(), &["init"]).assert().success();

    // Commit A
    write_file(FileSpec::new(dir.path().join("1.txt"), "one".to_string()));
    run_knot_command(dir.path(), &["add", "."])
        .assert()
        .success();
    knot_commit(dir.path(), "Commit A").assert().success();

    // Commit S on side
    run_knot_command(dir.path(), &["branch", "side"])
        .assert()
        .success();
    write_file(FileSpec::new(dir.path().join("side.txt"), "side".to_string()));
    run_knot_command(dir.path(), &["add", "."])
        .assert()
        .success();
    knot_commit(dir.path(), "Side work").assert().success();

    // Commit B on master
    run_knot_command(dir.path(), &["switch", "master"])
        .assert()
        .success();
    write_file(FileSpec::new(dir.path().join("2.txt"), "two".to_string()));
    run_knot_command(dir.path(), &["add", "."])
        .assert()
        .success();
    knot_commit(dir.path(), "Main work").assert().success();

    knot_merge(dir.path(), "side").assert().success();

    let output = run_knot_command(dir.path(), &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Merge commit"))
        .stdout(predicate::str::contains("Main work"))
        .stdout(predicate::str::contains("Commit A"))
        .stdout(predicate::str::contains("Side work").not());

    // newest first along the surviving chain
    let stdout = String::from_utf8(output.get_output().stdout.clone())?;
    let merge_position = stdout.find("Merge commit").unwrap();
    let main_position = stdout.find("Main work").unwrap();
    let base_position = stdout.find("Commit A").unwrap();
    assert!(merge_position < main_position);
    assert!(main_position < base_position);

    Ok(())
}
