#[path = "../common/mod.rs"]
mod common;

use assert_fs::TempDir;
use assert_fs::prelude::*;
use common::command::{init_repository_dir, run_gitlet_command};
use common::status_output;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn clean_repository(init_repository_dir: TempDir) {
    run_gitlet_command(init_repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::diff(status_output(&["*master"], &[], &[], &[], &[])));
}

#[rstest]
fn overwritten_tracked_file_is_modified(init_repository_dir: TempDir) {
    init_repository_dir.child("1.txt").write_str("world").unwrap();

    run_gitlet_command(init_repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::diff(status_output(
            &["*master"],
            &[],
            &[],
            &["1.txt (modified)"],
            &[],
        )));
}

#[rstest]
fn deleted_tracked_file_is_reported(init_repository_dir: TempDir) {
    std::fs::remove_file(init_repository_dir.path().join("a").join("2.txt")).unwrap();

    run_gitlet_command(init_repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::diff(status_output(
            &["*master"],
            &[],
            &[],
            &["a/2.txt (deleted)"],
            &[],
        )));
}

#[rstest]
fn staged_file_changed_again_is_modified(init_repository_dir: TempDir) {
    let file = init_repository_dir.child("new.txt");
    file.write_str("first").unwrap();
    run_gitlet_command(init_repository_dir.path(), &["add", "new.txt"])
        .assert()
        .success();
    file.write_str("second").unwrap();

    run_gitlet_command(init_repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::diff(status_output(
            &["*master"],
            &["new.txt"],
            &[],
            &["new.txt (modified)"],
            &[],
        )));
}

#[rstest]
fn every_section_at_once(init_repository_dir: TempDir) {
    run_gitlet_command(init_repository_dir.path(), &["branch", "other"])
        .assert()
        .success();
    init_repository_dir.child("staged.txt").write_str("s").unwrap();
    run_gitlet_command(init_repository_dir.path(), &["add", "staged.txt"])
        .assert()
        .success();
    run_gitlet_command(init_repository_dir.path(), &["rm", "a/2.txt"])
        .assert()
        .success();
    init_repository_dir.child("1.txt").write_str("changed").unwrap();
    init_repository_dir.child("z/loose.txt").write_str("l").unwrap();

    run_gitlet_command(init_repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::diff(status_output(
            &["*master", "other"],
            &["staged.txt"],
            &["a/2.txt"],
            &["1.txt (modified)"],
            &["z/loose.txt"],
        )));
}
