#[path = "../common/mod.rs"]
mod common;

use assert_fs::TempDir;
use assert_fs::prelude::*;
use common::command::{commit_file, gitlet_commit, init_repository_dir, run_gitlet_command};
use common::{branch_tip, head_ref, status_output};
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::path::Path;

fn checkout(dir: &Path, branch: &str) {
    run_gitlet_command(dir, &["checkout", branch])
        .assert()
        .success();
}

/// `master` and `other` both commit on top of `Initial files`
fn diverge(dir: &Path, on_master: (&str, &str), on_other: (&str, &str)) {
    run_gitlet_command(dir, &["branch", "other"]).assert().success();
    commit_file(dir, on_master.0, on_master.1, "Master work");
    checkout(dir, "other");
    commit_file(dir, on_other.0, on_other.1, "Other work");
    checkout(dir, "master");
}

#[rstest]
fn merging_a_branch_with_itself(init_repository_dir: TempDir) {
    run_gitlet_command(init_repository_dir.path(), &["merge", "master"])
        .assert()
        .code(1)
        .stderr("Cannot merge a branch with itself.\n");
}

#[rstest]
fn merging_an_unknown_branch(init_repository_dir: TempDir) {
    run_gitlet_command(init_repository_dir.path(), &["merge", "ghost"])
        .assert()
        .code(1)
        .stderr("A branch with that name does not exist.\n");
}

#[rstest]
fn staged_changes_block_the_merge(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_gitlet_command(dir, &["branch", "other"]).assert().success();
    init_repository_dir.child("new.txt").write_str("new").unwrap();
    run_gitlet_command(dir, &["add", "new.txt"]).assert().success();

    run_gitlet_command(dir, &["merge", "other"])
        .assert()
        .code(1)
        .stderr("You have uncommitted changes.\n");
}

#[rstest]
fn merging_an_ancestor_changes_nothing(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_gitlet_command(dir, &["branch", "other"]).assert().success();
    commit_file(dir, "3.txt", "three", "Ahead");
    let tip = branch_tip(dir, "master");

    run_gitlet_command(dir, &["merge", "other"])
        .assert()
        .success()
        .stdout("Given branch is an ancestor of the current branch.\n");

    assert_eq!(branch_tip(dir, "master"), tip);
}

#[rstest]
fn fast_forward_checks_out_the_given_branch(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_gitlet_command(dir, &["branch", "other"]).assert().success();
    checkout(dir, "other");
    commit_file(dir, "3.txt", "three", "Ahead on other");
    checkout(dir, "master");
    let master_tip = branch_tip(dir, "master");

    run_gitlet_command(dir, &["merge", "other"])
        .assert()
        .success()
        .stdout("Current branch fast-forwarded.\n");

    assert_eq!(head_ref(dir), "ref: refs/heads/other");
    assert_eq!(branch_tip(dir, "master"), master_tip);
    init_repository_dir.child("3.txt").assert("three");
    run_gitlet_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::diff(status_output(
            &["master", "*other"],
            &[],
            &[],
            &[],
            &[],
        )));
}

#[rstest]
fn clean_merge_records_both_parents(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    diverge(dir, ("1.txt", "uno"), ("3.txt", "three"));
    let master_tip = branch_tip(dir, "master");
    let other_tip = branch_tip(dir, "other");

    run_gitlet_command(dir, &["merge", "other"])
        .assert()
        .success()
        .stdout("");

    init_repository_dir.child("1.txt").assert("uno");
    init_repository_dir.child("3.txt").assert("three");
    init_repository_dir.child("a/2.txt").assert("two");
    run_gitlet_command(dir, &["log"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(format!(
            "===\ncommit {}\nMerge: {} {}\n",
            branch_tip(dir, "master"),
            &master_tip[..7],
            &other_tip[..7]
        )))
        .stdout(predicate::str::contains("\nMerged other into master.\n"));
    run_gitlet_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::diff(status_output(
            &["*master", "other"],
            &[],
            &[],
            &[],
            &[],
        )));
}

#[rstest]
fn file_removed_on_the_given_branch_is_removed(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_gitlet_command(dir, &["branch", "other"]).assert().success();
    commit_file(dir, "3.txt", "three", "Master work");
    checkout(dir, "other");
    run_gitlet_command(dir, &["rm", "a/2.txt"]).assert().success();
    gitlet_commit(dir, "Drop two").assert().success();
    checkout(dir, "master");

    run_gitlet_command(dir, &["merge", "other"])
        .assert()
        .success();

    init_repository_dir
        .child("a/2.txt")
        .assert(predicate::path::missing());
    init_repository_dir.child("3.txt").assert("three");
}

#[rstest]
fn conflicting_edits_are_written_with_markers(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    diverge(dir, ("1.txt", "master side\n"), ("1.txt", "other side\n"));

    run_gitlet_command(dir, &["merge", "other"])
        .assert()
        .success()
        .stdout("Encountered a merge conflict.\n");

    init_repository_dir
        .child("1.txt")
        .assert("<<<<<<< HEAD\nmaster side\n=======\nother side\n>>>>>>>\n");
    run_gitlet_command(dir, &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\nMerged other into master.\n"));
}

#[rstest]
fn edit_against_deletion_conflicts(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_gitlet_command(dir, &["branch", "other"]).assert().success();
    commit_file(dir, "1.txt", "edited\n", "Edit one");
    checkout(dir, "other");
    run_gitlet_command(dir, &["rm", "1.txt"]).assert().success();
    gitlet_commit(dir, "Drop one").assert().success();
    checkout(dir, "master");

    run_gitlet_command(dir, &["merge", "other"])
        .assert()
        .success()
        .stdout("Encountered a merge conflict.\n");

    init_repository_dir
        .child("1.txt")
        .assert("<<<<<<< HEAD\nedited\n=======\n>>>>>>>\n");
}

#[rstest]
fn untracked_file_blocks_the_merge(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    diverge(dir, ("1.txt", "uno"), ("3.txt", "three"));
    let tip = branch_tip(dir, "master");
    init_repository_dir.child("3.txt").write_str("mine").unwrap();

    run_gitlet_command(dir, &["merge", "other"])
        .assert()
        .code(1)
        .stderr(
            "There is an untracked file in the way; delete it, or add and commit it first.\n",
        );

    assert_eq!(branch_tip(dir, "master"), tip);
    init_repository_dir.child("3.txt").assert("mine");
}

#[rstest]
fn second_merge_starts_from_the_previous_merge(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    diverge(dir, ("1.txt", "uno"), ("3.txt", "three"));
    run_gitlet_command(dir, &["merge", "other"])
        .assert()
        .success()
        .stdout("");
    checkout(dir, "other");
    commit_file(dir, "3.txt", "tres", "More other work");
    checkout(dir, "master");

    run_gitlet_command(dir, &["merge", "other"])
        .assert()
        .success()
        .stdout("");

    init_repository_dir.child("1.txt").assert("uno");
    init_repository_dir.child("3.txt").assert("tres");
    init_repository_dir.child("a/2.txt").assert("two");
    run_gitlet_command(dir, &["log"])
        .assert()
        .success()
        .stdout(predicate::str::is_match("^===\ncommit [0-9a-f]{40}\nMerge: ").unwrap());
}

#[rstest]
fn file_turned_into_a_directory_is_refused(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_gitlet_command(dir, &["branch", "other"]).assert().success();
    commit_file(dir, "1.txt", "edited", "Edit one");
    checkout(dir, "other");
    run_gitlet_command(dir, &["rm", "1.txt"]).assert().success();
    commit_file(dir, "1.txt/inner.txt", "inner", "Nest one");
    checkout(dir, "master");
    let tip = branch_tip(dir, "master");

    run_gitlet_command(dir, &["merge", "other"])
        .assert()
        .code(1)
        .stderr("Merging would leave both a file and a directory at 1.txt.\n");

    assert_eq!(branch_tip(dir, "master"), tip);
    init_repository_dir.child("1.txt").assert("edited");
    run_gitlet_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::diff(status_output(
            &["*master", "other"],
            &[],
            &[],
            &[],
            &[],
        )));
}
