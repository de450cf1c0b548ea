#[path = "../common/mod.rs"]
mod common;

use assert_fs::TempDir;
use assert_fs::prelude::*;
use common::command::{init_repository_dir, repository_dir, run_gitlet_command};
use common::branch_tip;
use predicates::prelude::*;
use rstest::rstest;

// `printf 'hello' | git hash-object --stdin`
const HELLO_OID: &str = "b6fc4c620b67d95f953a5c1c1230aaab5db5a1b0";

#[rstest]
fn hash_object_matches_git(repository_dir: TempDir) {
    repository_dir.child("hello.txt").write_str("hello").unwrap();

    run_gitlet_command(repository_dir.path(), &["hash-object", "hello.txt"])
        .assert()
        .success()
        .stdout(format!("{HELLO_OID}\n"));

    repository_dir
        .child(".gitlet")
        .assert(predicate::path::missing());
}

#[rstest]
fn hash_object_write_stores_the_blob(init_repository_dir: TempDir) {
    init_repository_dir.child("hello.txt").write_str("hello").unwrap();

    run_gitlet_command(init_repository_dir.path(), &["hash-object", "-w", "hello.txt"])
        .assert()
        .success()
        .stdout(format!("{HELLO_OID}\n"));

    init_repository_dir
        .child(format!(".gitlet/objects/{}/{}", &HELLO_OID[..2], &HELLO_OID[2..]))
        .assert(predicate::path::is_file());
    run_gitlet_command(init_repository_dir.path(), &["cat-file", "-p", HELLO_OID])
        .assert()
        .success()
        .stdout("hello");
}

#[rstest]
fn cat_file_prints_a_commit(init_repository_dir: TempDir) {
    let tip = branch_tip(init_repository_dir.path(), "master");

    run_gitlet_command(init_repository_dir.path(), &["cat-file", "-p", &tip])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initial files"));
}

#[rstest]
fn cat_file_of_a_missing_object(init_repository_dir: TempDir) {
    run_gitlet_command(
        init_repository_dir.path(),
        &["cat-file", "-p", "1111111111111111111111111111111111111111"],
    )
    .assert()
    .code(1)
    .stderr("No object with id 1111111111111111111111111111111111111111 exists.\n");
}
