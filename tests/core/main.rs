//! Repository operations driven through the library, without the binary

use assert_fs::TempDir;
use assert_fs::prelude::*;
use bytes::Bytes;
use gitlet::areas::repository::Repository;
use gitlet::artifacts::core::error::{GitletError, error_kind};
use gitlet::artifacts::objects::blob::Blob;
use gitlet::artifacts::objects::commit::{Commit, Parents};
use gitlet::artifacts::objects::object::Object;
use gitlet::commands::porcelain::add::StageOutcome;
use gitlet::commands::porcelain::merge::MergeOutcome;
use gitlet::config::{Config, parse_commit_date};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::{fixture, rstest};
use std::path::{Path, PathBuf};

fn open(dir: &TempDir) -> Repository {
    let config = Config {
        commit_date: Some(parse_commit_date("2025-07-01 10:52:37 +0200").unwrap()),
        ..Config::default()
    };

    Repository::new(dir.path(), Box::new(std::io::sink()))
        .unwrap()
        .with_config(config)
}

#[fixture]
fn dir() -> TempDir {
    TempDir::new().unwrap()
}

fn commit_file(repository: &Repository, dir: &TempDir, file: &str, content: &str, message: &str) {
    dir.child(file).write_str(content).unwrap();
    repository.stage(Path::new(file)).unwrap();
    repository.commit_snapshot(message).unwrap();
}

fn tip(repository: &Repository) -> Commit {
    repository.active_commit().unwrap().1
}

#[rstest]
fn first_commit_tracks_the_staged_file(dir: TempDir) {
    let repository = open(&dir);
    let root = repository.init_repository().unwrap();
    dir.child("a.txt").write_str("hello").unwrap();

    assert_eq!(repository.stage(Path::new("a.txt")).unwrap(), StageOutcome::Staged);
    let commit_id = repository.commit_snapshot("first").unwrap();

    let commit = tip(&repository);
    assert_eq!(repository.active_commit().unwrap().0.oid(), &commit_id);
    assert_eq!(commit.parents(), &Parents::Normal(root));
    assert_eq!(commit.message(), "first");
    assert_eq!(
        commit.blob_for(Path::new("a.txt")),
        Some(&Blob::new(Bytes::from_static(b"hello")).object_id().unwrap())
    );
    assert!(repository.status_info().unwrap().is_clean());
}

#[rstest]
fn empty_commit_leaves_state_untouched(dir: TempDir) {
    let repository = open(&dir);
    let root = repository.init_repository().unwrap();

    let error = repository.commit_snapshot("nothing").unwrap_err();

    assert!(matches!(error_kind(&error), Some(GitletError::InvalidOperation(_))));
    assert_eq!(repository.active_commit().unwrap().0.oid(), &root);
}

#[rstest]
fn staging_committed_content_is_a_no_op(dir: TempDir) {
    let repository = open(&dir);
    repository.init_repository().unwrap();
    commit_file(&repository, &dir, "a.txt", "hello", "first");

    assert_eq!(repository.stage(Path::new("a.txt")).unwrap(), StageOutcome::NoChanges);
    assert!(repository.index().is_empty());
}

#[rstest]
fn removal_then_commit_drops_the_file(dir: TempDir) {
    let repository = open(&dir);
    repository.init_repository().unwrap();
    commit_file(&repository, &dir, "a.txt", "hello", "first");

    repository.unstage(Path::new("a.txt")).unwrap();
    repository.commit_snapshot("drop").unwrap();

    assert!(!tip(&repository).tracks(Path::new("a.txt")));
    dir.child("a.txt").assert(predicates::path::missing());
}

#[rstest]
fn branch_switch_swaps_the_working_directory(dir: TempDir) {
    let repository = open(&dir);
    repository.init_repository().unwrap();
    commit_file(&repository, &dir, "a.txt", "hello", "first");
    repository.create_branch("b").unwrap();
    commit_file(&repository, &dir, "a.txt", "world", "second");

    repository.checkout_branch("b").unwrap();

    dir.child("a.txt").assert("hello");
    assert_eq!(repository.refs().active_branch_name().unwrap().to_string(), "b");

    repository.checkout_branch("master").unwrap();
    dir.child("a.txt").assert("world");
}

#[rstest]
fn fast_forward_merge_creates_no_commit(dir: TempDir) {
    let repository = open(&dir);
    repository.init_repository().unwrap();
    commit_file(&repository, &dir, "a.txt", "hello", "first");
    repository.create_branch("b").unwrap();
    repository.checkout_branch("b").unwrap();
    commit_file(&repository, &dir, "b.txt", "b", "on b");
    let b_tip = repository.active_commit().unwrap().0.oid().clone();
    repository.checkout_branch("master").unwrap();
    let master_tip = repository.active_commit().unwrap().0.oid().clone();

    let outcome = repository.merge_branch("b").unwrap();

    assert_eq!(outcome, MergeOutcome::FastForward(b_tip.clone()));
    let (active, _) = repository.active_commit().unwrap();
    assert_eq!(active.name().to_string(), "b");
    assert_eq!(active.oid(), &b_tip);
    dir.child("b.txt").assert("b");
    repository.checkout_branch("master").unwrap();
    assert_eq!(repository.active_commit().unwrap().0.oid(), &master_tip);
    dir.child("b.txt").assert(predicates::path::missing());
}

#[rstest]
fn merge_after_a_merge_uses_the_merged_tip_as_split_point(dir: TempDir) {
    let repository = open(&dir);
    repository.init_repository().unwrap();
    commit_file(&repository, &dir, "f.txt", "base", "base");
    repository.create_branch("b").unwrap();
    commit_file(&repository, &dir, "f.txt", "master", "on master");
    repository.checkout_branch("b").unwrap();
    commit_file(&repository, &dir, "g.txt", "g", "on b");
    repository.checkout_branch("master").unwrap();
    let MergeOutcome::Merged { conflicts, .. } = repository.merge_branch("b").unwrap() else {
        panic!("expected a merge commit");
    };
    assert!(conflicts.is_empty());

    repository.checkout_branch("b").unwrap();
    commit_file(&repository, &dir, "g.txt", "g again", "more on b");
    repository.checkout_branch("master").unwrap();

    let MergeOutcome::Merged { commit_id, conflicts } = repository.merge_branch("b").unwrap()
    else {
        panic!("expected a merge commit");
    };

    assert!(conflicts.is_empty());
    assert!(matches!(tip(&repository).parents(), Parents::Merge(_)));
    assert_eq!(repository.active_commit().unwrap().0.oid().clone(), commit_id);
    dir.child("f.txt").assert("master");
    dir.child("g.txt").assert("g again");
}

#[rstest]
fn merge_refuses_a_file_replaced_by_a_directory(dir: TempDir) {
    let repository = open(&dir);
    repository.init_repository().unwrap();
    commit_file(&repository, &dir, "a", "base", "base");
    repository.create_branch("b").unwrap();
    commit_file(&repository, &dir, "a", "master", "on master");
    let master_tip = repository.active_commit().unwrap().0.oid().clone();
    repository.checkout_branch("b").unwrap();
    repository.rm("a").unwrap();
    commit_file(&repository, &dir, "a/b.txt", "nested", "nest a");
    repository.checkout_branch("master").unwrap();

    let error = repository.merge_branch("b").unwrap_err();

    assert!(matches!(error_kind(&error), Some(GitletError::InvalidOperation(_))));
    assert_eq!(repository.active_commit().unwrap().0.oid().clone(), master_tip);
    dir.child("a").assert("master");
}

#[rstest]
fn merge_conflict_is_reported_and_committed(dir: TempDir) {
    let repository = open(&dir);
    repository.init_repository().unwrap();
    commit_file(&repository, &dir, "f.txt", "base\n", "base");
    repository.create_branch("b").unwrap();
    commit_file(&repository, &dir, "f.txt", "x\n", "on master");
    let master_tip = repository.active_commit().unwrap().0.oid().clone();
    repository.checkout_branch("b").unwrap();
    commit_file(&repository, &dir, "f.txt", "y\n", "on b");
    let b_tip = repository.active_commit().unwrap().0.oid().clone();
    repository.checkout_branch("master").unwrap();

    let MergeOutcome::Merged { commit_id, conflicts } = repository.merge_branch("b").unwrap()
    else {
        panic!("expected a merge commit");
    };

    assert_eq!(conflicts, vec![PathBuf::from("f.txt")]);
    dir.child("f.txt")
        .assert("<<<<<<< HEAD\nx\n=======\ny\n>>>>>>>\n");
    let merge_commit = tip(&repository);
    assert_eq!(repository.active_commit().unwrap().0.oid(), &commit_id);
    assert_eq!(merge_commit.parents(), &Parents::Merge([master_tip, b_tip]));
    assert_eq!(merge_commit.message(), "Merged b into master.");
    assert!(repository.status_info().unwrap().is_clean());
}

#[rstest]
fn merge_takes_one_sided_changes_without_conflicts(dir: TempDir) {
    let repository = open(&dir);
    repository.init_repository().unwrap();
    commit_file(&repository, &dir, "shared.txt", "base", "base");
    commit_file(&repository, &dir, "gone.txt", "gone", "base 2");
    repository.create_branch("b").unwrap();
    commit_file(&repository, &dir, "mine.txt", "mine", "on master");
    repository.checkout_branch("b").unwrap();
    commit_file(&repository, &dir, "shared.txt", "theirs", "edit on b");
    repository.unstage(Path::new("gone.txt")).unwrap();
    repository.commit_snapshot("drop on b").unwrap();
    repository.checkout_branch("master").unwrap();

    let MergeOutcome::Merged { conflicts, .. } = repository.merge_branch("b").unwrap() else {
        panic!("expected a merge commit");
    };

    assert!(conflicts.is_empty());
    dir.child("shared.txt").assert("theirs");
    dir.child("mine.txt").assert("mine");
    dir.child("gone.txt").assert(predicates::path::missing());
    assert!(!tip(&repository).tracks(Path::new("gone.txt")));
}

#[rstest]
fn guard_failure_changes_nothing(dir: TempDir) {
    let repository = open(&dir);
    repository.init_repository().unwrap();
    commit_file(&repository, &dir, "a.txt", "hello", "first");
    repository.create_branch("b").unwrap();
    dir.child("loose.txt").write_str("loose").unwrap();

    let error = repository.checkout_branch("b").unwrap_err();

    assert!(matches!(
        error_kind(&error),
        Some(GitletError::Conflict { paths, .. }) if paths == &vec![PathBuf::from("loose.txt")]
    ));
    assert_eq!(repository.refs().active_branch_name().unwrap().to_string(), "master");
    dir.child("loose.txt").assert("loose");
}

#[rstest]
fn checkout_of_a_file_restores_committed_bytes(dir: TempDir) {
    let repository = open(&dir);
    repository.init_repository().unwrap();
    commit_file(&repository, &dir, "a.txt", "hello", "first");
    let first = repository.active_commit().unwrap().0.oid().clone();
    commit_file(&repository, &dir, "a.txt", "world", "second");

    repository
        .checkout_file_from_commit(&first.to_string(), Path::new("a.txt"))
        .unwrap();

    dir.child("a.txt").assert("hello");
    assert_eq!(repository.index().additions().len(), 0);
}

#[rstest]
fn reset_is_a_hard_reset(dir: TempDir) {
    let repository = open(&dir);
    repository.init_repository().unwrap();
    commit_file(&repository, &dir, "a.txt", "hello", "first");
    let first = repository.active_commit().unwrap().0.oid().clone();
    commit_file(&repository, &dir, "b.txt", "b", "second");
    dir.child("a.txt").write_str("hello").unwrap();

    repository.reset_to(&first.to_string()).unwrap();

    assert_eq!(repository.active_commit().unwrap().0.oid(), &first);
    dir.child("b.txt").assert(predicates::path::missing());
    assert!(repository.status_info().unwrap().is_clean());
}

#[rstest]
fn log_and_find_see_the_configured_date(dir: TempDir) {
    let repository = open(&dir);
    repository.init_repository().unwrap();
    commit_file(&repository, &dir, "a.txt", "hello", "first change");

    let entries = repository.log_entries().unwrap();

    assert_eq!(
        entries
            .iter()
            .map(|(_, commit)| commit.message().to_string())
            .collect::<Vec<_>>(),
        vec!["first change", "initial commit"]
    );
    assert_eq!(entries[0].1.readable_timestamp(), "Tue Jul 1 10:52:37 2025 +0200");
    assert_eq!(repository.find_commits("change").unwrap(), vec![entries[0].0.clone()]);
}

#[rstest]
fn repositories_are_independent(dir: TempDir) {
    let other_dir = TempDir::new().unwrap();
    let first = open(&dir);
    let second = open(&other_dir);
    first.init_repository().unwrap();
    second.init_repository().unwrap();

    commit_file(&first, &dir, "a.txt", "hello", "only here");

    assert_eq!(second.log_entries().unwrap().len(), 1);
    assert_eq!(first.log_entries().unwrap().len(), 2);
}

proptest! {
    #[test]
    fn equal_content_is_stored_once(content in proptest::collection::vec(any::<u8>(), 0..256)) {
        let dir = TempDir::new().unwrap();
        let repository = open(&dir);
        repository.init_repository().unwrap();
        let blob = Blob::new(Bytes::from(content.clone()));

        let first = repository.database().store(&blob).unwrap();
        let second = repository.database().store(&Blob::new(Bytes::from(content))).unwrap();

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(repository.database().parse_object_as_blob(&first).unwrap(), blob);
    }
}
