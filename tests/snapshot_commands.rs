use assert_fs::fixture::{FileWriteStr, PathChild};
use assert_fs::prelude::PathCreateDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;

mod common;

#[test]
fn first_snapshot_creates_a_root_commit() -> Result<(), Box<dyn std::error::Error>> {
    // scenario B: one file, one snapshot, parent-less commit
    let dir = assert_fs::TempDir::new()?;
    common::init_repo(dir.path());
    dir.child("a.txt").write_str("hello")?;

    common::gil_cmd(dir.path())
        .arg("commit")
        .arg("-m")
        .arg("first")
        .assert()
        .success()
        .stdout(predicate::str::is_match(
            r"^\[\(root-commit\) [0-9a-f]{8}\] first\n",
        )?);

    let head = common::read_branch_ref(dir.path()).expect("branch ref should exist");
    assert_eq!(head.len(), 40);
    assert!(head.chars().all(|c| c.is_ascii_hexdigit()));

    let repository = common::open_repo(dir.path());
    let commits = repository
        .history()?
        .collect::<anyhow::Result<Vec<_>>>()?;

    assert_eq!(commits.len(), 1);
    assert!(commits[0].1.parent().is_none());

    Ok(())
}

#[test]
fn modified_file_yields_a_child_commit_with_new_tree() -> Result<(), Box<dyn std::error::Error>> {
    // scenario C: change a file, snapshot again
    let dir = assert_fs::TempDir::new()?;
    common::init_repo(dir.path());
    dir.child("a.txt").write_str("hello")?;

    common::gil_cmd(dir.path())
        .arg("commit")
        .arg("-m")
        .arg("first")
        .assert()
        .success();
    let first_head = common::read_branch_ref(dir.path()).unwrap();

    dir.child("a.txt").write_str("hello!")?;

    common::gil_cmd(dir.path())
        .arg("commit")
        .arg("-m")
        .arg("second")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^\[[0-9a-f]{8}\] second\n")?);
    let second_head = common::read_branch_ref(dir.path()).unwrap();

    assert_ne!(first_head, second_head);

    let repository = common::open_repo(dir.path());
    let commits = repository
        .history()?
        .collect::<anyhow::Result<Vec<_>>>()?;

    assert_eq!(commits.len(), 2);
    assert_eq!(commits[0].0.as_ref(), second_head);
    assert_eq!(commits[0].1.parent(), Some(&commits[1].0));
    assert_ne!(commits[0].1.tree_oid(), commits[1].1.tree_oid());

    Ok(())
}

#[test]
fn commit_reports_written_and_reused_object_counts() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    common::init_repo(dir.path());
    dir.child("a.txt").write_str("alpha")?;
    dir.child("b.txt").write_str("beta")?;

    // two blobs plus the root tree, all new
    common::gil_cmd(dir.path())
        .arg("commit")
        .arg("-m")
        .arg("first")
        .assert()
        .success()
        .stdout(predicate::str::contains("3 objects written, 0 reused"));

    dir.child("a.txt").write_str("alpha changed")?;

    // one new blob and a new root tree; the untouched blob is reused
    common::gil_cmd(dir.path())
        .arg("commit")
        .arg("-m")
        .arg("second")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 objects written, 1 reused"));

    Ok(())
}

#[test]
fn unchanged_tree_is_a_reported_no_op() -> Result<(), Box<dyn std::error::Error>> {
    // scenario D: third snapshot without modification
    let dir = assert_fs::TempDir::new()?;
    common::init_repo(dir.path());
    dir.child("a.txt").write_str("hello")?;

    common::gil_cmd(dir.path())
        .arg("commit")
        .arg("-m")
        .arg("first")
        .assert()
        .success();
    let head_before = common::read_branch_ref(dir.path()).unwrap();

    common::gil_cmd(dir.path())
        .arg("commit")
        .arg("-m")
        .arg("again")
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing changed"));

    let head_after = common::read_branch_ref(dir.path()).unwrap();
    assert_eq!(head_before, head_after);

    Ok(())
}

#[test]
fn nested_directories_are_snapshotted_recursively() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    common::init_repo(dir.path());

    dir.child("a.txt").write_str("top level")?;
    dir.child("sub").create_dir_all()?;
    dir.child("sub/b.txt").write_str("nested")?;
    dir.child("sub/deeper").create_dir_all()?;
    dir.child("sub/deeper/c.txt").write_str("deeply nested")?;

    common::gil_cmd(dir.path())
        .arg("commit")
        .arg("-m")
        .arg("tree of trees")
        .assert()
        .success();

    // the root tree must reference the subtree, which references the deeper one
    let repository = common::open_repo(dir.path());
    let (_, commit) = repository.history()?.next().unwrap()?;
    let root_tree = repository
        .database()
        .parse_object_as_tree(commit.tree_oid())?
        .expect("root tree should be stored");

    let sub_entry = root_tree
        .entries()
        .find(|entry| entry.name() == "sub")
        .expect("root tree should reference sub/");
    let sub_tree = repository
        .database()
        .parse_object_as_tree(sub_entry.oid())?
        .expect("sub should be a tree");

    assert!(sub_tree.entries().any(|entry| entry.name() == "deeper"));

    Ok(())
}
