use assert_cmd::Command;
use predicates::prelude::predicate;

mod common;

#[test]
fn new_repository_initiated_with_control_directory() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    let mut sut = Command::cargo_bin("gil")?;

    sut.arg("init").arg(dir.path());

    sut.assert().success().stdout(predicate::str::starts_with(
        "Initialized empty gil repository in",
    ));

    assert!(dir.path().join(".gil/objects").is_dir());
    assert!(dir.path().join(".gil/refs/heads").is_dir());
    assert!(dir.path().join(".gil/refs/tags").is_dir());

    let head = std::fs::read_to_string(dir.path().join(".gil/HEAD"))?;
    assert_eq!(head.trim(), "ref: refs/heads/main");

    Ok(())
}

#[test]
fn reinitializing_existing_repository_warns_and_changes_nothing(
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    common::init_repo(dir.path());

    let head_before = std::fs::read_to_string(dir.path().join(".gil/HEAD"))?;

    common::gil_cmd(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    let head_after = std::fs::read_to_string(dir.path().join(".gil/HEAD"))?;
    assert_eq!(head_before, head_after);

    Ok(())
}

#[test]
fn fresh_repository_has_no_reference() -> Result<(), Box<dyn std::error::Error>> {
    // scenario A: the reference cell of a fresh repository is unset
    let dir = assert_fs::TempDir::new()?;
    common::init_repo(dir.path());

    let repository = common::open_repo(dir.path());
    assert!(repository.refs().read_head()?.is_none());

    Ok(())
}
