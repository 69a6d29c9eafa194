use assert_fs::fixture::{FileWriteStr, PathChild};
use fake::Fake;
use fake::faker::lorem::en::Words;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;

mod common;

#[test]
fn log_on_fresh_repository_warns_instead_of_failing() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    common::init_repo(dir.path());

    common::gil_cmd(dir.path())
        .arg("log")
        .assert()
        .success()
        .stdout(predicate::str::contains("no snapshots yet"));

    Ok(())
}

#[test]
fn log_lists_snapshots_newest_first() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    common::init_repo(dir.path());

    for (i, message) in ["first", "second", "third"].iter().enumerate() {
        let content = Words(5..10).fake::<Vec<String>>().join(" ");
        dir.child(format!("file-{i}.txt")).write_str(&content)?;
        common::gil_cmd(dir.path())
            .arg("commit")
            .arg("-m")
            .arg(message)
            .assert()
            .success();
    }

    let output = common::gil_cmd(dir.path())
        .arg("log")
        .arg("--oneline")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let output = String::from_utf8(output)?;

    let messages = output
        .lines()
        .map(|line| line.split_once(' ').unwrap().1)
        .collect::<Vec<_>>();
    assert_eq!(messages, vec!["third", "second", "first"]);

    Ok(())
}

#[test]
fn history_chains_each_commit_to_its_parent() -> Result<(), Box<dyn std::error::Error>> {
    // after N snapshots, history yields exactly N commits in reverse
    // chronological order, each parent-linked to the next, ending at a
    // parent-less root
    let dir = assert_fs::TempDir::new()?;
    common::init_repo(dir.path());

    let n = 4;
    for i in 0..n {
        dir.child("counter.txt").write_str(&format!("tick {i}"))?;
        common::gil_cmd(dir.path())
            .arg("commit")
            .arg("-m")
            .arg(format!("snapshot {i}"))
            .assert()
            .success();
    }

    let repository = common::open_repo(dir.path());
    let commits = repository
        .history()?
        .collect::<anyhow::Result<Vec<_>>>()?;

    assert_eq!(commits.len(), n);
    for window in commits.windows(2) {
        assert_eq!(window[0].1.parent(), Some(&window[1].0));
    }
    assert!(commits.last().unwrap().1.parent().is_none());

    Ok(())
}
