#![allow(dead_code)]

use assert_cmd::Command;
use gil::areas::repository::Repository;
use std::path::Path;

/// Build a `gil` command running in the given directory
pub fn gil_cmd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("gil").expect("gil binary should build");
    cmd.current_dir(dir);
    cmd
}

/// Initialize a repository in the given directory via the CLI
pub fn init_repo(dir: &Path) {
    gil_cmd(dir).arg("init").assert().success();
}

/// Open a repository handle with a discarded writer, for library-level checks
pub fn open_repo(dir: &Path) -> Repository {
    Repository::new(&dir.to_string_lossy(), Box::new(std::io::sink()))
        .expect("repository should open")
}

/// Raw content of the current branch ref file, if any
pub fn read_branch_ref(dir: &Path) -> Option<String> {
    std::fs::read_to_string(dir.join(".gil/refs/heads/main"))
        .ok()
        .map(|content| content.trim().to_string())
}
