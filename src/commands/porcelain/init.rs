use crate::areas::refs::DEFAULT_BRANCH;
use crate::areas::repository::Repository;
use anyhow::Context;
use colored::Colorize;
use std::fs;
use std::io::Write;

impl Repository {
    /// Create the `.gil` skeleton: object store, refs and the HEAD symref
    ///
    /// Re-running init on an existing repository is a warned no-op.
    pub fn init(&self) -> anyhow::Result<()> {
        if self.workspace().control_path().exists() {
            writeln!(
                self.writer(),
                "{} gil repository at {} already exists",
                "warning:".yellow(),
                self.workspace().control_path().display()
            )?;
            return Ok(());
        }

        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .gil/objects directory")?;

        fs::create_dir_all(self.refs().heads_path())
            .context("Failed to create .gil/refs/heads directory")?;

        fs::create_dir_all(self.refs().tags_path())
            .context("Failed to create .gil/refs/tags directory")?;

        self.refs()
            .set_head(DEFAULT_BRANCH)
            .context("Failed to create initial HEAD reference")?;

        writeln!(
            self.writer(),
            "Initialized empty gil repository in {}",
            self.workspace().control_path().display()
        )?;

        Ok(())
    }
}
