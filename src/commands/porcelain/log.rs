use crate::areas::repository::Repository;
use colored::Colorize;
use std::io::Write;

#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    pub oneline: bool,
}

impl Repository {
    /// Print the commit history, newest first
    ///
    /// An empty repository is reported as a warning rather than an error:
    /// there is simply nothing to show yet.
    pub fn log(&self, opts: &LogOptions) -> anyhow::Result<()> {
        if self.refs().read_head()?.is_none() {
            writeln!(
                self.writer(),
                "{} no snapshots yet",
                "warning:".yellow()
            )?;
            return Ok(());
        }

        for item in self.history()? {
            let (commit_oid, commit) = item?;

            if opts.oneline {
                writeln!(
                    self.writer(),
                    "{} {}",
                    commit_oid.to_short_oid().yellow(),
                    commit.short_message()
                )?;
            } else {
                writeln!(self.writer(), "commit {}", commit_oid.as_ref().yellow())?;
                writeln!(self.writer(), "Committer: {}", commit.committer().label())?;
                writeln!(
                    self.writer(),
                    "Date:      {}",
                    commit.committer().readable_timestamp()
                )?;
                writeln!(self.writer())?;
                for message_line in commit.message().lines() {
                    writeln!(self.writer(), "    {}", message_line)?;
                }
                writeln!(self.writer())?;
            }
        }

        Ok(())
    }
}
