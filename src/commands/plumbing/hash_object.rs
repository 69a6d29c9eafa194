use crate::areas::database::StoreOutcome;
use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use colored::Colorize;
use std::io::Write;
use std::path::Path;

impl Repository {
    /// Hash a single file as a blob, optionally storing it
    pub fn hash_object(&self, file_path: &str, write: bool) -> anyhow::Result<()> {
        let content = self.workspace().read_file(Path::new(file_path))?;
        let blob = Blob::new(content);

        let object_id = blob.object_id()?;

        writeln!(self.writer(), "{}", object_id)?;

        if !write {
            return Ok(());
        }

        if self.database().store(&blob)? == StoreOutcome::AlreadyPresent {
            writeln!(
                self.writer(),
                "{} {} already hashed",
                "warning:".yellow(),
                object_id.to_short_oid()
            )?;
        }

        Ok(())
    }
}
