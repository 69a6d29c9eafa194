use crate::areas::repository::Repository;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    /// Print the content of the object with the given (possibly abbreviated) id
    pub fn cat_file(&self, raw_oid: &str) -> anyhow::Result<()> {
        let object_id = self.resolve_oid(raw_oid)?;
        let object = self.database().parse_object(&object_id)?;

        writeln!(self.writer(), "{}", object.display())?;

        Ok(())
    }

    /// Resolve a full or abbreviated hex id to a unique stored object
    pub fn resolve_oid(&self, raw_oid: &str) -> anyhow::Result<ObjectId> {
        // stored names are lowercase, accept either case on the way in
        let raw_oid = raw_oid.to_ascii_lowercase();
        if raw_oid.len() == OBJECT_ID_LENGTH {
            return ObjectId::try_parse(raw_oid);
        }

        let mut matches = self.database().find_objects_by_prefix(&raw_oid)?;
        match matches.len() {
            0 => anyhow::bail!("no object found for prefix {raw_oid}"),
            1 => Ok(matches.remove(0)),
            n => anyhow::bail!("prefix {raw_oid} is ambiguous ({n} matches)"),
        }
    }
}
