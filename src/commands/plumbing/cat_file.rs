use crate::areas::repository::Repository;
use crate::artifacts::core::error::GitletError;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    pub fn cat_file(&self, object_id: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let object_id = ObjectId::try_parse(object_id.to_string()).map_err(|_| {
            GitletError::not_found(format!("No object with id {object_id} exists."))
        })?;
        let object = self.database().parse_object(&object_id)?;

        write!(self.writer(), "{}", object.display())?;

        Ok(())
    }
}
