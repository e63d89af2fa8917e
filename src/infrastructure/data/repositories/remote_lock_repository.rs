use surrealdb::Error;

use crate::domain::models::remote_lock::RemoteLock;
use crate::infrastructure::data::db_context::surrealdb_context::Database;

pub struct RemoteLockRepository {
    db: Database,
    table: String,
}

impl RemoteLockRepository {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            table: String::from("remote_locks"),
        }
    }

    pub async fn get_by_device(&self, device_id: &str) -> Result<Option<RemoteLock>, Error> {
        let mut response = self
            .db
            .query(
                "SELECT device_id, is_locked, created_at, updated_at \
                 FROM type::thing($table, $device_id)",
            )
            .bind(("table", self.table.clone()))
            .bind(("device_id", device_id.to_owned()))
            .await?;

        response.take::<Option<RemoteLock>>(0)
    }
}
