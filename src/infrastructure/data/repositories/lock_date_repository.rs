use surrealdb::Error;

use crate::domain::models::lock_date::LockDate;
use crate::infrastructure::data::db_context::surrealdb_context::Database;

pub struct LockDateRepository {
    db: Database,
    table: String,
}

impl LockDateRepository {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            table: String::from("lock_dates"),
        }
    }

    pub async fn list_by_device(&self, device_id: &str) -> Result<Vec<LockDate>, Error> {
        let mut response = self
            .db
            .query(
                "SELECT device_id, term_number, lock_date, is_locked, created_at \
                 FROM type::table($table) WHERE device_id = $device_id ORDER BY term_number",
            )
            .bind(("table", self.table.clone()))
            .bind(("device_id", device_id.to_owned()))
            .await?;

        response.take::<Vec<LockDate>>(0)
    }
}
