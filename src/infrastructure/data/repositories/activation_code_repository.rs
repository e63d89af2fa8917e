use surrealdb::Error;

use crate::domain::models::activation_code::ActivationCode;
use crate::infrastructure::data::db_context::surrealdb_context::Database;

pub struct ActivationCodeRepository {
    db: Database,
    table: String,
}

impl ActivationCodeRepository {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            table: String::from("activation_codes"),
        }
    }

    pub async fn existing_codes(&self, codes: &[String]) -> Result<Vec<String>, Error> {
        if codes.is_empty() {
            return Ok(Vec::new());
        }

        let mut response = self
            .db
            .query("SELECT VALUE code FROM type::table($table) WHERE code INSIDE $codes")
            .bind(("table", self.table.clone()))
            .bind(("codes", codes.to_vec()))
            .await?;

        response.take::<Vec<String>>(0)
    }

    // Single conditional update so a code can only flip to used once.
    pub async fn claim(&self, code: &str) -> Result<Option<ActivationCode>, Error> {
        let mut response = self
            .db
            .query(
                "UPDATE type::table($table) \
                 SET is_used = true, used_at = time::now() \
                 WHERE code = $code AND is_used = false \
                 RETURN device_id, code, term_number, is_used, used_at, created_at",
            )
            .bind(("table", self.table.clone()))
            .bind(("code", code.to_owned()))
            .await?;

        let claimed = response.take::<Vec<ActivationCode>>(0)?;
        Ok(claimed.into_iter().next())
    }

    pub async fn list_by_device(&self, device_id: &str) -> Result<Vec<ActivationCode>, Error> {
        let mut response = self
            .db
            .query(
                "SELECT device_id, code, term_number, is_used, used_at, created_at \
                 FROM type::table($table) WHERE device_id = $device_id ORDER BY term_number",
            )
            .bind(("table", self.table.clone()))
            .bind(("device_id", device_id.to_owned()))
            .await?;

        response.take::<Vec<ActivationCode>>(0)
    }
}
