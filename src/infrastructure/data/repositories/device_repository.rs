use surrealdb::Error;

use crate::domain::models::device::{Device, DeviceRegistration};
use crate::infrastructure::data::db_context::surrealdb_context::Database;

const REGISTER_DEVICE: &str = "
BEGIN TRANSACTION;
CREATE type::thing('devices', $device_id) CONTENT $device;
INSERT INTO activation_codes $activation_codes;
INSERT INTO lock_dates $lock_dates;
CREATE type::thing('remote_locks', $device_id) CONTENT { device_id: $device_id, is_locked: false };
COMMIT TRANSACTION;
";

const SET_LOCK_STATE: &str = "
BEGIN TRANSACTION;
UPSERT type::thing('remote_locks', $device_id) SET device_id = $device_id, is_locked = $is_locked;
UPDATE type::thing('devices', $device_id) SET is_locked = $is_locked;
COMMIT TRANSACTION;
";

const DEACTIVATE_DEVICE: &str = "
BEGIN TRANSACTION;
UPDATE type::thing('devices', $device_id) SET is_active = false, is_locked = false;
UPSERT type::thing('remote_locks', $device_id) SET device_id = $device_id, is_locked = false;
COMMIT TRANSACTION;
";

pub struct DeviceRepository {
    db: Database,
    table: String,
}

impl DeviceRepository {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            table: String::from("devices"),
        }
    }

    pub async fn get_by_serial(&self, serial_number: &str) -> Result<Option<Device>, Error> {
        let mut response = self
            .db
            .query(
                "SELECT meta::id(id) AS id, serial_number, customer_name, phone_number, emi_term, \
                        emi_start_date, term_duration, is_active, is_locked, created_at \
                 FROM type::table($table) WHERE serial_number = $serial_number LIMIT 1",
            )
            .bind(("table", self.table.clone()))
            .bind(("serial_number", serial_number.to_owned()))
            .await?;

        response.take::<Option<Device>>(0)
    }

    pub async fn set_active(&self, device_id: &str, is_active: bool) -> Result<(), Error> {
        self.db
            .query("UPDATE type::thing($table, $id) SET is_active = $is_active")
            .bind(("table", self.table.clone()))
            .bind(("id", device_id.to_owned()))
            .bind(("is_active", is_active))
            .await?
            .check()?;
        Ok(())
    }

    /// Runs the whole registration in one transaction.
    pub async fn register(&self, registration: &DeviceRegistration) -> Result<(), Error> {
        self.db
            .query(REGISTER_DEVICE)
            .bind(("device_id", registration.device_id.clone()))
            .bind(("device", registration.device.clone()))
            .bind(("activation_codes", registration.activation_codes.clone()))
            .bind(("lock_dates", registration.lock_dates.clone()))
            .await?
            .check()?;
        Ok(())
    }

    pub async fn set_lock_state(&self, device_id: &str, is_locked: bool) -> Result<(), Error> {
        self.db
            .query(SET_LOCK_STATE)
            .bind(("device_id", device_id.to_owned()))
            .bind(("is_locked", is_locked))
            .await?
            .check()?;
        Ok(())
    }

    pub async fn deactivate(&self, device_id: &str) -> Result<(), Error> {
        self.db
            .query(DEACTIVATE_DEVICE)
            .bind(("device_id", device_id.to_owned()))
            .await?
            .check()?;
        Ok(())
    }
}
