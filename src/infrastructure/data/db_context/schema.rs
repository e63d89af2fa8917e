use super::surrealdb_context::Database;
use surrealdb::Error;

const DEFINE_DEVICES: &str = r#"
DEFINE TABLE IF NOT EXISTS devices SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS serial_number ON TABLE devices TYPE string;
DEFINE FIELD IF NOT EXISTS customer_name ON TABLE devices TYPE string;
DEFINE FIELD IF NOT EXISTS phone_number ON TABLE devices TYPE string;
DEFINE FIELD IF NOT EXISTS emi_term ON TABLE devices TYPE int ASSERT $value >= 1;
DEFINE FIELD IF NOT EXISTS emi_start_date ON TABLE devices TYPE string;
DEFINE FIELD IF NOT EXISTS term_duration ON TABLE devices TYPE int ASSERT $value INSIDE [7, 15, 30];
DEFINE FIELD IF NOT EXISTS is_active ON TABLE devices TYPE bool DEFAULT false;
DEFINE FIELD IF NOT EXISTS is_locked ON TABLE devices TYPE bool DEFAULT false;
DEFINE FIELD IF NOT EXISTS created_at ON TABLE devices TYPE datetime DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS devices_serial_number ON TABLE devices COLUMNS serial_number UNIQUE;
"#;

const DEFINE_ACTIVATION_CODES: &str = r#"
DEFINE TABLE IF NOT EXISTS activation_codes SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS device_id ON TABLE activation_codes TYPE string;
DEFINE FIELD IF NOT EXISTS code ON TABLE activation_codes TYPE string;
DEFINE FIELD IF NOT EXISTS term_number ON TABLE activation_codes TYPE int ASSERT $value >= 1;
DEFINE FIELD IF NOT EXISTS is_used ON TABLE activation_codes TYPE bool DEFAULT false;
DEFINE FIELD IF NOT EXISTS used_at ON TABLE activation_codes TYPE option<datetime>;
DEFINE FIELD IF NOT EXISTS created_at ON TABLE activation_codes TYPE datetime DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS activation_codes_code ON TABLE activation_codes COLUMNS code UNIQUE;
DEFINE INDEX IF NOT EXISTS activation_codes_term ON TABLE activation_codes COLUMNS device_id, term_number UNIQUE;
"#;

const DEFINE_LOCK_DATES: &str = r#"
DEFINE TABLE IF NOT EXISTS lock_dates SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS device_id ON TABLE lock_dates TYPE string;
DEFINE FIELD IF NOT EXISTS term_number ON TABLE lock_dates TYPE int ASSERT $value >= 1;
DEFINE FIELD IF NOT EXISTS lock_date ON TABLE lock_dates TYPE string;
DEFINE FIELD IF NOT EXISTS is_locked ON TABLE lock_dates TYPE bool DEFAULT false;
DEFINE FIELD IF NOT EXISTS created_at ON TABLE lock_dates TYPE datetime DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS lock_dates_term ON TABLE lock_dates COLUMNS device_id, term_number UNIQUE;
"#;

// Records are keyed by device id, one per device.
const DEFINE_REMOTE_LOCKS: &str = r#"
DEFINE TABLE IF NOT EXISTS remote_locks SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS device_id ON TABLE remote_locks TYPE string;
DEFINE FIELD IF NOT EXISTS is_locked ON TABLE remote_locks TYPE bool DEFAULT false;
DEFINE FIELD IF NOT EXISTS created_at ON TABLE remote_locks TYPE datetime DEFAULT time::now();
DEFINE FIELD IF NOT EXISTS updated_at ON TABLE remote_locks TYPE datetime VALUE time::now();
DEFINE INDEX IF NOT EXISTS remote_locks_device ON TABLE remote_locks COLUMNS device_id UNIQUE;
"#;

pub async fn ensure_schema(db: &Database) -> Result<(), Error> {
    db.query(DEFINE_DEVICES).await?.check()?;
    db.query(DEFINE_ACTIVATION_CODES).await?.check()?;
    db.query(DEFINE_LOCK_DATES).await?.check()?;
    db.query(DEFINE_REMOTE_LOCKS).await?.check()?;
    Ok(())
}
