use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// `is_locked` is written once at registration and never changed; locking is
// driven by the remote lock only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockDate {
    pub device_id: String,
    pub term_number: u32,
    pub lock_date: NaiveDate,
    pub is_locked: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLockDate {
    pub device_id: String,
    pub term_number: u32,
    pub lock_date: NaiveDate,
    pub is_locked: bool,
}
