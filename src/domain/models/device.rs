use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::activation_code::NewActivationCode;
use super::lock_date::NewLockDate;
use super::term::TermDuration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    pub id: String,
    pub serial_number: String,
    pub customer_name: String,
    pub phone_number: String,
    pub emi_term: u32,
    pub emi_start_date: NaiveDate,
    pub term_duration: u32,
    pub is_active: bool,
    pub is_locked: bool,
    pub created_at: DateTime<Utc>,
}

/// Device row as written at registration; flags start cleared and
/// `created_at` is filled in by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDevice {
    pub serial_number: String,
    pub customer_name: String,
    pub phone_number: String,
    pub emi_term: u32,
    pub emi_start_date: NaiveDate,
    pub term_duration: u32,
    pub is_active: bool,
    pub is_locked: bool,
}

impl NewDevice {
    pub fn new(
        serial_number: String,
        customer_name: String,
        phone_number: String,
        emi_term: u32,
        emi_start_date: NaiveDate,
        term_duration: TermDuration,
    ) -> Self {
        Self {
            serial_number,
            customer_name,
            phone_number,
            emi_term,
            emi_start_date,
            term_duration: term_duration.days(),
            is_active: false,
            is_locked: false,
        }
    }
}

/// Everything a registration writes. Stores persist it as one unit.
#[derive(Debug, Clone)]
pub struct DeviceRegistration {
    pub device_id: String,
    pub device: NewDevice,
    pub activation_codes: Vec<NewActivationCode>,
    pub lock_dates: Vec<NewLockDate>,
}
