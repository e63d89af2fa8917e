use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivationCode {
    pub device_id: String,
    pub code: String,
    pub term_number: u32,
    pub is_used: bool,
    pub used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewActivationCode {
    pub device_id: String,
    pub code: String,
    pub term_number: u32,
    pub is_used: bool,
}
