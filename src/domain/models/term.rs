use chrono::NaiveDate;
use serde::Serialize;

pub const LOCK_DATE_FORMAT: &str = "%Y-%m-%d";

/// Length of one installment period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermDuration {
    Weekly,
    Fortnightly,
    Monthly,
}

impl TermDuration {
    pub fn days(&self) -> u32 {
        match self {
            TermDuration::Weekly => 7,
            TermDuration::Fortnightly => 15,
            TermDuration::Monthly => 30,
        }
    }
}

impl TryFrom<u32> for TermDuration {
    type Error = u32;

    fn try_from(days: u32) -> Result<Self, Self::Error> {
        match days {
            7 => Ok(TermDuration::Weekly),
            15 => Ok(TermDuration::Fortnightly),
            30 => Ok(TermDuration::Monthly),
            other => Err(other),
        }
    }
}

/// One installment as reported to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermSchedule {
    pub term: u32,
    pub lock_date: String,
    pub activation_code: String,
}

impl TermSchedule {
    pub fn new(term: u32, lock_date: NaiveDate, activation_code: impl Into<String>) -> Self {
        Self {
            term,
            lock_date: lock_date.format(LOCK_DATE_FORMAT).to_string(),
            activation_code: activation_code.into(),
        }
    }
}
