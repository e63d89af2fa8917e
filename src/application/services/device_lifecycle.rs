use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;
use metrics::counter;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::application::services::activation_codes::generate_distinct_codes;
use crate::application::services::schedule;
use crate::domain::models::{
    activation_code::NewActivationCode,
    device::{Device, DeviceRegistration, NewDevice},
    lock_date::NewLockDate,
    term::{LOCK_DATE_FORMAT, TermDuration, TermSchedule},
};
use crate::infrastructure::data::store::{DeviceStore, StoreError};

const MAX_CODE_ATTEMPTS: usize = 5;
const INVALID_ACTIVATION_CODE: &str = "Invalid or already used activation code";
const DEVICE_NOT_FOUND: &str = "Device not found";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("{0}")]
    InvalidArgument(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    Internal(String),
}

impl LifecycleError {
    pub fn kind(&self) -> &'static str {
        match self {
            LifecycleError::InvalidArgument(_) => "invalid_argument",
            LifecycleError::Conflict(_) => "conflict",
            LifecycleError::NotFound(_) => "not_found",
            LifecycleError::Forbidden(_) => "forbidden",
            LifecycleError::Internal(_) => "internal",
        }
    }

    fn invalid(message: &str) -> Self {
        LifecycleError::InvalidArgument(message.to_string())
    }
}

/// Logs the store failure and hides it behind `message`.
fn internal(message: &'static str) -> impl FnOnce(StoreError) -> LifecycleError {
    move |err| {
        error!(error = %err, "{message}");
        LifecycleError::Internal(message.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct RegisterDevice {
    pub serial_number: String,
    pub customer_name: String,
    pub phone_number: String,
    pub emi_term: u32,
    pub emi_start_date: String,
    pub term_duration: u32,
}

#[derive(Debug, Clone)]
pub struct Registration {
    pub device_id: String,
    pub terms: Vec<TermSchedule>,
}

#[derive(Clone)]
pub struct DeviceLifecycleService {
    store: Arc<dyn DeviceStore>,
}

impl DeviceLifecycleService {
    pub fn new(store: Arc<dyn DeviceStore>) -> Self {
        Self { store }
    }

    pub async fn register(&self, request: RegisterDevice) -> Result<Registration, LifecycleError> {
        let serial_number = request.serial_number.trim();
        if serial_number.is_empty() {
            return Err(LifecycleError::invalid("Serial number is required"));
        }

        let duration = TermDuration::try_from(request.term_duration)
            .map_err(|_| LifecycleError::invalid("Term duration must be 7, 15, or 30 days"))?;

        let start = NaiveDate::parse_from_str(request.emi_start_date.trim(), LOCK_DATE_FORMAT)
            .map_err(|_| LifecycleError::invalid("Invalid date format. Use YYYY-MM-DD"))?;

        if request.emi_term < 1 {
            return Err(LifecycleError::invalid("EMI term must be at least 1"));
        }

        let lock_dates = schedule::lock_dates(start, duration, request.emi_term).ok_or_else(|| {
            LifecycleError::invalid("EMI schedule extends past the supported date range")
        })?;

        let existing = self
            .store
            .find_device_by_serial(serial_number)
            .await
            .map_err(internal("Failed to register device"))?;
        if existing.is_some() {
            return Err(LifecycleError::Conflict(
                "Device with this serial number already exists".to_string(),
            ));
        }

        let codes = self.reserve_codes(lock_dates.len()).await?;
        let device_id = Uuid::new_v4().to_string();

        let registration = DeviceRegistration {
            device_id: device_id.clone(),
            device: NewDevice::new(
                serial_number.to_string(),
                request.customer_name.trim().to_string(),
                request.phone_number.trim().to_string(),
                request.emi_term,
                start,
                duration,
            ),
            activation_codes: lock_dates
                .iter()
                .zip(codes)
                .map(|((term, _), code)| NewActivationCode {
                    device_id: device_id.clone(),
                    code,
                    term_number: *term,
                    is_used: false,
                })
                .collect(),
            lock_dates: lock_dates
                .iter()
                .map(|(term, date)| NewLockDate {
                    device_id: device_id.clone(),
                    term_number: *term,
                    lock_date: *date,
                    is_locked: false,
                })
                .collect(),
        };

        match self.store.register_device(&registration).await {
            Ok(()) => {}
            Err(StoreError::Conflict(_)) => {
                return Err(LifecycleError::Conflict(
                    "Device with this serial number already exists".to_string(),
                ));
            }
            Err(err) => return Err(internal("Failed to register device")(err)),
        }

        counter!("device_registrations_total", 1);
        info!(
            serial_number = %serial_number,
            device_id = %device_id,
            emi_term = request.emi_term,
            term_duration = duration.days(),
            "device registered"
        );

        let terms = self.terms_for_device(&device_id).await?;
        Ok(Registration { device_id, terms })
    }

    /// Consumes `code` and activates the device it belongs to.
    pub async fn activate(&self, code: &str) -> Result<Vec<TermSchedule>, LifecycleError> {
        let claimed = self
            .store
            .claim_activation_code(code.trim())
            .await
            .map_err(internal("Failed to activate device"))?
            .ok_or_else(|| LifecycleError::invalid(INVALID_ACTIVATION_CODE))?;

        self.store
            .set_device_active(&claimed.device_id, true)
            .await
            .map_err(internal("Failed to activate device"))?;

        counter!("device_activations_total", 1, "source" => "code");
        info!(
            device_id = %claimed.device_id,
            term = claimed.term_number,
            "device activated with code"
        );

        self.terms_for_device(&claimed.device_id).await
    }

    /// Reports the schedule, activating the device on first contact.
    pub async fn check(&self, serial_number: &str) -> Result<Vec<TermSchedule>, LifecycleError> {
        let device = self.require_device(serial_number).await?;

        if !device.is_active {
            self.store
                .set_device_active(&device.id, true)
                .await
                .map_err(internal("Failed to activate device"))?;
            counter!("device_activations_total", 1, "source" => "check");
            info!(serial_number = %device.serial_number, "device activated via check");
        }

        self.terms_for_device(&device.id).await
    }

    pub async fn set_remote_lock(
        &self,
        serial_number: &str,
        is_locked: bool,
    ) -> Result<bool, LifecycleError> {
        let device = self.require_device(serial_number).await?;

        self.store
            .set_lock_state(&device.id, is_locked)
            .await
            .map_err(internal("Failed to update remote lock"))?;

        let state = if is_locked { "locked" } else { "unlocked" };
        counter!("remote_lock_changes_total", 1, "state" => state);
        info!(serial_number = %device.serial_number, is_locked, "remote lock updated");

        Ok(is_locked)
    }

    pub async fn check_lock(&self, serial_number: &str) -> Result<bool, LifecycleError> {
        let device = self.require_device(serial_number).await?;

        let lock = self
            .store
            .find_remote_lock(&device.id)
            .await
            .map_err(internal("Failed to read remote lock"))?
            .ok_or_else(|| LifecycleError::NotFound("Remote lock not found".to_string()))?;

        Ok(lock.is_locked)
    }

    /// Clears the lock and deactivates the device.
    pub async fn unlock(&self, serial_number: &str) -> Result<(), LifecycleError> {
        let device = self.require_device(serial_number).await?;

        self.store
            .deactivate_device(&device.id)
            .await
            .map_err(internal("Failed to unlock device"))?;

        counter!("device_unlocks_total", 1);
        info!(serial_number = %device.serial_number, "device unlocked and deactivated");

        Ok(())
    }

    async fn require_device(&self, serial_number: &str) -> Result<Device, LifecycleError> {
        self.store
            .find_device_by_serial(serial_number.trim())
            .await
            .map_err(internal("Failed to look up device"))?
            .ok_or_else(|| LifecycleError::NotFound(DEVICE_NOT_FOUND.to_string()))
    }

    async fn terms_for_device(&self, device_id: &str) -> Result<Vec<TermSchedule>, LifecycleError> {
        let codes = self
            .store
            .list_activation_codes(device_id)
            .await
            .map_err(internal("Failed to load device terms"))?;
        let lock_dates = self
            .store
            .list_lock_dates(device_id)
            .await
            .map_err(internal("Failed to load device terms"))?;

        Ok(schedule::assemble_terms(&codes, &lock_dates))
    }

    async fn reserve_codes(&self, count: usize) -> Result<Vec<String>, LifecycleError> {
        let mut taken = HashSet::new();
        for _ in 0..MAX_CODE_ATTEMPTS {
            let codes = generate_distinct_codes(count, &taken);
            let collisions = self
                .store
                .existing_codes(&codes)
                .await
                .map_err(internal("Failed to generate activation codes"))?;
            if collisions.is_empty() {
                return Ok(codes);
            }

            warn!(collisions = collisions.len(), "regenerating colliding activation codes");
            taken.extend(collisions);
        }

        error!(count, "activation code generation kept colliding");
        Err(LifecycleError::Internal(
            "Failed to generate activation codes".to_string(),
        ))
    }
}
