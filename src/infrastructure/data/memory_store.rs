use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::models::{
    activation_code::ActivationCode, device::Device, device::DeviceRegistration,
    lock_date::LockDate, remote_lock::RemoteLock,
};
use crate::infrastructure::data::store::{DeviceStore, StoreError};

#[derive(Default)]
struct Tables {
    devices: HashMap<String, Device>,
    activation_codes: Vec<ActivationCode>,
    lock_dates: Vec<LockDate>,
    remote_locks: HashMap<String, RemoteLock>,
}

/// In-process [`DeviceStore`] for tests. A single lock around all tables
/// gives every operation the same all-or-nothing behaviour as the database.
#[derive(Default)]
pub struct MemoryDeviceStore {
    tables: RwLock<Tables>,
}

impl MemoryDeviceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn device_count(&self) -> usize {
        self.tables.read().await.devices.len()
    }

    pub async fn activation_code_count(&self) -> usize {
        self.tables.read().await.activation_codes.len()
    }

    pub async fn lock_date_count(&self) -> usize {
        self.tables.read().await.lock_dates.len()
    }

    pub async fn device(&self, serial_number: &str) -> Option<Device> {
        self.tables
            .read()
            .await
            .devices
            .values()
            .find(|device| device.serial_number == serial_number)
            .cloned()
    }
}

#[async_trait]
impl DeviceStore for MemoryDeviceStore {
    async fn find_device_by_serial(
        &self,
        serial_number: &str,
    ) -> Result<Option<Device>, StoreError> {
        Ok(self.device(serial_number).await)
    }

    async fn existing_codes(&self, codes: &[String]) -> Result<Vec<String>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .activation_codes
            .iter()
            .filter(|row| codes.contains(&row.code))
            .map(|row| row.code.clone())
            .collect())
    }

    async fn register_device(&self, registration: &DeviceRegistration) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let serial_taken = tables
            .devices
            .values()
            .any(|device| device.serial_number == registration.device.serial_number);
        if serial_taken {
            return Err(StoreError::Conflict(format!(
                "device {} already registered",
                registration.device.serial_number
            )));
        }

        let code_taken = registration.activation_codes.iter().any(|new| {
            tables
                .activation_codes
                .iter()
                .any(|row| row.code == new.code)
        });
        if code_taken {
            return Err(StoreError::Unavailable(
                "activation code index violated".into(),
            ));
        }

        let now = Utc::now();
        let new = &registration.device;
        tables.devices.insert(
            registration.device_id.clone(),
            Device {
                id: registration.device_id.clone(),
                serial_number: new.serial_number.clone(),
                customer_name: new.customer_name.clone(),
                phone_number: new.phone_number.clone(),
                emi_term: new.emi_term,
                emi_start_date: new.emi_start_date,
                term_duration: new.term_duration,
                is_active: new.is_active,
                is_locked: new.is_locked,
                created_at: now,
            },
        );
        tables
            .activation_codes
            .extend(registration.activation_codes.iter().map(|code| ActivationCode {
                device_id: code.device_id.clone(),
                code: code.code.clone(),
                term_number: code.term_number,
                is_used: code.is_used,
                used_at: None,
                created_at: now,
            }));
        tables
            .lock_dates
            .extend(registration.lock_dates.iter().map(|date| LockDate {
                device_id: date.device_id.clone(),
                term_number: date.term_number,
                lock_date: date.lock_date,
                is_locked: date.is_locked,
                created_at: now,
            }));
        tables.remote_locks.insert(
            registration.device_id.clone(),
            RemoteLock {
                device_id: registration.device_id.clone(),
                is_locked: false,
                created_at: now,
                updated_at: now,
            },
        );

        Ok(())
    }

    async fn claim_activation_code(
        &self,
        code: &str,
    ) -> Result<Option<ActivationCode>, StoreError> {
        let mut tables = self.tables.write().await;
        let claimed = tables
            .activation_codes
            .iter_mut()
            .find(|row| row.code == code && !row.is_used)
            .map(|row| {
                row.is_used = true;
                row.used_at = Some(Utc::now());
                row.clone()
            });
        Ok(claimed)
    }

    async fn list_activation_codes(
        &self,
        device_id: &str,
    ) -> Result<Vec<ActivationCode>, StoreError> {
        let tables = self.tables.read().await;
        let mut codes: Vec<_> = tables
            .activation_codes
            .iter()
            .filter(|row| row.device_id == device_id)
            .cloned()
            .collect();
        codes.sort_by_key(|row| row.term_number);
        Ok(codes)
    }

    async fn list_lock_dates(&self, device_id: &str) -> Result<Vec<LockDate>, StoreError> {
        let tables = self.tables.read().await;
        let mut dates: Vec<_> = tables
            .lock_dates
            .iter()
            .filter(|row| row.device_id == device_id)
            .cloned()
            .collect();
        dates.sort_by_key(|row| row.term_number);
        Ok(dates)
    }

    async fn find_remote_lock(&self, device_id: &str) -> Result<Option<RemoteLock>, StoreError> {
        Ok(self.tables.read().await.remote_locks.get(device_id).cloned())
    }

    async fn set_device_active(&self, device_id: &str, is_active: bool) -> Result<(), StoreError> {
        if let Some(device) = self.tables.write().await.devices.get_mut(device_id) {
            device.is_active = is_active;
        }
        Ok(())
    }

    async fn set_lock_state(&self, device_id: &str, is_locked: bool) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        tables
            .remote_locks
            .entry(device_id.to_string())
            .and_modify(|lock| {
                lock.is_locked = is_locked;
                lock.updated_at = now;
            })
            .or_insert_with(|| RemoteLock {
                device_id: device_id.to_string(),
                is_locked,
                created_at: now,
                updated_at: now,
            });
        if let Some(device) = tables.devices.get_mut(device_id) {
            device.is_locked = is_locked;
        }
        Ok(())
    }

    async fn deactivate_device(&self, device_id: &str) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if let Some(device) = tables.devices.get_mut(device_id) {
            device.is_active = false;
            device.is_locked = false;
        }
        if let Some(lock) = tables.remote_locks.get_mut(device_id) {
            lock.is_locked = false;
            lock.updated_at = Utc::now();
        }
        Ok(())
    }
}
