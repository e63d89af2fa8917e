use async_trait::async_trait;
use thiserror::Error;

use crate::domain::models::{
    activation_code::ActivationCode, device::Device, device::DeviceRegistration,
    lock_date::LockDate, remote_lock::RemoteLock,
};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Database(#[from] surrealdb::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence operations the device lifecycle needs.
#[async_trait]
pub trait DeviceStore: Send + Sync {
    async fn find_device_by_serial(&self, serial_number: &str)
    -> Result<Option<Device>, StoreError>;

    /// Returns the subset of `codes` already present anywhere in the store.
    async fn existing_codes(&self, codes: &[String]) -> Result<Vec<String>, StoreError>;

    /// Writes the device, its codes, lock dates and remote lock atomically.
    /// Fails with [`StoreError::Conflict`] when the serial number is taken.
    async fn register_device(&self, registration: &DeviceRegistration) -> Result<(), StoreError>;

    /// Marks an unused code as used and returns it. `None` when the code does
    /// not exist or was already used; never claims the same code twice.
    async fn claim_activation_code(&self, code: &str)
    -> Result<Option<ActivationCode>, StoreError>;

    async fn list_activation_codes(&self, device_id: &str)
    -> Result<Vec<ActivationCode>, StoreError>;

    async fn list_lock_dates(&self, device_id: &str) -> Result<Vec<LockDate>, StoreError>;

    async fn find_remote_lock(&self, device_id: &str) -> Result<Option<RemoteLock>, StoreError>;

    async fn set_device_active(&self, device_id: &str, is_active: bool) -> Result<(), StoreError>;

    /// Upserts the remote lock and mirrors the flag onto the device.
    async fn set_lock_state(&self, device_id: &str, is_locked: bool) -> Result<(), StoreError>;

    /// Clears both device flags and the remote lock.
    async fn deactivate_device(&self, device_id: &str) -> Result<(), StoreError>;
}
