use async_trait::async_trait;
use tracing::warn;

use crate::domain::models::{
    activation_code::ActivationCode, device::Device, device::DeviceRegistration,
    lock_date::LockDate, remote_lock::RemoteLock,
};
use crate::infrastructure::data::db_context::surrealdb_context::Database;
use crate::infrastructure::data::repositories::{
    activation_code_repository::ActivationCodeRepository, device_repository::DeviceRepository,
    lock_date_repository::LockDateRepository, remote_lock_repository::RemoteLockRepository,
};
use crate::infrastructure::data::store::{DeviceStore, StoreError};

pub struct SurrealDeviceStore {
    devices: DeviceRepository,
    activation_codes: ActivationCodeRepository,
    lock_dates: LockDateRepository,
    remote_locks: RemoteLockRepository,
}

impl SurrealDeviceStore {
    pub fn new(db: Database) -> Self {
        Self {
            devices: DeviceRepository::new(db.clone()),
            activation_codes: ActivationCodeRepository::new(db.clone()),
            lock_dates: LockDateRepository::new(db.clone()),
            remote_locks: RemoteLockRepository::new(db),
        }
    }
}

#[async_trait]
impl DeviceStore for SurrealDeviceStore {
    async fn find_device_by_serial(
        &self,
        serial_number: &str,
    ) -> Result<Option<Device>, StoreError> {
        Ok(self.devices.get_by_serial(serial_number).await?)
    }

    async fn existing_codes(&self, codes: &[String]) -> Result<Vec<String>, StoreError> {
        Ok(self.activation_codes.existing_codes(codes).await?)
    }

    async fn register_device(&self, registration: &DeviceRegistration) -> Result<(), StoreError> {
        let Err(err) = self.devices.register(registration).await else {
            return Ok(());
        };

        // A cancelled transaction reports every statement as failed, so the
        // serial number index is checked directly to tell a duplicate apart.
        let serial_number = &registration.device.serial_number;
        match self.devices.get_by_serial(serial_number).await {
            Ok(Some(_)) => Err(StoreError::Conflict(format!(
                "device {serial_number} already registered"
            ))),
            Ok(None) => Err(StoreError::Database(err)),
            Err(lookup_err) => {
                warn!(error = %lookup_err, "failed to re-check serial number after rejected registration");
                Err(StoreError::Database(err))
            }
        }
    }

    async fn claim_activation_code(
        &self,
        code: &str,
    ) -> Result<Option<ActivationCode>, StoreError> {
        Ok(self.activation_codes.claim(code).await?)
    }

    async fn list_activation_codes(
        &self,
        device_id: &str,
    ) -> Result<Vec<ActivationCode>, StoreError> {
        Ok(self.activation_codes.list_by_device(device_id).await?)
    }

    async fn list_lock_dates(&self, device_id: &str) -> Result<Vec<LockDate>, StoreError> {
        Ok(self.lock_dates.list_by_device(device_id).await?)
    }

    async fn find_remote_lock(&self, device_id: &str) -> Result<Option<RemoteLock>, StoreError> {
        Ok(self.remote_locks.get_by_device(device_id).await?)
    }

    async fn set_device_active(&self, device_id: &str, is_active: bool) -> Result<(), StoreError> {
        Ok(self.devices.set_active(device_id, is_active).await?)
    }

    async fn set_lock_state(&self, device_id: &str, is_locked: bool) -> Result<(), StoreError> {
        Ok(self.devices.set_lock_state(device_id, is_locked).await?)
    }

    async fn deactivate_device(&self, device_id: &str) -> Result<(), StoreError> {
        Ok(self.devices.deactivate(device_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::models::{
        activation_code::NewActivationCode, device::NewDevice, lock_date::NewLockDate,
        term::TermDuration,
    };
    use crate::infrastructure::config::DatabaseConfig;
    use crate::infrastructure::data::db_context::surrealdb_context::init_db;

    async fn memory_store() -> SurrealDeviceStore {
        let config = DatabaseConfig {
            url: "mem://".to_string(),
            namespace: "test".to_string(),
            database: "test".to_string(),
            username: None,
            password: None,
        };
        let db = init_db(&config).await.expect("in-memory database starts");
        SurrealDeviceStore::new(db)
    }

    fn registration(device_id: &str, serial_number: &str, codes: &[&str]) -> DeviceRegistration {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        DeviceRegistration {
            device_id: device_id.to_string(),
            device: NewDevice::new(
                serial_number.to_string(),
                "Asha".to_string(),
                "+911234567890".to_string(),
                codes.len() as u32,
                start,
                TermDuration::Fortnightly,
            ),
            activation_codes: codes
                .iter()
                .enumerate()
                .map(|(index, code)| NewActivationCode {
                    device_id: device_id.to_string(),
                    code: code.to_string(),
                    term_number: index as u32 + 1,
                    is_used: false,
                })
                .collect(),
            lock_dates: (1..=codes.len() as u32)
                .map(|term| NewLockDate {
                    device_id: device_id.to_string(),
                    term_number: term,
                    lock_date: start + chrono::Days::new(15 * term as u64),
                    is_locked: false,
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn registration_persists_every_row() {
        let store = memory_store().await;
        store
            .register_device(&registration("dev-1", "TV1", &["AAAA2222", "BBBB3333"]))
            .await
            .expect("registration succeeds");

        let device = store
            .find_device_by_serial("TV1")
            .await
            .unwrap()
            .expect("device stored");
        assert_eq!(device.id, "dev-1");
        assert_eq!(device.term_duration, 15);
        assert!(!device.is_active);
        assert!(!device.is_locked);

        let codes = store.list_activation_codes("dev-1").await.unwrap();
        assert_eq!(
            codes.iter().map(|row| row.term_number).collect::<Vec<_>>(),
            vec![1, 2]
        );

        let dates = store.list_lock_dates("dev-1").await.unwrap();
        assert_eq!(dates[0].lock_date, NaiveDate::from_ymd_opt(2024, 1, 16).unwrap());
        assert_eq!(dates[1].lock_date, NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());

        let lock = store.find_remote_lock("dev-1").await.unwrap().expect("lock row");
        assert!(!lock.is_locked);
    }

    #[tokio::test]
    async fn duplicate_serial_is_a_conflict_and_writes_nothing() {
        let store = memory_store().await;
        store
            .register_device(&registration("dev-1", "TV1", &["AAAA2222"]))
            .await
            .unwrap();

        let err = store
            .register_device(&registration("dev-2", "TV1", &["CCCC4444"]))
            .await
            .expect_err("serial number is unique");
        assert!(matches!(err, StoreError::Conflict(_)));

        assert!(store.list_activation_codes("dev-2").await.unwrap().is_empty());
        assert!(store.find_remote_lock("dev-2").await.unwrap().is_none());
        assert!(
            store
                .existing_codes(&["CCCC4444".to_string()])
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn activation_code_is_claimed_once() {
        let store = memory_store().await;
        store
            .register_device(&registration("dev-1", "TV1", &["AAAA2222"]))
            .await
            .unwrap();

        let claimed = store
            .claim_activation_code("AAAA2222")
            .await
            .unwrap()
            .expect("first claim wins");
        assert_eq!(claimed.device_id, "dev-1");
        assert!(claimed.is_used);
        assert!(claimed.used_at.is_some());

        assert!(store.claim_activation_code("AAAA2222").await.unwrap().is_none());
        assert!(store.claim_activation_code("ZZZZ9999").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn lock_state_is_mirrored_and_cleared_on_deactivate() {
        let store = memory_store().await;
        store
            .register_device(&registration("dev-1", "TV1", &["AAAA2222"]))
            .await
            .unwrap();
        store.set_device_active("dev-1", true).await.unwrap();

        store.set_lock_state("dev-1", true).await.unwrap();
        let device = store.find_device_by_serial("TV1").await.unwrap().unwrap();
        assert!(device.is_locked);
        assert!(store.find_remote_lock("dev-1").await.unwrap().unwrap().is_locked);

        store.deactivate_device("dev-1").await.unwrap();
        let device = store.find_device_by_serial("TV1").await.unwrap().unwrap();
        assert!(!device.is_active);
        assert!(!device.is_locked);
        assert!(!store.find_remote_lock("dev-1").await.unwrap().unwrap().is_locked);
    }
}
