pub mod activation_code_repository;
pub mod device_repository;
pub mod lock_date_repository;
pub mod remote_lock_repository;
