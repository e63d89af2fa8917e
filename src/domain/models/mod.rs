pub mod activation_code;
pub mod device;
pub mod lock_date;
pub mod remote_lock;
pub mod term;
