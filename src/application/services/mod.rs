pub mod activation_codes;
pub mod device_lifecycle;
pub mod schedule;
