pub mod activate_device_command;
pub mod register_device_command;
pub mod set_remote_lock_command;
pub mod unlock_device_command;
