pub mod check_activation_query;
pub mod check_lock_query;
pub mod health_query;
