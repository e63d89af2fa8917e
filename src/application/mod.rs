pub mod commands;
pub mod queries;
pub mod responses;
pub mod services;
