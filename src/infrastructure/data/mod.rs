pub mod db_context;
#[cfg(test)]
pub mod memory_store;
pub mod repositories;
pub mod store;
pub mod surreal_store;
