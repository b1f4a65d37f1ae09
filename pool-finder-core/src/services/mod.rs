//! Service layer module

mod pool_inventory_service;
pub mod report;

pub use pool_inventory_service::PoolInventoryService;
