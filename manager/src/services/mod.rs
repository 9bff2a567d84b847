// File: manager/src/services/mod.rs

pub mod cache_service;
pub mod history;
pub mod indicator;

pub use cache_service::CacheService;
pub use history::{OperationHistory, TriggerSource};
pub use indicator::ForegroundIndicator;
