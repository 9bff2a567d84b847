// File: manager/src/web/mod.rs
pub mod handlers;
pub mod server;

pub use server::{create_router, start_web_server};

use std::sync::Arc;

use crate::config::Config;
use crate::scheduler::ScheduleStateMachine;
use crate::services::{CacheService, OperationHistory};

// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub state_machine: Arc<ScheduleStateMachine>,
    pub cache_service: Arc<CacheService>,
    pub history: Arc<OperationHistory>,
}

impl AppState {
    pub fn new(
        config: Arc<Config>,
        state_machine: Arc<ScheduleStateMachine>,
        cache_service: Arc<CacheService>,
        history: Arc<OperationHistory>,
    ) -> Self {
        Self {
            config,
            state_machine,
            cache_service,
            history,
        }
    }
}
