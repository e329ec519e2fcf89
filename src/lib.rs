pub mod config;
pub mod error;
pub mod model;
pub mod observability;
pub mod rest;
pub mod service;
pub mod storage;

use std::sync::Arc;

use config::TaskdConfig;
use service::TaskService;

/// Shared application state passed to every handler.
///
/// Wired once at process start — the storage handle is constructor-injected,
/// never ambient.
pub struct AppContext {
    pub config: Arc<TaskdConfig>,
    pub tasks: TaskService,
    pub started_at: std::time::Instant,
}
