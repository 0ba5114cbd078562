use std::sync::Arc;

use crate::config::ServerConfig;
use crate::report::ReportStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: every field is a pool handle or behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: thesis_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Published to after committed council and score writes.
    pub event_bus: Arc<thesis_events::EventBus>,
    /// Destination for exported score reports.
    pub report_store: Arc<dyn ReportStore>,
}
