use std::sync::Arc;

use planner_db::DbPool;
use planner_workflow::TripWorkflow;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Trip workflow service; every API route goes through it.
    pub workflow: TripWorkflow,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// PostgreSQL pool, absent when running on the in-memory gateway.
    /// Only the health check reads it directly.
    pub pool: Option<DbPool>,
}
