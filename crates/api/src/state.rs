use std::sync::Arc;

use pixgrid_core::actions::ActionService;
use pixgrid_core::service::PhotoService;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: pixgrid_db::DbPool,
    /// Server configuration (JWT secret, cache settings).
    pub config: Arc<ServerConfig>,
    /// Cached photo reads over the configured source.
    pub photos: Arc<PhotoService>,
    /// Like and download recording.
    pub actions: Arc<ActionService>,
}
