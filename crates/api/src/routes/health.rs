use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    /// `"ok"`, or `"degraded"` when the database does not answer.
    pub status: &'static str,
    pub version: &'static str,
    pub database: DatabaseHealth,
    pub request_timeout_secs: u64,
}

/// Reachability plus a snapshot of the connection pool.
#[derive(Serialize)]
pub struct DatabaseHealth {
    pub reachable: bool,
    pub open_connections: u32,
    pub idle_connections: usize,
    pub max_connections: u32,
}

/// GET /health
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let reachable = tasktally_db::health_check(&state.pool).await.is_ok();
    if !reachable {
        tracing::warn!("Health check could not reach the database");
    }

    Json(HealthResponse {
        status: if reachable { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        database: DatabaseHealth {
            reachable,
            open_connections: state.pool.size(),
            idle_connections: state.pool.num_idle(),
            max_connections: state.config.db_max_connections,
        },
        request_timeout_secs: state.config.request_timeout_secs,
    })
}

/// Mounted at the root, outside `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
