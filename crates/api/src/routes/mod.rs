pub mod health;
pub mod project;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /projects                                        search, create, delete-by-name
/// /projects/{project_id}                           get
/// /projects/{project_id}/tasks                     search, create, delete-by-name
/// /projects/{project_id}/tasks/{task_id}/complete  complete (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/projects", project::router())
}
