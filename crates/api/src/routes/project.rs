//! Route definitions for the `/projects` resource and its nested tasks.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{project, task};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /?name=                                  -> search
/// POST   /                                        -> create
/// DELETE /?name=                                  -> delete
/// GET    /{project_id}                            -> get_by_id
///
/// GET    /{project_id}/tasks?name=                -> search
/// POST   /{project_id}/tasks                      -> create
/// DELETE /{project_id}/tasks?name=                -> delete
/// POST   /{project_id}/tasks/{task_id}/complete   -> complete
/// ```
pub fn router() -> Router<AppState> {
    let task_routes = Router::new()
        .route(
            "/",
            get(task::search).post(task::create).delete(task::delete),
        )
        .route("/{task_id}/complete", post(task::complete));

    Router::new()
        .route(
            "/",
            get(project::search)
                .post(project::create)
                .delete(project::delete),
        )
        .route("/{project_id}", get(project::get_by_id))
        .nest("/{project_id}/tasks", task_routes)
}
