//! Handlers for tasks, nested under `/projects/{project_id}/tasks`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tasktally_core::types::DbId;
use tasktally_db::models::task::{CreateTask, Task, TaskSummary};
use tasktally_db::repositories::TaskRepo;

use crate::error::AppResult;
use crate::handlers::NameQuery;
use crate::state::AppState;

/// Request body for creating a task; the project comes from the path.
#[derive(Debug, Deserialize)]
pub struct CreateTaskBody {
    pub name: String,
    pub description: String,
}

/// POST /api/v1/projects/{project_id}/tasks
pub async fn create(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(body): Json<CreateTaskBody>,
) -> AppResult<(StatusCode, Json<Task>)> {
    let input = CreateTask {
        project_id,
        name: body.name,
        description: body.description,
    };
    let task = TaskRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /api/v1/projects/{project_id}/tasks?name=
pub async fn search(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Query(query): Query<NameQuery>,
) -> AppResult<Json<Vec<TaskSummary>>> {
    let name = query.name.unwrap_or_default();
    let tasks = TaskRepo::search(&state.pool, project_id, &name).await?;
    Ok(Json(tasks))
}

/// POST /api/v1/projects/{project_id}/tasks/{task_id}/complete
pub async fn complete(
    State(state): State<AppState>,
    Path((project_id, task_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<Task>> {
    let task = TaskRepo::complete(&state.pool, task_id, project_id).await?;
    Ok(Json(task))
}

/// DELETE /api/v1/projects/{project_id}/tasks?name=
pub async fn delete(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Query(query): Query<NameQuery>,
) -> AppResult<StatusCode> {
    let name = query.name.unwrap_or_default();
    TaskRepo::delete(&state.pool, project_id, &name).await?;
    Ok(StatusCode::NO_CONTENT)
}
