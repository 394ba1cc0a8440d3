//! Handlers for the `/projects` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use tasktally_core::error::CoreError;
use tasktally_core::types::DbId;
use tasktally_db::models::project::{CreateProject, Project, ProjectSummary};
use tasktally_db::repositories::ProjectRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::NameQuery;
use crate::state::AppState;

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    let project = ProjectRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/v1/projects?name=
///
/// A missing `name` matches every project.
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> AppResult<Json<Vec<ProjectSummary>>> {
    let name = query.name.unwrap_or_default();
    let projects = ProjectRepo::search(&state.pool, &name).await?;
    Ok(Json(projects))
}

/// GET /api/v1/projects/{project_id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Project>> {
    let project = ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Project", project_id)))?;
    Ok(Json(project))
}

/// DELETE /api/v1/projects?name=
///
/// Removes the project and all of its tasks.
pub async fn delete(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> AppResult<StatusCode> {
    let name = query.name.unwrap_or_default();
    ProjectRepo::delete(&state.pool, &name).await?;
    Ok(StatusCode::NO_CONTENT)
}
