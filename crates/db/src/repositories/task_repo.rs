//! Repository for the `tasks` table.
//!
//! Every mutation here also moves the owning project's counters, inside the
//! same transaction and after locking the project row.

use sqlx::{PgConnection, PgPool};
use tasktally_core::completion::CounterDelta;
use tasktally_core::error::CoreError;
use tasktally_core::search::contains_pattern;
use tasktally_core::types::DbId;
use tasktally_core::validation;

use crate::error::StoreResult;
use crate::models::project::ProjectCounters;
use crate::models::task::{CreateTask, Task, TaskSummary};
use crate::repositories::ProjectRepo;
use crate::transaction;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, name, description, created_at, completed_at, completed";

const SUMMARY_COLUMNS: &str = "id, name, description, created_at, completed_at, completed";

/// Provides create/complete/delete/search for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task and count it against its project.
    ///
    /// Fails with `NotFound` if the project does not exist.
    pub async fn create(pool: &PgPool, input: &CreateTask) -> StoreResult<Task> {
        validation::validate_task(input.project_id, &input.name, &input.description)?;
        let input = input.clone();

        let (task, counters): (Task, ProjectCounters) =
            transaction::run(pool, "task.create", move |conn| {
                Box::pin(async move {
                    ProjectRepo::lock_for_update(&mut *conn, input.project_id)
                        .await?
                        .ok_or_else(|| CoreError::not_found("Project", input.project_id))?;

                    let task = Self::insert_row(&mut *conn, &input).await?;
                    let counters = ProjectRepo::apply_counter_delta(
                        &mut *conn,
                        input.project_id,
                        CounterDelta::task_created(),
                    )
                    .await?;
                    Ok((task, counters))
                })
            })
            .await?;

        tracing::info!(
            task_id = task.id,
            project_id = task.project_id,
            tasks = counters.tasks,
            completion = counters.completion,
            "Task created"
        );
        Ok(task)
    }

    /// Mark a task as completed.
    ///
    /// Completing an already completed task succeeds without touching the
    /// project's counters. A task that exists under a different project is
    /// a `Conflict`.
    pub async fn complete(pool: &PgPool, task_id: DbId, project_id: DbId) -> StoreResult<Task> {
        let (task, counters): (Task, Option<ProjectCounters>) =
            transaction::run(pool, "task.complete", move |conn| {
                Box::pin(async move {
                    ProjectRepo::lock_for_update(&mut *conn, project_id)
                        .await?
                        .ok_or_else(|| CoreError::not_found("Project", project_id))?;

                    let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1 FOR UPDATE");
                    let current = sqlx::query_as::<_, Task>(&query)
                        .bind(task_id)
                        .fetch_optional(&mut *conn)
                        .await?
                        .ok_or_else(|| CoreError::not_found("Task", task_id))?;

                    if current.project_id != project_id {
                        return Err(CoreError::Conflict(format!(
                            "task {task_id} belongs to project {}, not {project_id}",
                            current.project_id
                        ))
                        .into());
                    }
                    if current.completed {
                        return Ok((current, None));
                    }

                    let query = format!(
                        "UPDATE tasks SET completed = true, completed_at = NOW()
                         WHERE id = $1 AND completed = false
                         RETURNING {COLUMNS}"
                    );
                    let task = sqlx::query_as::<_, Task>(&query)
                        .bind(task_id)
                        .fetch_one(&mut *conn)
                        .await?;
                    let counters = ProjectRepo::apply_counter_delta(
                        &mut *conn,
                        project_id,
                        CounterDelta::task_completed(),
                    )
                    .await?;
                    Ok((task, Some(counters)))
                })
            })
            .await?;

        match counters {
            Some(counters) => tracing::info!(
                task_id,
                project_id,
                completion = counters.completion,
                "Task completed"
            ),
            None => tracing::debug!(task_id, project_id, "Task already completed"),
        }
        Ok(task)
    }

    /// Delete every task named `name` in the project and uncount them.
    ///
    /// Fails with `NotFound` if the project does not exist or no task matched.
    pub async fn delete(pool: &PgPool, project_id: DbId, name: &str) -> StoreResult<()> {
        validation::validate_project_id(project_id)?;
        validation::require_name(name)?;
        let name = name.to_string();

        let (removed, counters): (usize, ProjectCounters) =
            transaction::run(pool, "task.delete", move |conn| {
                Box::pin(async move {
                    ProjectRepo::lock_for_update(&mut *conn, project_id)
                        .await?
                        .ok_or_else(|| CoreError::not_found("Project", project_id))?;

                    let removed: Vec<(bool,)> = sqlx::query_as(
                        "DELETE FROM tasks WHERE project_id = $1 AND name = $2 RETURNING completed",
                    )
                    .bind(project_id)
                    .bind(&name)
                    .fetch_all(&mut *conn)
                    .await?;
                    if removed.is_empty() {
                        return Err(CoreError::not_found("Task", &name).into());
                    }

                    let completed = removed.iter().filter(|(done,)| *done).count();
                    let incompleted = removed.len() - completed;
                    let delta =
                        CounterDelta::tasks_deleted(to_count(completed)?, to_count(incompleted)?);
                    let counters =
                        ProjectRepo::apply_counter_delta(&mut *conn, project_id, delta).await?;
                    Ok((removed.len(), counters))
                })
            })
            .await?;

        tracing::info!(
            project_id,
            removed,
            tasks = counters.tasks,
            completion = counters.completion,
            "Tasks deleted"
        );
        Ok(())
    }

    /// Case-insensitive substring search on task name within a project.
    ///
    /// Zero matches is a `NotFound` error rather than an empty list.
    pub async fn search(
        pool: &PgPool,
        project_id: DbId,
        name: &str,
    ) -> StoreResult<Vec<TaskSummary>> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM tasks
             WHERE project_id = $1 AND name ILIKE $2
             ORDER BY id"
        );
        let rows = sqlx::query_as::<_, TaskSummary>(&query)
            .bind(project_id)
            .bind(contains_pattern(name))
            .fetch_all(pool)
            .await?;

        if rows.is_empty() {
            return Err(CoreError::not_found(
                "Task",
                format!("name like '{name}' in project {project_id}"),
            )
            .into());
        }
        Ok(rows)
    }

    /// Find a task by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> StoreResult<Option<Task>> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1");
        let task = sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(task)
    }

    /// Insert the task row only. Callers own the counter update and the lock.
    pub(crate) async fn insert_row(
        conn: &mut PgConnection,
        input: &CreateTask,
    ) -> StoreResult<Task> {
        let query = format!(
            "INSERT INTO tasks (project_id, name, description)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let task = sqlx::query_as::<_, Task>(&query)
            .bind(input.project_id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(conn)
            .await?;
        Ok(task)
    }
}

fn to_count(n: usize) -> Result<i32, CoreError> {
    i32::try_from(n).map_err(|_| CoreError::Internal(format!("task count {n} exceeds i32")))
}
