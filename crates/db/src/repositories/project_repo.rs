//! Repository for the `projects` table.

use sqlx::{PgConnection, PgPool};
use tasktally_core::completion::{compute_completion, CounterDelta};
use tasktally_core::error::CoreError;
use tasktally_core::search::contains_pattern;
use tasktally_core::types::DbId;
use tasktally_core::validation;

use crate::error::StoreResult;
use crate::models::project::{CreateProject, Project, ProjectCounters, ProjectSummary};
use crate::transaction;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, created_at, \
                       tasks, completed_tasks, incompleted_tasks, completion";

const SUMMARY_COLUMNS: &str =
    "id, name, description, created_at, completion, completed_tasks, incompleted_tasks";

const COUNTER_COLUMNS: &str = "tasks, completed_tasks, incompleted_tasks, completion";

/// Provides create/delete/search for projects and the counter maintenance
/// used by [`crate::repositories::TaskRepo`].
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project with zeroed counters, returning the created row.
    ///
    /// A duplicate name is reported by the database as a unique violation
    /// on `uq_projects_name`.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> StoreResult<Project> {
        validation::validate_project(&input.name, &input.description)?;
        let input = input.clone();

        let project: Project = transaction::run(pool, "project.create", move |conn| {
            Box::pin(async move {
                let query = format!(
                    "INSERT INTO projects (name, description) VALUES ($1, $2) RETURNING {COLUMNS}"
                );
                let project = sqlx::query_as::<_, Project>(&query)
                    .bind(&input.name)
                    .bind(&input.description)
                    .fetch_one(conn)
                    .await?;
                Ok(project)
            })
        })
        .await?;

        tracing::info!(project_id = project.id, name = %project.name, "Project created");
        Ok(project)
    }

    /// Delete a project by name together with all of its tasks.
    ///
    /// The project row is locked first so no task can be added or completed
    /// concurrently; the tasks go with it through `ON DELETE CASCADE`.
    pub async fn delete(pool: &PgPool, name: &str) -> StoreResult<()> {
        validation::require_name(name)?;
        let name = name.to_string();

        let (project_id, removed_tasks): (DbId, i32) =
            transaction::run(pool, "project.delete", move |conn| {
                Box::pin(async move {
                    let locked: Option<(DbId, i32)> =
                        sqlx::query_as("SELECT id, tasks FROM projects WHERE name = $1 FOR UPDATE")
                            .bind(&name)
                            .fetch_optional(&mut *conn)
                            .await?;
                    let (project_id, tasks) =
                        locked.ok_or_else(|| CoreError::not_found("Project", &name))?;

                    sqlx::query("DELETE FROM projects WHERE id = $1")
                        .bind(project_id)
                        .execute(&mut *conn)
                        .await?;
                    Ok((project_id, tasks))
                })
            })
            .await?;

        tracing::info!(project_id, removed_tasks, "Project deleted");
        Ok(())
    }

    /// Case-insensitive substring search on project name.
    ///
    /// Zero matches is a `NotFound` error rather than an empty list.
    pub async fn search(pool: &PgPool, name: &str) -> StoreResult<Vec<ProjectSummary>> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM projects WHERE name ILIKE $1 ORDER BY id"
        );
        let rows = sqlx::query_as::<_, ProjectSummary>(&query)
            .bind(contains_pattern(name))
            .fetch_all(pool)
            .await?;

        if rows.is_empty() {
            return Err(CoreError::not_found("Project", format!("name like '{name}'")).into());
        }
        Ok(rows)
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> StoreResult<Option<Project>> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(project)
    }

    /// Take the row lock on a project for the rest of the transaction.
    ///
    /// Returns `None` if the project does not exist.
    pub(crate) async fn lock_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> StoreResult<Option<DbId>> {
        let row: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM projects WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(conn)
                .await?;
        Ok(row.map(|(id,)| id))
    }

    /// Add `delta` to the project's counters as one relative update and
    /// return the counters as they stand afterwards.
    pub(crate) async fn increment_counters(
        conn: &mut PgConnection,
        id: DbId,
        delta: CounterDelta,
    ) -> StoreResult<ProjectCounters> {
        debug_assert!(delta.is_balanced(), "unbalanced counter delta: {delta:?}");
        let query = format!(
            "UPDATE projects SET
                tasks = tasks + $2,
                completed_tasks = completed_tasks + $3,
                incompleted_tasks = incompleted_tasks + $4
             WHERE id = $1
             RETURNING {COUNTER_COLUMNS}"
        );
        let counters = sqlx::query_as::<_, ProjectCounters>(&query)
            .bind(id)
            .bind(delta.tasks())
            .bind(delta.completed())
            .bind(delta.incompleted())
            .fetch_optional(conn)
            .await?;
        counters.ok_or_else(|| CoreError::not_found("Project", id).into())
    }

    /// Persist a completion percentage produced by [`compute_completion`].
    pub(crate) async fn set_completion(
        conn: &mut PgConnection,
        id: DbId,
        completion: i32,
    ) -> StoreResult<()> {
        sqlx::query("UPDATE projects SET completion = $2 WHERE id = $1")
            .bind(id)
            .bind(completion)
            .execute(conn)
            .await?;
        Ok(())
    }

    /// Apply a counter delta and recompute completion from the resulting
    /// counters. Must run inside the transaction holding the project lock.
    pub(crate) async fn apply_counter_delta(
        conn: &mut PgConnection,
        id: DbId,
        delta: CounterDelta,
    ) -> StoreResult<ProjectCounters> {
        let counters = Self::increment_counters(&mut *conn, id, delta).await?;
        let completion = compute_completion(counters.completed_tasks, counters.tasks);
        if completion != counters.completion {
            Self::set_completion(&mut *conn, id, completion).await?;
        }
        Ok(ProjectCounters {
            completion,
            ..counters
        })
    }
}
