//! Unit-of-work wrapper for multi-statement mutations.
//!
//! [`run`] checks out one pooled connection, opens a transaction and hands
//! the connection to the caller's work. `Ok` commits, `Err` rolls back and
//! is returned unchanged. If the returned future is dropped before it
//! finishes, sqlx's transaction guard issues the rollback when the
//! connection goes back to the pool, so a cancelled request never leaves
//! part of its writes visible.
//!
//! Work that touches a project's counters must lock the project row first
//! (see `ProjectRepo::lock_for_update`) and only then touch task rows.

use futures::future::BoxFuture;
use sqlx::{PgConnection, PgPool};

use crate::error::StoreResult;

/// Run `work` inside a single database transaction.
///
/// `operation` names the unit of work in logs. Closures must own what they
/// capture:
///
/// ```ignore
/// transaction::run(pool, "task.create", move |conn| {
///     Box::pin(async move { TaskRepo::insert_row(conn, &input).await })
/// })
/// .await
/// ```
pub async fn run<T, F>(pool: &PgPool, operation: &'static str, work: F) -> StoreResult<T>
where
    T: Send,
    F: for<'c> FnOnce(&'c mut PgConnection) -> BoxFuture<'c, StoreResult<T>> + Send,
{
    let mut tx = pool.begin().await?;

    match work(&mut *tx).await {
        Ok(value) => {
            tx.commit().await?;
            tracing::debug!(operation, "Transaction committed");
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::error!(operation, error = %rollback_err, "Transaction rollback failed");
            }
            tracing::warn!(operation, error = %err, "Transaction rolled back");
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use sqlx::PgPool;
    use tasktally_core::error::CoreError;

    use super::*;
    use crate::error::StoreError;
    use crate::models::project::CreateProject;
    use crate::models::task::CreateTask;
    use crate::repositories::{ProjectRepo, TaskRepo};

    async fn seed_project(pool: &PgPool) -> i64 {
        let input = CreateProject {
            name: "Launch".to_string(),
            description: "Q1 rollout".to_string(),
        };
        ProjectRepo::create(pool, &input).await.unwrap().id
    }

    async fn task_rows(pool: &PgPool, project_id: i64) -> i64 {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks WHERE project_id = $1")
            .bind(project_id)
            .fetch_one(pool)
            .await
            .unwrap();
        row.0
    }

    // These drive `run` with hand-built closures to pin down its commit and
    // rollback behaviour. The repository operations themselves are covered by
    // the failed-counter-update tests in tests/task_store.rs.

    #[sqlx::test(migrations = "../../db/migrations")]
    async fn failure_after_task_insert_rolls_back_everything(pool: PgPool) {
        let project_id = seed_project(&pool).await;
        let input = CreateTask {
            project_id,
            name: "Design".to_string(),
            description: "design notes".to_string(),
        };

        let result: StoreResult<()> = run(&pool, "test.inject_failure", move |conn| {
            Box::pin(async move {
                ProjectRepo::lock_for_update(&mut *conn, project_id).await?;
                TaskRepo::insert_row(&mut *conn, &input).await?;
                // Fail between the insert and the counter update.
                Err(CoreError::Internal("injected failure".to_string()).into())
            })
        })
        .await;

        assert_matches!(result, Err(StoreError::Core(CoreError::Internal(_))));
        assert_eq!(task_rows(&pool, project_id).await, 0);

        let project = ProjectRepo::find_by_id(&pool, project_id).await.unwrap().unwrap();
        assert_eq!(project.tasks, 0);
        assert_eq!(project.incompleted_tasks, 0);
        assert_eq!(project.completion, 0);
    }

    #[sqlx::test(migrations = "../../db/migrations")]
    async fn storage_failure_mid_transaction_rolls_back(pool: PgPool) {
        let project_id = seed_project(&pool).await;
        let input = CreateTask {
            project_id,
            name: "Design".to_string(),
            description: "design notes".to_string(),
        };

        let result: StoreResult<()> = run(&pool, "test.constraint_failure", move |conn| {
            Box::pin(async move {
                TaskRepo::insert_row(&mut *conn, &input).await?;
                // Unbalanced counters violate ck_projects_counters_balanced.
                sqlx::query("UPDATE projects SET tasks = tasks + 1 WHERE id = $1")
                    .bind(project_id)
                    .execute(&mut *conn)
                    .await?;
                Ok(())
            })
        })
        .await;

        assert_matches!(result, Err(StoreError::Storage(_)));
        assert_eq!(task_rows(&pool, project_id).await, 0);
    }

    #[sqlx::test(migrations = "../../db/migrations")]
    async fn successful_work_is_committed(pool: PgPool) {
        let project_id = seed_project(&pool).await;
        let input = CreateTask {
            project_id,
            name: "Design".to_string(),
            description: "design notes".to_string(),
        };

        let task = run(&pool, "test.commit", move |conn| {
            Box::pin(async move { TaskRepo::insert_row(&mut *conn, &input).await })
        })
        .await
        .unwrap();

        assert_eq!(task.project_id, project_id);
        assert_eq!(task_rows(&pool, project_id).await, 1);
    }
}
