//! Task entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tasktally_core::types::{DbId, Timestamp};

/// A task row from the `tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub description: String,
    pub created_at: Timestamp,
    /// Set once, when the task is completed.
    pub completed_at: Option<Timestamp>,
    pub completed: bool,
}

/// DTO for creating a new task under an existing project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTask {
    pub project_id: DbId,
    pub name: String,
    pub description: String,
}

/// A task as returned by name search within a project.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TaskSummary {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub created_at: Timestamp,
    pub completed_at: Option<Timestamp>,
    pub completed: bool,
}
