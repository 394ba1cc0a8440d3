//! Project entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tasktally_core::types::{DbId, Timestamp};

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub created_at: Timestamp,
    pub tasks: i32,
    pub completed_tasks: i32,
    pub incompleted_tasks: i32,
    pub completion: i32,
}

/// DTO for creating a new project. Counters always start at zero.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub name: String,
    pub description: String,
}

/// A project as returned by name search.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectSummary {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub created_at: Timestamp,
    pub completion: i32,
    pub completed_tasks: i32,
    pub incompleted_tasks: i32,
}

/// Aggregate counters of a project as they stand after a counter update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow)]
pub struct ProjectCounters {
    pub tasks: i32,
    pub completed_tasks: i32,
    pub incompleted_tasks: i32,
    pub completion: i32,
}
