//! Input validation for project and task writes.
//!
//! Runs before any storage access; every failure is a
//! [`CoreError::Validation`]. Lengths are counted in characters, not bytes,
//! after trimming surrounding whitespace.

use crate::error::CoreError;
use crate::types::DbId;

pub const PROJECT_NAME_MIN: usize = 2;
pub const PROJECT_NAME_MAX: usize = 50;
pub const PROJECT_DESCRIPTION_MIN: usize = 2;
pub const PROJECT_DESCRIPTION_MAX: usize = 200;

pub const TASK_NAME_MIN: usize = 2;
pub const TASK_NAME_MAX: usize = 50;
pub const TASK_DESCRIPTION_MIN: usize = 2;

/// Validate a field's presence and character length.
///
/// `max` of `None` means no upper bound.
pub fn validate_length(
    field: &str,
    value: &str,
    min: usize,
    max: Option<usize>,
) -> Result<(), CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    let len = trimmed.chars().count();
    if len < min {
        return Err(CoreError::Validation(format!(
            "{field} must be at least {min} characters"
        )));
    }
    if let Some(max) = max {
        if len > max {
            return Err(CoreError::Validation(format!(
                "{field} must be at most {max} characters"
            )));
        }
    }
    Ok(())
}

/// Validate the fields of a new project.
pub fn validate_project(name: &str, description: &str) -> Result<(), CoreError> {
    validate_length("name", name, PROJECT_NAME_MIN, Some(PROJECT_NAME_MAX))?;
    validate_length(
        "description",
        description,
        PROJECT_DESCRIPTION_MIN,
        Some(PROJECT_DESCRIPTION_MAX),
    )
}

/// Validate the fields of a new task.
pub fn validate_task(project_id: DbId, name: &str, description: &str) -> Result<(), CoreError> {
    validate_project_id(project_id)?;
    validate_length("name", name, TASK_NAME_MIN, Some(TASK_NAME_MAX))?;
    validate_length("description", description, TASK_DESCRIPTION_MIN, None)
}

/// Reject ids that can never refer to a stored row.
pub fn validate_project_id(project_id: DbId) -> Result<(), CoreError> {
    if project_id <= 0 {
        return Err(CoreError::Validation(
            "project_id must be a positive integer".to_string(),
        ));
    }
    Ok(())
}

/// Require a non-blank name, as used for lookups by name.
pub fn require_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation("name is required".to_string()));
    }
    Ok(())
}
