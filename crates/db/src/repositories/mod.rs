//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Mutations run through
//! [`crate::transaction::run`]; the connection-scoped helpers they compose
//! are crate-private so counters cannot be written outside a task mutation.

pub mod project_repo;
pub mod task_repo;

pub use project_repo::ProjectRepo;
pub use task_repo::TaskRepo;
