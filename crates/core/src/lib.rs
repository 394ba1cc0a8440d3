//! Pure domain logic for project/task completion tracking.
//!
//! Nothing in this crate performs I/O. The storage layer (`tasktally-db`)
//! and the HTTP layer (`tasktally-api`) build on these types.

pub mod completion;
pub mod error;
pub mod search;
pub mod types;
pub mod validation;
