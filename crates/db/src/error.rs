use tasktally_core::error::CoreError;

/// Error returned by every repository operation.
///
/// Domain failures (validation, missing rows, state conflicts) stay typed
/// under [`StoreError::Core`]. Anything the database itself reports,
/// including constraint violations and failed commits, is a
/// [`StoreError::Storage`] carrying the sqlx cause.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
