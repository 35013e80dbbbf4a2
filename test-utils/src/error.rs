use thiserror::Error;

/// Errors that can occur while preparing a test environment.
#[derive(Error, Debug)]
pub enum TestError {
    /// Connecting to the in-memory database or creating a table failed.
    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),

    /// A resource was requested from the context before it was initialised.
    #[error("Test context is missing {0}")]
    Uninitialized(&'static str),
}
