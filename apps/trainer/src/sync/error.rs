//! Sync error types.

use thiserror::Error;

use crate::db::DbError;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("backend error ({status}): {message}")]
    Backend { status: u16, message: String },

    #[error("database error: {0}")]
    Database(#[from] DbError),

    #[error("not authenticated")]
    NotAuthenticated,

    #[error("sync already in progress")]
    AlreadyInProgress,

    #[error("unexpected response: {0}")]
    Parse(String),
}
