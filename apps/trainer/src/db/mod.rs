//! Local persistence: SQLite store, schema, and error types.

pub mod error;
pub mod schema;
pub mod store;

pub use error::DbError;
pub use store::{
    default_db_path, LocalSession, LocalTrialResult, NewSession, NewTrialResult, SessionUpdate,
    SqliteStore, SyncOperation, SyncQueueItem,
};
