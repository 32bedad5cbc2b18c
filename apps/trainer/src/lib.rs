//! Memorization trainer application library.
//!
//! Wires the core planning library to the outside world: a SQLite local
//! store with a sync queue, a sync engine that drains the queue to a
//! remote backend, an HTTP verse-text provider, and audio addressing.
//! Everything works offline; sync catches the backend up later.

pub mod db;
pub mod providers;
pub mod sync;
pub mod trial;

pub use db::{
    default_db_path, DbError, LocalSession, LocalTrialResult, NewSession, NewTrialResult,
    SessionUpdate, SqliteStore, SyncOperation, SyncQueueItem,
};
pub use providers::{
    verse_audio_url, HttpTextProvider, ProviderError, TextProvider, VerseText, DEFAULT_RECITER,
};
pub use sync::{
    needs_sync, AuthProvider, AuthSession, HttpRemoteSink, RemoteSession, RemoteSink,
    SessionUpload, SyncConfig, SyncEngine, SyncError, SyncReport, SyncStatus, TrialUpload,
    DEFAULT_RETRY_CAP,
};
pub use trial::{generate_trial, TrialConfig};
