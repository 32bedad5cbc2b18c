//! SQLite schema definitions.

/// Current schema version for migrations.
pub const SCHEMA_VERSION: i32 = 1;

/// Complete schema for the local database.
pub const SCHEMA: &str = r#"
-- Practice sessions
CREATE TABLE IF NOT EXISTS sessions (
    id TEXT PRIMARY KEY,
    user_id TEXT,
    category_id TEXT NOT NULL,
    trials_count INTEGER NOT NULL,
    started_at INTEGER NOT NULL,
    completed_at INTEGER,
    synced INTEGER NOT NULL DEFAULT 0,
    remote_id TEXT
);

-- One row per scored trial within a session
CREATE TABLE IF NOT EXISTS trial_results (
    id TEXT PRIMARY KEY,
    session_id TEXT NOT NULL REFERENCES sessions(id),
    trial_number INTEGER NOT NULL,
    surah_id INTEGER NOT NULL,
    surah_name TEXT NOT NULL,
    surah_english_name TEXT NOT NULL,
    start_ayah INTEGER NOT NULL,
    start_global_ayah_number INTEGER NOT NULL,
    end_surah_id INTEGER NOT NULL,
    end_surah_name TEXT NOT NULL,
    end_surah_english_name TEXT NOT NULL,
    end_ayah INTEGER NOT NULL,
    arabic_snippet TEXT,
    arabic_end_snippet TEXT,
    score INTEGER,
    notes TEXT NOT NULL DEFAULT '',
    synced INTEGER NOT NULL DEFAULT 0
);

-- Append-only log of local mutations awaiting upload
CREATE TABLE IF NOT EXISTS sync_queue (
    id TEXT PRIMARY KEY,
    operation TEXT NOT NULL,
    table_name TEXT NOT NULL,
    record_id TEXT NOT NULL,
    payload TEXT NOT NULL,
    created_at INTEGER NOT NULL,
    attempts INTEGER NOT NULL DEFAULT 0
);

-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY
);

-- Indexes
CREATE INDEX IF NOT EXISTS idx_sessions_user ON sessions(user_id);
CREATE INDEX IF NOT EXISTS idx_sessions_synced ON sessions(synced);
CREATE INDEX IF NOT EXISTS idx_trial_results_session ON trial_results(session_id);
CREATE INDEX IF NOT EXISTS idx_trial_results_synced ON trial_results(synced);
CREATE INDEX IF NOT EXISTS idx_sync_queue_created ON sync_queue(created_at);
CREATE INDEX IF NOT EXISTS idx_sync_queue_record ON sync_queue(record_id);
"#;
