//! Repository for the local session/trial store and its sync queue.
//!
//! The store exclusively owns the three tables; callers never write rows
//! directly. Every durable mutation also appends one sync-queue item,
//! except writes that mark rows as synced (those must not re-enqueue, or
//! sync would loop forever).

use chrono::Utc;
use hifdh_core::Trial;
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

use crate::db::error::DbError;

type Result<T> = std::result::Result<T, DbError>;

/// A practice session as stored locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalSession {
    pub id: String,
    pub user_id: Option<String>,
    pub category_id: String,
    pub trials_count: u32,
    /// Epoch milliseconds.
    pub started_at: i64,
    pub completed_at: Option<i64>,
    pub synced: bool,
    /// Remote row id, set once sync succeeds.
    pub remote_id: Option<String>,
}

/// Fields for a new session row; id and sync state are store-owned.
#[derive(Debug, Clone, Serialize)]
pub struct NewSession {
    pub user_id: Option<String>,
    pub category_id: String,
    pub trials_count: u32,
    pub started_at: i64,
    pub completed_at: Option<i64>,
}

/// Partial session update. Only the set fields are written.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synced: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_id: Option<String>,
}

/// One scored trial row within a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalTrialResult {
    pub id: String,
    pub session_id: String,
    pub trial_number: u32,
    pub trial: Trial,
    pub score: Option<u8>,
    pub notes: String,
    pub synced: bool,
}

/// Fields for a new trial row; id and sync state are store-owned.
#[derive(Debug, Clone, Serialize)]
pub struct NewTrialResult {
    pub session_id: String,
    pub trial_number: u32,
    pub trial: Trial,
    pub score: Option<u8>,
    pub notes: String,
}

/// Mutation kind recorded in the sync queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncOperation {
    Insert,
    Update,
    Delete,
}

impl SyncOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Insert => "insert",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "insert" => Some(Self::Insert),
            "update" => Some(Self::Update),
            "delete" => Some(Self::Delete),
            _ => None,
        }
    }
}

/// One pending mutation in the append-only sync log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncQueueItem {
    pub id: String,
    pub operation: SyncOperation,
    pub table_name: String,
    pub record_id: String,
    /// JSON-serialized record fields at write time.
    pub payload: String,
    pub created_at: i64,
    pub attempts: u32,
}

/// SQLite-backed local store.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open database at path, creating if necessary.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    /// Open in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    fn initialize(&self) -> Result<()> {
        self.conn.execute_batch(super::schema::SCHEMA)?;
        self.conn.execute(
            "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
            params![super::schema::SCHEMA_VERSION],
        )?;
        Ok(())
    }

    fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }

    fn now_ms() -> i64 {
        Utc::now().timestamp_millis()
    }

    // === Sessions ===

    /// Insert a new session and enqueue it for sync. Returns the local id.
    pub fn save_session(&self, session: &NewSession) -> Result<String> {
        let id = Self::generate_id();
        self.conn.execute(
            "INSERT INTO sessions (id, user_id, category_id, trials_count, started_at, completed_at, synced, remote_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0, NULL)",
            params![
                id,
                session.user_id,
                session.category_id,
                session.trials_count,
                session.started_at,
                session.completed_at,
            ],
        )?;

        self.enqueue(SyncOperation::Insert, "sessions", &id, session)?;
        Ok(id)
    }

    /// Apply a partial update to a session.
    ///
    /// Enqueues an update operation unless the update itself marks the
    /// row synced.
    pub fn update_session(&self, id: &str, updates: &SessionUpdate) -> Result<()> {
        let mut fields: Vec<&str> = Vec::new();
        let mut values: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(completed_at) = updates.completed_at {
            fields.push("completed_at = ?");
            values.push(Box::new(completed_at));
        }
        if let Some(synced) = updates.synced {
            fields.push("synced = ?");
            values.push(Box::new(synced as i64));
        }
        if let Some(remote_id) = &updates.remote_id {
            fields.push("remote_id = ?");
            values.push(Box::new(remote_id.clone()));
        }
        if fields.is_empty() {
            return Ok(());
        }

        values.push(Box::new(id.to_string()));
        let sql = format!("UPDATE sessions SET {} WHERE id = ?", fields.join(", "));
        let params: Vec<&dyn rusqlite::ToSql> = values.iter().map(|v| v.as_ref()).collect();
        let changed = self.conn.execute(&sql, params.as_slice())?;
        if changed == 0 {
            return Err(DbError::SessionNotFound(id.to_string()));
        }

        if updates.synced != Some(true) {
            self.enqueue(SyncOperation::Update, "sessions", id, updates)?;
        }
        Ok(())
    }

    pub fn get_session(&self, id: &str) -> Result<Option<LocalSession>> {
        self.conn
            .query_row(
                "SELECT id, user_id, category_id, trials_count, started_at, completed_at, synced, remote_id
                 FROM sessions WHERE id = ?1",
                params![id],
                Self::row_to_session,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Most recent sessions first.
    pub fn session_history(&self, limit: usize, offset: usize) -> Result<Vec<LocalSession>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, category_id, trials_count, started_at, completed_at, synced, remote_id
             FROM sessions ORDER BY started_at DESC LIMIT ?1 OFFSET ?2",
        )?;
        let sessions = stmt
            .query_map(params![limit, offset], Self::row_to_session)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(sessions)
    }

    pub fn get_unsynced_sessions(&self) -> Result<Vec<LocalSession>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, category_id, trials_count, started_at, completed_at, synced, remote_id
             FROM sessions WHERE synced = 0 ORDER BY started_at ASC",
        )?;
        let sessions = stmt
            .query_map([], Self::row_to_session)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(sessions)
    }

    /// Flip the synced flag and record the remote id. Does not enqueue.
    pub fn mark_session_synced(&self, local_id: &str, remote_id: &str) -> Result<()> {
        self.conn.execute(
            "UPDATE sessions SET synced = 1, remote_id = ?1 WHERE id = ?2",
            params![remote_id, local_id],
        )?;
        Ok(())
    }

    fn row_to_session(row: &rusqlite::Row) -> rusqlite::Result<LocalSession> {
        Ok(LocalSession {
            id: row.get(0)?,
            user_id: row.get(1)?,
            category_id: row.get(2)?,
            trials_count: row.get(3)?,
            started_at: row.get(4)?,
            completed_at: row.get(5)?,
            synced: row.get::<_, i64>(6)? != 0,
            remote_id: row.get(7)?,
        })
    }

    // === Trial results ===

    /// Insert a scored trial row and enqueue it for sync. Returns the
    /// local id.
    pub fn save_trial(&self, trial: &NewTrialResult) -> Result<String> {
        let id = Self::generate_id();
        let t = &trial.trial;
        self.conn.execute(
            "INSERT INTO trial_results (
                id, session_id, trial_number, surah_id, surah_name, surah_english_name,
                start_ayah, start_global_ayah_number, end_surah_id, end_surah_name,
                end_surah_english_name, end_ayah, arabic_snippet, arabic_end_snippet,
                score, notes, synced
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, 0)",
            params![
                id,
                trial.session_id,
                trial.trial_number,
                t.surah_id,
                t.surah_name,
                t.surah_english_name,
                t.start_ayah,
                t.start_global_ayah_number,
                t.end_surah_id,
                t.end_surah_name,
                t.end_surah_english_name,
                t.end_ayah,
                t.arabic_snippet,
                t.arabic_end_snippet,
                trial.score,
                trial.notes,
            ],
        )?;

        self.enqueue(SyncOperation::Insert, "trial_results", &id, trial)?;
        Ok(id)
    }

    pub fn trials_for_session(&self, session_id: &str) -> Result<Vec<LocalTrialResult>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, session_id, trial_number, surah_id, surah_name, surah_english_name,
                    start_ayah, start_global_ayah_number, end_surah_id, end_surah_name,
                    end_surah_english_name, end_ayah, arabic_snippet, arabic_end_snippet,
                    score, notes, synced
             FROM trial_results WHERE session_id = ?1 ORDER BY trial_number ASC",
        )?;
        let trials = stmt
            .query_map(params![session_id], Self::row_to_trial)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(trials)
    }

    pub fn get_unsynced_trials(&self, session_id: Option<&str>) -> Result<Vec<LocalTrialResult>> {
        let base = "SELECT id, session_id, trial_number, surah_id, surah_name, surah_english_name,
                    start_ayah, start_global_ayah_number, end_surah_id, end_surah_name,
                    end_surah_english_name, end_ayah, arabic_snippet, arabic_end_snippet,
                    score, notes, synced
             FROM trial_results WHERE synced = 0";
        match session_id {
            Some(sid) => {
                let mut stmt = self
                    .conn
                    .prepare(&format!("{base} AND session_id = ?1 ORDER BY trial_number ASC"))?;
                let rows = stmt
                    .query_map(params![sid], Self::row_to_trial)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(rows)
            }
            None => {
                let mut stmt = self.conn.prepare(&format!("{base} ORDER BY trial_number ASC"))?;
                let rows = stmt
                    .query_map([], Self::row_to_trial)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(rows)
            }
        }
    }

    /// Flip the synced flag for all of a session's trials. Does not
    /// enqueue.
    pub fn mark_trials_synced(&self, session_id: &str) -> Result<()> {
        self.conn.execute(
            "UPDATE trial_results SET synced = 1 WHERE session_id = ?1",
            params![session_id],
        )?;
        Ok(())
    }

    fn row_to_trial(row: &rusqlite::Row) -> rusqlite::Result<LocalTrialResult> {
        Ok(LocalTrialResult {
            id: row.get(0)?,
            session_id: row.get(1)?,
            trial_number: row.get(2)?,
            trial: Trial {
                surah_id: row.get(3)?,
                surah_name: row.get(4)?,
                surah_english_name: row.get(5)?,
                start_ayah: row.get(6)?,
                start_global_ayah_number: row.get(7)?,
                end_surah_id: row.get(8)?,
                end_surah_name: row.get(9)?,
                end_surah_english_name: row.get(10)?,
                end_ayah: row.get(11)?,
                arabic_snippet: row.get::<_, Option<String>>(12)?.unwrap_or_default(),
                arabic_end_snippet: row.get(13)?,
            },
            score: row.get(14)?,
            notes: row.get(15)?,
            synced: row.get::<_, i64>(16)? != 0,
        })
    }

    // === Sync queue ===

    fn enqueue<T: Serialize>(
        &self,
        operation: SyncOperation,
        table_name: &str,
        record_id: &str,
        payload: &T,
    ) -> Result<()> {
        let id = Self::generate_id();
        let payload = serde_json::to_string(payload)?;
        self.conn.execute(
            "INSERT INTO sync_queue (id, operation, table_name, record_id, payload, created_at, attempts)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0)",
            params![id, operation.as_str(), table_name, record_id, payload, Self::now_ms()],
        )?;
        Ok(())
    }

    /// Oldest queue items first.
    pub fn sync_queue(&self, limit: usize) -> Result<Vec<SyncQueueItem>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, operation, table_name, record_id, payload, created_at, attempts
             FROM sync_queue ORDER BY created_at ASC LIMIT ?1",
        )?;
        let items = stmt
            .query_map(params![limit], |row| {
                let op: String = row.get(1)?;
                Ok(SyncQueueItem {
                    id: row.get(0)?,
                    operation: SyncOperation::from_str(&op).unwrap_or(SyncOperation::Insert),
                    table_name: row.get(2)?,
                    record_id: row.get(3)?,
                    payload: row.get(4)?,
                    created_at: row.get(5)?,
                    attempts: row.get(6)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(items)
    }

    /// Drop all queue items belonging to one record, after its upload
    /// succeeded.
    pub fn remove_queue_items_for_record(&self, record_id: &str) -> Result<usize> {
        let count = self.conn.execute(
            "DELETE FROM sync_queue WHERE record_id = ?1",
            params![record_id],
        )?;
        Ok(count)
    }

    pub fn increment_queue_attempts(&self, record_id: &str) -> Result<()> {
        self.conn.execute(
            "UPDATE sync_queue SET attempts = attempts + 1 WHERE record_id = ?1",
            params![record_id],
        )?;
        Ok(())
    }

    /// Highest attempt count among a record's queue items (0 if none).
    pub fn queue_attempts(&self, record_id: &str) -> Result<u32> {
        let attempts = self.conn.query_row(
            "SELECT COALESCE(MAX(attempts), 0) FROM sync_queue WHERE record_id = ?1",
            params![record_id],
            |row| row.get(0),
        )?;
        Ok(attempts)
    }

    // === Statistics ===

    /// Number of completed sessions.
    pub fn session_count(&self) -> Result<usize> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM sessions WHERE completed_at IS NOT NULL",
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Average self-rated score across scored trials, optionally limited
    /// to one category.
    pub fn average_score(&self, category_id: Option<&str>) -> Result<f64> {
        let avg: Option<f64> = match category_id {
            Some(cid) => self.conn.query_row(
                "SELECT AVG(score) FROM trial_results
                 WHERE score IS NOT NULL
                   AND session_id IN (SELECT id FROM sessions WHERE category_id = ?1)",
                params![cid],
                |row| row.get(0),
            )?,
            None => self.conn.query_row(
                "SELECT AVG(score) FROM trial_results WHERE score IS NOT NULL",
                [],
                |row| row.get(0),
            )?,
        };
        Ok(avg.unwrap_or(0.0))
    }

    // === Maintenance ===

    pub fn clear_all_data(&self) -> Result<()> {
        self.conn.execute_batch(
            "DELETE FROM trial_results;
             DELETE FROM sessions;
             DELETE FROM sync_queue;",
        )?;
        Ok(())
    }

    /// Delete sessions (and their trials) older than the given number of
    /// days.
    pub fn delete_old_sessions(&self, days_old: i64) -> Result<usize> {
        let cutoff = Self::now_ms() - days_old * 24 * 60 * 60 * 1000;
        self.conn.execute(
            "DELETE FROM trial_results WHERE session_id IN
                 (SELECT id FROM sessions WHERE started_at < ?1)",
            params![cutoff],
        )?;
        let count = self.conn.execute(
            "DELETE FROM sessions WHERE started_at < ?1",
            params![cutoff],
        )?;
        Ok(count)
    }
}

/// Default on-disk database location.
pub fn default_db_path() -> Option<std::path::PathBuf> {
    dirs::data_dir().map(|d| d.join("hifdh-trainer").join("hifdh.db"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_trial() -> Trial {
        Trial {
            surah_id: 78,
            surah_name: "النبأ".to_string(),
            surah_english_name: "An-Naba".to_string(),
            start_ayah: 1,
            start_global_ayah_number: 5673,
            end_surah_id: 78,
            end_surah_name: "النبأ".to_string(),
            end_surah_english_name: "An-Naba".to_string(),
            end_ayah: 12,
            arabic_snippet: "عَمَّ يَتَسَاءَلُونَ ...".to_string(),
            arabic_end_snippet: None,
        }
    }

    fn new_session() -> NewSession {
        NewSession {
            user_id: Some("user-1".to_string()),
            category_id: "LAST_5_JUZ".to_string(),
            trials_count: 5,
            started_at: 1_700_000_000_000,
            completed_at: None,
        }
    }

    #[test]
    fn save_session_round_trip() {
        let store = SqliteStore::open_in_memory().unwrap();
        let id = store.save_session(&new_session()).unwrap();

        let session = store.get_session(&id).unwrap().unwrap();
        assert_eq!(session.category_id, "LAST_5_JUZ");
        assert_eq!(session.trials_count, 5);
        assert!(!session.synced);
        assert_eq!(session.remote_id, None);
    }

    #[test]
    fn writes_enqueue_sync_items() {
        let store = SqliteStore::open_in_memory().unwrap();
        let id = store.save_session(&new_session()).unwrap();

        let queue = store.sync_queue(50).unwrap();
        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].operation, SyncOperation::Insert);
        assert_eq!(queue[0].table_name, "sessions");
        assert_eq!(queue[0].record_id, id);
        assert_eq!(queue[0].attempts, 0);

        store
            .update_session(&id, &SessionUpdate { completed_at: Some(1_700_000_100_000), ..Default::default() })
            .unwrap();
        assert_eq!(store.sync_queue(50).unwrap().len(), 2);
    }

    #[test]
    fn marking_synced_does_not_enqueue() {
        let store = SqliteStore::open_in_memory().unwrap();
        let id = store.save_session(&new_session()).unwrap();
        assert_eq!(store.sync_queue(50).unwrap().len(), 1);

        store.mark_session_synced(&id, "remote-9").unwrap();
        store
            .update_session(&id, &SessionUpdate { synced: Some(true), ..Default::default() })
            .unwrap();
        assert_eq!(store.sync_queue(50).unwrap().len(), 1);

        let session = store.get_session(&id).unwrap().unwrap();
        assert!(session.synced);
        assert_eq!(session.remote_id.as_deref(), Some("remote-9"));
    }

    #[test]
    fn update_unknown_session_fails() {
        let store = SqliteStore::open_in_memory().unwrap();
        let result = store.update_session(
            "missing",
            &SessionUpdate { completed_at: Some(1), ..Default::default() },
        );
        assert!(matches!(result, Err(DbError::SessionNotFound(_))));
    }

    #[test]
    fn trial_round_trip_preserves_fields() {
        let store = SqliteStore::open_in_memory().unwrap();
        let session_id = store.save_session(&new_session()).unwrap();

        let new_trial = NewTrialResult {
            session_id: session_id.clone(),
            trial_number: 1,
            trial: sample_trial(),
            score: Some(4),
            notes: "hesitated at ayah 7".to_string(),
        };
        store.save_trial(&new_trial).unwrap();

        let trials = store.trials_for_session(&session_id).unwrap();
        assert_eq!(trials.len(), 1);
        assert_eq!(trials[0].trial, sample_trial());
        assert_eq!(trials[0].score, Some(4));
        assert_eq!(trials[0].notes, "hesitated at ayah 7");
        assert!(!trials[0].synced);
    }

    #[test]
    fn unsynced_trials_filter_by_session() {
        let store = SqliteStore::open_in_memory().unwrap();
        let a = store.save_session(&new_session()).unwrap();
        let b = store.save_session(&new_session()).unwrap();

        for (sid, n) in [(&a, 1), (&a, 2), (&b, 1)] {
            store
                .save_trial(&NewTrialResult {
                    session_id: sid.clone(),
                    trial_number: n,
                    trial: sample_trial(),
                    score: Some(3),
                    notes: String::new(),
                })
                .unwrap();
        }

        assert_eq!(store.get_unsynced_trials(None).unwrap().len(), 3);
        assert_eq!(store.get_unsynced_trials(Some(&a)).unwrap().len(), 2);

        store.mark_trials_synced(&a).unwrap();
        assert_eq!(store.get_unsynced_trials(Some(&a)).unwrap().len(), 0);
        assert_eq!(store.get_unsynced_trials(None).unwrap().len(), 1);
    }

    #[test]
    fn queue_attempts_track_failures() {
        let store = SqliteStore::open_in_memory().unwrap();
        let id = store.save_session(&new_session()).unwrap();

        assert_eq!(store.queue_attempts(&id).unwrap(), 0);
        store.increment_queue_attempts(&id).unwrap();
        store.increment_queue_attempts(&id).unwrap();
        assert_eq!(store.queue_attempts(&id).unwrap(), 2);

        store.remove_queue_items_for_record(&id).unwrap();
        assert_eq!(store.queue_attempts(&id).unwrap(), 0);
        assert!(store.sync_queue(50).unwrap().is_empty());
    }

    #[test]
    fn statistics_reflect_completed_and_scored_rows() {
        let store = SqliteStore::open_in_memory().unwrap();
        let a = store.save_session(&new_session()).unwrap();
        let _b = store.save_session(&new_session()).unwrap();
        store
            .update_session(&a, &SessionUpdate { completed_at: Some(1_700_000_100_000), ..Default::default() })
            .unwrap();

        assert_eq!(store.session_count().unwrap(), 1);

        for score in [2u8, 4u8] {
            store
                .save_trial(&NewTrialResult {
                    session_id: a.clone(),
                    trial_number: 1,
                    trial: sample_trial(),
                    score: Some(score),
                    notes: String::new(),
                })
                .unwrap();
        }
        assert_eq!(store.average_score(None).unwrap(), 3.0);
        assert_eq!(store.average_score(Some("LAST_5_JUZ")).unwrap(), 3.0);
        assert_eq!(store.average_score(Some("FULL_QURAN")).unwrap(), 0.0);
    }

    #[test]
    fn clear_all_data_empties_tables() {
        let store = SqliteStore::open_in_memory().unwrap();
        let id = store.save_session(&new_session()).unwrap();
        store
            .save_trial(&NewTrialResult {
                session_id: id,
                trial_number: 1,
                trial: sample_trial(),
                score: None,
                notes: String::new(),
            })
            .unwrap();

        store.clear_all_data().unwrap();
        assert_eq!(store.session_history(10, 0).unwrap().len(), 0);
        assert!(store.sync_queue(50).unwrap().is_empty());
    }
}
