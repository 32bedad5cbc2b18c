//! Sync engine: drains the local store to a remote sink.
//!
//! Sessions upload one at a time so a single bad row cannot block the
//! rest. A session's trials go up as one batch after the session row
//! lands. Failures accumulate in the report; the pass keeps going.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::db::{DbError, LocalSession, LocalTrialResult, SqliteStore};

mod error;

pub use error::SyncError;

/// Sessions whose queue items have failed this many times are skipped
/// and reported as stalled instead of retried forever.
pub const DEFAULT_RETRY_CAP: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    Idle,
    Syncing,
    Completed,
    Failed,
}

/// Outcome of one full sync pass.
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub status: SyncStatus,
    pub uploaded_sessions: usize,
    pub uploaded_trials: usize,
    pub errors: Vec<String>,
    /// Local session ids skipped because they hit the retry cap.
    pub stalled: Vec<String>,
    /// Epoch milliseconds when the pass finished.
    pub last_sync_time: i64,
}

/// Session row as sent to the backend.
#[derive(Debug, Clone, Serialize)]
pub struct SessionUpload {
    pub local_id: String,
    pub user_id: String,
    pub category_id: String,
    pub trials_count: u32,
    pub started_at: i64,
    pub completed_at: Option<i64>,
}

impl SessionUpload {
    fn from_local(session: &LocalSession, user_id: &str) -> Self {
        Self {
            local_id: session.id.clone(),
            user_id: user_id.to_string(),
            category_id: session.category_id.clone(),
            trials_count: session.trials_count,
            started_at: session.started_at,
            completed_at: session.completed_at,
        }
    }
}

/// Trial row as sent to the backend.
#[derive(Debug, Clone, Serialize)]
pub struct TrialUpload {
    pub trial_number: u32,
    #[serde(flatten)]
    pub trial: hifdh_core::Trial,
    pub score: Option<u8>,
    pub notes: String,
}

impl TrialUpload {
    fn from_local(result: &LocalTrialResult) -> Self {
        Self {
            trial_number: result.trial_number,
            trial: result.trial.clone(),
            score: result.score,
            notes: result.notes.clone(),
        }
    }
}

/// Backend's identity for an uploaded session.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteSession {
    pub id: String,
}

/// Upload target. The production impl talks HTTP; tests use fakes.
#[allow(async_fn_in_trait)]
pub trait RemoteSink {
    async fn insert_session(&self, upload: &SessionUpload) -> Result<RemoteSession, SyncError>;

    async fn insert_trials_batch(
        &self,
        remote_session_id: &str,
        trials: &[TrialUpload],
    ) -> Result<(), SyncError>;
}

/// The signed-in identity, as much of it as sync needs.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user_id: String,
}

/// Authentication backend interface. Sync only reads the current
/// session; the sign-in flows belong to the embedding application.
#[allow(async_fn_in_trait)]
pub trait AuthProvider {
    async fn session(&self) -> Result<Option<AuthSession>, SyncError>;
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, SyncError>;
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthSession, SyncError>;
    async fn sign_out(&self) -> Result<(), SyncError>;
}

/// Connection settings for the HTTP sink.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub base_url: String,
    pub bearer_token: Option<String>,
    pub retry_cap: u32,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/api".to_string(),
            bearer_token: None,
            retry_cap: DEFAULT_RETRY_CAP,
        }
    }
}

/// Remote sink backed by the backend's REST API.
pub struct HttpRemoteSink {
    client: reqwest::Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl HttpRemoteSink {
    pub fn new(config: &SyncConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            bearer_token: config.bearer_token.clone(),
        }
    }

    async fn post<T: Serialize + ?Sized>(
        &self,
        url: String,
        body: &T,
    ) -> Result<reqwest::Response, SyncError> {
        let mut request = self.client.post(&url).json(body);
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SyncError::Backend {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }
}

impl RemoteSink for HttpRemoteSink {
    async fn insert_session(&self, upload: &SessionUpload) -> Result<RemoteSession, SyncError> {
        let response = self
            .post(format!("{}/sessions", self.base_url), upload)
            .await?;
        response
            .json::<RemoteSession>()
            .await
            .map_err(|e| SyncError::Parse(e.to_string()))
    }

    async fn insert_trials_batch(
        &self,
        remote_session_id: &str,
        trials: &[TrialUpload],
    ) -> Result<(), SyncError> {
        self.post(
            format!("{}/sessions/{remote_session_id}/trials", self.base_url),
            trials,
        )
        .await?;
        Ok(())
    }
}

struct Inner {
    syncing: Mutex<bool>,
    retry_cap: u32,
}

/// Coordinates sync passes. Cheap to clone; all clones share the busy
/// flag, so at most one pass runs at a time across them.
#[derive(Clone)]
pub struct SyncEngine {
    inner: Arc<Inner>,
}

impl SyncEngine {
    pub fn new(retry_cap: u32) -> Self {
        Self {
            inner: Arc::new(Inner {
                syncing: Mutex::new(false),
                retry_cap,
            }),
        }
    }

    /// Upload every unsynced session, then each session's unsynced
    /// trials as one batch.
    ///
    /// Returns `Err` only when the pass could not run at all (busy, not
    /// authenticated, or local database failure). Per-session upload
    /// failures land in the report's `errors` and bump that session's
    /// queue attempts; the pass continues with the next session.
    pub async fn perform_full_sync<S, A>(
        &self,
        store: &mut SqliteStore,
        sink: &S,
        auth: &A,
    ) -> Result<SyncReport, SyncError>
    where
        S: RemoteSink,
        A: AuthProvider,
    {
        {
            let mut syncing = self.inner.syncing.lock().await;
            if *syncing {
                return Err(SyncError::AlreadyInProgress);
            }
            *syncing = true;
        }

        let result = self.sync_pass(store, sink, auth).await;
        *self.inner.syncing.lock().await = false;
        result
    }

    async fn sync_pass<S, A>(
        &self,
        store: &mut SqliteStore,
        sink: &S,
        auth: &A,
    ) -> Result<SyncReport, SyncError>
    where
        S: RemoteSink,
        A: AuthProvider,
    {
        let user = auth
            .session()
            .await?
            .ok_or(SyncError::NotAuthenticated)?;

        let sessions = store.get_unsynced_sessions()?;
        debug!(count = sessions.len(), "starting sync pass");

        let mut uploaded_sessions = 0;
        let mut uploaded_trials = 0;
        let mut errors = Vec::new();
        let mut stalled = Vec::new();

        for session in &sessions {
            let attempts = store.queue_attempts(&session.id)?;
            if attempts >= self.inner.retry_cap {
                warn!(
                    session_id = %session.id,
                    attempts,
                    "session exceeded retry cap, skipping"
                );
                stalled.push(session.id.clone());
                continue;
            }

            match upload_session(store, sink, &user.user_id, session).await {
                Ok(trial_count) => {
                    uploaded_sessions += 1;
                    uploaded_trials += trial_count;
                }
                Err(e) => {
                    errors.push(format!("session {}: {e}", session.id));
                    store.increment_queue_attempts(&session.id)?;
                }
            }
        }

        let status = if errors.is_empty() {
            SyncStatus::Completed
        } else {
            SyncStatus::Failed
        };
        info!(
            uploaded_sessions,
            uploaded_trials,
            errors = errors.len(),
            stalled = stalled.len(),
            "sync pass finished"
        );

        Ok(SyncReport {
            status,
            uploaded_sessions,
            uploaded_trials,
            errors,
            stalled,
            last_sync_time: chrono::Utc::now().timestamp_millis(),
        })
    }
}

async fn upload_session<S: RemoteSink>(
    store: &mut SqliteStore,
    sink: &S,
    user_id: &str,
    session: &LocalSession,
) -> Result<usize, SyncError> {
    let upload = SessionUpload::from_local(session, user_id);
    let remote = sink.insert_session(&upload).await?;
    store.mark_session_synced(&session.id, &remote.id)?;
    store.remove_queue_items_for_record(&session.id)?;

    let trials = store.get_unsynced_trials(Some(&session.id))?;
    if !trials.is_empty() {
        let uploads: Vec<TrialUpload> = trials.iter().map(TrialUpload::from_local).collect();
        sink.insert_trials_batch(&remote.id, &uploads).await?;
        store.mark_trials_synced(&session.id)?;
        for trial in &trials {
            store.remove_queue_items_for_record(&trial.id)?;
        }
    }
    Ok(trials.len())
}

/// Whether any local rows still await upload.
pub fn needs_sync(store: &SqliteStore) -> Result<bool, DbError> {
    Ok(!store.get_unsynced_sessions()?.is_empty() || !store.get_unsynced_trials(None)?.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{NewSession, NewTrialResult};
    use hifdh_core::Trial;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex as StdMutex;
    use tokio::sync::Notify;

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

    fn seed_session(store: &SqliteStore, category: &str, trials: u32) -> String {
        let id = store
            .save_session(&NewSession {
                user_id: Some("user-1".to_string()),
                category_id: category.to_string(),
                trials_count: trials,
                started_at: 1_700_000_000_000,
                completed_at: Some(1_700_000_100_000),
            })
            .unwrap();
        for n in 1..=trials {
            store
                .save_trial(&NewTrialResult {
                    session_id: id.clone(),
                    trial_number: n,
                    trial: sample_trial(),
                    score: Some(4),
                    notes: String::new(),
                })
                .unwrap();
        }
        id
    }

    #[derive(Clone)]
    struct FakeAuth {
        signed_in: bool,
    }

    impl AuthProvider for FakeAuth {
        async fn session(&self) -> Result<Option<AuthSession>, SyncError> {
            Ok(self.signed_in.then(|| AuthSession {
                user_id: "user-1".to_string(),
            }))
        }

        async fn sign_in(&self, _: &str, _: &str) -> Result<AuthSession, SyncError> {
            unimplemented!()
        }

        async fn sign_up(&self, _: &str, _: &str) -> Result<AuthSession, SyncError> {
            unimplemented!()
        }

        async fn sign_out(&self) -> Result<(), SyncError> {
            Ok(())
        }
    }

    /// Succeeds for every session except those whose category matches
    /// `fail_category`.
    #[derive(Default)]
    struct RecordingSink {
        fail_category: Option<String>,
        sessions: StdMutex<Vec<SessionUpload>>,
        trial_batches: StdMutex<Vec<(String, usize)>>,
    }

    impl RemoteSink for RecordingSink {
        async fn insert_session(
            &self,
            upload: &SessionUpload,
        ) -> Result<RemoteSession, SyncError> {
            if self.fail_category.as_deref() == Some(upload.category_id.as_str()) {
                return Err(SyncError::Backend {
                    status: 500,
                    message: "boom".to_string(),
                });
            }
            self.sessions.lock().unwrap().push(upload.clone());
            Ok(RemoteSession {
                id: format!("remote-{}", upload.local_id),
            })
        }

        async fn insert_trials_batch(
            &self,
            remote_session_id: &str,
            trials: &[TrialUpload],
        ) -> Result<(), SyncError> {
            self.trial_batches
                .lock()
                .unwrap()
                .push((remote_session_id.to_string(), trials.len()));
            Ok(())
        }
    }

    #[tokio::test]
    async fn full_sync_uploads_sessions_then_trial_batches() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let id = seed_session(&store, "LAST_5_JUZ", 3);

        let engine = SyncEngine::new(DEFAULT_RETRY_CAP);
        let sink = RecordingSink::default();
        let auth = FakeAuth { signed_in: true };

        let report = engine
            .perform_full_sync(&mut store, &sink, &auth)
            .await
            .unwrap();

        assert_eq!(report.status, SyncStatus::Completed);
        assert_eq!(report.uploaded_sessions, 1);
        assert_eq!(report.uploaded_trials, 3);
        assert!(report.errors.is_empty());

        let session = store.get_session(&id).unwrap().unwrap();
        assert!(session.synced);
        assert_eq!(session.remote_id, Some(format!("remote-{id}")));
        assert!(store.sync_queue(50).unwrap().is_empty());
        assert_eq!(
            *sink.trial_batches.lock().unwrap(),
            vec![(format!("remote-{id}"), 3)]
        );
    }

    #[tokio::test]
    async fn one_failing_session_does_not_block_the_rest() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let good = seed_session(&store, "LAST_5_JUZ", 2);
        let bad = seed_session(&store, "BAD", 1);

        let engine = SyncEngine::new(DEFAULT_RETRY_CAP);
        let sink = RecordingSink {
            fail_category: Some("BAD".to_string()),
            ..Default::default()
        };
        let auth = FakeAuth { signed_in: true };

        let report = engine
            .perform_full_sync(&mut store, &sink, &auth)
            .await
            .unwrap();

        assert_eq!(report.status, SyncStatus::Failed);
        assert_eq!(report.uploaded_sessions, 1);
        assert_eq!(report.uploaded_trials, 2);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains(&bad));

        assert!(store.get_session(&good).unwrap().unwrap().synced);
        assert!(!store.get_session(&bad).unwrap().unwrap().synced);
        assert_eq!(store.queue_attempts(&bad).unwrap(), 1);
        assert_eq!(store.queue_attempts(&good).unwrap(), 0);
    }

    #[tokio::test]
    async fn second_pass_uploads_nothing() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        seed_session(&store, "FULL_QURAN", 2);

        let engine = SyncEngine::new(DEFAULT_RETRY_CAP);
        let sink = RecordingSink::default();
        let auth = FakeAuth { signed_in: true };

        engine
            .perform_full_sync(&mut store, &sink, &auth)
            .await
            .unwrap();
        assert!(!needs_sync(&store).unwrap());

        let report = engine
            .perform_full_sync(&mut store, &sink, &auth)
            .await
            .unwrap();
        assert_eq!(report.uploaded_sessions, 0);
        assert_eq!(report.uploaded_trials, 0);
        assert_eq!(sink.sessions.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unauthenticated_sync_is_rejected() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        seed_session(&store, "FULL_QURAN", 1);

        let engine = SyncEngine::new(DEFAULT_RETRY_CAP);
        let sink = RecordingSink::default();

        let result = engine
            .perform_full_sync(&mut store, &sink, &FakeAuth { signed_in: false })
            .await;
        assert!(matches!(result, Err(SyncError::NotAuthenticated)));

        // The busy flag must clear even after a rejected pass.
        let report = engine
            .perform_full_sync(&mut store, &sink, &FakeAuth { signed_in: true })
            .await
            .unwrap();
        assert_eq!(report.uploaded_sessions, 1);
    }

    #[tokio::test]
    async fn sessions_past_retry_cap_are_stalled_not_retried() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let id = seed_session(&store, "FULL_QURAN", 1);
        for _ in 0..DEFAULT_RETRY_CAP {
            store.increment_queue_attempts(&id).unwrap();
        }

        let engine = SyncEngine::new(DEFAULT_RETRY_CAP);
        let sink = RecordingSink::default();
        let auth = FakeAuth { signed_in: true };

        let report = engine
            .perform_full_sync(&mut store, &sink, &auth)
            .await
            .unwrap();

        assert_eq!(report.status, SyncStatus::Completed);
        assert_eq!(report.uploaded_sessions, 0);
        assert_eq!(report.stalled, vec![id.clone()]);
        assert!(sink.sessions.lock().unwrap().is_empty());
        assert!(!store.get_session(&id).unwrap().unwrap().synced);
    }

    /// Signals entry, then parks until released, so a second pass can be
    /// attempted while the first is mid-flight.
    struct ParkedSink {
        entered: Arc<Notify>,
        release: Arc<Notify>,
    }

    impl RemoteSink for ParkedSink {
        async fn insert_session(
            &self,
            upload: &SessionUpload,
        ) -> Result<RemoteSession, SyncError> {
            self.entered.notify_one();
            self.release.notified().await;
            Ok(RemoteSession {
                id: format!("remote-{}", upload.local_id),
            })
        }

        async fn insert_trials_batch(
            &self,
            _remote_session_id: &str,
            _trials: &[TrialUpload],
        ) -> Result<(), SyncError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn concurrent_sync_is_rejected() {
        let engine = SyncEngine::new(DEFAULT_RETRY_CAP);
        let entered = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let auth = FakeAuth { signed_in: true };

        let background = {
            let engine = engine.clone();
            let sink = ParkedSink {
                entered: entered.clone(),
                release: release.clone(),
            };
            let auth = auth.clone();
            tokio::spawn(async move {
                let mut store = SqliteStore::open_in_memory().unwrap();
                seed_session(&store, "FULL_QURAN", 1);
                engine.perform_full_sync(&mut store, &sink, &auth).await
            })
        };

        entered.notified().await;

        let mut store = SqliteStore::open_in_memory().unwrap();
        let result = engine
            .perform_full_sync(&mut store, &RecordingSink::default(), &auth)
            .await;
        assert!(matches!(result, Err(SyncError::AlreadyInProgress)));

        release.notify_one();
        let report = background.await.unwrap().unwrap();
        assert_eq!(report.uploaded_sessions, 1);
    }
}
