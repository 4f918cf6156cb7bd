//! Session persistence against a file-backed key-value store.
//!
//! One logical key holds the whole serialized [`SessionState`]; every save
//! rewrites the record in full. There is no versioning or migration of the
//! stored shape.

use crate::state::SessionState;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

/// Errors from persistence operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Logical key under which the session record lives.
const SESSION_KEY: &str = "session";

/// A key-value store backed by one JSON file per key under a data directory.
#[derive(Debug, Clone)]
pub struct StateStore {
    dir: PathBuf,
}

impl StateStore {
    /// Create a store rooted at the given data directory.
    ///
    /// The directory is created lazily on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The data directory this store writes under.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Read the persisted session record, or defaults when none exists.
    pub async fn load(&self) -> Result<SessionState, StoreError> {
        match fs::read_to_string(self.key_path(SESSION_KEY)).await {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("no saved session, starting from defaults");
                Ok(SessionState::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Serialize and rewrite the whole session record.
    pub async fn save(&self, state: &SessionState) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).await?;
        let content = serde_json::to_string_pretty(state)?;
        fs::write(self.key_path(SESSION_KEY), content).await?;
        tracing::debug!(entries = state.history.len(), "session saved");
        Ok(())
    }

    /// Remove the persisted record. Removing an absent record is not an
    /// error.
    pub async fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(self.key_path(SESSION_KEY)).await {
            Ok(()) => {
                tracing::debug!("session cleared");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Whether a persisted record currently exists.
    pub async fn exists(&self) -> bool {
        fs::metadata(self.key_path(SESSION_KEY)).await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{PlayerId, DEFAULT_PLAYER_ID};
    use tempfile::TempDir;

    fn sample_state() -> SessionState {
        SessionState {
            player_id: PlayerId::default(),
            player_name: "Mara".to_string(),
            history: vec!["clue".to_string(), "temple".to_string()],
        }
    }

    #[tokio::test]
    async fn test_load_without_save_yields_defaults() {
        let dir = TempDir::new().expect("temp dir");
        let store = StateStore::new(dir.path());

        let state = store.load().await.expect("load");
        assert_eq!(state, SessionState::default());
        assert!(!store.exists().await);
    }

    #[tokio::test]
    async fn test_save_then_load_roundtrip() {
        let dir = TempDir::new().expect("temp dir");
        let store = StateStore::new(dir.path());
        let state = sample_state();

        store.save(&state).await.expect("save");
        assert!(store.exists().await);

        let loaded = store.load().await.expect("load");
        assert_eq!(loaded, state);
    }

    #[tokio::test]
    async fn test_save_is_idempotent_on_disk() {
        let dir = TempDir::new().expect("temp dir");
        let store = StateStore::new(dir.path());
        let state = sample_state();

        store.save(&state).await.expect("first save");
        let first = fs::read(store.key_path(SESSION_KEY)).await.expect("read");

        store.save(&state).await.expect("second save");
        let second = fs::read(store.key_path(SESSION_KEY)).await.expect("read");

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_clear_then_load_yields_defaults() {
        let dir = TempDir::new().expect("temp dir");
        let store = StateStore::new(dir.path());

        store.save(&sample_state()).await.expect("save");
        store.clear().await.expect("clear");

        assert!(!store.exists().await);
        let state = store.load().await.expect("load");
        assert_eq!(state.player_id.as_str(), DEFAULT_PLAYER_ID);
        assert!(state.player_name.is_empty());
        assert!(state.history.is_empty());
    }

    #[tokio::test]
    async fn test_clear_on_empty_store_is_ok() {
        let dir = TempDir::new().expect("temp dir");
        let store = StateStore::new(dir.path());

        store.clear().await.expect("clear of absent record");
    }
}
