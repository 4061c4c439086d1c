use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tokio::sync::watch;

use crate::core::error::{AppError, Result};

/// Role assigned by the service at login. The client never decides this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Citizen,
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Citizen => write!(f, "citizen"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// The authenticated identity held for this client: bearer token plus the
/// user record returned by the login endpoint. Persisted as one combined
/// JSON record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub user_id: i64,
    pub email: String,
    pub role: Role,
}

/// File-backed session store. Answers "is anyone logged in, and as whom"
/// and persists that answer across runs.
///
/// All consumers share one store; external changes are observable through
/// [`SessionStore::subscribe`] so no caller has to re-read the file itself.
pub struct SessionStore {
    path: PathBuf,
    current: RwLock<Option<Session>>,
    notify: watch::Sender<Option<Session>>,
}

impl SessionStore {
    /// Open the store, loading any persisted session. Malformed or
    /// unreadable persisted data is treated as no session, never an error.
    pub fn open(path: PathBuf) -> Self {
        let current = Self::read_file(&path);
        let (notify, _) = watch::channel(current.clone());
        Self {
            path,
            current: RwLock::new(current),
            notify,
        }
    }

    fn read_file(path: &Path) -> Option<Session> {
        let raw = std::fs::read_to_string(path).ok()?;
        serde_json::from_str(&raw).ok()
    }

    pub fn current(&self) -> Option<Session> {
        match self.current.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current().is_some()
    }

    /// Persist a new session and notify subscribers.
    pub fn store(&self, session: Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    AppError::Storage(format!("Failed to create session directory: {e}"))
                })?;
            }
        }

        let raw = serde_json::to_string_pretty(&session)
            .map_err(|e| AppError::Storage(format!("Failed to serialize session: {e}")))?;
        std::fs::write(&self.path, raw)
            .map_err(|e| AppError::Storage(format!("Failed to write session file: {e}")))?;

        self.replace(Some(session));
        Ok(())
    }

    /// Remove the persisted session. Idempotent: clearing when already
    /// anonymous is a no-op.
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(AppError::Storage(format!(
                    "Failed to remove session file: {e}"
                )))
            }
        }

        self.replace(None);
        Ok(())
    }

    /// Watch for session changes (login, logout, 401 invalidation).
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.notify.subscribe()
    }

    fn replace(&self, value: Option<Session>) {
        match self.current.write() {
            Ok(mut guard) => *guard = value.clone(),
            Err(poisoned) => *poisoned.into_inner() = value.clone(),
        }
        // Send fails only when every receiver is gone, which is fine
        let _ = self.notify.send(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_session() -> Session {
        Session {
            access_token: "token-abc".to_string(),
            user_id: 7,
            email: "fatima@example.com".to_string(),
            role: Role::Citizen,
        }
    }

    #[test]
    fn test_store_and_reopen_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");

        let store = SessionStore::open(path.clone());
        assert!(!store.is_authenticated());
        store.store(sample_session()).unwrap();

        let reopened = SessionStore::open(path);
        assert_eq!(reopened.current(), Some(sample_session()));
        assert!(reopened.is_authenticated());
    }

    #[test]
    fn test_malformed_file_reads_as_anonymous() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = SessionStore::open(path);
        assert_eq!(store.current(), None);
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::open(dir.path().join("session.json"));

        store.store(sample_session()).unwrap();
        store.clear().unwrap();
        assert_eq!(store.current(), None);

        // Clearing again when already anonymous raises no error
        store.clear().unwrap();
        assert_eq!(store.current(), None);
    }

    #[test]
    fn test_subscribers_observe_changes() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::open(dir.path().join("session.json"));
        let mut receiver = store.subscribe();

        assert_eq!(*receiver.borrow(), None);
        store.store(sample_session()).unwrap();
        assert!(receiver.has_changed().unwrap());
        assert_eq!(*receiver.borrow_and_update(), Some(sample_session()));

        store.clear().unwrap();
        assert_eq!(*receiver.borrow_and_update(), None);
    }

    #[test]
    fn test_store_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let store = SessionStore::open(path.clone());
        store.store(sample_session()).unwrap();
        assert!(path.exists());
    }
}
