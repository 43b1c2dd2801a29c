//! Session
//!
//! The signed-in user's bearer token, held in an explicit session object.
//! Login begins a session and persists it; logout ends it and clears the
//! backing store. Nothing reads the token from ambient global storage.

use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use thiserror::Error;

use crate::model::{Id, User};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user_id: Id,
    pub name: String,
    pub email: String,
}

impl Session {
    pub fn new(token: impl Into<String>, user: &User) -> Self {
        Self {
            token: token.into(),
            user_id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }

    /// `Authorization` header value
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Not signed in")]
    Missing,

    #[error("Session storage error at {path}: {error}")]
    Storage { path: String, error: String },

    #[error("Stored session is unreadable: {0}")]
    Corrupt(String),
}

pub type SessionResult<T> = Result<T, SessionError>;

/// Where a session is persisted between runs
pub trait SessionStore {
    fn load(&self) -> SessionResult<Option<Session>>;
    fn save(&self, session: &Session) -> SessionResult<()>;
    fn clear(&self) -> SessionResult<()>;
}

/// Process-local store, used by tests and embedded callers
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<Session>> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> SessionResult<Option<Session>> {
        Ok(self.slot().clone())
    }

    fn save(&self, session: &Session) -> SessionResult<()> {
        *self.slot() = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> SessionResult<()> {
        *self.slot() = None;
        Ok(())
    }
}

/// JSON file store used by the CLI
#[cfg(feature = "native")]
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: std::path::PathBuf,
}

#[cfg(feature = "native")]
impl FileSessionStore {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn storage_error(&self, error: impl ToString) -> SessionError {
        SessionError::Storage {
            path: self.path.display().to_string(),
            error: error.to_string(),
        }
    }
}

#[cfg(feature = "native")]
impl SessionStore for FileSessionStore {
    fn load(&self) -> SessionResult<Option<Session>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.storage_error(e)),
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| SessionError::Corrupt(e.to_string()))
    }

    fn save(&self, session: &Session) -> SessionResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| self.storage_error(e))?;
        }
        let json = serde_json::to_string_pretty(session)
            .map_err(|e| SessionError::Corrupt(e.to_string()))?;
        std::fs::write(&self.path, json).map_err(|e| self.storage_error(e))
    }

    fn clear(&self) -> SessionResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.storage_error(e)),
        }
    }
}

/// Owns the current session and its persistence
pub struct SessionManager<S: SessionStore> {
    store: S,
    current: Option<Session>,
}

impl<S: SessionStore> SessionManager<S> {
    /// Restore a previously persisted session, if any.
    ///
    /// An unreadable stored session is discarded rather than reported.
    pub fn restore(store: S) -> Self {
        let current = match store.load() {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!("Discarding stored session: {}", e);
                let _ = store.clear();
                None
            }
        };
        Self { store, current }
    }

    /// Explicit init after a successful login
    pub fn begin(&mut self, session: Session) -> SessionResult<&Session> {
        self.store.save(&session)?;
        tracing::info!("Signed in as user {}", session.user_id);
        Ok(&*self.current.insert(session))
    }

    /// Explicit teardown on logout
    pub fn end(&mut self) -> SessionResult<()> {
        self.current = None;
        self.store.clear()?;
        tracing::info!("Signed out");
        Ok(())
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    /// The current session, or `SessionError::Missing`
    pub fn require(&self) -> SessionResult<&Session> {
        self.current.as_ref().ok_or(SessionError::Missing)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: 4,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            profile_picture: None,
            join_date: None,
        }
    }

    #[test]
    fn test_begin_and_end() {
        let mut manager = SessionManager::restore(MemorySessionStore::new());
        assert!(matches!(manager.require(), Err(SessionError::Missing)));

        let session = Session::new("dummy-jwt-token-for-4", &user());
        manager.begin(session.clone()).unwrap();
        assert_eq!(manager.require().unwrap(), &session);
        assert_eq!(manager.store().load().unwrap(), Some(session));
        assert_eq!(manager.current().unwrap().bearer(), "Bearer dummy-jwt-token-for-4");

        manager.end().unwrap();
        assert!(manager.current().is_none());
        assert_eq!(manager.store().load().unwrap(), None);
    }

    #[cfg(feature = "native")]
    #[test]
    fn test_file_store_persists_across_restore() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let mut manager = SessionManager::restore(FileSessionStore::new(&path));
        assert!(manager.current().is_none());
        manager.begin(Session::new("tok", &user())).unwrap();
        assert!(path.exists());

        let restored = SessionManager::restore(FileSessionStore::new(&path));
        assert_eq!(restored.current().unwrap().user_id, 4);

        let mut restored = restored;
        restored.end().unwrap();
        assert!(!path.exists());
        // Clearing twice is fine
        restored.end().unwrap();
    }

    #[cfg(feature = "native")]
    #[test]
    fn test_corrupt_file_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();

        let manager = SessionManager::restore(FileSessionStore::new(&path));
        assert!(manager.current().is_none());
        assert!(!path.exists());
    }
}
