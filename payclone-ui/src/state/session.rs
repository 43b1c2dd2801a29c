//! Sign-in Session
//!
//! The session lives in local storage under `payclone_session` and is
//! mirrored into a signal so the router can react to sign-in and sign-out.
//! It is created only by [`SessionContext::begin`] after a successful login
//! and torn down only by [`SessionContext::end`].

use leptos::*;
use payclone::{Session, SessionError, SessionManager, SessionStore};

use super::storage;

const SESSION_KEY: &str = "payclone_session";

/// [`SessionStore`] backed by browser local storage
#[derive(Debug, Default)]
pub struct LocalSessionStore;

impl SessionStore for LocalSessionStore {
    fn load(&self) -> Result<Option<Session>, SessionError> {
        match storage::read(SESSION_KEY) {
            None => Ok(None),
            Some(json) => serde_json::from_str(&json)
                .map(Some)
                .map_err(|e| SessionError::Corrupt(e.to_string())),
        }
    }

    fn save(&self, session: &Session) -> Result<(), SessionError> {
        let json = serde_json::to_string(session).map_err(|e| SessionError::Corrupt(e.to_string()))?;
        if storage::write(SESSION_KEY, &json) {
            Ok(())
        } else {
            Err(SessionError::Storage {
                path: SESSION_KEY.to_string(),
                error: "local storage unavailable".to_string(),
            })
        }
    }

    fn clear(&self) -> Result<(), SessionError> {
        storage::remove(SESSION_KEY);
        Ok(())
    }
}

#[derive(Clone, Copy)]
pub struct SessionContext {
    manager: StoredValue<SessionManager<LocalSessionStore>>,
    current: RwSignal<Option<Session>>,
}

/// Restore any stored session and provide it to the tree
pub fn provide_session() {
    let manager = SessionManager::restore(LocalSessionStore);
    let current = create_rw_signal(manager.current().cloned());

    provide_context(SessionContext {
        manager: store_value(manager),
        current,
    });
}

pub fn use_session() -> SessionContext {
    expect_context::<SessionContext>()
}

impl SessionContext {
    /// Current session (reactive)
    pub fn get(&self) -> Option<Session> {
        self.current.get()
    }

    /// Current session without subscribing
    pub fn get_untracked(&self) -> Option<Session> {
        self.current.get_untracked()
    }

    pub fn is_signed_in(&self) -> bool {
        self.current.with(Option::is_some)
    }

    pub fn begin(&self, session: Session) -> Result<(), SessionError> {
        let mut result = Ok(());
        self.manager
            .update_value(|m| result = m.begin(session.clone()).map(|_| ()));
        result?;
        self.current.set(Some(session));
        Ok(())
    }

    pub fn end(&self) {
        self.manager.update_value(|m| {
            if let Err(e) = m.end() {
                web_sys::console::warn_1(&format!("Clearing session failed: {}", e).into());
            }
        });
        self.current.set(None);
    }
}
