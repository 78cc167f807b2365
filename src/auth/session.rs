//! Session management for authentication

use chrono::Utc;
use log::warn;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError};

use super::types::{AuthResponse, AuthUser};
use crate::error::Result;
use crate::storage::{KeyValueStoreExt, SharedStore};

const SESSION_KEY: &str = "session";

/// Session data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: Option<String>,

    /// Unix timestamp of expiry
    pub expires_at: Option<i64>,

    pub user: AuthUser,
}

impl Session {
    /// Build a session from a login or signup response, if it carries tokens
    pub fn from_response(response: &AuthResponse) -> Option<Self> {
        let tokens = response.session.as_ref()?;
        let expires_at = tokens.expires_at.or_else(|| {
            tokens
                .expires_in
                .map(|secs| Utc::now().timestamp() + secs)
        });

        Some(Self {
            access_token: tokens.access_token.clone(),
            refresh_token: tokens.refresh_token.clone(),
            expires_at,
            user: response.user.clone(),
        })
    }

    /// Check if the session has expired
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => Utc::now().timestamp() >= expires_at,
            None => false,
        }
    }
}

/// The current session, mirrored to a [`KeyValueStore`](crate::storage::KeyValueStore).
///
/// The stored value is read once, when the handle is created.
#[derive(Clone)]
pub struct SessionStore {
    store: SharedStore,
    current: Arc<Mutex<Option<Session>>>,
}

impl SessionStore {
    pub fn load(store: SharedStore) -> Result<Self> {
        let current = store.get_as::<Session>(SESSION_KEY)?;
        Ok(Self {
            store,
            current: Arc::new(Mutex::new(current)),
        })
    }

    pub fn current(&self) -> Option<Session> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Token to send with requests; expired sessions are not used
    pub fn access_token(&self) -> Option<String> {
        let current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        current
            .as_ref()
            .filter(|s| !s.is_expired())
            .map(|s| s.access_token.clone())
    }

    pub fn save(&self, session: Session) -> Result<()> {
        self.store.set_as(SESSION_KEY, &session)?;
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = Some(session);
        Ok(())
    }

    /// Forget the session. The in-memory copy is always cleared, even if the
    /// backing store fails.
    pub fn clear(&self) {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = None;
        if let Err(e) = self.store.remove(SESSION_KEY) {
            warn!("failed to remove persisted session: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::SessionTokens;
    use crate::storage::MemoryStore;
    use uuid::Uuid;

    fn session(expires_at: Option<i64>) -> Session {
        Session {
            access_token: "token".to_string(),
            refresh_token: None,
            expires_at,
            user: AuthUser {
                id: Uuid::new_v4(),
                email: Some("jan@example.com".to_string()),
            },
        }
    }

    #[test]
    fn expired_session_has_no_token() {
        let store = SessionStore::load(Arc::new(MemoryStore::new())).unwrap();
        store.save(session(Some(Utc::now().timestamp() - 10))).unwrap();
        assert!(store.current().is_some());
        assert_eq!(store.access_token(), None);
    }

    #[test]
    fn session_is_read_at_load_time() {
        let backing: SharedStore = Arc::new(MemoryStore::new());
        let first = SessionStore::load(backing.clone()).unwrap();
        first.save(session(None)).unwrap();

        let second = SessionStore::load(backing).unwrap();
        assert_eq!(second.access_token().as_deref(), Some("token"));

        first.clear();
        // Each handle owns its copy.
        assert!(first.current().is_none());
        assert!(second.current().is_some());
    }

    #[test]
    fn from_response_computes_expiry() {
        let response = AuthResponse {
            user: session(None).user,
            session: Some(SessionTokens {
                access_token: "abc".to_string(),
                refresh_token: Some("def".to_string()),
                expires_in: Some(3600),
                expires_at: None,
            }),
        };
        let built = Session::from_response(&response).unwrap();
        assert!(built.expires_at.unwrap() > Utc::now().timestamp());
        assert!(!built.is_expired());
    }

    #[test]
    fn from_response_without_tokens() {
        let response = AuthResponse {
            user: session(None).user,
            session: None,
        };
        assert!(Session::from_response(&response).is_none());
    }
}
