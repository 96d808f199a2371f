//! The persisted login session.
//!
//! A session is a bearer token plus the profile that came back with it. Both live in a
//! [`KeyValueStorage`] under [`TOKEN_KEY`] and [`USER_KEY`] and are always written and
//! removed together.

use std::sync::Arc;

use log::{debug, warn};

use crate::models::UserProfile;
use crate::storage::{KeyValueStorage, StorageError};

pub const TOKEN_KEY: &str = "auth_token";
pub const USER_KEY: &str = "user_data";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: UserProfile,
}

/// Cheap-to-clone handle to the session storage.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("active", &self.is_active())
            .finish()
    }
}

impl SessionStore {
    pub fn new(storage: impl KeyValueStorage + 'static) -> Self {
        Self {
            storage: Arc::new(storage),
        }
    }

    pub fn from_shared(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// Stores the token and profile as one write.
    pub fn set_session(&self, token: &str, user: &UserProfile) -> Result<(), StorageError> {
        let user_json = serde_json::to_string(user)?;
        self.storage
            .set_entries(&[(TOKEN_KEY, token), (USER_KEY, &user_json)])?;
        debug!("session stored for user {}", user.id);
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.token().is_some()
    }

    /// The stored bearer token. Unreadable storage counts as no token.
    pub fn token(&self) -> Option<String> {
        match self.storage.get(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!("failed to read session token: {e}");
                None
            }
        }
    }

    /// The cached profile. Missing or malformed data reads as `None`.
    pub fn current_user(&self) -> Option<UserProfile> {
        let raw = match self.storage.get(USER_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!("failed to read cached user: {e}");
                return None;
            }
        };

        serde_json::from_str(&raw)
            .inspect_err(|e| warn!("ignoring malformed cached user: {e}"))
            .ok()
    }

    pub fn session(&self) -> Option<Session> {
        Some(Session {
            token: self.token()?,
            user: self.current_user()?,
        })
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove_entries(&[TOKEN_KEY, USER_KEY])?;
        debug!("session cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn user(first_name: &str) -> UserProfile {
        UserProfile {
            id: 1,
            first_name: first_name.to_owned(),
            ..UserProfile::default()
        }
    }

    #[test]
    fn fresh_store_has_no_session() {
        let store = SessionStore::new(MemoryStorage::new());

        assert!(!store.is_active());
        assert_eq!(store.current_user(), None);
        assert_eq!(store.session(), None);
    }

    #[test]
    fn is_active_follows_the_last_call() {
        let store = SessionStore::new(MemoryStorage::new());
        let ops = [true, true, false, true, false, false, true];

        for set in ops {
            if set {
                store.set_session("t1", &user("A")).expect("set");
            } else {
                store.clear().expect("clear");
            }
            assert_eq!(store.is_active(), set);
        }
    }

    #[test]
    fn set_session_stores_both_halves() {
        let store = SessionStore::new(MemoryStorage::new());
        store.set_session("t1", &user("A")).expect("set");

        let session = store.session().expect("session should exist");
        assert_eq!(session.token, "t1");
        assert_eq!(session.user.first_name, "A");
    }

    #[test]
    fn cleared_store_has_no_user() {
        let store = SessionStore::new(MemoryStorage::new());
        store.set_session("t1", &user("A")).expect("set");
        store.clear().expect("clear");

        assert_eq!(store.current_user(), None);
        assert_eq!(store.token(), None);
    }

    #[test]
    fn malformed_user_reads_as_none() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .set_entries(&[(TOKEN_KEY, "t1"), (USER_KEY, "{not json")])
            .expect("set");
        let store = SessionStore::from_shared(storage);

        assert!(store.is_active());
        assert_eq!(store.current_user(), None);
        assert_eq!(store.session(), None);
    }

    #[test]
    fn clones_share_storage() {
        let store = SessionStore::new(MemoryStorage::new());
        let other = store.clone();

        store.set_session("t1", &user("A")).expect("set");
        assert!(other.is_active());
    }
}
