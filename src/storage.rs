//! Session persistence
//!
//! The session lives in three string keys of a key-value store. In the
//! browser that store is `localStorage`; tests use `MemoryStore`.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::Result;
use crate::types::Session;

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const USER_ID_KEY: &str = "user_id";
pub const DISPLAY_NAME_KEY: &str = "user_first_name";

/// Minimal string key-value storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Reads and writes the session through a `KeyValueStore`
pub struct SessionStore {
    backend: Box<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(backend: Box<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Persist all three session fields
    pub fn save(&self, session: &Session) -> Result<()> {
        self.backend.set(ACCESS_TOKEN_KEY, &session.access_token)?;
        self.backend.set(USER_ID_KEY, &session.user_id)?;
        self.backend.set(DISPLAY_NAME_KEY, &session.display_name)?;
        log::debug!("Session stored for user {}", session.user_id);
        Ok(())
    }

    /// Current session; requires both token and user id
    pub fn load(&self) -> Result<Option<Session>> {
        let token = self.backend.get(ACCESS_TOKEN_KEY)?.filter(|t| !t.is_empty());
        let user_id = self.backend.get(USER_ID_KEY)?.filter(|u| !u.is_empty());

        let (Some(access_token), Some(user_id)) = (token, user_id) else {
            return Ok(None);
        };
        let display_name = self.backend.get(DISPLAY_NAME_KEY)?.unwrap_or_default();

        Ok(Some(Session {
            access_token,
            user_id,
            display_name,
        }))
    }

    /// Remove every session key
    pub fn clear(&self) -> Result<()> {
        // Remove all keys even if one fails, then report the first failure
        let results = [
            self.backend.remove(ACCESS_TOKEN_KEY),
            self.backend.remove(USER_ID_KEY),
            self.backend.remove(DISPLAY_NAME_KEY),
        ];
        results.into_iter().collect::<Result<Vec<()>>>()?;
        Ok(())
    }

    /// Raw access for inspection in tests and diagnostics
    pub fn backend(&self) -> &dyn KeyValueStore {
        self.backend.as_ref()
    }
}
