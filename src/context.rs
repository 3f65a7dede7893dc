//! Session context passed through the client, login flow and dashboard
//!
//! Bundles configuration, the session store and the page host so nothing
//! reaches for browser globals directly.

use std::cell::Cell;
use std::rc::Rc;

use crate::config::Config;
use crate::error::Result;
use crate::storage::SessionStore;
use crate::types::Session;

pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired or unauthorized. Please log in again.";

/// Page-level side effects
pub trait Host {
    /// Blocking user notification
    fn alert(&self, message: &str);

    /// Full page reload; the dashboard boots again from storage
    fn reload(&self);
}

pub struct SessionContext {
    config: Config,
    sessions: SessionStore,
    host: Rc<dyn Host>,
    expired: Cell<bool>,
}

impl SessionContext {
    pub fn new(config: Config, sessions: SessionStore, host: Rc<dyn Host>) -> Self {
        Self {
            config,
            sessions,
            host,
            expired: Cell::new(false),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn host(&self) -> &dyn Host {
        self.host.as_ref()
    }

    /// Current session; unreadable storage counts as logged out
    pub fn session(&self) -> Option<Session> {
        match self.sessions.load() {
            Ok(session) => session,
            Err(e) => {
                log::error!("Failed to read session: {e}");
                None
            }
        }
    }

    /// Clear the session and reset the view
    pub fn logout(&self) -> Result<()> {
        let cleared = self.sessions.clear();
        if let Err(e) = &cleared {
            log::error!("Failed to clear session: {e}");
        }
        log::info!("Session cleared, reloading view");
        self.host.reload();
        cleared
    }

    /// Server rejected the session: notify and log out, once per page load.
    /// Concurrent requests failing together produce a single alert and reload.
    pub fn expire_session(&self) {
        if self.expired.replace(true) {
            log::debug!("Session already expired, skipping logout");
            return;
        }
        self.host.alert(SESSION_EXPIRED_MESSAGE);
        // The session is gone either way; a storage failure is already logged
        let _ = self.logout();
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use super::{Host, SessionContext};
    use crate::config::Config;
    use crate::storage::{MemoryStore, SessionStore};
    use crate::types::Session;

    /// Records alerts and reloads instead of touching a page
    #[derive(Default)]
    pub struct RecordingHost {
        pub alerts: RefCell<Vec<String>>,
        pub reloads: Cell<usize>,
    }

    impl Host for RecordingHost {
        fn alert(&self, message: &str) {
            self.alerts.borrow_mut().push(message.to_string());
        }

        fn reload(&self) {
            self.reloads.set(self.reloads.get() + 1);
        }
    }

    pub fn session() -> Session {
        Session {
            access_token: "T".into(),
            user_id: "1".into(),
            display_name: "Ana".into(),
        }
    }

    /// Context backed by memory storage, optionally pre-logged-in
    pub fn context(api_base: &str, session: Option<Session>) -> (Rc<SessionContext>, Rc<RecordingHost>) {
        let host = Rc::new(RecordingHost::default());
        let sessions = SessionStore::new(Box::new(MemoryStore::new()));
        if let Some(session) = session {
            sessions.save(&session).unwrap();
        }
        let host_dyn: Rc<dyn Host> = host.clone();
        let ctx = SessionContext::new(Config::new(api_base), sessions, host_dyn);
        (Rc::new(ctx), host)
    }
}

#[cfg(test)]
mod tests {
    use super::SESSION_EXPIRED_MESSAGE;
    use super::testing::{context, session};
    use crate::storage::{ACCESS_TOKEN_KEY, DISPLAY_NAME_KEY, USER_ID_KEY};

    #[test]
    fn test_logout_clears_and_reloads() {
        let (ctx, host) = context("http://localhost", Some(session()));
        assert_eq!(ctx.session(), Some(session()));

        ctx.logout().unwrap();

        assert_eq!(ctx.session(), None);
        for key in [ACCESS_TOKEN_KEY, USER_ID_KEY, DISPLAY_NAME_KEY] {
            assert_eq!(ctx.sessions().backend().get(key).unwrap(), None);
        }
        assert_eq!(host.reloads.get(), 1);
    }

    #[test]
    fn test_session_expiry_fires_once() {
        let (ctx, host) = context("http://localhost", Some(session()));

        for _ in 0..3 {
            ctx.expire_session();
        }

        assert_eq!(ctx.session(), None);
        assert_eq!(host.alerts.borrow().as_slice(), [SESSION_EXPIRED_MESSAGE]);
        assert_eq!(host.reloads.get(), 1);
    }
}
