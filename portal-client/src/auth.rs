//! Credential bookkeeping shared by the [HttpClient][crate::http::HttpClient] and the
//! [SessionStore][crate::session::SessionStore]: persisted token and user, the in-memory session
//! and the forced logout on an unauthorized response.

use std::sync::{Arc, Mutex};

use common::error::PortalResult;
use portal_common::User;
use tokio::sync::watch;

use crate::{
    router::{Navigator, Page},
    session::Session,
    storage::Storage,
};

/// Storage key of the bearer token
pub const TOKEN_KEY: &str = "token";
/// Storage key of the JSON serialized [User]
pub const USER_KEY: &str = "user";

#[derive(Clone)]
pub struct AuthContext {
    storage: Arc<dyn Storage>,
    navigator: Arc<dyn Navigator>,
    state: Arc<watch::Sender<Session>>,
    /// Serializes [AuthContext::expire] so concurrent 401s clear and navigate once
    expiry: Arc<Mutex<()>>,
}

impl AuthContext {
    /// Create a context in the hydrating state. Nothing is read from `storage` until
    /// [AuthContext::hydrate].
    pub fn new(storage: Arc<dyn Storage>, navigator: Arc<dyn Navigator>) -> Self {
        let (state, _) = watch::channel(Session::hydrating());
        Self {
            storage,
            navigator,
            state: Arc::new(state),
            expiry: Arc::new(Mutex::new(())),
        }
    }

    /// Bearer token currently in storage
    pub fn token(&self) -> Option<String> {
        match self.storage.get(TOKEN_KEY) {
            Ok(token) => token.filter(|token| !token.is_empty()),
            Err(error) => {
                log::error!("Could not read the stored token. {error}");
                None
            }
        }
    }

    /// Token and user from storage when both are present and the user parses
    pub fn stored_credentials(&self) -> Option<(String, User)> {
        let token = self.token()?;
        let user_json = match self.storage.get(USER_KEY) {
            Ok(Some(inner)) => inner,
            Ok(None) => {
                log::debug!("Stored token has no matching user");
                return None;
            }
            Err(error) => {
                log::error!("Could not read the stored user. {error}");
                return None;
            }
        };
        match serde_json::from_str::<User>(&user_json) {
            Ok(user) => Some((token, user)),
            Err(error) => {
                log::warn!("Stored user cannot be parsed. {error}");
                None
            }
        }
    }

    /// Replace the in-memory session with what storage holds and finish loading. Storage itself
    /// is never modified here.
    pub fn hydrate(&self) -> Session {
        let session = match self.stored_credentials() {
            Some((_, user)) => {
                log::info!("Restored session for {}", user.email);
                Session::authenticated(user)
            }
            None => Session::anonymous(),
        };
        self.set_session(session.clone());
        session
    }

    /// Write `token` and `user` to storage. Either both are written or storage is left as it
    /// was.
    /// # Errors
    /// This function will return an error if the user cannot be serialized or storage rejects a
    /// write
    pub fn persist(&self, token: &str, user: &User) -> PortalResult<()> {
        let user_json = serde_json::to_string(user)?;
        let previous_token = self.storage.get(TOKEN_KEY)?;
        self.storage.set(TOKEN_KEY, token)?;
        if let Err(error) = self.storage.set(USER_KEY, &user_json) {
            let restored = match previous_token {
                Some(previous) => self.storage.set(TOKEN_KEY, &previous),
                None => self.storage.remove(TOKEN_KEY).map(|_| ()),
            };
            if let Err(restore_error) = restored {
                log::error!("Could not restore the previous token. {restore_error}");
            }
            return Err(error);
        }
        Ok(())
    }

    /// Delete the stored token and user. Both keys are always attempted. Returns true if anything
    /// was removed.
    /// # Errors
    /// This function will return the first error if a key could neither be removed nor blanked
    pub fn clear(&self) -> PortalResult<bool> {
        let token = self.discard(TOKEN_KEY);
        let user = self.discard(USER_KEY);
        match (token, user) {
            (Ok(token), Ok(user)) => Ok(token || user),
            (Err(error), _) | (_, Err(error)) => Err(error),
        }
    }

    /// Remove `key`. If the backend refuses the removal the value is overwritten with an empty
    /// string, which neither [AuthContext::token] nor hydration accept.
    fn discard(&self, key: &str) -> PortalResult<bool> {
        let error = match self.storage.remove(key) {
            Ok(previous) => return Ok(previous.is_some_and(|value| !value.is_empty())),
            Err(error) => error,
        };
        log::warn!("Could not remove `{key}` from storage, blanking it instead. {error}");
        let had_value = self
            .storage
            .get(key)
            .ok()
            .flatten()
            .is_some_and(|value| !value.is_empty());
        match self.storage.set(key, "") {
            Ok(()) => Ok(had_value),
            Err(blank_error) => {
                log::error!("Could not blank `{key}` either. {blank_error}");
                Err(error)
            }
        }
    }

    /// Snapshot of the current session
    pub fn session(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Receiver notified on every session change
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    pub(crate) fn set_session(&self, session: Session) {
        self.state.send_replace(session);
    }

    /// Forced logout after the server rejected the stored credentials. Safe to call from many
    /// requests at once: storage is cleared by the first caller and the login page is only
    /// navigated to if the visitor is not already there.
    pub fn expire(&self) {
        let _guard = match self.expiry.lock() {
            Ok(inner) => inner,
            Err(poisoned) => poisoned.into_inner(),
        };
        // Credentials that could not be cleared are treated as dropped so the session still ends
        let removed = match self.clear() {
            Ok(removed) => removed,
            Err(error) => {
                log::error!("Could not clear stored credentials. {error}");
                true
            }
        };
        if removed {
            log::warn!("Stored credentials were rejected by the server and have been cleared");
        }
        let was_authenticated = self.state.borrow().is_authenticated;
        if removed || was_authenticated {
            self.set_session(Session::anonymous());
        }
        // A navigator that does not track its location only moves when credentials were dropped
        let current = self.navigator.current();
        let on_login = current.as_deref() == Some(Page::Login.path());
        if !on_login && (removed || current.is_some()) {
            self.navigator.navigate(Page::Login);
        }
    }
}
