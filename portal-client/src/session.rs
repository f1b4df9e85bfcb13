//! Process wide "who is logged in" state. Operations never fail with an internal error: every
//! problem surfaces as an [AuthFailure] carrying a message fit for display.

use portal_common::{role::Role, AuthResponse, Credentials, RegisterRequest, User};
use thiserror::Error;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::{api, auth::AuthContext, http, http::HttpClient, scope::cancellable};

const LOGIN_FAILED: &str = "Login failed. Please check your email and password.";
const REGISTER_FAILED: &str = "Registration failed. Please try again.";
const NETWORK_FAILED: &str = "Unable to reach the server. Please check your connection and try again.";
const STORAGE_FAILED: &str = "Unable to save the session on this device.";
const CANCELLED: &str = "The request was cancelled.";

/// Identity state of the client
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub user: Option<User>,
    pub is_authenticated: bool,
    /// True until hydration from storage has completed
    pub loading: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Hydrating,
    Authenticated,
    Anonymous,
}

impl Session {
    pub const fn hydrating() -> Self {
        Self {
            user: None,
            is_authenticated: false,
            loading: true,
        }
    }

    pub const fn anonymous() -> Self {
        Self {
            user: None,
            is_authenticated: false,
            loading: false,
        }
    }

    pub const fn authenticated(user: User) -> Self {
        Self {
            user: Some(user),
            is_authenticated: true,
            loading: false,
        }
    }

    pub const fn phase(&self) -> SessionPhase {
        if self.loading {
            SessionPhase::Hydrating
        } else if self.is_authenticated {
            SessionPhase::Authenticated
        } else {
            SessionPhase::Anonymous
        }
    }

    /// Role of the logged in user
    pub fn role(&self) -> Option<Role> {
        self.user
            .as_ref()
            .filter(|_| self.is_authenticated)
            .map(|user| user.role)
    }
}

/// Display ready reason a login or registration did not go through
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AuthFailure {
    pub message: String,
}

impl AuthFailure {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Message for a failed request: the server's own text when it sent one, otherwise a
    /// generic message for the kind of failure
    fn from_http(error: &http::Error, fallback: &str) -> Self {
        if let Some(message) = error.server_message() {
            return Self::new(message);
        }
        match error {
            http::Error::Transport(_) => Self::new(NETWORK_FAILED),
            http::Error::Cancelled => Self::new(CANCELLED),
            _ => Self::new(fallback),
        }
    }
}

/// Session store bound to one [HttpClient] and its [AuthContext]
#[derive(Clone)]
pub struct SessionStore {
    client: HttpClient,
}

impl SessionStore {
    /// Create a store that is still hydrating
    pub const fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Create a store and immediately hydrate it from storage
    pub fn initialize(client: HttpClient) -> Self {
        let store = Self::new(client);
        store.hydrate();
        store
    }

    pub const fn client(&self) -> &HttpClient {
        &self.client
    }

    fn auth(&self) -> &AuthContext {
        self.client.auth()
    }

    /// Load the token and user from storage. Always finishes loading, authenticated only when
    /// both values are present and the user parses.
    pub fn hydrate(&self) -> Session {
        self.auth().hydrate()
    }

    pub fn session(&self) -> Session {
        self.auth().session()
    }

    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.auth().subscribe()
    }

    pub fn user(&self) -> Option<User> {
        self.session().user
    }

    pub fn is_authenticated(&self) -> bool {
        self.session().is_authenticated
    }

    pub fn is_admin(&self) -> bool {
        self.session().role() == Some(Role::Admin)
    }

    pub fn is_user(&self) -> bool {
        self.session().role() == Some(Role::User)
    }

    /// Log in with `credentials`, persisting the issued token and user on success
    /// # Errors
    /// This function will return an error if the form is invalid, the server rejects the
    /// credentials or the session cannot be stored. The session is unchanged in every error case.
    pub async fn login(&self, credentials: &Credentials) -> Result<User, AuthFailure> {
        self.login_with_cancel(credentials, &CancellationToken::new())
            .await
    }

    /// [SessionStore::login] that gives up once `cancel` fires
    /// # Errors
    /// See [SessionStore::login]. A cancelled call is also an error.
    pub async fn login_with_cancel(
        &self,
        credentials: &Credentials,
        cancel: &CancellationToken,
    ) -> Result<User, AuthFailure> {
        if let Err(error) = credentials.validate() {
            return Err(AuthFailure::new(error.to_string()));
        }
        let response = match cancellable(cancel, api::auth::login(&self.client, credentials))
            .await
            .and_then(|result| result)
        {
            Ok(response) => response.data,
            Err(error) => {
                log::warn!("Login failed for {}. {error}", credentials.email);
                return Err(AuthFailure::from_http(&error, LOGIN_FAILED));
            }
        };
        let (token, user) = match (response.token, response.user) {
            (Some(token), Some(user)) => (token, user),
            _ => {
                log::warn!("Login response for {} has no token or user", credentials.email);
                return Err(AuthFailure::new(
                    response_message(response.msg.as_deref()).unwrap_or(LOGIN_FAILED),
                ));
            }
        };
        if let Err(error) = self.auth().persist(&token, &user) {
            log::error!("Could not persist session for {}. {error}", user.email);
            return Err(AuthFailure::new(STORAGE_FAILED));
        }
        log::info!(
            "Logged in as {} ({}). {}",
            user.email,
            <&str>::from(user.role),
            response.msg.unwrap_or_default()
        );
        self.auth().set_session(Session::authenticated(user.clone()));
        Ok(user)
    }

    /// Register a new account. The session is never touched; the new user logs in separately.
    /// # Errors
    /// This function will return an error if the form is invalid or the server rejects the
    /// registration
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, AuthFailure> {
        self.register_with_cancel(request, &CancellationToken::new())
            .await
    }

    /// [SessionStore::register] that gives up once `cancel` fires
    /// # Errors
    /// See [SessionStore::register]. A cancelled call is also an error.
    pub async fn register_with_cancel(
        &self,
        request: &RegisterRequest,
        cancel: &CancellationToken,
    ) -> Result<AuthResponse, AuthFailure> {
        if let Err(error) = request.validate() {
            return Err(AuthFailure::new(error.to_string()));
        }
        match cancellable(cancel, api::auth::register(&self.client, request))
            .await
            .and_then(|result| result)
        {
            Ok(response) => {
                log::info!("Registered {}", request.email);
                Ok(response.data)
            }
            Err(error) => {
                log::warn!("Registration failed for {}. {error}", request.email);
                Err(AuthFailure::from_http(&error, REGISTER_FAILED))
            }
        }
    }

    /// Drop the stored credentials and become anonymous. No server call is made.
    pub fn logout(&self) {
        if let Err(error) = self.auth().clear() {
            log::error!("Could not clear stored credentials on logout. {error}");
        }
        self.auth().set_session(Session::anonymous());
        log::info!("Logged out");
    }
}

/// `msg` of an auth response that carried no session
fn response_message(msg: Option<&str>) -> Option<&str> {
    msg.filter(|message| !message.trim().is_empty())
}
