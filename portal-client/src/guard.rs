//! Per render decision for protected pages. The guard is advisory navigation only, the server
//! still authorizes every request.

use portal_common::role::Role;
use tokio::sync::watch;

use crate::{router::Page, session::Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Session is still hydrating, show a loading indicator
    Loading,
    Redirect(Page),
    Render,
}

/// Landing page of a role. A role without a home goes back to login.
pub const fn role_home(role: Role) -> Page {
    match role {
        Role::Admin => Page::AdminDashboard,
        Role::User => Page::UserDashboard,
        Role::Unknown => Page::Login,
    }
}

/// Decide what a protected page requiring `required` (any logged in user when [None]) shows
/// for `session`
pub fn evaluate(session: &Session, required: Option<Role>) -> GuardOutcome {
    if session.loading {
        return GuardOutcome::Loading;
    }
    let Some(role) = session.role() else {
        return GuardOutcome::Redirect(Page::Login);
    };
    match required {
        Some(required) if required != role => GuardOutcome::Redirect(role_home(role)),
        _ => GuardOutcome::Render,
    }
}

/// Guard bound to the role a page requires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteGuard {
    required: Option<Role>,
}

impl RouteGuard {
    /// Guard for pages open to any logged in user
    pub const fn authenticated() -> Self {
        Self { required: None }
    }

    pub const fn requiring(role: Role) -> Self {
        Self {
            required: Some(role),
        }
    }

    pub fn check(&self, session: &Session) -> GuardOutcome {
        evaluate(session, self.required)
    }

    /// Wait for hydration to finish and return the settled outcome. If the session sender is
    /// gone the last seen session is evaluated as is.
    pub async fn resolve(&self, sessions: &mut watch::Receiver<Session>) -> GuardOutcome {
        loop {
            let outcome = self.check(&sessions.borrow_and_update());
            if outcome != GuardOutcome::Loading {
                return outcome;
            }
            if sessions.changed().await.is_err() {
                return self.check(&sessions.borrow());
            }
        }
    }
}
