//! Shared fixtures for the unit tests of this crate

use std::sync::Arc;

use portal_common::{role::Role, User};

use crate::{
    auth::{AuthContext, TOKEN_KEY, USER_KEY},
    http::{HttpClient, MockTransport, RawResponse},
    router::{History, Page},
    storage::MemoryStorage,
};

pub const API_URL: &str = "http://api.test";
pub const TOKEN: &str = "token-123";

/// Storage, navigation history and auth context wired together, kept apart so tests can inspect
/// each side effect
pub struct Harness {
    pub storage: Arc<MemoryStorage>,
    pub history: Arc<History>,
    pub auth: AuthContext,
}

impl Harness {
    /// Client over `transport` sharing this harness' auth context
    pub fn client(&self, transport: MockTransport) -> HttpClient {
        HttpClient::new(API_URL, Arc::new(transport), self.auth.clone())
    }
}

/// Harness whose storage starts as `storage` and whose visitor is currently on `start`
pub fn harness(storage: MemoryStorage, start: Page) -> Harness {
    let storage = Arc::new(storage);
    let history = Arc::new(History::starting_at(start));
    let auth = AuthContext::new(storage.clone(), history.clone());
    Harness {
        storage,
        history,
        auth,
    }
}

pub fn json_response(status: u16, body: serde_json::Value) -> RawResponse {
    RawResponse {
        status,
        body: body.to_string().into_bytes(),
    }
}

pub fn raw_response(status: u16, body: &str) -> RawResponse {
    RawResponse {
        status,
        body: body.as_bytes().to_vec(),
    }
}

pub fn sample_user(role: Role) -> User {
    match role {
        Role::Admin => User {
            id: 1,
            name: "Admin Portal".to_owned(),
            email: "admin@portal.test".to_owned(),
            role,
        },
        _ => User {
            id: 7,
            name: "Siti Rahma".to_owned(),
            email: "siti@portal.test".to_owned(),
            role,
        },
    }
}

/// Storage holding [TOKEN] and the [sample_user] for `role`
pub fn logged_in_storage(role: Role) -> MemoryStorage {
    let user = serde_json::to_string(&sample_user(role)).unwrap();
    MemoryStorage::with_entries([(TOKEN_KEY, TOKEN.to_owned()), (USER_KEY, user)])
}
