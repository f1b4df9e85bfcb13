#![warn(clippy::cloned_instead_of_copied)]
#![warn(clippy::cognitive_complexity)]
#![warn(clippy::empty_structs_with_brackets)]
#![warn(clippy::equatable_if_let)]
#![warn(clippy::explicit_iter_loop)]
#![warn(clippy::expect_used)]
#![warn(clippy::inefficient_to_string)]
#![warn(clippy::manual_let_else)]
#![warn(clippy::manual_string_new)]
#![warn(clippy::match_same_arms)]
#![warn(clippy::missing_const_for_fn)]
#![warn(clippy::missing_errors_doc)]
#![warn(clippy::needless_pass_by_value)]
#![warn(clippy::option_if_let_else)]
#![warn(clippy::panic)]
#![warn(clippy::print_stdout)]
#![warn(clippy::str_to_string)]
#![warn(clippy::uninlined_format_args)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::use_self)]

//! Client core of the service booking portal: the configured HTTP client, the REST operations,
//! the session store and the role gated route guard.

use std::sync::Arc;

use common::error::{PortalError, PortalResult};

pub mod api;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod guard;
pub mod http;
pub mod router;
pub mod scope;
pub mod session;
pub mod storage;
#[cfg(test)]
pub(crate) mod testing;

use crate::{
    auth::AuthContext, config::ClientConfig, http::HttpClient, router::Navigator,
    session::SessionStore,
};

/// Wire storage, the HTTP client and the session store from `config` and hydrate the session
/// # Errors
/// This function will return an error if the storage backend cannot be opened or the HTTP
/// transport cannot be built
pub fn initialize(config: &ClientConfig, navigator: Arc<dyn Navigator>) -> PortalResult<SessionStore> {
    let storage = config.open_storage()?;
    let auth = AuthContext::new(storage, navigator);
    let client = HttpClient::from_config(config, auth)
        .map_err(|error| PortalError::Generic(format!("Could not build the HTTP client. {error}")))?;
    log::info!("Portal client talking to {}", client.base_url());
    Ok(SessionStore::initialize(client))
}
