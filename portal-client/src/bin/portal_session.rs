//! Prints the session restored from the configured storage and how the dashboards would be
//! guarded for it

use std::sync::Arc;

use common::error::PortalResult;
use log::LevelFilter;
use portal_client::{
    config::ClientConfig,
    guard::RouteGuard,
    router::{History, Page},
};
use portal_common::role::Role;

#[tokio::main]
async fn main() -> PortalResult<()> {
    let config = ClientConfig::from_env()?;
    common::logging::init_logging(config.log_config.as_deref(), LevelFilter::Info)?;
    let store = portal_client::initialize(&config, Arc::new(History::starting_at(Page::Home)))?;
    let session = store.session();
    match &session.user {
        Some(user) if session.is_authenticated => log::info!(
            "Session phase {:?} for {} ({})",
            session.phase(),
            user.email,
            <&str>::from(user.role)
        ),
        _ => log::info!("Session phase {:?}", session.phase()),
    }
    let mut sessions = store.subscribe();
    for (page, role) in [
        (Page::AdminDashboard, Role::Admin),
        (Page::UserDashboard, Role::User),
    ] {
        let outcome = RouteGuard::requiring(role).resolve(&mut sessions).await;
        log::info!("{} -> {outcome:?}", page.path());
    }
    Ok(())
}
