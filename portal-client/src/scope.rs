//! Cancellation tied to the lifetime of a view

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::http::{Error, Result};

/// Run `future` until it completes or `cancel` fires, whichever comes first
/// # Errors
/// This function will return [Error::Cancelled] if `cancel` fires before `future` completes
pub async fn cancellable<F: Future>(cancel: &CancellationToken, future: F) -> Result<F::Output> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(Error::Cancelled),
        output = future => Ok(output),
    }
}

/// Owner of the fetches made on behalf of one mounted view. Dropping the scope cancels every
/// fetch still running under it, so a result can never land after unmount.
#[derive(Debug, Default)]
pub struct ViewScope {
    token: CancellationToken,
}

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token for work spawned under this scope. Cancelling the returned token does not close
    /// the scope.
    pub fn token(&self) -> CancellationToken {
        self.token.child_token()
    }

    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Run `future` under this scope. Returns [None] if the scope is closed first.
    pub async fn run<F: Future>(&self, future: F) -> Option<F::Output> {
        cancellable(&self.token, future).await.ok()
    }
}

impl Drop for ViewScope {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
