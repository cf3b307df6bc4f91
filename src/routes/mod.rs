pub mod debug;
pub mod proposals;
pub mod recalculate;
pub mod themes;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::{CancellationToken, DropGuard};

use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/routes/proposals", post(proposals::create_proposals))
        .route("/routes/proposals/{id}", get(proposals::get_proposal))
        .route("/routes/recalculate", post(recalculate::recalculate_route))
        .route("/themes/{theme}/scenarios", get(themes::list_scenarios))
        .route("/debug/health", get(debug::health_check))
        .with_state(state)
}

/// Cancellation token for one request. Fires after the timeout, or when the
/// handler future is dropped (client gone, or the handler returned).
pub struct RequestDeadline {
    token: CancellationToken,
    _guard: DropGuard,
}

impl RequestDeadline {
    pub fn start(timeout: Duration) -> Self {
        let token = CancellationToken::new();
        let timer = token.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(timeout) => {
                    tracing::warn!("Request deadline of {:?} reached", timeout);
                    timer.cancel();
                }
                _ = timer.cancelled() => {}
            }
        });

        RequestDeadline {
            _guard: token.clone().drop_guard(),
            token,
        }
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}
