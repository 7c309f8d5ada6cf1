//! Route modules organized by bounded context.

use axum::Router;
use serde::Serialize;

use crate::state::AppState;

pub mod export;
pub mod health;
pub mod hunts;
pub mod post_its;
pub mod progress;
pub mod submissions;

/// Body returned by endpoints with nothing else to report.
#[derive(Debug, Serialize)]
pub struct OkResponse {
    /// Always `true`.
    pub ok: bool,
}

impl OkResponse {
    pub(crate) fn new() -> Self {
        Self { ok: true }
    }
}

/// Returns every route, mounted under `/api`.
pub fn router() -> Router<AppState> {
    let api = Router::new()
        .merge(health::router())
        .merge(hunts::router())
        .merge(post_its::router())
        .merge(submissions::router())
        .merge(progress::router())
        .merge(export::router());
    Router::new().nest("/api", api)
}
