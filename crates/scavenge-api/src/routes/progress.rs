//! Routes for the State Projector.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use tracing::instrument;
use uuid::Uuid;

use scavenge_progression::application::query_handlers::{self, HuntState};

use crate::error::ApiError;
use crate::state::AppState;

/// GET /hunts/{hunt_id}/state
#[instrument(skip(state), fields(hunt_id = %hunt_id))]
async fn get_state(
    State(state): State<AppState>,
    Path(hunt_id): Path<Uuid>,
) -> Result<Json<HuntState>, ApiError> {
    let hunt_state =
        query_handlers::get_hunt_state(hunt_id, state.clock.as_ref(), &*state.store).await?;
    Ok(Json(hunt_state))
}

/// Returns the router for the hunt state projection.
pub fn router() -> Router<AppState> {
    Router::new().route("/hunts/{hunt_id}/state", get(get_state))
}
