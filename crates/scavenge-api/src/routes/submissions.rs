//! Routes for the Progression Engine.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use scavenge_progression::application::command_handlers;
use scavenge_progression::domain::commands::{self, SubmissionPayload};
use scavenge_progression::domain::outcome::SubmitOutcome;

use crate::error::ApiError;
use crate::state::AppState;
use crate::validation::{Validate, check_urls, validated};

/// Request body for POST /hunts/{hunt_id}/post-its/{post_it_id}/submit.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    /// Free-text answer.
    pub text_answer: Option<String>,
    /// Value of the picked option on a choice card.
    pub selected_option_value: Option<String>,
    /// URLs of already uploaded photos.
    #[serde(default)]
    pub photo_urls: Vec<String>,
    /// Skip the card instead of answering.
    #[serde(default)]
    pub was_skipped: bool,
    /// Opens a time-locked card early.
    pub bypass_code: Option<String>,
}

impl Validate for SubmitRequest {
    fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        check_urls(&mut errors, "photoUrls", &self.photo_urls);
        errors
    }
}

impl From<SubmitRequest> for SubmissionPayload {
    fn from(request: SubmitRequest) -> Self {
        Self {
            text_answer: request.text_answer,
            selected_option_value: request.selected_option_value,
            photo_urls: request.photo_urls,
            was_skipped: request.was_skipped,
            bypass_code: request.bypass_code,
        }
    }
}

/// POST /hunts/{hunt_id}/post-its/{post_it_id}/submit
///
/// Accepted attempts answer 200; retries and time locks answer 400 with
/// the full outcome body.
#[instrument(skip(state, request), fields(hunt_id = %hunt_id, post_it_id = %post_it_id))]
async fn submit(
    State(state): State<AppState>,
    Path((hunt_id, post_it_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<SubmitRequest>,
) -> Result<(StatusCode, Json<SubmitOutcome>), ApiError> {
    let request = validated(request)?;
    let command = commands::SubmitAnswer {
        correlation_id: Uuid::new_v4(),
        hunt_id,
        post_it_id,
        payload: request.into(),
    };

    info!(correlation_id = %command.correlation_id, "handling submit_answer command");

    let outcome = command_handlers::handle_submit_answer(
        &command,
        state.clock.as_ref(),
        &state.locks,
        &*state.store,
        &state.settings.bypass_code,
    )
    .await?;

    let status = if outcome.is_ok() {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    Ok((status, Json(outcome)))
}

/// Returns the router for submissions.
pub fn router() -> Router<AppState> {
    Router::new().route("/hunts/{hunt_id}/post-its/{post_it_id}/submit", post(submit))
}
