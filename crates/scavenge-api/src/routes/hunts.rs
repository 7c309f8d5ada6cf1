//! Routes for the Hunt Lifecycle context.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use scavenge_core::entity::Hunt;
use scavenge_hunt::application::command_handlers::{self, CreatedHunt, PublishedHunt};
use scavenge_hunt::application::query_handlers::{self, HuntDetail, HuntSummary};
use scavenge_hunt::domain::commands;

use crate::error::ApiError;
use crate::routes::OkResponse;
use crate::state::AppState;
use crate::validation::{Validate, check_length, validated};

const GIFTED_NAME_MAX: usize = 100;
const WELCOME_MESSAGE_MAX: usize = 500;

/// Request body for POST /hunts.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHuntRequest {
    /// Name of the person the hunt is for.
    pub gifted_name: String,
    /// Greeting shown before the first card.
    pub welcome_message: String,
}

impl Validate for CreateHuntRequest {
    fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        check_length(&mut errors, "giftedName", &self.gifted_name, 1, GIFTED_NAME_MAX);
        check_length(&mut errors, "welcomeMessage", &self.welcome_message, 0, WELCOME_MESSAGE_MAX);
        errors
    }
}

/// Request body for PUT /hunts/{hunt_id}.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHuntRequest {
    /// New recipient name.
    pub gifted_name: Option<String>,
    /// New greeting.
    pub welcome_message: Option<String>,
}

impl Validate for UpdateHuntRequest {
    fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if let Some(gifted_name) = &self.gifted_name {
            check_length(&mut errors, "giftedName", gifted_name, 1, GIFTED_NAME_MAX);
        }
        if let Some(welcome_message) = &self.welcome_message {
            check_length(&mut errors, "welcomeMessage", welcome_message, 0, WELCOME_MESSAGE_MAX);
        }
        errors
    }
}

/// POST /hunts
#[instrument(skip(state, request))]
async fn create_hunt(
    State(state): State<AppState>,
    Json(request): Json<CreateHuntRequest>,
) -> Result<Json<CreatedHunt>, ApiError> {
    let request = validated(request)?;
    let command = commands::CreateHunt {
        correlation_id: Uuid::new_v4(),
        gifted_name: request.gifted_name,
        welcome_message: request.welcome_message,
    };

    info!(correlation_id = %command.correlation_id, "handling create_hunt command");

    let created = command_handlers::handle_create_hunt(
        &command,
        state.clock.as_ref(),
        &state.rng,
        &*state.store,
    )
    .await?;

    Ok(Json(created))
}

/// POST /hunts/{hunt_id}/publish
#[instrument(skip(state), fields(hunt_id = %hunt_id))]
async fn publish_hunt(
    State(state): State<AppState>,
    Path(hunt_id): Path<Uuid>,
) -> Result<Json<PublishedHunt>, ApiError> {
    let command = commands::PublishHunt {
        correlation_id: Uuid::new_v4(),
        hunt_id,
    };

    info!(correlation_id = %command.correlation_id, "handling publish_hunt command");

    let published = command_handlers::handle_publish_hunt(
        &command,
        state.clock.as_ref(),
        &state.locks,
        &*state.store,
        &state.settings.public_web_base_url,
    )
    .await?;

    Ok(Json(published))
}

/// GET /hunts/{hunt_id}
#[instrument(skip(state), fields(hunt_id = %hunt_id))]
async fn get_hunt(
    State(state): State<AppState>,
    Path(hunt_id): Path<Uuid>,
) -> Result<Json<HuntDetail>, ApiError> {
    let detail = query_handlers::get_hunt_by_id(hunt_id, &*state.store).await?;
    Ok(Json(detail))
}

/// PUT /hunts/{hunt_id}
#[instrument(skip(state, request), fields(hunt_id = %hunt_id))]
async fn update_hunt(
    State(state): State<AppState>,
    Path(hunt_id): Path<Uuid>,
    Json(request): Json<UpdateHuntRequest>,
) -> Result<Json<Hunt>, ApiError> {
    let request = validated(request)?;
    let command = commands::UpdateHunt {
        correlation_id: Uuid::new_v4(),
        hunt_id,
        gifted_name: request.gifted_name,
        welcome_message: request.welcome_message,
    };

    info!(correlation_id = %command.correlation_id, "handling update_hunt command");

    let hunt = command_handlers::handle_update_hunt(&command, &*state.store).await?;
    Ok(Json(hunt))
}

/// DELETE /hunts/{hunt_id}
#[instrument(skip(state), fields(hunt_id = %hunt_id))]
async fn delete_hunt(
    State(state): State<AppState>,
    Path(hunt_id): Path<Uuid>,
) -> Result<Json<OkResponse>, ApiError> {
    let command = commands::DeleteHunt {
        correlation_id: Uuid::new_v4(),
        hunt_id,
    };

    info!(correlation_id = %command.correlation_id, "handling delete_hunt command");

    command_handlers::handle_delete_hunt(&command, &*state.store).await?;
    Ok(Json(OkResponse::new()))
}

/// GET /hunts/by-code/{code}
#[instrument(skip(state))]
async fn get_hunt_by_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<HuntSummary>, ApiError> {
    let summary = query_handlers::get_hunt_by_code(&code, &*state.store).await?;
    Ok(Json(summary))
}

/// GET /hunts/by-slug/{slug}
#[instrument(skip(state))]
async fn get_hunt_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<HuntSummary>, ApiError> {
    let summary = query_handlers::get_hunt_by_slug(&slug, &*state.store).await?;
    Ok(Json(summary))
}

/// Returns the router for the hunt lifecycle context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/hunts", post(create_hunt))
        .route("/hunts/by-code/{code}", get(get_hunt_by_code))
        .route("/hunts/by-slug/{slug}", get(get_hunt_by_slug))
        .route(
            "/hunts/{hunt_id}",
            get(get_hunt).put(update_hunt).delete(delete_hunt),
        )
        .route("/hunts/{hunt_id}/publish", post(publish_hunt))
}
