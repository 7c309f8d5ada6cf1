//! Routes for post-it and option authoring.

use axum::extract::{Path, State};
use axum::routing::{delete, post, put};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use tracing::{info, instrument};
use uuid::Uuid;

use scavenge_core::entity::{PostIt, PostItOption, PostItType};
use scavenge_hunt::application::command_handlers;
use scavenge_hunt::domain::commands::{self, PostItChanges, PostItDraft};

use crate::error::ApiError;
use crate::routes::OkResponse;
use crate::state::AppState;
use crate::validation::{Validate, check_length, check_non_negative, check_photo_bounds, validated};

const TITLE_MAX: usize = 100;
const PROMPT_MAX: usize = 1000;
const CORRECT_ANSWER_MAX: usize = 200;
const OPTION_LABEL_MAX: usize = 100;
const OPTION_VALUE_MAX: usize = 50;

fn default_color() -> String {
    "yellow".to_owned()
}

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`).
#[allow(clippy::option_option)]
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Request body for POST /hunts/{hunt_id}/post-its.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostItRequest {
    /// Ordering key.
    pub position: i32,
    /// Optional heading.
    pub title: Option<String>,
    /// Challenge text.
    pub prompt: String,
    /// Display color; `yellow` when omitted.
    #[serde(default = "default_color")]
    pub color: String,
    /// Kind of challenge.
    #[serde(rename = "type")]
    pub post_it_type: PostItType,
    /// Expected answer.
    pub correct_answer: Option<String>,
    /// Whether a photo is mandatory.
    #[serde(default)]
    pub requires_photo: bool,
    /// Whether the card may be skipped.
    #[serde(default)]
    pub allows_skip: bool,
    /// Explicit successor.
    pub next_post_it_id: Option<Uuid>,
    /// Time lock.
    pub unlock_at: Option<DateTime<Utc>>,
    /// Hints, revealed in order.
    #[serde(default)]
    pub hints: Vec<String>,
    /// Suggested minimum photos.
    pub photo_min: Option<i32>,
    /// Suggested maximum photos.
    pub photo_max: Option<i32>,
}

impl Validate for CreatePostItRequest {
    fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        check_non_negative(&mut errors, "position", Some(self.position));
        if let Some(title) = &self.title {
            check_length(&mut errors, "title", title, 0, TITLE_MAX);
        }
        check_length(&mut errors, "prompt", &self.prompt, 1, PROMPT_MAX);
        if let Some(correct_answer) = &self.correct_answer {
            check_length(&mut errors, "correctAnswer", correct_answer, 0, CORRECT_ANSWER_MAX);
        }
        check_photo_bounds(&mut errors, self.photo_min, self.photo_max);
        errors
    }
}

impl From<CreatePostItRequest> for PostItDraft {
    fn from(request: CreatePostItRequest) -> Self {
        Self {
            position: request.position,
            title: request.title,
            prompt: request.prompt,
            color: request.color,
            post_it_type: request.post_it_type,
            correct_answer: request.correct_answer,
            requires_photo: request.requires_photo,
            allows_skip: request.allows_skip,
            next_post_it_id: request.next_post_it_id,
            unlock_at: request.unlock_at,
            hints: request.hints,
            photo_min: request.photo_min,
            photo_max: request.photo_max,
        }
    }
}

/// Request body for PUT /post-its/{post_it_id}. Every field is optional;
/// `null` clears a nullable field.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(clippy::option_option)]
pub struct UpdatePostItRequest {
    /// New ordering key.
    pub position: Option<i32>,
    /// New or cleared heading.
    #[serde(default, deserialize_with = "double_option")]
    pub title: Option<Option<String>>,
    /// New challenge text.
    pub prompt: Option<String>,
    /// New color.
    pub color: Option<String>,
    /// New kind.
    #[serde(rename = "type")]
    pub post_it_type: Option<PostItType>,
    /// New or cleared answer.
    #[serde(default, deserialize_with = "double_option")]
    pub correct_answer: Option<Option<String>>,
    /// New photo requirement.
    pub requires_photo: Option<bool>,
    /// New skip permission.
    pub allows_skip: Option<bool>,
    /// New or cleared successor.
    #[serde(default, deserialize_with = "double_option")]
    pub next_post_it_id: Option<Option<Uuid>>,
    /// New or cleared time lock.
    #[serde(default, deserialize_with = "double_option")]
    pub unlock_at: Option<Option<DateTime<Utc>>>,
    /// Replacement hints.
    pub hints: Option<Vec<String>>,
    /// New or cleared photo minimum.
    #[serde(default, deserialize_with = "double_option")]
    pub photo_min: Option<Option<i32>>,
    /// New or cleared photo maximum.
    #[serde(default, deserialize_with = "double_option")]
    pub photo_max: Option<Option<i32>>,
}

impl Validate for UpdatePostItRequest {
    fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        check_non_negative(&mut errors, "position", self.position);
        if let Some(Some(title)) = &self.title {
            check_length(&mut errors, "title", title, 0, TITLE_MAX);
        }
        if let Some(prompt) = &self.prompt {
            check_length(&mut errors, "prompt", prompt, 1, PROMPT_MAX);
        }
        if let Some(Some(correct_answer)) = &self.correct_answer {
            check_length(&mut errors, "correctAnswer", correct_answer, 0, CORRECT_ANSWER_MAX);
        }
        check_photo_bounds(&mut errors, self.photo_min.flatten(), self.photo_max.flatten());
        errors
    }
}

impl From<UpdatePostItRequest> for PostItChanges {
    fn from(request: UpdatePostItRequest) -> Self {
        Self {
            position: request.position,
            title: request.title,
            prompt: request.prompt,
            color: request.color,
            post_it_type: request.post_it_type,
            correct_answer: request.correct_answer,
            requires_photo: request.requires_photo,
            allows_skip: request.allows_skip,
            next_post_it_id: request.next_post_it_id,
            unlock_at: request.unlock_at,
            hints: request.hints,
            photo_min: request.photo_min,
            photo_max: request.photo_max,
        }
    }
}

/// Request body for POST /post-its/{post_it_id}/options.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOptionRequest {
    /// Text shown to the recipient.
    pub label: String,
    /// Value submitted when picked.
    pub value: String,
    /// Card this choice leads to.
    pub next_post_it_id: Uuid,
}

impl Validate for CreateOptionRequest {
    fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        check_length(&mut errors, "label", &self.label, 1, OPTION_LABEL_MAX);
        check_length(&mut errors, "value", &self.value, 1, OPTION_VALUE_MAX);
        errors
    }
}

/// POST /hunts/{hunt_id}/post-its
#[instrument(skip(state, request), fields(hunt_id = %hunt_id))]
async fn create_post_it(
    State(state): State<AppState>,
    Path(hunt_id): Path<Uuid>,
    Json(request): Json<CreatePostItRequest>,
) -> Result<Json<PostIt>, ApiError> {
    let request = validated(request)?;
    let command = commands::CreatePostIt {
        correlation_id: Uuid::new_v4(),
        hunt_id,
        draft: request.into(),
    };

    info!(correlation_id = %command.correlation_id, "handling create_post_it command");

    let post_it =
        command_handlers::handle_create_post_it(&command, state.clock.as_ref(), &*state.store)
            .await?;
    Ok(Json(post_it))
}

/// PUT /post-its/{post_it_id}
#[instrument(skip(state, request), fields(post_it_id = %post_it_id))]
async fn update_post_it(
    State(state): State<AppState>,
    Path(post_it_id): Path<Uuid>,
    Json(request): Json<UpdatePostItRequest>,
) -> Result<Json<PostIt>, ApiError> {
    let request = validated(request)?;
    let command = commands::UpdatePostIt {
        correlation_id: Uuid::new_v4(),
        post_it_id,
        changes: request.into(),
    };

    info!(correlation_id = %command.correlation_id, "handling update_post_it command");

    let post_it = command_handlers::handle_update_post_it(&command, &*state.store).await?;
    Ok(Json(post_it))
}

/// DELETE /post-its/{post_it_id}
#[instrument(skip(state), fields(post_it_id = %post_it_id))]
async fn delete_post_it(
    State(state): State<AppState>,
    Path(post_it_id): Path<Uuid>,
) -> Result<Json<OkResponse>, ApiError> {
    let command = commands::DeletePostIt {
        correlation_id: Uuid::new_v4(),
        post_it_id,
    };

    info!(correlation_id = %command.correlation_id, "handling delete_post_it command");

    command_handlers::handle_delete_post_it(&command, &*state.store).await?;
    Ok(Json(OkResponse::new()))
}

/// POST /post-its/{post_it_id}/options
#[instrument(skip(state, request), fields(post_it_id = %post_it_id))]
async fn create_option(
    State(state): State<AppState>,
    Path(post_it_id): Path<Uuid>,
    Json(request): Json<CreateOptionRequest>,
) -> Result<Json<PostItOption>, ApiError> {
    let request = validated(request)?;
    let command = commands::CreatePostItOption {
        correlation_id: Uuid::new_v4(),
        post_it_id,
        label: request.label,
        value: request.value,
        next_post_it_id: request.next_post_it_id,
    };

    info!(correlation_id = %command.correlation_id, "handling create_post_it_option command");

    let option = command_handlers::handle_create_post_it_option(&command, &*state.store).await?;
    Ok(Json(option))
}

/// DELETE /post-it-options/{option_id}
#[instrument(skip(state), fields(option_id = %option_id))]
async fn delete_option(
    State(state): State<AppState>,
    Path(option_id): Path<Uuid>,
) -> Result<Json<OkResponse>, ApiError> {
    let command = commands::DeletePostItOption {
        correlation_id: Uuid::new_v4(),
        option_id,
    };

    info!(correlation_id = %command.correlation_id, "handling delete_post_it_option command");

    command_handlers::handle_delete_post_it_option(&command, &*state.store).await?;
    Ok(Json(OkResponse::new()))
}

/// Returns the router for post-it authoring.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/hunts/{hunt_id}/post-its", post(create_post_it))
        .route(
            "/post-its/{post_it_id}",
            put(update_post_it).delete(delete_post_it),
        )
        .route("/post-its/{post_it_id}/options", post(create_option))
        .route("/post-it-options/{option_id}", delete(delete_option))
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::http::StatusCode;
    use scavenge_core::entity::{Hunt, HuntStatus};
    use scavenge_core::repository::HuntStore;
    use scavenge_store::InMemoryHuntStore;
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::routes::test_support::{app_state_with, empty_request, json_body, json_request, now};

    async fn seeded() -> (Router, Arc<InMemoryHuntStore>, Uuid) {
        let store = Arc::new(InMemoryHuntStore::new());
        let hunt = Hunt {
            id: Uuid::new_v4(),
            code: "ABCDEF".to_owned(),
            share_slug: "abcdef123456".to_owned(),
            gifted_name: "Robin".to_owned(),
            welcome_message: "Happy birthday!".to_owned(),
            status: HuntStatus::Draft,
            created_at: now(),
            published_at: None,
        };
        store.insert_hunt(&hunt).await.unwrap();
        let app = router().with_state(app_state_with(store.clone()));
        (app, store, hunt.id)
    }

    async fn create_card(app: &Router, hunt_id: Uuid, body: Value) -> Value {
        let response = app
            .clone()
            .oneshot(json_request("POST", &format!("/hunts/{hunt_id}/post-its"), &body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        json_body(response).await
    }

    #[tokio::test]
    async fn test_create_post_it_applies_defaults() {
        // Arrange
        let (app, _store, hunt_id) = seeded().await;

        // Act
        let json = create_card(
            &app,
            hunt_id,
            json!({ "position": 0, "prompt": "Where do the socks hide?", "type": "riddle" }),
        )
        .await;

        // Assert
        assert_eq!(json["huntId"], hunt_id.to_string());
        assert_eq!(json["color"], "yellow");
        assert_eq!(json["type"], "riddle");
        assert_eq!(json["requiresPhoto"], false);
        assert_eq!(json["allowsSkip"], false);
        assert_eq!(json["hints"], json!([]));
    }

    #[tokio::test]
    async fn test_create_post_it_rejects_bad_shape() {
        // Arrange
        let (app, _store, hunt_id) = seeded().await;
        let body = json!({
            "position": -1,
            "prompt": "",
            "type": "photo",
            "photoMin": 3,
            "photoMax": 1,
        });

        // Act
        let response = app
            .oneshot(json_request("POST", &format!("/hunts/{hunt_id}/post-its"), &body))
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert_eq!(json["details"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_create_post_it_for_unknown_hunt_returns_404() {
        // Arrange
        let (app, _store, _hunt_id) = seeded().await;
        let body = json!({ "position": 0, "prompt": "Hi", "type": "riddle" });

        // Act
        let response = app
            .oneshot(json_request(
                "POST",
                &format!("/hunts/{}/post-its", Uuid::new_v4()),
                &body,
            ))
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_post_it_clears_null_fields_and_keeps_absent_ones() {
        // Arrange
        let (app, _store, hunt_id) = seeded().await;
        let card = create_card(
            &app,
            hunt_id,
            json!({
                "position": 0,
                "title": "Socks",
                "prompt": "Where do the socks hide?",
                "type": "riddle",
                "correctAnswer": "drawer",
            }),
        )
        .await;
        let post_it_id = card["id"].as_str().unwrap();

        // Act
        let response = app
            .oneshot(json_request(
                "PUT",
                &format!("/post-its/{post_it_id}"),
                &json!({ "title": null, "color": "pink" }),
            ))
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["title"], Value::Null);
        assert_eq!(json["color"], "pink");
        assert_eq!(json["correctAnswer"], "drawer");
    }

    #[tokio::test]
    async fn test_option_lifecycle_and_duplicate_value() {
        // Arrange
        let (app, store, hunt_id) = seeded().await;
        let choice = create_card(
            &app,
            hunt_id,
            json!({ "position": 0, "prompt": "Left or right?", "type": "choice" }),
        )
        .await;
        let target = create_card(
            &app,
            hunt_id,
            json!({ "position": 1, "prompt": "Look left", "type": "riddle" }),
        )
        .await;
        let choice_id = choice["id"].as_str().unwrap();
        let option_body = json!({ "label": "Left", "value": "left", "nextPostItId": target["id"] });

        // Act
        let created = app
            .clone()
            .oneshot(json_request(
                "POST",
                &format!("/post-its/{choice_id}/options"),
                &option_body,
            ))
            .await
            .unwrap();
        let duplicate = app
            .clone()
            .oneshot(json_request(
                "POST",
                &format!("/post-its/{choice_id}/options"),
                &option_body,
            ))
            .await
            .unwrap();

        // Assert
        assert_eq!(created.status(), StatusCode::OK);
        assert_eq!(duplicate.status(), StatusCode::BAD_REQUEST);
        let option = json_body(created).await;
        let option_id = option["id"].as_str().unwrap();

        let deleted = app
            .oneshot(empty_request("DELETE", &format!("/post-it-options/{option_id}")))
            .await
            .unwrap();
        assert_eq!(deleted.status(), StatusCode::OK);
        let choice_uuid = Uuid::parse_str(choice_id).unwrap();
        assert!(store.list_options(choice_uuid).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_post_it_returns_ok() {
        // Arrange
        let (app, store, hunt_id) = seeded().await;
        let card = create_card(
            &app,
            hunt_id,
            json!({ "position": 0, "prompt": "Hi", "type": "riddle" }),
        )
        .await;
        let post_it_id = card["id"].as_str().unwrap();

        // Act
        let response = app
            .oneshot(empty_request("DELETE", &format!("/post-its/{post_it_id}")))
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({ "ok": true }));
        assert_eq!(store.count_post_its(hunt_id).await.unwrap(), 0);
    }
}
