//! Routes for the Export Projector.

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use tracing::{info, instrument};
use uuid::Uuid;

use scavenge_export::application::query_handlers;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /hunts/{hunt_id}/export
///
/// Serves the memory book as a downloadable HTML file.
#[instrument(skip(state), fields(hunt_id = %hunt_id))]
async fn export_memory_book(
    State(state): State<AppState>,
    Path(hunt_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let html = query_handlers::export_memory_book(hunt_id, &*state.store).await?;
    let filename = query_handlers::memory_book_filename(hunt_id);

    info!(bytes = html.len(), "memory book exported");

    Ok((
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8".to_owned()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        html,
    ))
}

/// Returns the router for exports.
pub fn router() -> Router<AppState> {
    Router::new().route("/hunts/{hunt_id}/export", get(export_memory_book))
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::http::StatusCode;
    use scavenge_core::entity::{Hunt, HuntStatus};
    use scavenge_core::repository::HuntStore;
    use scavenge_store::InMemoryHuntStore;
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::routes::test_support::{app_state_with, empty_request, now};

    #[tokio::test]
    async fn test_export_returns_html_attachment() {
        // Arrange
        let store = Arc::new(InMemoryHuntStore::new());
        let hunt = Hunt {
            id: Uuid::new_v4(),
            code: "ABCDEF".to_owned(),
            share_slug: "abcdef123456".to_owned(),
            gifted_name: "Robin & Co".to_owned(),
            welcome_message: "Happy birthday!".to_owned(),
            status: HuntStatus::Completed,
            created_at: now(),
            published_at: Some(now()),
        };
        store.insert_hunt(&hunt).await.unwrap();
        let app = router().with_state(app_state_with(store));

        // Act
        let response = app
            .oneshot(empty_request("GET", &format!("/hunts/{}/export", hunt.id)))
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/html; charset=utf-8"
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            format!("attachment; filename=\"memory-book-{}.html\"", hunt.id).as_str()
        );
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = String::from_utf8(body_bytes.to_vec()).unwrap();
        assert!(html.contains("Robin &amp; Co"));
    }

    #[tokio::test]
    async fn test_export_of_unknown_hunt_returns_404() {
        // Arrange
        let app = router().with_state(app_state_with(Arc::new(InMemoryHuntStore::new())));

        // Act
        let response = app
            .oneshot(empty_request("GET", &format!("/hunts/{}/export", Uuid::new_v4())))
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
