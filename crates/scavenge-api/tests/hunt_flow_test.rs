//! End-to-end play-through of a branching hunt over HTTP.

mod common;

use axum::http::StatusCode;
use serde_json::json;

struct Cards {
    riddle: String,
    choice: String,
    photo: String,
    finale: String,
}

/// Builds a hunt: riddle -> choice -(left)-> photo -> finale, with the
/// choice's `right` option jumping straight to the finale.
async fn build_hunt(app: &axum::Router) -> (String, Cards) {
    let hunt_id = common::create_hunt(app, "Robin").await;
    let riddle = common::create_post_it(
        app,
        &hunt_id,
        json!({
            "position": 0,
            "title": "Socks",
            "prompt": "Where do the socks hide?",
            "type": "riddle",
            "correctAnswer": "Drawer",
            "hints": ["It slides", "Bedroom"],
        }),
    )
    .await;
    let choice = common::create_post_it(
        app,
        &hunt_id,
        json!({ "position": 1, "prompt": "Left or right?", "type": "choice", "color": "blue" }),
    )
    .await;
    let photo = common::create_post_it(
        app,
        &hunt_id,
        json!({ "position": 2, "prompt": "Snap the garden", "type": "photo", "requiresPhoto": true }),
    )
    .await;
    let finale = common::create_post_it(
        app,
        &hunt_id,
        json!({ "position": 3, "prompt": "Last one", "type": "riddle", "allowsSkip": true }),
    )
    .await;

    for (label, value, target) in [("Left", "left", &photo), ("Right", "right", &finale)] {
        let (status, _) = common::post_json(
            app,
            &format!("/api/post-its/{choice}/options"),
            &json!({ "label": label, "value": value, "nextPostItId": target }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    (
        hunt_id,
        Cards {
            riddle,
            choice,
            photo,
            finale,
        },
    )
}

#[tokio::test]
async fn test_draft_hunt_rejects_submissions() {
    // Arrange
    let app = common::build_test_app();
    let (hunt_id, cards) = build_hunt(&app).await;

    // Act
    let (status, json) = common::submit(&app, &hunt_id, &cards.riddle, json!({})).await;

    // Assert
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"], "CONFLICT");
}

#[tokio::test]
async fn test_publish_returns_share_url_and_rejects_republish() {
    // Arrange
    let app = common::build_test_app();
    let (hunt_id, _cards) = build_hunt(&app).await;

    // Act
    let (status, published) =
        common::post_json(&app, &format!("/api/hunts/{hunt_id}/publish"), &json!({})).await;
    let (again, _) =
        common::post_json(&app, &format!("/api/hunts/{hunt_id}/publish"), &json!({})).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(published["status"], "published");
    let (_, detail) = common::get_json(&app, &format!("/api/hunts/{hunt_id}")).await;
    let slug = detail["shareSlug"].as_str().unwrap();
    assert_eq!(
        published["shareUrl"],
        format!("{}/h/{slug}", common::PUBLIC_WEB_BASE_URL)
    );
    assert_eq!(published["code"], detail["code"]);
    assert_eq!(again, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_hunt_detail_lists_cards_with_options_by_label() {
    // Arrange
    let app = common::build_test_app();
    let (hunt_id, cards) = build_hunt(&app).await;

    // Act
    let (status, detail) = common::get_json(&app, &format!("/api/hunts/{hunt_id}")).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    let post_its = detail["postIts"].as_array().unwrap();
    assert_eq!(post_its.len(), 4);
    assert_eq!(post_its[1]["id"], cards.choice.as_str());
    let labels: Vec<&str> = post_its[1]["options"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, vec!["Left", "Right"]);
}

#[tokio::test]
async fn test_full_play_through_to_memory_book() {
    // Arrange
    let app = common::build_test_app();
    let (hunt_id, cards) = build_hunt(&app).await;
    let (status, _) =
        common::post_json(&app, &format!("/api/hunts/{hunt_id}/publish"), &json!({})).await;
    assert_eq!(status, StatusCode::OK);

    // Act & Assert: cards ahead of the pointer are locked.
    let (status, json) = common::submit(&app, &hunt_id, &cards.choice, json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, json!({ "ok": false, "reason": "LOCKED" }));

    // Wrong answers reveal hints, then ask to try again.
    let (status, json) =
        common::submit(&app, &hunt_id, &cards.riddle, json!({ "textAnswer": "closet" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["reason"], "WRONG_ANSWER");
    assert_eq!(json["hints"], json!(["It slides"]));
    let (_, json) =
        common::submit(&app, &hunt_id, &cards.riddle, json!({ "textAnswer": "shelf" })).await;
    assert_eq!(json["reason"], "TRY_AGAIN");
    assert_eq!(json["hintAttempts"], 2);
    assert_eq!(json["allHintsShown"], true);

    let (status, json) =
        common::submit(&app, &hunt_id, &cards.riddle, json!({ "textAnswer": " drawer " })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["nextPostItId"], cards.choice.as_str());

    // Choice cards need a known option and follow it.
    let (status, json) = common::submit(
        &app,
        &hunt_id,
        &cards.choice,
        json!({ "selectedOptionValue": "middle" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["reason"], "INVALID_OPTION");
    let (_, json) = common::submit(
        &app,
        &hunt_id,
        &cards.choice,
        json!({ "selectedOptionValue": "left" }),
    )
    .await;
    assert_eq!(json["nextPostItId"], cards.photo.as_str());

    // Photo cards need a photo, then fall through to the next position.
    let (status, json) = common::submit(&app, &hunt_id, &cards.photo, json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["reason"], "PHOTO_REQUIRED");
    let (_, json) = common::submit(
        &app,
        &hunt_id,
        &cards.photo,
        json!({ "photoUrls": ["https://cdn.example.com/garden.jpg"] }),
    )
    .await;
    assert_eq!(json["nextPostItId"], cards.finale.as_str());

    // Skipping the last card completes the hunt.
    let (status, json) =
        common::submit(&app, &hunt_id, &cards.finale, json!({ "wasSkipped": true })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["wasSkipped"], true);
    assert_eq!(json["huntCompleted"], true);
    assert_eq!(json["nextPostItId"], serde_json::Value::Null);

    let (_, state) = common::get_json(&app, &format!("/api/hunts/{hunt_id}/state")).await;
    assert_eq!(state["status"], "completed");
    assert_eq!(state["progress"]["completedCount"], 4);
    assert_eq!(state["progress"]["totalCount"], 4);
    assert_eq!(state["progress"]["currentPostItId"], serde_json::Value::Null);

    let (status, _) = common::submit(&app, &hunt_id, &cards.finale, json!({})).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, html) = common::get_text(&app, &format!("/api/hunts/{hunt_id}/export")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("For Robin"));
    assert!(html.contains("drawer"));
    assert!(html.contains("https://cdn.example.com/garden.jpg"));
    assert!(html.contains("Skipped"));
}
