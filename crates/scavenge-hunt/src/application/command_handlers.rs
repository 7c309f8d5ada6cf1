//! Command handlers for the Hunt Lifecycle & Authoring context.
//!
//! This module contains application-level command handler functions that
//! orchestrate domain logic: load entities, apply rules, persist.

use std::sync::Mutex;

use scavenge_core::clock::Clock;
use scavenge_core::entity::{Hunt, HuntProgress, HuntStatus, PostIt, PostItOption};
use scavenge_core::error::DomainError;
use scavenge_core::lock::HuntLocks;
use scavenge_core::repository::HuntStore;
use scavenge_core::rng::DeterministicRng;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::codes::{MAX_GENERATION_ATTEMPTS, generate_code, generate_slug};
use crate::domain::commands::{
    CreateHunt, CreatePostIt, CreatePostItOption, DeleteHunt, DeletePostIt, DeletePostItOption,
    PublishHunt, UpdateHunt, UpdatePostIt,
};
use crate::domain::rules::{apply_changes, share_url, validate_option, validate_post_it};

/// Result of creating a hunt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedHunt {
    /// The new hunt's ID.
    pub hunt_id: Uuid,
    /// The human code.
    pub code: String,
    /// The share slug.
    pub share_slug: String,
    /// Always `draft`.
    pub status: HuntStatus,
}

/// Result of publishing a hunt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedHunt {
    /// Public URL the recipient opens.
    pub share_url: String,
    /// The human code.
    pub code: String,
    /// Always `published`.
    pub status: HuntStatus,
}

fn draw(
    rng: &Mutex<dyn DeterministicRng + Send>,
    generate: fn(&mut dyn DeterministicRng) -> String,
) -> Result<String, DomainError> {
    let mut rng_guard = rng
        .lock()
        .map_err(|e| DomainError::Infrastructure(format!("RNG mutex poisoned: {e}")))?;
    Ok(generate(&mut *rng_guard))
}

async fn unique_code(
    rng: &Mutex<dyn DeterministicRng + Send>,
    store: &dyn HuntStore,
) -> Result<String, DomainError> {
    for attempt in 1..=MAX_GENERATION_ATTEMPTS {
        let code = draw(rng, generate_code)?;
        if store.find_hunt_by_code(&code).await?.is_none() {
            return Ok(code);
        }
        warn!(attempt, "hunt code collision, drawing again");
    }
    Err(DomainError::GenerationExhausted("hunt code"))
}

async fn unique_slug(
    rng: &Mutex<dyn DeterministicRng + Send>,
    store: &dyn HuntStore,
) -> Result<String, DomainError> {
    for attempt in 1..=MAX_GENERATION_ATTEMPTS {
        let slug = draw(rng, generate_slug)?;
        if store.find_hunt_by_slug(&slug).await?.is_none() {
            return Ok(slug);
        }
        warn!(attempt, "share slug collision, drawing again");
    }
    Err(DomainError::GenerationExhausted("share slug"))
}

async fn load_hunt(store: &dyn HuntStore, hunt_id: Uuid) -> Result<Hunt, DomainError> {
    store
        .get_hunt(hunt_id)
        .await?
        .ok_or(DomainError::HuntNotFound(hunt_id))
}

async fn load_post_it(store: &dyn HuntStore, post_it_id: Uuid) -> Result<PostIt, DomainError> {
    store
        .get_post_it(post_it_id)
        .await?
        .ok_or(DomainError::PostItNotFound(post_it_id))
}

/// Handles the `CreateHunt` command: draws a unique code and share slug,
/// then persists a draft hunt with an empty progress row.
///
/// The RNG `Mutex` is locked only around each synchronous draw, never
/// across a store call.
///
/// # Errors
///
/// Returns `DomainError::GenerationExhausted` if a unique key cannot be
/// drawn, or the store's error if persistence fails.
pub async fn handle_create_hunt(
    command: &CreateHunt,
    clock: &dyn Clock,
    rng: &Mutex<dyn DeterministicRng + Send>,
    store: &dyn HuntStore,
) -> Result<CreatedHunt, DomainError> {
    let code = unique_code(rng, store).await?;
    let share_slug = unique_slug(rng, store).await?;
    let now = clock.now();

    let hunt = Hunt {
        id: Uuid::new_v4(),
        code,
        share_slug,
        gifted_name: command.gifted_name.clone(),
        welcome_message: command.welcome_message.clone(),
        status: HuntStatus::Draft,
        created_at: now,
        published_at: None,
    };
    store.insert_hunt(&hunt).await?;
    store.upsert_progress(&HuntProgress::empty(hunt.id, now)).await?;

    info!(
        correlation_id = %command.correlation_id,
        hunt_id = %hunt.id,
        code = %hunt.code,
        "hunt created"
    );

    Ok(CreatedHunt {
        hunt_id: hunt.id,
        code: hunt.code,
        share_slug: hunt.share_slug,
        status: hunt.status,
    })
}

/// Handles the `PublishHunt` command: moves a draft hunt to published and
/// points progress at its first card.
///
/// # Errors
///
/// Returns `DomainError::HuntNotFound` if the hunt does not exist,
/// `DomainError::EmptyHunt` if it has no post-its, or
/// `DomainError::InvalidTransition` if it is no longer a draft.
pub async fn handle_publish_hunt(
    command: &PublishHunt,
    clock: &dyn Clock,
    locks: &HuntLocks,
    store: &dyn HuntStore,
    public_base_url: &str,
) -> Result<PublishedHunt, DomainError> {
    let _guard = locks.acquire(command.hunt_id).await?;

    let mut hunt = load_hunt(store, command.hunt_id).await?;
    let post_its = store.list_post_its(hunt.id).await?;
    let Some(first) = post_its.first() else {
        return Err(DomainError::EmptyHunt(hunt.id));
    };

    let now = clock.now();
    hunt.advance_to(HuntStatus::Published, now)?;
    store.update_hunt(&hunt).await?;
    store
        .upsert_progress(&HuntProgress {
            hunt_id: hunt.id,
            current_post_it_id: Some(first.id),
            completed_at: None,
            updated_at: now,
        })
        .await?;

    info!(
        correlation_id = %command.correlation_id,
        hunt_id = %hunt.id,
        first_post_it_id = %first.id,
        "hunt published"
    );

    Ok(PublishedHunt {
        share_url: share_url(public_base_url, &hunt.share_slug),
        code: hunt.code,
        status: hunt.status,
    })
}

/// Handles the `UpdateHunt` command.
///
/// # Errors
///
/// Returns `DomainError::HuntNotFound` if the hunt does not exist.
pub async fn handle_update_hunt(
    command: &UpdateHunt,
    store: &dyn HuntStore,
) -> Result<Hunt, DomainError> {
    let mut hunt = load_hunt(store, command.hunt_id).await?;
    if let Some(gifted_name) = &command.gifted_name {
        hunt.gifted_name.clone_from(gifted_name);
    }
    if let Some(welcome_message) = &command.welcome_message {
        hunt.welcome_message.clone_from(welcome_message);
    }
    store.update_hunt(&hunt).await?;
    Ok(hunt)
}

/// Handles the `DeleteHunt` command.
///
/// # Errors
///
/// Returns `DomainError::HuntNotFound` if the hunt does not exist.
pub async fn handle_delete_hunt(
    command: &DeleteHunt,
    store: &dyn HuntStore,
) -> Result<(), DomainError> {
    store.delete_hunt(command.hunt_id).await?;
    info!(correlation_id = %command.correlation_id, hunt_id = %command.hunt_id, "hunt deleted");
    Ok(())
}

/// Handles the `CreatePostIt` command.
///
/// # Errors
///
/// Returns `DomainError::HuntNotFound` if the hunt does not exist, or
/// `DomainError::Validation` if the successor is not part of the hunt.
pub async fn handle_create_post_it(
    command: &CreatePostIt,
    clock: &dyn Clock,
    store: &dyn HuntStore,
) -> Result<PostIt, DomainError> {
    let hunt = load_hunt(store, command.hunt_id).await?;
    let draft = command.draft.clone();

    let post_it = PostIt {
        id: Uuid::new_v4(),
        hunt_id: hunt.id,
        position: draft.position,
        title: draft.title,
        prompt: draft.prompt,
        color: draft.color,
        post_it_type: draft.post_it_type,
        correct_answer: draft.correct_answer,
        requires_photo: draft.requires_photo,
        allows_skip: draft.allows_skip,
        next_post_it_id: draft.next_post_it_id,
        unlock_at: draft.unlock_at,
        hints: draft.hints,
        photo_min: draft.photo_min,
        photo_max: draft.photo_max,
        created_at: clock.now(),
    };
    let siblings = store.list_post_its(hunt.id).await?;
    validate_post_it(&post_it, &siblings)?;
    store.insert_post_it(&post_it).await?;
    Ok(post_it)
}

/// Handles the `UpdatePostIt` command.
///
/// # Errors
///
/// Returns `DomainError::PostItNotFound` if the post-it does not exist, or
/// `DomainError::Validation` if the edit breaks an authoring rule.
pub async fn handle_update_post_it(
    command: &UpdatePostIt,
    store: &dyn HuntStore,
) -> Result<PostIt, DomainError> {
    let mut post_it = load_post_it(store, command.post_it_id).await?;
    apply_changes(&mut post_it, command.changes.clone());

    let siblings = store.list_post_its(post_it.hunt_id).await?;
    validate_post_it(&post_it, &siblings)?;
    store.update_post_it(&post_it).await?;
    Ok(post_it)
}

/// Handles the `DeletePostIt` command.
///
/// # Errors
///
/// Returns `DomainError::PostItNotFound` if the post-it does not exist.
pub async fn handle_delete_post_it(
    command: &DeletePostIt,
    store: &dyn HuntStore,
) -> Result<(), DomainError> {
    store.delete_post_it(command.post_it_id).await
}

/// Handles the `CreatePostItOption` command.
///
/// # Errors
///
/// Returns `DomainError::PostItNotFound` if the owning post-it does not
/// exist, or `DomainError::Validation` for a duplicate value or a target
/// outside the hunt.
pub async fn handle_create_post_it_option(
    command: &CreatePostItOption,
    store: &dyn HuntStore,
) -> Result<PostItOption, DomainError> {
    let post_it = load_post_it(store, command.post_it_id).await?;
    let option = PostItOption {
        id: Uuid::new_v4(),
        post_it_id: post_it.id,
        label: command.label.clone(),
        value: command.value.clone(),
        next_post_it_id: command.next_post_it_id,
    };

    let existing = store.list_options(post_it.id).await?;
    let siblings = store.list_post_its(post_it.hunt_id).await?;
    validate_option(&option, &existing, &siblings)?;
    store.insert_option(&option).await?;
    Ok(option)
}

/// Handles the `DeletePostItOption` command.
///
/// # Errors
///
/// Returns `DomainError::OptionNotFound` if the option does not exist.
pub async fn handle_delete_post_it_option(
    command: &DeletePostItOption,
    store: &dyn HuntStore,
) -> Result<(), DomainError> {
    store.delete_option(command.option_id).await
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Mutex;

    use chrono::{TimeZone, Utc};
    use scavenge_core::entity::{HuntStatus, PostItType};
    use scavenge_core::error::DomainError;
    use scavenge_core::lock::HuntLocks;
    use scavenge_core::repository::HuntStore;
    use scavenge_core::rng::SystemRng;
    use scavenge_store::InMemoryHuntStore;
    use scavenge_test_support::{FailingHuntStore, FixedClock, MockRng, SequenceRng};
    use uuid::Uuid;

    use super::*;
    use crate::domain::commands::{PostItChanges, PostItDraft};

    const BASE_URL: &str = "https://hunt.example.com";

    fn fixed_clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2026, 2, 14, 9, 0, 0).unwrap())
    }

    fn create_command() -> CreateHunt {
        CreateHunt {
            correlation_id: Uuid::new_v4(),
            gifted_name: "Robin".to_owned(),
            welcome_message: "Happy birthday!".to_owned(),
        }
    }

    fn draft(position: i32) -> PostItDraft {
        PostItDraft {
            position,
            title: None,
            prompt: format!("Card {position}"),
            color: "yellow".to_owned(),
            post_it_type: PostItType::Riddle,
            correct_answer: None,
            requires_photo: false,
            allows_skip: false,
            next_post_it_id: None,
            unlock_at: None,
            hints: Vec::new(),
            photo_min: None,
            photo_max: None,
        }
    }

    async fn create_hunt(store: &InMemoryHuntStore) -> CreatedHunt {
        let rng: Mutex<SystemRng> = Mutex::new(SystemRng::default());
        handle_create_hunt(&create_command(), &fixed_clock(), &rng, store)
            .await
            .unwrap()
    }

    async fn add_post_it(store: &InMemoryHuntStore, hunt_id: Uuid, position: i32) -> PostIt {
        let command = CreatePostIt {
            correlation_id: Uuid::new_v4(),
            hunt_id,
            draft: draft(position),
        };
        handle_create_post_it(&command, &fixed_clock(), store)
            .await
            .unwrap()
    }

    // --- create ---

    #[tokio::test]
    async fn test_handle_create_hunt_persists_draft_and_empty_progress() {
        // Arrange
        let store = InMemoryHuntStore::new();
        let rng: Mutex<SequenceRng> = Mutex::new(SequenceRng::new(vec![0, 1, 2, 3, 4, 5]));

        // Act
        let created = handle_create_hunt(&create_command(), &fixed_clock(), &rng, &store)
            .await
            .unwrap();

        // Assert
        assert_eq!(created.code, "ABCDEF");
        assert_eq!(created.share_slug, "abcdefabcdef");
        assert_eq!(created.status, HuntStatus::Draft);
        let hunt = store.get_hunt(created.hunt_id).await.unwrap().unwrap();
        assert_eq!(hunt.gifted_name, "Robin");
        assert_eq!(hunt.published_at, None);
        let progress = store.get_progress(created.hunt_id).await.unwrap().unwrap();
        assert_eq!(progress.current_post_it_id, None);
        assert_eq!(progress.completed_at, None);
    }

    #[tokio::test]
    async fn test_handle_create_hunt_redraws_on_code_collision() {
        // Arrange
        let store = InMemoryHuntStore::new();
        let always_a = Mutex::new(MockRng);
        let first = handle_create_hunt(&create_command(), &fixed_clock(), &always_a, &store)
            .await
            .unwrap();
        assert_eq!(first.code, "AAAAAA");
        // Six zeros collide with "AAAAAA", the next six draw "BBBBBB"; slug uses the rest.
        let mut draws = vec![0; 6];
        draws.extend(vec![1; 6]);
        draws.extend(vec![1; 12]);
        let rng: Mutex<SequenceRng> = Mutex::new(SequenceRng::new(draws));

        // Act
        let second = handle_create_hunt(&create_command(), &fixed_clock(), &rng, &store)
            .await
            .unwrap();

        // Assert
        assert_eq!(second.code, "BBBBBB");
        assert_eq!(second.share_slug, "bbbbbbbbbbbb");
    }

    #[tokio::test]
    async fn test_handle_create_hunt_gives_up_after_bounded_collisions() {
        // Arrange
        let store = InMemoryHuntStore::new();
        let rng = Mutex::new(MockRng);
        handle_create_hunt(&create_command(), &fixed_clock(), &rng, &store)
            .await
            .unwrap();

        // Act
        let result = handle_create_hunt(&create_command(), &fixed_clock(), &rng, &store).await;

        // Assert
        match result {
            Err(DomainError::GenerationExhausted(key)) => assert_eq!(key, "hunt code"),
            other => panic!("expected GenerationExhausted, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_repeated_creation_never_reuses_code_or_slug() {
        // Arrange
        let store = InMemoryHuntStore::new();
        let mut codes = HashSet::new();
        let mut slugs = HashSet::new();

        // Act
        for _ in 0..50 {
            let created = create_hunt(&store).await;
            codes.insert(created.code);
            slugs.insert(created.share_slug);
        }

        // Assert
        assert_eq!(codes.len(), 50);
        assert_eq!(slugs.len(), 50);
    }

    #[tokio::test]
    async fn test_handle_create_hunt_propagates_store_failure() {
        let rng = Mutex::new(MockRng);

        let result =
            handle_create_hunt(&create_command(), &fixed_clock(), &rng, &FailingHuntStore).await;

        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
    }

    // --- publish ---

    #[tokio::test]
    async fn test_handle_publish_hunt_points_progress_at_lowest_position() {
        // Arrange
        let store = InMemoryHuntStore::new();
        let created = create_hunt(&store).await;
        add_post_it(&store, created.hunt_id, 5).await;
        let first = add_post_it(&store, created.hunt_id, 1).await;
        let command = PublishHunt {
            correlation_id: Uuid::new_v4(),
            hunt_id: created.hunt_id,
        };

        // Act
        let published =
            handle_publish_hunt(&command, &fixed_clock(), &HuntLocks::new(), &store, BASE_URL)
                .await
                .unwrap();

        // Assert
        assert_eq!(
            published.share_url,
            format!("{BASE_URL}/h/{}", created.share_slug)
        );
        assert_eq!(published.code, created.code);
        assert_eq!(published.status, HuntStatus::Published);
        let hunt = store.get_hunt(created.hunt_id).await.unwrap().unwrap();
        assert_eq!(hunt.status, HuntStatus::Published);
        assert_eq!(hunt.published_at, Some(fixed_clock().0));
        let progress = store.get_progress(created.hunt_id).await.unwrap().unwrap();
        assert_eq!(progress.current_post_it_id, Some(first.id));
    }

    #[tokio::test]
    async fn test_handle_publish_hunt_rejects_empty_hunt() {
        // Arrange
        let store = InMemoryHuntStore::new();
        let created = create_hunt(&store).await;
        let command = PublishHunt {
            correlation_id: Uuid::new_v4(),
            hunt_id: created.hunt_id,
        };

        // Act
        let result =
            handle_publish_hunt(&command, &fixed_clock(), &HuntLocks::new(), &store, BASE_URL)
                .await;

        // Assert
        match result {
            Err(DomainError::EmptyHunt(id)) => assert_eq!(id, created.hunt_id),
            other => panic!("expected EmptyHunt, got {other:?}"),
        }
        let hunt = store.get_hunt(created.hunt_id).await.unwrap().unwrap();
        assert_eq!(hunt.status, HuntStatus::Draft);
    }

    #[tokio::test]
    async fn test_handle_publish_hunt_twice_is_invalid_transition() {
        // Arrange
        let store = InMemoryHuntStore::new();
        let locks = HuntLocks::new();
        let created = create_hunt(&store).await;
        add_post_it(&store, created.hunt_id, 0).await;
        let command = PublishHunt {
            correlation_id: Uuid::new_v4(),
            hunt_id: created.hunt_id,
        };
        handle_publish_hunt(&command, &fixed_clock(), &locks, &store, BASE_URL)
            .await
            .unwrap();

        // Act
        let result = handle_publish_hunt(&command, &fixed_clock(), &locks, &store, BASE_URL).await;

        // Assert
        match result {
            Err(DomainError::InvalidTransition { from, to, .. }) => {
                assert_eq!(from, HuntStatus::Published);
                assert_eq!(to, HuntStatus::Published);
            }
            other => panic!("expected InvalidTransition, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_handle_publish_hunt_missing_hunt_is_not_found() {
        let store = InMemoryHuntStore::new();
        let hunt_id = Uuid::new_v4();
        let command = PublishHunt {
            correlation_id: Uuid::new_v4(),
            hunt_id,
        };

        let result =
            handle_publish_hunt(&command, &fixed_clock(), &HuntLocks::new(), &store, BASE_URL)
                .await;

        assert!(matches!(result, Err(DomainError::HuntNotFound(id)) if id == hunt_id));
    }

    // --- authoring ---

    #[tokio::test]
    async fn test_handle_update_hunt_changes_only_given_fields() {
        // Arrange
        let store = InMemoryHuntStore::new();
        let created = create_hunt(&store).await;
        let command = UpdateHunt {
            correlation_id: Uuid::new_v4(),
            hunt_id: created.hunt_id,
            gifted_name: None,
            welcome_message: Some("Surprise!".to_owned()),
        };

        // Act
        let hunt = handle_update_hunt(&command, &store).await.unwrap();

        // Assert
        assert_eq!(hunt.gifted_name, "Robin");
        assert_eq!(hunt.welcome_message, "Surprise!");
        assert_eq!(
            store.get_hunt(created.hunt_id).await.unwrap().unwrap(),
            hunt
        );
    }

    #[tokio::test]
    async fn test_handle_delete_hunt_removes_everything() {
        // Arrange
        let store = InMemoryHuntStore::new();
        let created = create_hunt(&store).await;
        let post_it = add_post_it(&store, created.hunt_id, 0).await;
        let command = DeleteHunt {
            correlation_id: Uuid::new_v4(),
            hunt_id: created.hunt_id,
        };

        // Act
        handle_delete_hunt(&command, &store).await.unwrap();

        // Assert
        assert_eq!(store.get_hunt(created.hunt_id).await.unwrap(), None);
        assert_eq!(store.get_post_it(post_it.id).await.unwrap(), None);
        assert_eq!(store.get_progress(created.hunt_id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_handle_create_post_it_for_missing_hunt_is_not_found() {
        let store = InMemoryHuntStore::new();
        let command = CreatePostIt {
            correlation_id: Uuid::new_v4(),
            hunt_id: Uuid::new_v4(),
            draft: draft(0),
        };

        let result = handle_create_post_it(&command, &fixed_clock(), &store).await;

        assert!(matches!(result, Err(DomainError::HuntNotFound(_))));
    }

    #[tokio::test]
    async fn test_handle_create_post_it_rejects_successor_from_other_hunt() {
        // Arrange
        let store = InMemoryHuntStore::new();
        let mine = create_hunt(&store).await;
        let theirs = create_hunt(&store).await;
        let foreign = add_post_it(&store, theirs.hunt_id, 0).await;
        let mut linked = draft(1);
        linked.next_post_it_id = Some(foreign.id);
        let command = CreatePostIt {
            correlation_id: Uuid::new_v4(),
            hunt_id: mine.hunt_id,
            draft: linked,
        };

        // Act
        let result = handle_create_post_it(&command, &fixed_clock(), &store).await;

        // Assert
        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert!(store.list_post_its(mine.hunt_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_handle_update_post_it_applies_partial_changes() {
        // Arrange
        let store = InMemoryHuntStore::new();
        let created = create_hunt(&store).await;
        let post_it = add_post_it(&store, created.hunt_id, 0).await;
        let command = UpdatePostIt {
            correlation_id: Uuid::new_v4(),
            post_it_id: post_it.id,
            changes: PostItChanges {
                correct_answer: Some(Some("attic".to_owned())),
                hints: Some(vec!["Up high".to_owned()]),
                ..PostItChanges::default()
            },
        };

        // Act
        let updated = handle_update_post_it(&command, &store).await.unwrap();

        // Assert
        assert_eq!(updated.correct_answer.as_deref(), Some("attic"));
        assert_eq!(updated.hints, vec!["Up high".to_owned()]);
        assert_eq!(updated.prompt, post_it.prompt);
        assert_eq!(
            store.get_post_it(post_it.id).await.unwrap().unwrap(),
            updated
        );
    }

    #[tokio::test]
    async fn test_handle_delete_post_it_missing_is_not_found() {
        let store = InMemoryHuntStore::new();
        let command = DeletePostIt {
            correlation_id: Uuid::new_v4(),
            post_it_id: Uuid::new_v4(),
        };

        let result = handle_delete_post_it(&command, &store).await;

        assert!(matches!(result, Err(DomainError::PostItNotFound(_))));
    }

    #[tokio::test]
    async fn test_handle_create_post_it_option_enforces_unique_value() {
        // Arrange
        let store = InMemoryHuntStore::new();
        let created = create_hunt(&store).await;
        let choice = add_post_it(&store, created.hunt_id, 0).await;
        let target = add_post_it(&store, created.hunt_id, 1).await;
        let command = CreatePostItOption {
            correlation_id: Uuid::new_v4(),
            post_it_id: choice.id,
            label: "Left door".to_owned(),
            value: "left".to_owned(),
            next_post_it_id: target.id,
        };
        handle_create_post_it_option(&command, &store).await.unwrap();

        // Act
        let result = handle_create_post_it_option(&command, &store).await;

        // Assert
        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert_eq!(store.list_options(choice.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_handle_create_post_it_option_allows_self_reference() {
        let store = InMemoryHuntStore::new();
        let created = create_hunt(&store).await;
        let choice = add_post_it(&store, created.hunt_id, 0).await;
        let command = CreatePostItOption {
            correlation_id: Uuid::new_v4(),
            post_it_id: choice.id,
            label: "Stay here".to_owned(),
            value: "stay".to_owned(),
            next_post_it_id: choice.id,
        };

        let option = handle_create_post_it_option(&command, &store).await.unwrap();

        assert_eq!(option.next_post_it_id, choice.id);
    }

    #[tokio::test]
    async fn test_handle_delete_post_it_option_removes_it() {
        // Arrange
        let store = InMemoryHuntStore::new();
        let created = create_hunt(&store).await;
        let choice = add_post_it(&store, created.hunt_id, 0).await;
        let option = handle_create_post_it_option(
            &CreatePostItOption {
                correlation_id: Uuid::new_v4(),
                post_it_id: choice.id,
                label: "Stay".to_owned(),
                value: "stay".to_owned(),
                next_post_it_id: choice.id,
            },
            &store,
        )
        .await
        .unwrap();
        let command = DeletePostItOption {
            correlation_id: Uuid::new_v4(),
            option_id: option.id,
        };

        // Act
        handle_delete_post_it_option(&command, &store).await.unwrap();

        // Assert
        assert_eq!(store.get_option(option.id).await.unwrap(), None);
    }
}
