//! Query handlers for the Progression context.
//!
//! Projects the recipient-facing view of a hunt: which cards are done,
//! which are locked, and how far along the hunt is.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use scavenge_core::clock::Clock;
use scavenge_core::entity::{HuntStatus, PostItOption, PostItType};
use scavenge_core::error::DomainError;
use scavenge_core::repository::HuntStore;
use serde::Serialize;
use uuid::Uuid;

/// Aggregate progress counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressView {
    /// Cards with at least one submission.
    pub completed_count: usize,
    /// Cards in the hunt.
    pub total_count: usize,
    /// The card currently unlocked.
    pub current_post_it_id: Option<Uuid>,
    /// Set once the hunt is completed.
    pub completed_at: Option<DateTime<Utc>>,
}

/// Projected state of one card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostItState {
    /// Post-it identifier.
    pub id: Uuid,
    /// Ordering key.
    pub position: i32,
    /// Optional heading.
    pub title: Option<String>,
    /// Challenge text.
    pub prompt: String,
    /// Display color.
    pub color: String,
    /// Kind of challenge.
    #[serde(rename = "type")]
    pub post_it_type: PostItType,
    /// Expected answer.
    pub correct_answer: Option<String>,
    /// A photo is required.
    pub requires_photo: bool,
    /// The card may be skipped.
    pub allows_skip: bool,
    /// When the card opens, if time-locked.
    pub unlock_at: Option<DateTime<Utc>>,
    /// Branches of a `choice` card.
    pub options: Vec<PostItOption>,
    /// Still closed to the recipient.
    pub locked: bool,
    /// The recipient has acted on this card.
    pub completed: bool,
    /// `unlock_at` is in the future.
    pub is_time_locked: bool,
}

/// Recipient-facing view of a hunt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HuntState {
    /// The hunt identifier.
    pub hunt_id: Uuid,
    /// Name of the recipient.
    pub gifted_name: String,
    /// Welcome message.
    pub welcome_message: String,
    /// Lifecycle status.
    pub status: HuntStatus,
    /// Aggregate counters.
    pub progress: ProgressView,
    /// Cards in play order.
    pub post_its: Vec<PostItState>,
}

/// Retrieves the projected state of a hunt.
///
/// A card counts as completed once any submission exists for it, retries
/// included. It is locked unless completed, or current and not time-locked.
///
/// # Errors
///
/// Returns `DomainError::HuntNotFound` if no hunt exists for the ID.
pub async fn get_hunt_state(
    hunt_id: Uuid,
    clock: &dyn Clock,
    store: &dyn HuntStore,
) -> Result<HuntState, DomainError> {
    let hunt = store
        .get_hunt(hunt_id)
        .await?
        .ok_or(DomainError::HuntNotFound(hunt_id))?;
    let post_its = store.list_post_its(hunt_id).await?;
    let progress = store.get_progress(hunt_id).await?;
    let submitted: HashSet<Uuid> = store
        .list_submissions(hunt_id)
        .await?
        .into_iter()
        .map(|s| s.post_it_id)
        .collect();

    let now = clock.now();
    let current_post_it_id = progress.as_ref().and_then(|p| p.current_post_it_id);

    let mut states = Vec::with_capacity(post_its.len());
    for post_it in post_its {
        let options = store.list_options(post_it.id).await?;
        let completed = submitted.contains(&post_it.id);
        let is_time_locked = post_it.is_time_locked(now);
        let locked =
            !completed && (Some(post_it.id) != current_post_it_id || is_time_locked);
        states.push(PostItState {
            id: post_it.id,
            position: post_it.position,
            title: post_it.title,
            prompt: post_it.prompt,
            color: post_it.color,
            post_it_type: post_it.post_it_type,
            correct_answer: post_it.correct_answer,
            requires_photo: post_it.requires_photo,
            allows_skip: post_it.allows_skip,
            unlock_at: post_it.unlock_at,
            options,
            locked,
            completed,
            is_time_locked,
        });
    }

    Ok(HuntState {
        hunt_id: hunt.id,
        gifted_name: hunt.gifted_name,
        welcome_message: hunt.welcome_message,
        status: hunt.status,
        progress: ProgressView {
            completed_count: states.iter().filter(|s| s.completed).count(),
            total_count: states.len(),
            current_post_it_id,
            completed_at: progress.and_then(|p| p.completed_at),
        },
        post_its: states,
    })
}
