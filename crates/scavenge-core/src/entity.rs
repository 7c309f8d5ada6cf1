//! Entity model shared by every bounded context.
//!
//! These are plain records; the rules that govern them live in the hunt
//! and progression crates.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Lifecycle status of a hunt. Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HuntStatus {
    /// Being authored, not playable.
    Draft,
    /// Shared with the recipient and playable.
    Published,
    /// Every card on the path has been accepted.
    Completed,
}

impl HuntStatus {
    /// Storage/wire representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Completed => "completed",
        }
    }

    /// Whether `next` is the single forward step from `self`.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Draft, Self::Published) | (Self::Published, Self::Completed)
        )
    }
}

impl fmt::Display for HuntStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HuntStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            "completed" => Ok(Self::Completed),
            other => Err(DomainError::Infrastructure(format!(
                "unknown hunt status: {other}"
            ))),
        }
    }
}

/// The kind of challenge a post-it poses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostItType {
    /// Answer a riddle with text.
    Riddle,
    /// Take a photo.
    Photo,
    /// Text and photo.
    Mixed,
    /// Pick one of several options, each leading to its own next card.
    Choice,
}

impl PostItType {
    /// Storage/wire representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Riddle => "riddle",
            Self::Photo => "photo",
            Self::Mixed => "mixed",
            Self::Choice => "choice",
        }
    }
}

impl FromStr for PostItType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "riddle" => Ok(Self::Riddle),
            "photo" => Ok(Self::Photo),
            "mixed" => Ok(Self::Mixed),
            "choice" => Ok(Self::Choice),
            other => Err(DomainError::Infrastructure(format!(
                "unknown post-it type: {other}"
            ))),
        }
    }
}

/// A scavenger hunt created by a gifter for one recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hunt {
    /// Hunt identifier.
    pub id: Uuid,
    /// Six-character human code, globally unique.
    pub code: String,
    /// Twelve-character share slug, globally unique.
    pub share_slug: String,
    /// Name of the recipient.
    pub gifted_name: String,
    /// Message shown when the recipient opens the hunt.
    pub welcome_message: String,
    /// Lifecycle status.
    pub status: HuntStatus,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Set when the hunt is published.
    pub published_at: Option<DateTime<Utc>>,
}

impl Hunt {
    /// Moves the hunt one step forward, stamping `published_at` on publish.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTransition` unless `next` is the single
    /// forward step from the current status.
    pub fn advance_to(&mut self, next: HuntStatus, now: DateTime<Utc>) -> Result<(), DomainError> {
        if !self.status.can_transition_to(next) {
            return Err(DomainError::InvalidTransition {
                hunt_id: self.id,
                from: self.status,
                to: next,
            });
        }
        if next == HuntStatus::Published {
            self.published_at = Some(now);
        }
        self.status = next;
        Ok(())
    }
}

/// A single challenge card within a hunt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostIt {
    /// Post-it identifier.
    pub id: Uuid,
    /// Owning hunt.
    pub hunt_id: Uuid,
    /// Ordering key within the hunt; ties fall back to `created_at`.
    pub position: i32,
    /// Optional heading.
    pub title: Option<String>,
    /// The challenge text.
    pub prompt: String,
    /// Display color name.
    pub color: String,
    /// Kind of challenge.
    #[serde(rename = "type")]
    pub post_it_type: PostItType,
    /// Expected text answer, compared case-insensitively after trimming.
    pub correct_answer: Option<String>,
    /// At least one photo must accompany an answer.
    pub requires_photo: bool,
    /// The recipient may skip this card.
    pub allows_skip: bool,
    /// Explicit successor, overriding position order.
    pub next_post_it_id: Option<Uuid>,
    /// The card cannot be answered before this instant without the bypass code.
    pub unlock_at: Option<DateTime<Utc>>,
    /// Hints revealed one per wrong attempt, in order.
    pub hints: Vec<String>,
    /// Suggested minimum number of photos.
    pub photo_min: Option<i32>,
    /// Suggested maximum number of photos.
    pub photo_max: Option<i32>,
    /// Creation time, used as the position tie-breaker.
    pub created_at: DateTime<Utc>,
}

impl PostIt {
    /// Whether the card is still time-locked at `now`.
    #[must_use]
    pub fn is_time_locked(&self, now: DateTime<Utc>) -> bool {
        self.unlock_at.is_some_and(|unlock_at| unlock_at > now)
    }
}

/// A branch of a `choice` post-it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostItOption {
    /// Option identifier.
    pub id: Uuid,
    /// Owning post-it.
    pub post_it_id: Uuid,
    /// Text shown to the recipient.
    pub label: String,
    /// Value submitted when chosen; unique within the post-it.
    pub value: String,
    /// Card unlocked by this choice (may be the owning card itself).
    pub next_post_it_id: Uuid,
}

/// A photo attached to a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPhoto {
    /// Photo identifier.
    pub id: Uuid,
    /// Owning submission.
    pub submission_id: Uuid,
    /// URL supplied by the upload subsystem.
    pub photo_url: String,
}

/// A recorded attempt against a post-it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    /// Submission identifier.
    pub id: Uuid,
    /// Hunt the attempt was made in.
    pub hunt_id: Uuid,
    /// Card the attempt was made against.
    pub post_it_id: Uuid,
    /// Text answer, if any.
    pub text_answer: Option<String>,
    /// Chosen option value, if any.
    pub selected_option_value: Option<String>,
    /// Whether the attempt was accepted.
    pub is_correct: bool,
    /// Whether the recipient skipped the card.
    pub was_skipped: bool,
    /// Wrong attempts so far; zero on accepted submissions.
    pub hint_attempts: u32,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Attached photos.
    pub photos: Vec<SubmissionPhoto>,
}

/// Pointer to the recipient's current card, one per hunt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HuntProgress {
    /// The hunt this progress belongs to.
    pub hunt_id: Uuid,
    /// The card currently unlocked; `None` before publish and after completion.
    pub current_post_it_id: Option<Uuid>,
    /// Set once the hunt is completed.
    pub completed_at: Option<DateTime<Utc>>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

impl HuntProgress {
    /// The empty progress row written when a hunt is created.
    #[must_use]
    pub fn empty(hunt_id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            hunt_id,
            current_post_it_id: None,
            completed_at: None,
            updated_at: now,
        }
    }
}

/// Sorts post-its into play order: position, then creation time.
pub fn sort_by_position(post_its: &mut [PostIt]) {
    post_its.sort_by(|a, b| {
        a.position
            .cmp(&b.position)
            .then_with(|| a.created_at.cmp(&b.created_at))
            .then_with(|| a.id.cmp(&b.id))
    });
}
