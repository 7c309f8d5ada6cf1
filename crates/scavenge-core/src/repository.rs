//! Entity store abstraction.
//!
//! Every handler talks to storage through [`HuntStore`], so the engine runs
//! the same against the in-memory store in tests and `PostgreSQL` in
//! production.

use async_trait::async_trait;
use uuid::Uuid;

use crate::entity::{Hunt, HuntProgress, PostIt, PostItOption, Submission};
use crate::error::DomainError;

/// Storage for hunts and everything they own.
///
/// Lookups return `Ok(None)` for missing rows; `update_*` and `delete_*`
/// return the matching `*NotFound` error when the row is absent.
#[async_trait]
pub trait HuntStore: Send + Sync {
    // -- Hunts --

    /// Persist a new hunt.
    async fn insert_hunt(&self, hunt: &Hunt) -> Result<(), DomainError>;

    /// Load a hunt by ID.
    async fn get_hunt(&self, hunt_id: Uuid) -> Result<Option<Hunt>, DomainError>;

    /// Load a hunt by its human code.
    async fn find_hunt_by_code(&self, code: &str) -> Result<Option<Hunt>, DomainError>;

    /// Load a hunt by its share slug.
    async fn find_hunt_by_slug(&self, share_slug: &str) -> Result<Option<Hunt>, DomainError>;

    /// Overwrite a hunt's mutable fields.
    async fn update_hunt(&self, hunt: &Hunt) -> Result<(), DomainError>;

    /// Delete a hunt and everything it owns.
    async fn delete_hunt(&self, hunt_id: Uuid) -> Result<(), DomainError>;

    // -- Post-its --

    /// Persist a new post-it.
    async fn insert_post_it(&self, post_it: &PostIt) -> Result<(), DomainError>;

    /// Load a post-it by ID.
    async fn get_post_it(&self, post_it_id: Uuid) -> Result<Option<PostIt>, DomainError>;

    /// All post-its of a hunt in play order (position, then creation time).
    async fn list_post_its(&self, hunt_id: Uuid) -> Result<Vec<PostIt>, DomainError>;

    /// Number of post-its in a hunt.
    async fn count_post_its(&self, hunt_id: Uuid) -> Result<usize, DomainError>;

    /// Overwrite a post-it.
    async fn update_post_it(&self, post_it: &PostIt) -> Result<(), DomainError>;

    /// Delete a post-it together with its options and submissions.
    async fn delete_post_it(&self, post_it_id: Uuid) -> Result<(), DomainError>;

    // -- Options --

    /// Persist a new option.
    async fn insert_option(&self, option: &PostItOption) -> Result<(), DomainError>;

    /// Load an option by ID.
    async fn get_option(&self, option_id: Uuid) -> Result<Option<PostItOption>, DomainError>;

    /// All options of a post-it in insertion order.
    async fn list_options(&self, post_it_id: Uuid) -> Result<Vec<PostItOption>, DomainError>;

    /// Delete an option.
    async fn delete_option(&self, option_id: Uuid) -> Result<(), DomainError>;

    // -- Submissions --

    /// Persist a new submission with its photos.
    async fn insert_submission(&self, submission: &Submission) -> Result<(), DomainError>;

    /// The most recent submission for a card, if any.
    async fn latest_submission(
        &self,
        hunt_id: Uuid,
        post_it_id: Uuid,
    ) -> Result<Option<Submission>, DomainError>;

    /// Whether an accepted submission exists for a card.
    async fn has_correct_submission(
        &self,
        hunt_id: Uuid,
        post_it_id: Uuid,
    ) -> Result<bool, DomainError>;

    /// All submissions of a hunt in creation order, photos included.
    async fn list_submissions(&self, hunt_id: Uuid) -> Result<Vec<Submission>, DomainError>;

    /// Overwrite a submission's answer fields and attempt count.
    async fn update_submission(&self, submission: &Submission) -> Result<(), DomainError>;

    /// Delete a submission and its photos.
    async fn delete_submission(&self, submission_id: Uuid) -> Result<(), DomainError>;

    // -- Progress --

    /// Load the progress row of a hunt.
    async fn get_progress(&self, hunt_id: Uuid) -> Result<Option<HuntProgress>, DomainError>;

    /// Create or replace the progress row of a hunt.
    async fn upsert_progress(&self, progress: &HuntProgress) -> Result<(), DomainError>;
}
