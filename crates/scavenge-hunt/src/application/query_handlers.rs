//! Query handlers for the Hunt Lifecycle & Authoring context.
//!
//! Lookups by id, code and slug are pure reads with no side effects.

use scavenge_core::entity::{Hunt, HuntStatus, PostIt, PostItOption};
use scavenge_core::error::DomainError;
use scavenge_core::repository::HuntStore;
use serde::Serialize;
use uuid::Uuid;

/// A post-it together with its branch options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostItView {
    /// The card itself.
    #[serde(flatten)]
    pub post_it: PostIt,
    /// Options sorted by label.
    pub options: Vec<PostItOption>,
}

/// Full authoring view of a hunt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HuntDetail {
    /// The hunt row.
    #[serde(flatten)]
    pub hunt: Hunt,
    /// Cards in play order.
    pub post_its: Vec<PostItView>,
}

/// Public summary returned by code and slug lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HuntSummary {
    /// The hunt identifier.
    pub hunt_id: Uuid,
    /// The share slug.
    pub share_slug: String,
    /// Name of the recipient.
    pub gifted_name: String,
    /// Welcome message.
    pub welcome_message: String,
    /// Current lifecycle status.
    pub status: HuntStatus,
}

impl From<Hunt> for HuntSummary {
    fn from(hunt: Hunt) -> Self {
        Self {
            hunt_id: hunt.id,
            share_slug: hunt.share_slug,
            gifted_name: hunt.gifted_name,
            welcome_message: hunt.welcome_message,
            status: hunt.status,
        }
    }
}

/// Retrieves a hunt with its post-its and their options.
///
/// # Errors
///
/// Returns `DomainError::HuntNotFound` if no hunt exists for the ID.
pub async fn get_hunt_by_id(
    hunt_id: Uuid,
    store: &dyn HuntStore,
) -> Result<HuntDetail, DomainError> {
    let hunt = store
        .get_hunt(hunt_id)
        .await?
        .ok_or(DomainError::HuntNotFound(hunt_id))?;

    let mut post_its = Vec::new();
    for post_it in store.list_post_its(hunt_id).await? {
        let mut options = store.list_options(post_it.id).await?;
        options.sort_by(|a, b| a.label.cmp(&b.label));
        post_its.push(PostItView { post_it, options });
    }

    Ok(HuntDetail { hunt, post_its })
}

/// Retrieves the public summary of a hunt by its human code.
///
/// # Errors
///
/// Returns `DomainError::HuntNotFoundByKey` if no hunt has this code.
pub async fn get_hunt_by_code(
    code: &str,
    store: &dyn HuntStore,
) -> Result<HuntSummary, DomainError> {
    store
        .find_hunt_by_code(code)
        .await?
        .map(HuntSummary::from)
        .ok_or_else(|| DomainError::HuntNotFoundByKey(code.to_owned()))
}

/// Retrieves the public summary of a hunt by its share slug.
///
/// # Errors
///
/// Returns `DomainError::HuntNotFoundByKey` if no hunt has this slug.
pub async fn get_hunt_by_slug(
    share_slug: &str,
    store: &dyn HuntStore,
) -> Result<HuntSummary, DomainError> {
    store
        .find_hunt_by_slug(share_slug)
        .await?
        .map(HuntSummary::from)
        .ok_or_else(|| DomainError::HuntNotFoundByKey(share_slug.to_owned()))
}
