//! Authoring rules for hunts, post-its and options.

use scavenge_core::entity::{PostIt, PostItOption};
use scavenge_core::error::DomainError;
use uuid::Uuid;

use super::commands::PostItChanges;

/// Builds the public share URL for a slug.
#[must_use]
pub fn share_url(public_base_url: &str, share_slug: &str) -> String {
    format!("{}/h/{share_slug}", public_base_url.trim_end_matches('/'))
}

fn require_sibling(hunt_post_its: &[PostIt], target: Uuid) -> Result<(), DomainError> {
    if hunt_post_its.iter().any(|p| p.id == target) {
        Ok(())
    } else {
        Err(DomainError::Validation(format!(
            "next post-it {target} is not part of this hunt"
        )))
    }
}

/// Checks a post-it against the other cards of its hunt.
///
/// `hunt_post_its` may or may not contain `post_it` itself; a link to
/// itself is always allowed.
///
/// # Errors
///
/// Returns `DomainError::Validation` for a successor outside the hunt or
/// inconsistent photo bounds.
pub fn validate_post_it(post_it: &PostIt, hunt_post_its: &[PostIt]) -> Result<(), DomainError> {
    if let Some(next) = post_it.next_post_it_id {
        if next != post_it.id {
            require_sibling(hunt_post_its, next)?;
        }
    }
    if post_it.photo_min.is_some_and(|min| min < 0) || post_it.photo_max.is_some_and(|max| max < 0)
    {
        return Err(DomainError::Validation(
            "photo bounds must not be negative".to_owned(),
        ));
    }
    if let (Some(min), Some(max)) = (post_it.photo_min, post_it.photo_max) {
        if min > max {
            return Err(DomainError::Validation(format!(
                "photo minimum {min} exceeds maximum {max}"
            )));
        }
    }
    Ok(())
}

/// Checks a new option against its post-it's existing options and hunt.
///
/// Self-references are legal: an option may keep the recipient on the
/// same card.
///
/// # Errors
///
/// Returns `DomainError::Validation` for a duplicate value or a target
/// outside the hunt.
pub fn validate_option(
    option: &PostItOption,
    existing: &[PostItOption],
    hunt_post_its: &[PostIt],
) -> Result<(), DomainError> {
    if existing.iter().any(|o| o.value == option.value) {
        return Err(DomainError::Validation(format!(
            "option value {:?} already used on this post-it",
            option.value
        )));
    }
    if option.next_post_it_id != option.post_it_id {
        require_sibling(hunt_post_its, option.next_post_it_id)?;
    }
    Ok(())
}

/// Applies a partial edit to a post-it.
pub fn apply_changes(post_it: &mut PostIt, changes: PostItChanges) {
    let PostItChanges {
        position,
        title,
        prompt,
        color,
        post_it_type,
        correct_answer,
        requires_photo,
        allows_skip,
        next_post_it_id,
        unlock_at,
        hints,
        photo_min,
        photo_max,
    } = changes;

    if let Some(position) = position {
        post_it.position = position;
    }
    if let Some(title) = title {
        post_it.title = title;
    }
    if let Some(prompt) = prompt {
        post_it.prompt = prompt;
    }
    if let Some(color) = color {
        post_it.color = color;
    }
    if let Some(post_it_type) = post_it_type {
        post_it.post_it_type = post_it_type;
    }
    if let Some(correct_answer) = correct_answer {
        post_it.correct_answer = correct_answer;
    }
    if let Some(requires_photo) = requires_photo {
        post_it.requires_photo = requires_photo;
    }
    if let Some(allows_skip) = allows_skip {
        post_it.allows_skip = allows_skip;
    }
    if let Some(next_post_it_id) = next_post_it_id {
        post_it.next_post_it_id = next_post_it_id;
    }
    if let Some(unlock_at) = unlock_at {
        post_it.unlock_at = unlock_at;
    }
    if let Some(hints) = hints {
        post_it.hints = hints;
    }
    if let Some(photo_min) = photo_min {
        post_it.photo_min = photo_min;
    }
    if let Some(photo_max) = photo_max {
        post_it.photo_max = photo_max;
    }
}
