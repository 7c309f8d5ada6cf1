//! Domain error types.

use thiserror::Error;
use uuid::Uuid;

use crate::entity::HuntStatus;

/// Top-level domain error type.
///
/// These are the hard failures: the call is aborted and nothing is written.
/// Expected gameplay outcomes (wrong answer, time lock) are not errors and
/// never appear here.
#[derive(Debug, Error)]
pub enum DomainError {
    /// No hunt exists with the given ID.
    #[error("hunt not found: {0}")]
    HuntNotFound(Uuid),

    /// No hunt exists with the given code or share slug.
    #[error("hunt not found for key: {0}")]
    HuntNotFoundByKey(String),

    /// No post-it exists with the given ID.
    #[error("post-it not found: {0}")]
    PostItNotFound(Uuid),

    /// No post-it option exists with the given ID.
    #[error("post-it option not found: {0}")]
    OptionNotFound(Uuid),

    /// The hunt is still a draft.
    #[error("hunt {0} is not published")]
    HuntNotPublished(Uuid),

    /// The hunt has already been completed.
    #[error("hunt {0} is already completed")]
    HuntAlreadyCompleted(Uuid),

    /// The post-it belongs to another hunt.
    #[error("post-it {post_it_id} does not belong to hunt {hunt_id}")]
    PostItMismatch {
        /// The post-it that was addressed.
        post_it_id: Uuid,
        /// The hunt it was addressed through.
        hunt_id: Uuid,
    },

    /// A hunt without post-its cannot be published.
    #[error("cannot publish hunt {0} with no post-its")]
    EmptyHunt(Uuid),

    /// The post-it is neither current nor already answered.
    #[error("post-it {0} is locked")]
    Locked(Uuid),

    /// A skip was requested on a post-it that does not allow it.
    #[error("post-it {0} cannot be skipped")]
    SkipNotAllowed(Uuid),

    /// The post-it requires at least one photo.
    #[error("post-it {0} requires a photo")]
    PhotoRequired(Uuid),

    /// The selected option is missing or unknown.
    #[error("invalid option for post-it {0}")]
    InvalidOption(Uuid),

    /// A hunt status change that would not move forward.
    #[error("hunt {hunt_id} cannot move from {from} to {to}")]
    InvalidTransition {
        /// The hunt being transitioned.
        hunt_id: Uuid,
        /// The current status.
        from: HuntStatus,
        /// The requested status.
        to: HuntStatus,
    },

    /// Unique key generation kept colliding.
    #[error("could not generate a unique {0}")]
    GenerationExhausted(&'static str),

    /// A validation error in domain logic.
    #[error("validation error: {0}")]
    Validation(String),

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

impl DomainError {
    /// Wire-level rejection tag for gameplay failures, if this error has one.
    ///
    /// These literals are part of the client contract.
    #[must_use]
    pub fn reason(&self) -> Option<&'static str> {
        match self {
            Self::Locked(_) => Some("LOCKED"),
            Self::PhotoRequired(_) => Some("PHOTO_REQUIRED"),
            Self::SkipNotAllowed(_) => Some("SKIP_NOT_ALLOWED"),
            Self::InvalidOption(_) => Some("INVALID_OPTION"),
            _ => None,
        }
    }

    /// Returns `true` for the "no such entity" family of errors.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::HuntNotFound(_)
                | Self::HuntNotFoundByKey(_)
                | Self::PostItNotFound(_)
                | Self::OptionNotFound(_)
        )
    }
}
