//! Commands for the Hunt Lifecycle & Authoring context.

use chrono::{DateTime, Utc};
use scavenge_core::command::Command;
use scavenge_core::entity::PostItType;
use uuid::Uuid;

/// Command to create a new draft hunt.
#[derive(Debug, Clone)]
pub struct CreateHunt {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Name of the recipient.
    pub gifted_name: String,
    /// Message shown when the hunt is opened.
    pub welcome_message: String,
}

impl Command for CreateHunt {
    fn command_type(&self) -> &'static str {
        "hunt.create"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to publish a draft hunt.
#[derive(Debug, Clone)]
pub struct PublishHunt {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The hunt to publish.
    pub hunt_id: Uuid,
}

impl Command for PublishHunt {
    fn command_type(&self) -> &'static str {
        "hunt.publish"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to edit a hunt's texts. `None` leaves a field unchanged.
#[derive(Debug, Clone)]
pub struct UpdateHunt {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The hunt to edit.
    pub hunt_id: Uuid,
    /// New recipient name.
    pub gifted_name: Option<String>,
    /// New welcome message.
    pub welcome_message: Option<String>,
}

impl Command for UpdateHunt {
    fn command_type(&self) -> &'static str {
        "hunt.update"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to delete a hunt and everything it owns.
#[derive(Debug, Clone)]
pub struct DeleteHunt {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The hunt to delete.
    pub hunt_id: Uuid,
}

impl Command for DeleteHunt {
    fn command_type(&self) -> &'static str {
        "hunt.delete"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Content of a new post-it.
#[derive(Debug, Clone)]
pub struct PostItDraft {
    /// Ordering key within the hunt.
    pub position: i32,
    /// Optional heading.
    pub title: Option<String>,
    /// Challenge text.
    pub prompt: String,
    /// Display color name.
    pub color: String,
    /// Kind of challenge.
    pub post_it_type: PostItType,
    /// Expected text answer.
    pub correct_answer: Option<String>,
    /// A photo is required.
    pub requires_photo: bool,
    /// The card may be skipped.
    pub allows_skip: bool,
    /// Explicit successor.
    pub next_post_it_id: Option<Uuid>,
    /// Time lock.
    pub unlock_at: Option<DateTime<Utc>>,
    /// Progressive hints.
    pub hints: Vec<String>,
    /// Suggested minimum number of photos.
    pub photo_min: Option<i32>,
    /// Suggested maximum number of photos.
    pub photo_max: Option<i32>,
}

/// Command to add a post-it to a hunt.
#[derive(Debug, Clone)]
pub struct CreatePostIt {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The owning hunt.
    pub hunt_id: Uuid,
    /// The post-it content.
    pub draft: PostItDraft,
}

impl Command for CreatePostIt {
    fn command_type(&self) -> &'static str {
        "hunt.create_post_it"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Partial edit of a post-it.
///
/// Outer `None` leaves a field unchanged; for nullable fields
/// `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
#[allow(clippy::option_option)]
pub struct PostItChanges {
    /// New ordering key.
    pub position: Option<i32>,
    /// New or cleared heading.
    pub title: Option<Option<String>>,
    /// New challenge text.
    pub prompt: Option<String>,
    /// New color.
    pub color: Option<String>,
    /// New kind.
    pub post_it_type: Option<PostItType>,
    /// New or cleared answer.
    pub correct_answer: Option<Option<String>>,
    /// New photo requirement.
    pub requires_photo: Option<bool>,
    /// New skip permission.
    pub allows_skip: Option<bool>,
    /// New or cleared successor.
    pub next_post_it_id: Option<Option<Uuid>>,
    /// New or cleared time lock.
    pub unlock_at: Option<Option<DateTime<Utc>>>,
    /// Replacement hint list.
    pub hints: Option<Vec<String>>,
    /// New or cleared photo minimum.
    pub photo_min: Option<Option<i32>>,
    /// New or cleared photo maximum.
    pub photo_max: Option<Option<i32>>,
}

/// Command to edit a post-it.
#[derive(Debug, Clone)]
pub struct UpdatePostIt {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The post-it to edit.
    pub post_it_id: Uuid,
    /// The fields to change.
    pub changes: PostItChanges,
}

impl Command for UpdatePostIt {
    fn command_type(&self) -> &'static str {
        "hunt.update_post_it"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to remove a post-it.
#[derive(Debug, Clone)]
pub struct DeletePostIt {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The post-it to remove.
    pub post_it_id: Uuid,
}

impl Command for DeletePostIt {
    fn command_type(&self) -> &'static str {
        "hunt.delete_post_it"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to add a branch to a choice post-it.
#[derive(Debug, Clone)]
pub struct CreatePostItOption {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The owning post-it.
    pub post_it_id: Uuid,
    /// Text shown to the recipient.
    pub label: String,
    /// Submitted value, unique within the post-it.
    pub value: String,
    /// Card this branch unlocks.
    pub next_post_it_id: Uuid,
}

impl Command for CreatePostItOption {
    fn command_type(&self) -> &'static str {
        "hunt.create_post_it_option"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to remove a branch.
#[derive(Debug, Clone)]
pub struct DeletePostItOption {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The option to remove.
    pub option_id: Uuid,
}

impl Command for DeletePostItOption {
    fn command_type(&self) -> &'static str {
        "hunt.delete_post_it_option"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
