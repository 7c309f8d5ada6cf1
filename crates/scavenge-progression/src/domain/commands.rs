//! Commands for the Progression context.

use scavenge_core::command::Command;
use uuid::Uuid;

/// What the recipient sent for a post-it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionPayload {
    /// Typed answer.
    pub text_answer: Option<String>,
    /// Value of the chosen option on a `choice` card.
    pub selected_option_value: Option<String>,
    /// URLs of uploaded photos.
    pub photo_urls: Vec<String>,
    /// The recipient asked to skip the card.
    pub was_skipped: bool,
    /// Code that opens a time-locked card early.
    pub bypass_code: Option<String>,
}

/// Command to submit an attempt against a post-it.
#[derive(Debug, Clone)]
pub struct SubmitAnswer {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The hunt being played.
    pub hunt_id: Uuid,
    /// The card being answered.
    pub post_it_id: Uuid,
    /// The attempt itself.
    pub payload: SubmissionPayload,
}

impl Command for SubmitAnswer {
    fn command_type(&self) -> &'static str {
        "progression.submit_answer"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
