//! Pure progression rules: per-card attempt state, answer evaluation,
//! hint reveal and successor resolution.

use scavenge_core::entity::{PostIt, PostItOption, PostItType, Submission};
use scavenge_core::error::DomainError;
use uuid::Uuid;

use super::commands::SubmissionPayload;

/// The live state of one (hunt, post-it) pair, read off its latest submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAttempt {
    /// Nothing submitted yet.
    NoAttempt,
    /// Wrong answers are being tracked on `submission_id`.
    InProgress {
        /// The retry-tracking submission, updated in place.
        submission_id: Uuid,
        /// Wrong attempts so far.
        hint_attempts: u32,
    },
    /// An accepted submission exists.
    Terminal,
}

impl CardAttempt {
    /// Derives the state from the most recent submission of a card.
    #[must_use]
    pub fn from_latest(latest: Option<&Submission>) -> Self {
        match latest {
            None => Self::NoAttempt,
            Some(submission) if submission.is_correct => Self::Terminal,
            Some(submission) => Self::InProgress {
                submission_id: submission.id,
                hint_attempts: submission.hint_attempts,
            },
        }
    }

    /// Wrong attempts recorded so far.
    #[must_use]
    pub fn hint_attempts(self) -> u32 {
        match self {
            Self::InProgress { hint_attempts, .. } => hint_attempts,
            Self::NoAttempt | Self::Terminal => 0,
        }
    }
}

/// Normal form used for answer comparison.
#[must_use]
pub fn normalize_answer(answer: &str) -> String {
    answer.trim().to_lowercase()
}

/// Result of checking an attempt against its card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evaluation<'a> {
    /// The attempt is accepted.
    Accept {
        /// The recipient skipped the card.
        was_skipped: bool,
        /// The chosen branch, when a known option value was sent.
        option: Option<&'a PostItOption>,
    },
    /// The text answer was missing or did not match.
    WrongAnswer,
}

/// Checks an attempt against a card and its options.
///
/// Skips bypass every other check. A text mismatch is not an error; it is
/// reported as `Evaluation::WrongAnswer` before photos or options are
/// looked at.
///
/// # Errors
///
/// Returns `SkipNotAllowed`, `PhotoRequired` or `InvalidOption` for the
/// corresponding hard rejections.
pub fn evaluate<'a>(
    post_it: &PostIt,
    options: &'a [PostItOption],
    payload: &SubmissionPayload,
) -> Result<Evaluation<'a>, DomainError> {
    let selected = payload
        .selected_option_value
        .as_deref()
        .and_then(|value| options.iter().find(|o| o.value == value));

    if payload.was_skipped {
        if !post_it.allows_skip {
            return Err(DomainError::SkipNotAllowed(post_it.id));
        }
        return Ok(Evaluation::Accept {
            was_skipped: true,
            option: selected,
        });
    }

    if let Some(expected) = expected_answer(post_it) {
        let matches = payload
            .text_answer
            .as_deref()
            .is_some_and(|given| normalize_answer(given) == normalize_answer(expected));
        if !matches {
            return Ok(Evaluation::WrongAnswer);
        }
    }

    if post_it.requires_photo && payload.photo_urls.is_empty() {
        return Err(DomainError::PhotoRequired(post_it.id));
    }

    if post_it.post_it_type == PostItType::Choice && selected.is_none() {
        return Err(DomainError::InvalidOption(post_it.id));
    }

    Ok(Evaluation::Accept {
        was_skipped: false,
        option: selected,
    })
}

/// The configured answer, if the card has a non-blank one.
fn expected_answer(post_it: &PostIt) -> Option<&str> {
    post_it
        .correct_answer
        .as_deref()
        .filter(|answer| !answer.trim().is_empty())
}

/// Hints visible after a number of wrong attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HintReveal<'a> {
    /// The first `min(attempts, total)` hints, in order.
    pub shown: &'a [String],
    /// Every hint has been revealed.
    pub all_shown: bool,
}

/// Reveals one more hint per wrong attempt, never more than exist.
#[must_use]
pub fn reveal_hints(hints: &[String], attempts: u32) -> HintReveal<'_> {
    let attempts = usize::try_from(attempts).unwrap_or(usize::MAX);
    HintReveal {
        shown: &hints[..attempts.min(hints.len())],
        all_shown: attempts >= hints.len(),
    }
}

/// How the next card is chosen after an accepted submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Successor {
    /// Follow the selected option of a `choice` card.
    Choice(Uuid),
    /// Follow the card's own explicit link.
    Explicit(Uuid),
    /// Take the card after this one in play order, if any.
    Positional,
}

impl Successor {
    /// Picks the rule that applies to `post_it` given the chosen option.
    #[must_use]
    pub fn for_card(post_it: &PostIt, option: Option<&PostItOption>) -> Self {
        match (post_it.post_it_type, option, post_it.next_post_it_id) {
            (PostItType::Choice, Some(option), _) => Self::Choice(option.next_post_it_id),
            (_, _, Some(next)) => Self::Explicit(next),
            _ => Self::Positional,
        }
    }

    /// Resolves to a concrete card. `hunt_post_its` must be in play order.
    ///
    /// Cards sharing a position are still visited one after another, in the
    /// order the store lists them.
    #[must_use]
    pub fn resolve(self, current: &PostIt, hunt_post_its: &[PostIt]) -> Option<Uuid> {
        match self {
            Self::Choice(next) | Self::Explicit(next) => Some(next),
            Self::Positional => match hunt_post_its.iter().position(|p| p.id == current.id) {
                Some(index) => hunt_post_its.get(index + 1).map(|p| p.id),
                None => hunt_post_its
                    .iter()
                    .find(|p| p.position > current.position)
                    .map(|p| p.id),
            },
        }
    }
}
