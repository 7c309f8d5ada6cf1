//! Results of a submission that did not fail outright.

use chrono::{DateTime, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};
use uuid::Uuid;

/// Outcome of `submit_answer`.
///
/// Only `Accepted` moves the hunt forward. The other variants are expected
/// gameplay states returned as values; hard failures are `DomainError`s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A terminal submission was recorded and progress advanced.
    Accepted {
        /// Whether the attempt counts as correct (skips do).
        is_correct: bool,
        /// Whether the card was skipped.
        was_skipped: bool,
        /// The newly unlocked card; `None` when the hunt is finished.
        next_post_it_id: Option<Uuid>,
        /// The hunt is now completed.
        hunt_completed: bool,
    },
    /// The card is time-locked and no valid bypass code was given.
    TimeLocked {
        /// When the card opens.
        unlock_at: DateTime<Utc>,
    },
    /// Wrong or missing answer; more hints remain.
    WrongAnswer {
        /// Hints revealed so far.
        hints: Vec<String>,
        /// Wrong attempts so far.
        hint_attempts: u32,
    },
    /// Wrong or missing answer with every hint already revealed.
    TryAgain {
        /// All hints of the card.
        hints: Vec<String>,
        /// Wrong attempts so far.
        hint_attempts: u32,
    },
}

impl SubmitOutcome {
    /// Whether the submission was accepted.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    /// Wire tag for rejected outcomes.
    #[must_use]
    pub fn reason(&self) -> Option<&'static str> {
        match self {
            Self::Accepted { .. } => None,
            Self::TimeLocked { .. } => Some("TIME_LOCKED"),
            Self::WrongAnswer { .. } => Some("WRONG_ANSWER"),
            Self::TryAgain { .. } => Some("TRY_AGAIN"),
        }
    }
}

impl Serialize for SubmitOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("ok", &self.is_ok())?;
        if let Some(reason) = self.reason() {
            map.serialize_entry("reason", reason)?;
        }
        match self {
            Self::Accepted {
                is_correct,
                was_skipped,
                next_post_it_id,
                hunt_completed,
            } => {
                map.serialize_entry("isCorrect", is_correct)?;
                map.serialize_entry("wasSkipped", was_skipped)?;
                map.serialize_entry("nextPostItId", next_post_it_id)?;
                map.serialize_entry("huntCompleted", hunt_completed)?;
            }
            Self::TimeLocked { unlock_at } => {
                map.serialize_entry("unlockAt", unlock_at)?;
            }
            Self::WrongAnswer {
                hints,
                hint_attempts,
            } => {
                map.serialize_entry("hints", hints)?;
                map.serialize_entry("hintAttempts", hint_attempts)?;
                map.serialize_entry("allHintsShown", &false)?;
            }
            Self::TryAgain {
                hints,
                hint_attempts,
            } => {
                map.serialize_entry("hints", hints)?;
                map.serialize_entry("hintAttempts", hint_attempts)?;
                map.serialize_entry("allHintsShown", &true)?;
            }
        }
        map.end()
    }
}
