//! Command handlers for the Progression context.
//!
//! `handle_submit_answer` is the hunt progression state machine: it checks
//! the preconditions in a fixed order, evaluates the attempt, and either
//! records a retry with hints or writes a terminal submission and moves the
//! progress pointer.

use chrono::{DateTime, Utc};
use scavenge_core::clock::Clock;
use scavenge_core::entity::{
    Hunt, HuntProgress, HuntStatus, PostIt, PostItOption, Submission, SubmissionPhoto,
};
use scavenge_core::error::DomainError;
use scavenge_core::lock::HuntLocks;
use scavenge_core::repository::HuntStore;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::commands::{SubmissionPayload, SubmitAnswer};
use crate::domain::outcome::SubmitOutcome;
use crate::domain::rules::{CardAttempt, Evaluation, Successor, evaluate, reveal_hints};

/// Handles the `SubmitAnswer` command.
///
/// Holds the hunt's lock from the first read to the last write so that two
/// submissions for the same hunt cannot both pass the unlock check.
///
/// # Errors
///
/// Returns, in precedence order, `HuntNotFound`, `HuntNotPublished` /
/// `HuntAlreadyCompleted`, `PostItNotFound` / `PostItMismatch`, `Locked`,
/// then `SkipNotAllowed`, `PhotoRequired` or `InvalidOption`. Store errors
/// are propagated, except a failed cleanup of the retry submission which
/// is only logged.
pub async fn handle_submit_answer(
    command: &SubmitAnswer,
    clock: &dyn Clock,
    locks: &HuntLocks,
    store: &dyn HuntStore,
    bypass_code: &str,
) -> Result<SubmitOutcome, DomainError> {
    let _guard = locks.acquire(command.hunt_id).await?;
    let now = clock.now();
    let payload = &command.payload;

    let hunt = store
        .get_hunt(command.hunt_id)
        .await?
        .ok_or(DomainError::HuntNotFound(command.hunt_id))?;
    match hunt.status {
        HuntStatus::Draft => return Err(DomainError::HuntNotPublished(hunt.id)),
        HuntStatus::Completed => return Err(DomainError::HuntAlreadyCompleted(hunt.id)),
        HuntStatus::Published => {}
    }

    let post_it = store
        .get_post_it(command.post_it_id)
        .await?
        .ok_or(DomainError::PostItNotFound(command.post_it_id))?;
    if post_it.hunt_id != hunt.id {
        return Err(DomainError::PostItMismatch {
            post_it_id: post_it.id,
            hunt_id: hunt.id,
        });
    }

    if let Some(unlock_at) = post_it.unlock_at.filter(|_| post_it.is_time_locked(now)) {
        if payload.bypass_code.as_deref() != Some(bypass_code) {
            debug!(post_it_id = %post_it.id, %unlock_at, "post-it is time-locked");
            return Ok(SubmitOutcome::TimeLocked { unlock_at });
        }
    }

    let progress = store.get_progress(hunt.id).await?;
    let is_current = progress
        .as_ref()
        .and_then(|p| p.current_post_it_id)
        .is_some_and(|current| current == post_it.id);
    if !is_current && !store.has_correct_submission(hunt.id, post_it.id).await? {
        return Err(DomainError::Locked(post_it.id));
    }

    let latest = store.latest_submission(hunt.id, post_it.id).await?;
    let attempt = CardAttempt::from_latest(latest.as_ref());
    let options = store.list_options(post_it.id).await?;

    match evaluate(&post_it, &options, payload)? {
        Evaluation::WrongAnswer => {
            record_wrong_answer(store, &post_it, latest, attempt, payload, now).await
        }
        Evaluation::Accept {
            was_skipped,
            option,
        } => {
            accept(
                command,
                store,
                hunt,
                &post_it,
                attempt,
                was_skipped,
                option,
                now,
            )
            .await
        }
    }
}

/// Bumps the retry counter in place, or opens a retry submission.
async fn record_wrong_answer(
    store: &dyn HuntStore,
    post_it: &PostIt,
    latest: Option<Submission>,
    attempt: CardAttempt,
    payload: &SubmissionPayload,
    now: DateTime<Utc>,
) -> Result<SubmitOutcome, DomainError> {
    let hint_attempts = attempt.hint_attempts().saturating_add(1);

    match (attempt, latest) {
        (CardAttempt::InProgress { .. }, Some(mut running)) => {
            running.text_answer.clone_from(&payload.text_answer);
            running.hint_attempts = hint_attempts;
            store.update_submission(&running).await?;
        }
        _ => {
            store
                .insert_submission(&Submission {
                    id: Uuid::new_v4(),
                    hunt_id: post_it.hunt_id,
                    post_it_id: post_it.id,
                    text_answer: payload.text_answer.clone(),
                    selected_option_value: None,
                    is_correct: false,
                    was_skipped: false,
                    hint_attempts,
                    created_at: now,
                    photos: Vec::new(),
                })
                .await?;
        }
    }

    let reveal = reveal_hints(&post_it.hints, hint_attempts);
    debug!(
        post_it_id = %post_it.id,
        hint_attempts,
        hints_shown = reveal.shown.len(),
        "wrong answer"
    );
    let hints = reveal.shown.to_vec();
    Ok(if reveal.all_shown {
        SubmitOutcome::TryAgain {
            hints,
            hint_attempts,
        }
    } else {
        SubmitOutcome::WrongAnswer {
            hints,
            hint_attempts,
        }
    })
}

/// Writes the terminal submission and advances progress.
#[allow(clippy::too_many_arguments)]
async fn accept(
    command: &SubmitAnswer,
    store: &dyn HuntStore,
    mut hunt: Hunt,
    post_it: &PostIt,
    attempt: CardAttempt,
    was_skipped: bool,
    option: Option<&PostItOption>,
    now: DateTime<Utc>,
) -> Result<SubmitOutcome, DomainError> {
    let payload = &command.payload;

    if let CardAttempt::InProgress { submission_id, .. } = attempt {
        if let Err(e) = store.delete_submission(submission_id).await {
            warn!(%submission_id, error = %e, "failed to remove retry submission");
        }
    }

    let submission_id = Uuid::new_v4();
    let submission = Submission {
        id: submission_id,
        hunt_id: hunt.id,
        post_it_id: post_it.id,
        text_answer: payload.text_answer.clone(),
        selected_option_value: payload.selected_option_value.clone(),
        is_correct: true,
        was_skipped,
        hint_attempts: 0,
        created_at: now,
        photos: payload
            .photo_urls
            .iter()
            .map(|url| SubmissionPhoto {
                id: Uuid::new_v4(),
                submission_id,
                photo_url: url.clone(),
            })
            .collect(),
    };
    store.insert_submission(&submission).await?;

    let hunt_post_its = store.list_post_its(hunt.id).await?;
    let next_post_it_id = Successor::for_card(post_it, option).resolve(post_it, &hunt_post_its);
    let hunt_completed = next_post_it_id.is_none();

    if hunt_completed {
        hunt.advance_to(HuntStatus::Completed, now)?;
        store.update_hunt(&hunt).await?;
        store
            .upsert_progress(&HuntProgress {
                hunt_id: hunt.id,
                current_post_it_id: None,
                completed_at: Some(now),
                updated_at: now,
            })
            .await?;
        info!(
            correlation_id = %command.correlation_id,
            hunt_id = %hunt.id,
            "hunt completed"
        );
    } else {
        store
            .upsert_progress(&HuntProgress {
                hunt_id: hunt.id,
                current_post_it_id: next_post_it_id,
                completed_at: None,
                updated_at: now,
            })
            .await?;
    }

    info!(
        correlation_id = %command.correlation_id,
        hunt_id = %hunt.id,
        post_it_id = %post_it.id,
        was_skipped,
        next_post_it_id = ?next_post_it_id,
        "submission accepted"
    );

    Ok(SubmitOutcome::Accepted {
        is_correct: true,
        was_skipped,
        next_post_it_id,
        hunt_completed,
    })
}
