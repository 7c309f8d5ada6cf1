//! In-memory `HuntStore`.
//!
//! Mirrors the cascade rules of the SQL schema so handler tests observe the
//! same behavior as production.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use scavenge_core::entity::{
    Hunt, HuntProgress, PostIt, PostItOption, Submission, sort_by_position,
};
use scavenge_core::error::DomainError;
use scavenge_core::repository::HuntStore;
use uuid::Uuid;

#[derive(Debug, Default)]
struct State {
    hunts: HashMap<Uuid, Hunt>,
    post_its: Vec<PostIt>,
    options: Vec<PostItOption>,
    /// Insertion order doubles as creation order.
    submissions: Vec<Submission>,
    progress: HashMap<Uuid, HuntProgress>,
}

impl State {
    fn remove_post_it(&mut self, post_it_id: Uuid) {
        self.post_its.retain(|p| p.id != post_it_id);
        self.options
            .retain(|o| o.post_it_id != post_it_id && o.next_post_it_id != post_it_id);
        self.submissions.retain(|s| s.post_it_id != post_it_id);
        for post_it in &mut self.post_its {
            if post_it.next_post_it_id == Some(post_it_id) {
                post_it.next_post_it_id = None;
            }
        }
        for progress in self.progress.values_mut() {
            if progress.current_post_it_id == Some(post_it_id) {
                progress.current_post_it_id = None;
            }
        }
    }
}

/// A `HuntStore` held entirely in process memory.
#[derive(Debug, Default)]
pub struct InMemoryHuntStore {
    state: RwLock<State>,
}

impl InMemoryHuntStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, State>, DomainError> {
        self.state
            .read()
            .map_err(|e| DomainError::Infrastructure(format!("store lock poisoned: {e}")))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, State>, DomainError> {
        self.state
            .write()
            .map_err(|e| DomainError::Infrastructure(format!("store lock poisoned: {e}")))
    }
}

#[async_trait]
impl HuntStore for InMemoryHuntStore {
    async fn insert_hunt(&self, hunt: &Hunt) -> Result<(), DomainError> {
        let mut state = self.write()?;
        if state
            .hunts
            .values()
            .any(|h| h.code == hunt.code || h.share_slug == hunt.share_slug)
        {
            return Err(DomainError::Validation(format!(
                "hunt code {} or slug {} already taken",
                hunt.code, hunt.share_slug
            )));
        }
        state.hunts.insert(hunt.id, hunt.clone());
        Ok(())
    }

    async fn get_hunt(&self, hunt_id: Uuid) -> Result<Option<Hunt>, DomainError> {
        Ok(self.read()?.hunts.get(&hunt_id).cloned())
    }

    async fn find_hunt_by_code(&self, code: &str) -> Result<Option<Hunt>, DomainError> {
        Ok(self.read()?.hunts.values().find(|h| h.code == code).cloned())
    }

    async fn find_hunt_by_slug(&self, share_slug: &str) -> Result<Option<Hunt>, DomainError> {
        Ok(self
            .read()?
            .hunts
            .values()
            .find(|h| h.share_slug == share_slug)
            .cloned())
    }

    async fn update_hunt(&self, hunt: &Hunt) -> Result<(), DomainError> {
        let mut state = self.write()?;
        let existing = state
            .hunts
            .get_mut(&hunt.id)
            .ok_or(DomainError::HuntNotFound(hunt.id))?;
        *existing = hunt.clone();
        Ok(())
    }

    async fn delete_hunt(&self, hunt_id: Uuid) -> Result<(), DomainError> {
        let mut state = self.write()?;
        if state.hunts.remove(&hunt_id).is_none() {
            return Err(DomainError::HuntNotFound(hunt_id));
        }
        let owned: Vec<Uuid> = state
            .post_its
            .iter()
            .filter(|p| p.hunt_id == hunt_id)
            .map(|p| p.id)
            .collect();
        for post_it_id in owned {
            state.remove_post_it(post_it_id);
        }
        state.submissions.retain(|s| s.hunt_id != hunt_id);
        state.progress.remove(&hunt_id);
        Ok(())
    }

    async fn insert_post_it(&self, post_it: &PostIt) -> Result<(), DomainError> {
        let mut state = self.write()?;
        if !state.hunts.contains_key(&post_it.hunt_id) {
            return Err(DomainError::HuntNotFound(post_it.hunt_id));
        }
        state.post_its.push(post_it.clone());
        Ok(())
    }

    async fn get_post_it(&self, post_it_id: Uuid) -> Result<Option<PostIt>, DomainError> {
        Ok(self
            .read()?
            .post_its
            .iter()
            .find(|p| p.id == post_it_id)
            .cloned())
    }

    async fn list_post_its(&self, hunt_id: Uuid) -> Result<Vec<PostIt>, DomainError> {
        let mut post_its: Vec<PostIt> = self
            .read()?
            .post_its
            .iter()
            .filter(|p| p.hunt_id == hunt_id)
            .cloned()
            .collect();
        sort_by_position(&mut post_its);
        Ok(post_its)
    }

    async fn count_post_its(&self, hunt_id: Uuid) -> Result<usize, DomainError> {
        Ok(self
            .read()?
            .post_its
            .iter()
            .filter(|p| p.hunt_id == hunt_id)
            .count())
    }

    async fn update_post_it(&self, post_it: &PostIt) -> Result<(), DomainError> {
        let mut state = self.write()?;
        let existing = state
            .post_its
            .iter_mut()
            .find(|p| p.id == post_it.id)
            .ok_or(DomainError::PostItNotFound(post_it.id))?;
        *existing = post_it.clone();
        Ok(())
    }

    async fn delete_post_it(&self, post_it_id: Uuid) -> Result<(), DomainError> {
        let mut state = self.write()?;
        if !state.post_its.iter().any(|p| p.id == post_it_id) {
            return Err(DomainError::PostItNotFound(post_it_id));
        }
        state.remove_post_it(post_it_id);
        Ok(())
    }

    async fn insert_option(&self, option: &PostItOption) -> Result<(), DomainError> {
        let mut state = self.write()?;
        if !state.post_its.iter().any(|p| p.id == option.post_it_id) {
            return Err(DomainError::PostItNotFound(option.post_it_id));
        }
        state.options.push(option.clone());
        Ok(())
    }

    async fn get_option(&self, option_id: Uuid) -> Result<Option<PostItOption>, DomainError> {
        Ok(self
            .read()?
            .options
            .iter()
            .find(|o| o.id == option_id)
            .cloned())
    }

    async fn list_options(&self, post_it_id: Uuid) -> Result<Vec<PostItOption>, DomainError> {
        Ok(self
            .read()?
            .options
            .iter()
            .filter(|o| o.post_it_id == post_it_id)
            .cloned()
            .collect())
    }

    async fn delete_option(&self, option_id: Uuid) -> Result<(), DomainError> {
        let mut state = self.write()?;
        let before = state.options.len();
        state.options.retain(|o| o.id != option_id);
        if state.options.len() == before {
            return Err(DomainError::OptionNotFound(option_id));
        }
        Ok(())
    }

    async fn insert_submission(&self, submission: &Submission) -> Result<(), DomainError> {
        self.write()?.submissions.push(submission.clone());
        Ok(())
    }

    async fn latest_submission(
        &self,
        hunt_id: Uuid,
        post_it_id: Uuid,
    ) -> Result<Option<Submission>, DomainError> {
        Ok(self
            .read()?
            .submissions
            .iter()
            .rev()
            .find(|s| s.hunt_id == hunt_id && s.post_it_id == post_it_id)
            .cloned())
    }

    async fn has_correct_submission(
        &self,
        hunt_id: Uuid,
        post_it_id: Uuid,
    ) -> Result<bool, DomainError> {
        Ok(self
            .read()?
            .submissions
            .iter()
            .any(|s| s.hunt_id == hunt_id && s.post_it_id == post_it_id && s.is_correct))
    }

    async fn list_submissions(&self, hunt_id: Uuid) -> Result<Vec<Submission>, DomainError> {
        Ok(self
            .read()?
            .submissions
            .iter()
            .filter(|s| s.hunt_id == hunt_id)
            .cloned()
            .collect())
    }

    async fn update_submission(&self, submission: &Submission) -> Result<(), DomainError> {
        let mut state = self.write()?;
        let existing = state
            .submissions
            .iter_mut()
            .find(|s| s.id == submission.id)
            .ok_or_else(|| {
                DomainError::Infrastructure(format!("submission {} not found", submission.id))
            })?;
        existing.text_answer.clone_from(&submission.text_answer);
        existing
            .selected_option_value
            .clone_from(&submission.selected_option_value);
        existing.hint_attempts = submission.hint_attempts;
        Ok(())
    }

    async fn delete_submission(&self, submission_id: Uuid) -> Result<(), DomainError> {
        let mut state = self.write()?;
        let before = state.submissions.len();
        state.submissions.retain(|s| s.id != submission_id);
        if state.submissions.len() == before {
            return Err(DomainError::Infrastructure(format!(
                "submission {submission_id} not found"
            )));
        }
        Ok(())
    }

    async fn get_progress(&self, hunt_id: Uuid) -> Result<Option<HuntProgress>, DomainError> {
        Ok(self.read()?.progress.get(&hunt_id).cloned())
    }

    async fn upsert_progress(&self, progress: &HuntProgress) -> Result<(), DomainError> {
        self.write()?
            .progress
            .insert(progress.hunt_id, progress.clone());
        Ok(())
    }
}
