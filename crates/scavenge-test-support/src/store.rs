//! Test stores: `HuntStore` doubles for error paths.

use async_trait::async_trait;
use scavenge_core::entity::{Hunt, HuntProgress, PostIt, PostItOption, Submission};
use scavenge_core::error::DomainError;
use scavenge_core::repository::HuntStore;
use uuid::Uuid;

/// A store whose every call fails with an infrastructure error.
#[derive(Debug)]
pub struct FailingHuntStore;

fn refused<T>() -> Result<T, DomainError> {
    Err(DomainError::Infrastructure("connection refused".into()))
}

#[async_trait]
impl HuntStore for FailingHuntStore {
    async fn insert_hunt(&self, _hunt: &Hunt) -> Result<(), DomainError> {
        refused()
    }

    async fn get_hunt(&self, _hunt_id: Uuid) -> Result<Option<Hunt>, DomainError> {
        refused()
    }

    async fn find_hunt_by_code(&self, _code: &str) -> Result<Option<Hunt>, DomainError> {
        refused()
    }

    async fn find_hunt_by_slug(&self, _share_slug: &str) -> Result<Option<Hunt>, DomainError> {
        refused()
    }

    async fn update_hunt(&self, _hunt: &Hunt) -> Result<(), DomainError> {
        refused()
    }

    async fn delete_hunt(&self, _hunt_id: Uuid) -> Result<(), DomainError> {
        refused()
    }

    async fn insert_post_it(&self, _post_it: &PostIt) -> Result<(), DomainError> {
        refused()
    }

    async fn get_post_it(&self, _post_it_id: Uuid) -> Result<Option<PostIt>, DomainError> {
        refused()
    }

    async fn list_post_its(&self, _hunt_id: Uuid) -> Result<Vec<PostIt>, DomainError> {
        refused()
    }

    async fn count_post_its(&self, _hunt_id: Uuid) -> Result<usize, DomainError> {
        refused()
    }

    async fn update_post_it(&self, _post_it: &PostIt) -> Result<(), DomainError> {
        refused()
    }

    async fn delete_post_it(&self, _post_it_id: Uuid) -> Result<(), DomainError> {
        refused()
    }

    async fn insert_option(&self, _option: &PostItOption) -> Result<(), DomainError> {
        refused()
    }

    async fn get_option(&self, _option_id: Uuid) -> Result<Option<PostItOption>, DomainError> {
        refused()
    }

    async fn list_options(&self, _post_it_id: Uuid) -> Result<Vec<PostItOption>, DomainError> {
        refused()
    }

    async fn delete_option(&self, _option_id: Uuid) -> Result<(), DomainError> {
        refused()
    }

    async fn insert_submission(&self, _submission: &Submission) -> Result<(), DomainError> {
        refused()
    }

    async fn latest_submission(
        &self,
        _hunt_id: Uuid,
        _post_it_id: Uuid,
    ) -> Result<Option<Submission>, DomainError> {
        refused()
    }

    async fn has_correct_submission(
        &self,
        _hunt_id: Uuid,
        _post_it_id: Uuid,
    ) -> Result<bool, DomainError> {
        refused()
    }

    async fn list_submissions(&self, _hunt_id: Uuid) -> Result<Vec<Submission>, DomainError> {
        refused()
    }

    async fn update_submission(&self, _submission: &Submission) -> Result<(), DomainError> {
        refused()
    }

    async fn delete_submission(&self, _submission_id: Uuid) -> Result<(), DomainError> {
        refused()
    }

    async fn get_progress(&self, _hunt_id: Uuid) -> Result<Option<HuntProgress>, DomainError> {
        refused()
    }

    async fn upsert_progress(&self, _progress: &HuntProgress) -> Result<(), DomainError> {
        refused()
    }
}
