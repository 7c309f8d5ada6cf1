//! `PostgreSQL` implementation of the `HuntStore` trait.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use scavenge_core::entity::{
    Hunt, HuntProgress, PostIt, PostItOption, Submission, SubmissionPhoto,
};
use scavenge_core::error::DomainError;
use scavenge_core::repository::HuntStore;

/// Embedded schema migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

const POST_IT_COLUMNS: &str = "id, hunt_id, position, title, prompt, color, post_it_type, \
     correct_answer, requires_photo, allows_skip, next_post_it_id, unlock_at, hints, \
     photo_min, photo_max, created_at";

const SUBMISSION_COLUMNS: &str = "id, hunt_id, post_it_id, text_answer, \
     selected_option_value, is_correct, was_skipped, hint_attempts, created_at";

/// PostgreSQL-backed entity store.
#[derive(Debug, Clone)]
pub struct PgHuntStore {
    pool: PgPool,
}

impl PgHuntStore {
    /// Creates a new `PgHuntStore`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn attach_photos(
        &self,
        mut submissions: Vec<Submission>,
    ) -> Result<Vec<Submission>, DomainError> {
        if submissions.is_empty() {
            return Ok(submissions);
        }
        let ids: Vec<Uuid> = submissions.iter().map(|s| s.id).collect();
        let rows = sqlx::query(
            "SELECT id, submission_id, photo_url FROM submission_photos \
             WHERE submission_id = ANY($1) ORDER BY id",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(infra)?;

        let mut by_submission: HashMap<Uuid, Vec<SubmissionPhoto>> = HashMap::new();
        for row in &rows {
            let photo = photo_from_row(row)?;
            by_submission
                .entry(photo.submission_id)
                .or_default()
                .push(photo);
        }
        for submission in &mut submissions {
            submission.photos = by_submission.remove(&submission.id).unwrap_or_default();
        }
        Ok(submissions)
    }
}

fn infra(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return DomainError::Validation(db_err.message().to_owned());
        }
    }
    DomainError::Infrastructure(err.to_string())
}

fn hunt_from_row(row: &PgRow) -> Result<Hunt, DomainError> {
    let status: String = row.try_get("status").map_err(infra)?;
    Ok(Hunt {
        id: row.try_get("id").map_err(infra)?,
        code: row.try_get("code").map_err(infra)?,
        share_slug: row.try_get("share_slug").map_err(infra)?,
        gifted_name: row.try_get("gifted_name").map_err(infra)?,
        welcome_message: row.try_get("welcome_message").map_err(infra)?,
        status: status.parse()?,
        created_at: row.try_get("created_at").map_err(infra)?,
        published_at: row.try_get("published_at").map_err(infra)?,
    })
}

fn post_it_from_row(row: &PgRow) -> Result<PostIt, DomainError> {
    let post_it_type: String = row.try_get("post_it_type").map_err(infra)?;
    Ok(PostIt {
        id: row.try_get("id").map_err(infra)?,
        hunt_id: row.try_get("hunt_id").map_err(infra)?,
        position: row.try_get("position").map_err(infra)?,
        title: row.try_get("title").map_err(infra)?,
        prompt: row.try_get("prompt").map_err(infra)?,
        color: row.try_get("color").map_err(infra)?,
        post_it_type: post_it_type.parse()?,
        correct_answer: row.try_get("correct_answer").map_err(infra)?,
        requires_photo: row.try_get("requires_photo").map_err(infra)?,
        allows_skip: row.try_get("allows_skip").map_err(infra)?,
        next_post_it_id: row.try_get("next_post_it_id").map_err(infra)?,
        unlock_at: row.try_get("unlock_at").map_err(infra)?,
        hints: row.try_get("hints").map_err(infra)?,
        photo_min: row.try_get("photo_min").map_err(infra)?,
        photo_max: row.try_get("photo_max").map_err(infra)?,
        created_at: row.try_get("created_at").map_err(infra)?,
    })
}

fn option_from_row(row: &PgRow) -> Result<PostItOption, DomainError> {
    Ok(PostItOption {
        id: row.try_get("id").map_err(infra)?,
        post_it_id: row.try_get("post_it_id").map_err(infra)?,
        label: row.try_get("label").map_err(infra)?,
        value: row.try_get("value").map_err(infra)?,
        next_post_it_id: row.try_get("next_post_it_id").map_err(infra)?,
    })
}

fn submission_from_row(row: &PgRow) -> Result<Submission, DomainError> {
    let hint_attempts: i32 = row.try_get("hint_attempts").map_err(infra)?;
    Ok(Submission {
        id: row.try_get("id").map_err(infra)?,
        hunt_id: row.try_get("hunt_id").map_err(infra)?,
        post_it_id: row.try_get("post_it_id").map_err(infra)?,
        text_answer: row.try_get("text_answer").map_err(infra)?,
        selected_option_value: row.try_get("selected_option_value").map_err(infra)?,
        is_correct: row.try_get("is_correct").map_err(infra)?,
        was_skipped: row.try_get("was_skipped").map_err(infra)?,
        hint_attempts: u32::try_from(hint_attempts).map_err(|e| {
            DomainError::Infrastructure(format!("negative hint_attempts: {e}"))
        })?,
        created_at: row.try_get("created_at").map_err(infra)?,
        photos: Vec::new(),
    })
}

fn photo_from_row(row: &PgRow) -> Result<SubmissionPhoto, DomainError> {
    Ok(SubmissionPhoto {
        id: row.try_get("id").map_err(infra)?,
        submission_id: row.try_get("submission_id").map_err(infra)?,
        photo_url: row.try_get("photo_url").map_err(infra)?,
    })
}

fn progress_from_row(row: &PgRow) -> Result<HuntProgress, DomainError> {
    Ok(HuntProgress {
        hunt_id: row.try_get("hunt_id").map_err(infra)?,
        current_post_it_id: row.try_get("current_post_it_id").map_err(infra)?,
        completed_at: row.try_get("completed_at").map_err(infra)?,
        updated_at: row.try_get("updated_at").map_err(infra)?,
    })
}

fn hint_attempts_param(submission: &Submission) -> Result<i32, DomainError> {
    i32::try_from(submission.hint_attempts)
        .map_err(|e| DomainError::Validation(format!("hint_attempts out of range: {e}")))
}

#[async_trait]
impl HuntStore for PgHuntStore {
    async fn insert_hunt(&self, hunt: &Hunt) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO hunts (id, code, share_slug, gifted_name, welcome_message, status, \
             created_at, published_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(hunt.id)
        .bind(&hunt.code)
        .bind(&hunt.share_slug)
        .bind(&hunt.gifted_name)
        .bind(&hunt.welcome_message)
        .bind(hunt.status.as_str())
        .bind(hunt.created_at)
        .bind(hunt.published_at)
        .execute(&self.pool)
        .await
        .map_err(infra)?;
        Ok(())
    }

    async fn get_hunt(&self, hunt_id: Uuid) -> Result<Option<Hunt>, DomainError> {
        let row = sqlx::query("SELECT * FROM hunts WHERE id = $1")
            .bind(hunt_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(infra)?;
        row.as_ref().map(hunt_from_row).transpose()
    }

    async fn find_hunt_by_code(&self, code: &str) -> Result<Option<Hunt>, DomainError> {
        let row = sqlx::query("SELECT * FROM hunts WHERE code = $1")
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .map_err(infra)?;
        row.as_ref().map(hunt_from_row).transpose()
    }

    async fn find_hunt_by_slug(&self, share_slug: &str) -> Result<Option<Hunt>, DomainError> {
        let row = sqlx::query("SELECT * FROM hunts WHERE share_slug = $1")
            .bind(share_slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(infra)?;
        row.as_ref().map(hunt_from_row).transpose()
    }

    async fn update_hunt(&self, hunt: &Hunt) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE hunts SET gifted_name = $2, welcome_message = $3, status = $4, \
             published_at = $5 WHERE id = $1",
        )
        .bind(hunt.id)
        .bind(&hunt.gifted_name)
        .bind(&hunt.welcome_message)
        .bind(hunt.status.as_str())
        .bind(hunt.published_at)
        .execute(&self.pool)
        .await
        .map_err(infra)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::HuntNotFound(hunt.id));
        }
        Ok(())
    }

    async fn delete_hunt(&self, hunt_id: Uuid) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM hunts WHERE id = $1")
            .bind(hunt_id)
            .execute(&self.pool)
            .await
            .map_err(infra)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::HuntNotFound(hunt_id));
        }
        Ok(())
    }

    async fn insert_post_it(&self, post_it: &PostIt) -> Result<(), DomainError> {
        let hunt_exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM hunts WHERE id = $1)")
                .bind(post_it.hunt_id)
                .fetch_one(&self.pool)
                .await
                .map_err(infra)?;
        if !hunt_exists {
            return Err(DomainError::HuntNotFound(post_it.hunt_id));
        }
        sqlx::query(&format!(
            "INSERT INTO post_its ({POST_IT_COLUMNS}) VALUES \
             ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)"
        ))
        .bind(post_it.id)
        .bind(post_it.hunt_id)
        .bind(post_it.position)
        .bind(&post_it.title)
        .bind(&post_it.prompt)
        .bind(&post_it.color)
        .bind(post_it.post_it_type.as_str())
        .bind(&post_it.correct_answer)
        .bind(post_it.requires_photo)
        .bind(post_it.allows_skip)
        .bind(post_it.next_post_it_id)
        .bind(post_it.unlock_at)
        .bind(&post_it.hints)
        .bind(post_it.photo_min)
        .bind(post_it.photo_max)
        .bind(post_it.created_at)
        .execute(&self.pool)
        .await
        .map_err(infra)?;
        Ok(())
    }

    async fn get_post_it(&self, post_it_id: Uuid) -> Result<Option<PostIt>, DomainError> {
        let row = sqlx::query(&format!("SELECT {POST_IT_COLUMNS} FROM post_its WHERE id = $1"))
            .bind(post_it_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(infra)?;
        row.as_ref().map(post_it_from_row).transpose()
    }

    async fn list_post_its(&self, hunt_id: Uuid) -> Result<Vec<PostIt>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {POST_IT_COLUMNS} FROM post_its WHERE hunt_id = $1 \
             ORDER BY position, created_at, id"
        ))
        .bind(hunt_id)
        .fetch_all(&self.pool)
        .await
        .map_err(infra)?;
        rows.iter().map(post_it_from_row).collect()
    }

    async fn count_post_its(&self, hunt_id: Uuid) -> Result<usize, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM post_its WHERE hunt_id = $1")
            .bind(hunt_id)
            .fetch_one(&self.pool)
            .await
            .map_err(infra)?;
        usize::try_from(count)
            .map_err(|e| DomainError::Infrastructure(format!("invalid post-it count: {e}")))
    }

    async fn update_post_it(&self, post_it: &PostIt) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE post_its SET position = $2, title = $3, prompt = $4, color = $5, \
             post_it_type = $6, correct_answer = $7, requires_photo = $8, allows_skip = $9, \
             next_post_it_id = $10, unlock_at = $11, hints = $12, photo_min = $13, \
             photo_max = $14 WHERE id = $1",
        )
        .bind(post_it.id)
        .bind(post_it.position)
        .bind(&post_it.title)
        .bind(&post_it.prompt)
        .bind(&post_it.color)
        .bind(post_it.post_it_type.as_str())
        .bind(&post_it.correct_answer)
        .bind(post_it.requires_photo)
        .bind(post_it.allows_skip)
        .bind(post_it.next_post_it_id)
        .bind(post_it.unlock_at)
        .bind(&post_it.hints)
        .bind(post_it.photo_min)
        .bind(post_it.photo_max)
        .execute(&self.pool)
        .await
        .map_err(infra)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::PostItNotFound(post_it.id));
        }
        Ok(())
    }

    async fn delete_post_it(&self, post_it_id: Uuid) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM post_its WHERE id = $1")
            .bind(post_it_id)
            .execute(&self.pool)
            .await
            .map_err(infra)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::PostItNotFound(post_it_id));
        }
        Ok(())
    }

    async fn insert_option(&self, option: &PostItOption) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO post_it_options (id, post_it_id, label, value, next_post_it_id) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(option.id)
        .bind(option.post_it_id)
        .bind(&option.label)
        .bind(&option.value)
        .bind(option.next_post_it_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let missing_parent = matches!(
                &e,
                sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation()
            );
            if missing_parent {
                DomainError::PostItNotFound(option.post_it_id)
            } else {
                infra(e)
            }
        })?;
        Ok(())
    }

    async fn get_option(&self, option_id: Uuid) -> Result<Option<PostItOption>, DomainError> {
        let row = sqlx::query(
            "SELECT id, post_it_id, label, value, next_post_it_id FROM post_it_options \
             WHERE id = $1",
        )
        .bind(option_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(infra)?;
        row.as_ref().map(option_from_row).transpose()
    }

    async fn list_options(&self, post_it_id: Uuid) -> Result<Vec<PostItOption>, DomainError> {
        let rows = sqlx::query(
            "SELECT id, post_it_id, label, value, next_post_it_id FROM post_it_options \
             WHERE post_it_id = $1 ORDER BY created_at, id",
        )
        .bind(post_it_id)
        .fetch_all(&self.pool)
        .await
        .map_err(infra)?;
        rows.iter().map(option_from_row).collect()
    }

    async fn delete_option(&self, option_id: Uuid) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM post_it_options WHERE id = $1")
            .bind(option_id)
            .execute(&self.pool)
            .await
            .map_err(infra)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::OptionNotFound(option_id));
        }
        Ok(())
    }

    async fn insert_submission(&self, submission: &Submission) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(infra)?;
        sqlx::query(&format!(
            "INSERT INTO submissions ({SUBMISSION_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)"
        ))
        .bind(submission.id)
        .bind(submission.hunt_id)
        .bind(submission.post_it_id)
        .bind(&submission.text_answer)
        .bind(&submission.selected_option_value)
        .bind(submission.is_correct)
        .bind(submission.was_skipped)
        .bind(hint_attempts_param(submission)?)
        .bind(submission.created_at)
        .execute(&mut *tx)
        .await
        .map_err(infra)?;
        for photo in &submission.photos {
            sqlx::query(
                "INSERT INTO submission_photos (id, submission_id, photo_url) VALUES ($1, $2, $3)",
            )
            .bind(photo.id)
            .bind(submission.id)
            .bind(&photo.photo_url)
            .execute(&mut *tx)
            .await
            .map_err(infra)?;
        }
        tx.commit().await.map_err(infra)?;
        Ok(())
    }

    async fn latest_submission(
        &self,
        hunt_id: Uuid,
        post_it_id: Uuid,
    ) -> Result<Option<Submission>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {SUBMISSION_COLUMNS} FROM submissions \
             WHERE hunt_id = $1 AND post_it_id = $2 \
             ORDER BY created_at DESC, id DESC LIMIT 1"
        ))
        .bind(hunt_id)
        .bind(post_it_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(infra)?;
        let Some(row) = row else {
            return Ok(None);
        };
        let submission = submission_from_row(&row)?;
        Ok(self.attach_photos(vec![submission]).await?.pop())
    }

    async fn has_correct_submission(
        &self,
        hunt_id: Uuid,
        post_it_id: Uuid,
    ) -> Result<bool, DomainError> {
        sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM submissions \
             WHERE hunt_id = $1 AND post_it_id = $2 AND is_correct)",
        )
        .bind(hunt_id)
        .bind(post_it_id)
        .fetch_one(&self.pool)
        .await
        .map_err(infra)
    }

    async fn list_submissions(&self, hunt_id: Uuid) -> Result<Vec<Submission>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {SUBMISSION_COLUMNS} FROM submissions WHERE hunt_id = $1 \
             ORDER BY created_at, id"
        ))
        .bind(hunt_id)
        .fetch_all(&self.pool)
        .await
        .map_err(infra)?;
        let submissions = rows
            .iter()
            .map(submission_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        self.attach_photos(submissions).await
    }

    async fn update_submission(&self, submission: &Submission) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE submissions SET text_answer = $2, selected_option_value = $3, \
             hint_attempts = $4 WHERE id = $1",
        )
        .bind(submission.id)
        .bind(&submission.text_answer)
        .bind(&submission.selected_option_value)
        .bind(hint_attempts_param(submission)?)
        .execute(&self.pool)
        .await
        .map_err(infra)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::Infrastructure(format!(
                "submission {} not found",
                submission.id
            )));
        }
        Ok(())
    }

    async fn delete_submission(&self, submission_id: Uuid) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM submissions WHERE id = $1")
            .bind(submission_id)
            .execute(&self.pool)
            .await
            .map_err(infra)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::Infrastructure(format!(
                "submission {submission_id} not found"
            )));
        }
        Ok(())
    }

    async fn get_progress(&self, hunt_id: Uuid) -> Result<Option<HuntProgress>, DomainError> {
        let row = sqlx::query(
            "SELECT hunt_id, current_post_it_id, completed_at, updated_at FROM hunt_progress \
             WHERE hunt_id = $1",
        )
        .bind(hunt_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(infra)?;
        row.as_ref().map(progress_from_row).transpose()
    }

    async fn upsert_progress(&self, progress: &HuntProgress) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO hunt_progress (hunt_id, current_post_it_id, completed_at, updated_at) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (hunt_id) DO UPDATE SET current_post_it_id = EXCLUDED.current_post_it_id, \
             completed_at = EXCLUDED.completed_at, updated_at = EXCLUDED.updated_at",
        )
        .bind(progress.hunt_id)
        .bind(progress.current_post_it_id)
        .bind(progress.completed_at)
        .bind(progress.updated_at)
        .execute(&self.pool)
        .await
        .map_err(infra)?;
        Ok(())
    }
}
