//! Memory book projection.

use scavenge_core::entity::{Hunt, PostIt, Submission};

/// One answered card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryPage {
    /// The card.
    pub post_it: PostIt,
    /// The first submission made against it.
    pub submission: Submission,
}

impl MemoryPage {
    /// Card heading: its title, or `Post-it #{position}` when untitled.
    #[must_use]
    pub fn heading(&self) -> String {
        self.post_it
            .title
            .clone()
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| format!("Post-it #{}", self.post_it.position))
    }
}

/// A hunt's answered cards, in play order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryBook {
    /// Name of the recipient.
    pub gifted_name: String,
    /// Welcome message of the hunt.
    pub welcome_message: String,
    /// Answered cards.
    pub pages: Vec<MemoryPage>,
}

impl MemoryBook {
    /// Joins cards with their submissions.
    ///
    /// `post_its` must be in play order and `submissions` in creation
    /// order. Cards nobody acted on are left out.
    #[must_use]
    pub fn project(hunt: &Hunt, post_its: Vec<PostIt>, submissions: &[Submission]) -> Self {
        let pages = post_its
            .into_iter()
            .filter_map(|post_it| {
                submissions
                    .iter()
                    .find(|s| s.post_it_id == post_it.id)
                    .map(|submission| MemoryPage {
                        post_it,
                        submission: submission.clone(),
                    })
            })
            .collect();

        Self {
            gifted_name: hunt.gifted_name.clone(),
            welcome_message: hunt.welcome_message.clone(),
            pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use scavenge_core::entity::{HuntStatus, PostItType};
    use uuid::Uuid;

    fn hunt() -> Hunt {
        Hunt {
            id: Uuid::new_v4(),
            code: "ABCDEF".to_owned(),
            share_slug: "abcdefabcdef".to_owned(),
            gifted_name: "Kim".to_owned(),
            welcome_message: "Enjoy".to_owned(),
            status: HuntStatus::Completed,
            created_at: Utc.with_ymd_and_hms(2026, 2, 14, 9, 0, 0).unwrap(),
            published_at: None,
        }
    }

    fn post_it(hunt_id: Uuid, position: i32, title: Option<&str>) -> PostIt {
        PostIt {
            id: Uuid::new_v4(),
            hunt_id,
            position,
            title: title.map(str::to_owned),
            prompt: "Where?".to_owned(),
            color: "red".to_owned(),
            post_it_type: PostItType::Riddle,
            correct_answer: None,
            requires_photo: false,
            allows_skip: false,
            next_post_it_id: None,
            unlock_at: None,
            hints: Vec::new(),
            photo_min: None,
            photo_max: None,
            created_at: Utc.with_ymd_and_hms(2026, 2, 14, 9, 0, 0).unwrap(),
        }
    }

    fn submission(post_it: &PostIt, answer: &str, minutes: i64) -> Submission {
        Submission {
            id: Uuid::new_v4(),
            hunt_id: post_it.hunt_id,
            post_it_id: post_it.id,
            text_answer: Some(answer.to_owned()),
            selected_option_value: None,
            is_correct: true,
            was_skipped: false,
            hint_attempts: 0,
            created_at: Utc.with_ymd_and_hms(2026, 2, 14, 10, 0, 0).unwrap()
                + Duration::minutes(minutes),
            photos: Vec::new(),
        }
    }

    #[test]
    fn test_project_keeps_answered_cards_with_first_submission() {
        // Arrange
        let hunt = hunt();
        let answered = post_it(hunt.id, 0, Some("Kitchen"));
        let untouched = post_it(hunt.id, 1, None);
        let submissions = vec![
            submission(&answered, "first", 0),
            submission(&answered, "second", 5),
        ];

        // Act
        let book = MemoryBook::project(&hunt, vec![answered.clone(), untouched], &submissions);

        // Assert
        assert_eq!(book.gifted_name, "Kim");
        assert_eq!(book.pages.len(), 1);
        assert_eq!(book.pages[0].post_it.id, answered.id);
        assert_eq!(book.pages[0].submission.text_answer.as_deref(), Some("first"));
    }

    #[test]
    fn test_heading_falls_back_to_position() {
        let hunt = hunt();
        let untitled = post_it(hunt.id, 3, None);
        let page = MemoryPage {
            submission: submission(&untitled, "x", 0),
            post_it: untitled,
        };

        assert_eq!(page.heading(), "Post-it #3");
    }
}
