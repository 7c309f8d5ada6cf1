//! Query handlers for the Export context.

use scavenge_core::error::DomainError;
use scavenge_core::repository::HuntStore;
use uuid::Uuid;

use crate::domain::memory_book::MemoryBook;
use crate::domain::render::render_html;

/// Download file name of a hunt's memory book.
#[must_use]
pub fn memory_book_filename(hunt_id: Uuid) -> String {
    format!("memory-book-{hunt_id}.html")
}

/// Loads the memory book projection of a hunt.
///
/// # Errors
///
/// Returns `DomainError::HuntNotFound` if no hunt exists for the ID.
pub async fn get_memory_book(
    hunt_id: Uuid,
    store: &dyn HuntStore,
) -> Result<MemoryBook, DomainError> {
    let hunt = store
        .get_hunt(hunt_id)
        .await?
        .ok_or(DomainError::HuntNotFound(hunt_id))?;
    let post_its = store.list_post_its(hunt_id).await?;
    let submissions = store.list_submissions(hunt_id).await?;
    Ok(MemoryBook::project(&hunt, post_its, &submissions))
}

/// Renders the memory book of a hunt as HTML.
///
/// # Errors
///
/// Returns `DomainError::HuntNotFound` if no hunt exists for the ID.
pub async fn export_memory_book(
    hunt_id: Uuid,
    store: &dyn HuntStore,
) -> Result<String, DomainError> {
    let book = get_memory_book(hunt_id, store).await?;
    Ok(render_html(&book))
}
