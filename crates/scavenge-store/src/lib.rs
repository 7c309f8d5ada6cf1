//! Scavenge Store: `HuntStore` implementations.
//!
//! `memory` backs tests and database-less runs; `pg` is the production
//! backend. The SQL schema lives in the workspace `migrations/` directory.

pub mod memory;
pub mod pg;

pub use memory::InMemoryHuntStore;
pub use pg::{MIGRATOR, PgHuntStore};
