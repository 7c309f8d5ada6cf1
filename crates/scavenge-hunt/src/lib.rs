//! Scavenge: Hunt Lifecycle & Authoring bounded context.
//!
//! Responsible for creating hunts with unique codes and share slugs,
//! moving them from draft to published, and authoring their post-its
//! and choice options.

pub mod application;
pub mod domain;
