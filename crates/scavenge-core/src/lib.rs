//! Scavenge Core: shared domain model and abstractions.
//!
//! This crate defines the entities every bounded context works with, the
//! storage trait they are persisted through, and the determinism seams
//! (clock, RNG) injected into handlers. It contains no infrastructure code.

pub mod clock;
pub mod command;
pub mod entity;
pub mod error;
pub mod lock;
pub mod repository;
pub mod rng;
