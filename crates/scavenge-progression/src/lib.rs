//! Scavenge: Progression Engine & State Projector bounded context.
//!
//! Decides whether an attempt on a post-it is accepted, reveals hints on
//! wrong answers, honours time locks, advances the hunt's progress pointer
//! and projects the per-card state shown to the recipient.

pub mod application;
pub mod domain;
