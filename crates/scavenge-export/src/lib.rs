//! Scavenge: Memory book export bounded context.
//!
//! Read-only projection of a hunt's answered cards into a standalone,
//! printable HTML document.

pub mod application;
pub mod domain;
