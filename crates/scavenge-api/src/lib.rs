//! Scavenge API: HTTP boundary for the hunt platform.
//!
//! Validates request shapes, dispatches to the bounded-context handlers and
//! maps their results onto status codes and JSON bodies.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod telemetry;
pub mod validation;
