//! Domain layer for the Progression context.

pub mod commands;
pub mod outcome;
pub mod rules;
