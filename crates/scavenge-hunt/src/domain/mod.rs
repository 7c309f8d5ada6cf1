//! Domain layer for the Hunt Lifecycle & Authoring context.

pub mod codes;
pub mod commands;
pub mod rules;
