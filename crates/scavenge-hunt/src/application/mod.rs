//! Application layer for the Hunt Lifecycle & Authoring context.

pub mod command_handlers;
pub mod query_handlers;
