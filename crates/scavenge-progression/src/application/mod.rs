//! Application layer for the Progression context.

pub mod command_handlers;
pub mod query_handlers;
