//! Application layer for the Export context.

pub mod query_handlers;
