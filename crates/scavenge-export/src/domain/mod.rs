//! Domain layer for the Export context.

pub mod memory_book;
pub mod render;
