//! Application layer for the Style Consistency analyzer.

pub mod command_handlers;
