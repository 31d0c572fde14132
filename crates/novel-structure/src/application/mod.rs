//! Application layer for the Structural Coverage analyzer.

pub mod command_handlers;
