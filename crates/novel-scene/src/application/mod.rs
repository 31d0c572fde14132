//! Application layer for the Scene Coherence analyzer.

pub mod command_handlers;
