//! Domain layer for the Scene Coherence analyzer.

pub mod commands;
pub mod config;
pub mod rules;
pub mod stats;
