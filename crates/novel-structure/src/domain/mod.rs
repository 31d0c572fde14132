//! Domain layer for the Structural Coverage analyzer.

pub mod beats;
pub mod commands;
pub mod config;
pub mod stats;
pub mod threads;
