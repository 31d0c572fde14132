//! Application layer for the manuscript model.

pub mod loader;
