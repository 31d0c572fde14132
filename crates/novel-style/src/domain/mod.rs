//! Domain layer for the Style Consistency analyzer.

pub mod catchphrases;
pub mod commands;
pub mod config;
pub mod lexicon;
pub mod stats;
