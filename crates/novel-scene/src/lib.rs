//! Novel — Scene Coherence analyzer.
//!
//! Checks every scene for the fields a scene needs to work (an objective,
//! a conflict, and caller-required extras), flags outcomes that merely
//! restate the objective, and warns on reused scene ids.

pub mod application;
pub mod domain;
