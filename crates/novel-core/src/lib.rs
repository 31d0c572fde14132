//! Novel Core — shared diagnostic abstractions.
//!
//! This crate defines the finding, evidence, diagnostic, and result types
//! that every analyzer produces, plus the clock and command traits the
//! handlers share. It contains no file-system code.

pub mod clock;
pub mod command;
pub mod diagnostic;
pub mod error;
pub mod finding;
pub mod result;
pub mod stats;
