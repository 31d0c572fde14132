//! Novel — Style Consistency analyzer.
//!
//! Scans chapter prose for words the author wants to avoid and tallies how
//! often each character's catchphrases actually appear.

pub mod application;
pub mod domain;
