//! Novel — report rendering.
//!
//! Turns analyzer output into the derived markdown report and assembles the
//! [`CheckResult`](novel_core::result::CheckResult) every check returns.

pub mod application;
pub mod domain;
