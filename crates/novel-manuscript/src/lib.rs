//! Novel — manuscript document model.
//!
//! Responsible for reading chapter and character documents from disk,
//! decoding their structured headers with source-line tracking, and
//! narrowing the loaded chapter set to the requested scope.

pub mod application;
pub mod domain;
