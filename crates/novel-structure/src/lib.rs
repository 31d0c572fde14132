//! Novel — Structural Coverage analyzer.
//!
//! Compares the beats chapters declare against a required beat list,
//! checks their relative order and act progression, and follows plot
//! threads from opening to resolution.

pub mod application;
pub mod domain;
