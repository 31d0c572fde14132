//! Application layer for reports.

pub mod publish;
