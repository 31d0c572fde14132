//! Domain layer for reports.

pub mod kind;
pub mod render;
