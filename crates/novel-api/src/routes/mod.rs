//! Route modules.

pub mod checks;
pub mod health;
