//! Domain layer for the manuscript model.

pub mod chapter;
pub mod character;
pub mod header;
pub mod layout;
pub mod prose;
pub mod scope;
pub mod text;
