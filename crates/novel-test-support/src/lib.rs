//! Shared test fixtures and utilities for the Novel manuscript engine.

mod clock;
mod fixture;

pub use clock::{FixedClock, fixed_instant};
pub use fixture::ManuscriptFixture;
