//! Exported flag reset
//!
//! Removes the marker field from every completed order that carries it, so
//! the next export picks those orders up again.

pub mod engine;

pub use engine::{FlagResetEngine, ResetOutcome};
