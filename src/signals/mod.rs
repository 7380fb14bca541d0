//! Decision rules and the gated live decision engine.

pub mod engine;
pub mod rules;

pub use engine::{decide, DecisionEngine};
