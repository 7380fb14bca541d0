//! Live trading runtime.

pub mod cycle;

pub use cycle::LiveEngine;
