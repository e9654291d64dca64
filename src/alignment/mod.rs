//! Alignment model
//!
//! A character's rock/paper/scissors affinity as a split summing to 100.

mod model;


pub use model::*;
