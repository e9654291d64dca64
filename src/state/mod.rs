//! Game state snapshot and deltas
//!
//! The engines read a `GameState` and return `StateDelta`s; they never own
//! or persist the state themselves.

mod delta;
mod game;

pub use delta::*;
pub use game::*;
