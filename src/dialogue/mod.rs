//! Dialogue evaluation module
//!
//! Choice gating, conditional rerouting and side-effect deltas. Evaluation
//! reads a `GameState` and never writes to it.

mod effects;
mod evaluator;
mod relationship;
mod requirements;


pub use effects::*;
pub use evaluator::*;
pub use relationship::*;
pub use requirements::*;
