//! Rock-Paper-Scissors combat module
//!
//! Pure round resolution, damage and enemy move selection, plus the `Battle`
//! driver that carries state from one round to the next.

mod battle;
pub mod pattern;
mod resolver;
mod state;
mod types;


pub use battle::*;
pub use pattern::*;
pub use resolver::*;
pub use state::*;
pub use types::*;
