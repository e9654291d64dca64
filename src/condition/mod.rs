//! Condition parsing and evaluation module
//!
//! This module handles parsing condition strings like
//! "ROCK>=60 & (FLAG.met_elder=1 | REL.elder>20)" and evaluating them
//! against a GameState.

mod ast;
pub mod cache;
mod evaluator;
pub mod parser;


pub use ast::*;
pub use cache::*;
pub use evaluator::*;
pub use parser::*;
