//! Achievement module

mod checker;

pub use checker::*;
