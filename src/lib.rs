//! Aetheris Core - Combat resolution and dialogue gating engine
//!
//! Rock-Paper-Scissors combat with alignment-scaled damage and scripted enemy
//! patterns, plus requirement-gated dialogue with conditional rerouting. The
//! engines read a `GameState` snapshot and return `StateDelta`s; applying them
//! is left to the caller's state store. Python bindings via PyO3 are available
//! behind the `python` feature.

pub mod achievement;
pub mod alignment;
pub mod combat;
pub mod condition;
pub mod config;
pub mod dialogue;
pub mod error;
pub mod state;

#[cfg(feature = "python")]
mod python;

pub use crate::alignment::{Alignment, AlignmentDelta};
pub use crate::combat::{Battle, BattleOutcome, RoundResult, Winner};
pub use crate::config::{ContentTables, MoveType};
pub use crate::dialogue::{DialogueEngine, EffectiveNode, NodeView};
pub use crate::error::{AetherisError, Result};
pub use crate::state::{GameState, StateDelta};
