//! Python bindings
//!
//! Content tables are parsed once by `init_content` and cached in Rust memory.
//! Game state crosses the boundary as JSON in the same camelCase layout the
//! content uses; results come back as JSON strings.

use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use pyo3::exceptions::PyRuntimeError;
use pyo3::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;

use crate::achievement;
use crate::alignment::Alignment;
use crate::combat::{self, Battle};
use crate::condition;
use crate::config::ContentTables;
use crate::dialogue::DialogueEngine;
use crate::error::AetherisError;
use crate::state::{GameState, PlayerState, StateDelta};

// ============================================================================
// Cached Content
// ============================================================================

static CONTENT: OnceCell<Arc<RwLock<ContentTables>>> = OnceCell::new();

fn content() -> PyResult<Arc<RwLock<ContentTables>>> {
    CONTENT
        .get()
        .cloned()
        .ok_or_else(|| PyRuntimeError::new_err("Content not initialized. Call init_content() first."))
}

fn parse_state(state_json: &str) -> PyResult<GameState> {
    Ok(GameState::from_json(state_json)?)
}

fn to_json<T: Serialize>(value: &T) -> PyResult<String> {
    Ok(serde_json::to_string(value).map_err(AetherisError::from)?)
}

// ============================================================================
// Python Functions
// ============================================================================

/// Load the content tables (call once at startup, again to reload)
#[pyfunction]
fn init_content(json: &str) -> PyResult<()> {
    let tables = ContentTables::from_json(json)?;

    if let Some(existing) = CONTENT.get() {
        *existing.write() = tables;
    } else {
        let _ = CONTENT.set(Arc::new(RwLock::new(tables)));
    }

    Ok(())
}

/// Check if content is initialized
#[pyfunction]
fn is_content_initialized() -> bool {
    CONTENT.get().is_some()
}

/// Resolve a single round between two content moves
#[pyfunction]
fn resolve_round(
    player_move_id: &str,
    enemy_move_id: &str,
    rock: i32,
    paper: i32,
    scissors: i32,
) -> PyResult<String> {
    let content = content()?;
    let tables = content.read();
    let alignment = Alignment::new(rock, paper, scissors)?;
    let result = combat::resolve_round_with(
        tables.get_move(player_move_id)?,
        tables.get_move(enemy_move_id)?,
        &alignment,
        None,
        &tables.rules,
    );
    to_json(&result)
}

/// The node to display for `node_id`, with reroutes followed
#[pyfunction]
fn evaluate_dialogue(node_id: &str, state_json: &str) -> PyResult<String> {
    let content = content()?;
    let tables = content.read();
    let state = parse_state(state_json)?;
    let view = DialogueEngine::new(&tables.dialogue).display(node_id, &state)?;
    to_json(&view)
}

/// Take a choice on a node
#[pyfunction]
fn choose_dialogue(node_id: &str, choice_id: &str, state_json: &str) -> PyResult<String> {
    let content = content()?;
    let tables = content.read();
    let state = parse_state(state_json)?;
    let outcome = DialogueEngine::new(&tables.dialogue).choose(node_id, choice_id, &state)?;
    to_json(&outcome)
}

/// Newly met achievements, sorted by id
#[pyfunction]
fn check_achievements(state_json: &str, unlocked: HashSet<String>) -> PyResult<String> {
    let content = content()?;
    let tables = content.read();
    let state = parse_state(state_json)?;
    let found = achievement::check_achievements(&state, &unlocked, &tables.achievements);
    to_json(&found)
}

/// Evaluate a condition expression against a state
#[pyfunction]
fn check_condition(condition: &str, state_json: &str) -> PyResult<bool> {
    let state = parse_state(state_json)?;
    Ok(condition::check_condition(condition, &state)?)
}

/// Apply a delta to a state, returning the new state
#[pyfunction]
fn apply_delta(state_json: &str, delta_json: &str) -> PyResult<String> {
    let mut state = parse_state(state_json)?;
    let delta: StateDelta = serde_json::from_str(delta_json).map_err(AetherisError::from)?;
    delta.apply_to(&mut state);
    to_json(&state)
}

// ============================================================================
// BattleSession PyClass
// ============================================================================

/// A battle held in Rust memory between Python calls
#[pyclass]
pub struct BattleSession {
    battle: Battle,
    rng: StdRng,
}

#[pymethods]
impl BattleSession {
    /// Start a battle against a content enemy
    ///
    /// `player_json` is the player slice of the game state. A `seed` makes
    /// random enemy moves reproducible.
    #[new]
    #[pyo3(signature = (player_json, enemy_id, seed=None))]
    fn new(player_json: &str, enemy_id: &str, seed: Option<u64>) -> PyResult<Self> {
        let content = content()?;
        let tables = content.read();
        let player: PlayerState = serde_json::from_str(player_json).map_err(AetherisError::from)?;
        let enemy = tables.get_enemy(enemy_id)?;

        Ok(Self {
            battle: Battle::start(&player, enemy, &tables),
            rng: match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            },
        })
    }

    /// Play a round with a content move, returning the round result
    fn play(&mut self, move_id: &str) -> PyResult<String> {
        let content = content()?;
        let player_move = content.read().get_move(move_id)?.clone();
        let result = self.battle.play_round(&player_move, &mut self.rng)?;
        to_json(&result)
    }

    /// Unleash a Symbol Break
    fn symbol_break(&mut self) -> PyResult<String> {
        let result = self.battle.symbol_break()?;
        to_json(&result)
    }

    /// Outcome delta once the battle is decided, otherwise None
    fn outcome(&self) -> PyResult<Option<String>> {
        self.battle.outcome().map(|o| to_json(&o)).transpose()
    }

    /// Full combat state
    fn state(&self) -> PyResult<String> {
        to_json(self.battle.state())
    }

    #[getter]
    fn player_hp(&self) -> i32 {
        self.battle.state().player_hp
    }

    #[getter]
    fn enemy_hp(&self) -> i32 {
        self.battle.state().enemy_hp
    }

    #[getter]
    fn resolve(&self) -> i32 {
        self.battle.state().resolve
    }

    #[getter]
    fn round(&self) -> u32 {
        self.battle.state().round
    }

    #[getter]
    fn symbol_break_available(&self) -> bool {
        self.battle.state().symbol_break_available
    }

    #[getter]
    fn is_over(&self) -> bool {
        self.battle.is_over()
    }
}

// ============================================================================
// Python Module Definition
// ============================================================================

#[pymodule]
fn aetheris_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(init_content, m)?)?;
    m.add_function(wrap_pyfunction!(is_content_initialized, m)?)?;
    m.add_function(wrap_pyfunction!(resolve_round, m)?)?;
    m.add_function(wrap_pyfunction!(evaluate_dialogue, m)?)?;
    m.add_function(wrap_pyfunction!(choose_dialogue, m)?)?;
    m.add_function(wrap_pyfunction!(check_achievements, m)?)?;
    m.add_function(wrap_pyfunction!(check_condition, m)?)?;
    m.add_function(wrap_pyfunction!(apply_delta, m)?)?;
    m.add_class::<BattleSession>()?;
    Ok(())
}
