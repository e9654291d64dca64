//! Configuration module for static content tables
//!
//! Moves, enemies, dialogue nodes and achievements are loaded once from JSON
//! and looked up by string id afterwards. Nothing in the engines writes back
//! to these tables.

mod achievement;
mod dialogue;
mod enemy;
mod moves;
mod rules;

pub use achievement::*;
pub use dialogue::*;
pub use enemy::*;
pub use moves::*;
pub use rules::*;

use crate::error::{AetherisError, Result};
use serde::Deserialize;
use std::collections::HashMap;

/// Raw content file layout: every table is a list of records
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawContent {
    rules: CombatRules,
    moves: Vec<MoveConfig>,
    enemies: Vec<EnemyConfig>,
    dialogue: Vec<DialogueNode>,
    achievements: Vec<AchievementConfig>,
}

/// Read-only content tables keyed by id
#[derive(Debug, Clone, Default)]
pub struct ContentTables {
    pub rules: CombatRules,
    pub moves: HashMap<String, MoveConfig>,
    pub enemies: HashMap<String, EnemyConfig>,
    pub dialogue: HashMap<String, DialogueNode>,
    pub achievements: HashMap<String, AchievementConfig>,
}

impl ContentTables {
    /// Parse the content tables from a JSON document
    ///
    /// # Errors
    /// `DeserializationError` on malformed JSON or a duplicated id within a table
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawContent = serde_json::from_str(json)?;

        let tables = Self {
            rules: raw.rules,
            moves: index_by_id("moves", raw.moves, |m| &m.id)?,
            enemies: index_by_id("enemies", raw.enemies, |e| &e.id)?,
            dialogue: index_by_id("dialogue", raw.dialogue, |n| &n.id)?,
            achievements: index_by_id("achievements", raw.achievements, |a| &a.id)?,
        };

        log::debug!(
            "Loaded content: {} moves, {} enemies, {} dialogue nodes, {} achievements",
            tables.moves.len(),
            tables.enemies.len(),
            tables.dialogue.len(),
            tables.achievements.len()
        );
        for (owner, condition, err) in tables.invalid_conditions() {
            log::warn!("Condition {:?} on {} never matches: {}", condition, owner, err);
        }

        Ok(tables)
    }

    /// Dialogue and achievement conditions that do not parse, as
    /// `(owner id, condition, error)` sorted by owner
    pub fn invalid_conditions(&self) -> Vec<(String, String, AetherisError)> {
        let reroutes = self.dialogue.values().flat_map(|node| {
            node.conditional_next
                .iter()
                .map(move |entry| (&node.id, &entry.condition))
        });
        let achievements = self.achievements.values().map(|a| (&a.id, &a.condition));

        let mut invalid: Vec<(String, String, AetherisError)> = reroutes
            .chain(achievements)
            .filter(|(_, condition)| !condition.trim().is_empty())
            .filter_map(|(owner, condition)| {
                crate::condition::parse(condition)
                    .err()
                    .map(|err| (owner.clone(), condition.clone(), err))
            })
            .collect();
        invalid.sort_by(|a, b| a.0.cmp(&b.0));
        invalid
    }

    pub fn get_move(&self, id: &str) -> Result<&MoveConfig> {
        self.moves
            .get(id)
            .ok_or_else(|| AetherisError::MoveNotFound(id.to_string()))
    }

    pub fn get_enemy(&self, id: &str) -> Result<&EnemyConfig> {
        self.enemies
            .get(id)
            .ok_or_else(|| AetherisError::EnemyNotFound(id.to_string()))
    }

    pub fn get_node(&self, id: &str) -> Result<&DialogueNode> {
        self.dialogue
            .get(id)
            .ok_or_else(|| AetherisError::NodeNotFound(id.to_string()))
    }

    /// Moves of one type, sorted by id for stable ordering
    pub fn moves_of_type(&self, move_type: MoveType) -> Vec<&MoveConfig> {
        let mut moves: Vec<&MoveConfig> = self
            .moves
            .values()
            .filter(|m| m.move_type == move_type)
            .collect();
        moves.sort_by(|a, b| a.id.cmp(&b.id));
        moves
    }

    /// Move set an enemy fights with: its listed moves, first per type
    ///
    /// Types the enemy lists no move for fall back to a basic move.
    pub fn enemy_move_set(&self, enemy: &EnemyConfig) -> HashMap<MoveType, MoveConfig> {
        let mut set = HashMap::with_capacity(3);
        for id in &enemy.moves {
            match self.moves.get(id) {
                Some(mv) => {
                    set.entry(mv.move_type).or_insert_with(|| mv.clone());
                }
                None => log::warn!("Enemy {} lists unknown move {}", enemy.id, id),
            }
        }
        for t in MoveType::ALL {
            set.entry(t).or_insert_with(|| MoveConfig::basic(t));
        }
        set
    }
}

fn index_by_id<T>(
    table: &str,
    records: Vec<T>,
    id_of: impl Fn(&T) -> &String,
) -> Result<HashMap<String, T>> {
    let mut map = HashMap::with_capacity(records.len());
    for record in records {
        let id = id_of(&record).clone();
        if map.insert(id.clone(), record).is_some() {
            return Err(AetherisError::DeserializationError(format!(
                "Duplicate id {} in {}",
                id, table
            )));
        }
    }
    Ok(map)
}

/// Bundled sample content used by tests and benchmarks
#[cfg(test)]
pub(crate) fn sample_content() -> ContentTables {
    ContentTables::from_json(include_str!("../../data/content.json"))
        .expect("bundled content must parse")
}
