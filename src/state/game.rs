//! Game state snapshot handed to the engines

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::alignment::Alignment;

/// Player slice of the game state
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerState {
    pub name: String,
    pub level: u32,
    pub xp: u32,
    pub gold: u32,
    pub hp: i32,
    pub max_hp: i32,
    pub alignment: Alignment,
    pub inventory: Vec<String>,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            name: String::new(),
            level: 1,
            xp: 0,
            gold: 0,
            hp: 100,
            max_hp: 100,
            alignment: Alignment::balanced(),
            inventory: Vec::new(),
        }
    }
}

impl PlayerState {
    #[inline]
    pub fn has_item(&self, item: &str) -> bool {
        self.inventory.iter().any(|i| i == item)
    }
}

/// Story slice of the game state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoryState {
    pub story_flags: HashMap<String, bool>,
    pub npc_relationships: HashMap<String, i32>,
    pub defeated_enemies: Vec<String>,
}

impl StoryState {
    #[inline]
    pub fn flag(&self, name: &str) -> bool {
        self.story_flags.get(name).copied().unwrap_or(false)
    }

    /// Relationship value, zero when the NPC has never been met
    #[inline]
    pub fn relationship(&self, npc: &str) -> i32 {
        self.npc_relationships.get(npc).copied().unwrap_or(0)
    }

    /// Names of all flags currently set, sorted
    pub fn set_flags(&self) -> Vec<String> {
        let mut flags: Vec<String> = self
            .story_flags
            .iter()
            .filter(|(_, &v)| v)
            .map(|(k, _)| k.clone())
            .collect();
        flags.sort();
        flags
    }
}

/// Lifetime counters used by achievements
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameStats {
    pub battles_won: u32,
    pub battles_lost: u32,
    pub symbol_breaks_used: u32,
    pub rounds_played: u32,
}

/// Complete snapshot of the state the engines read
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameState {
    pub player: PlayerState,
    pub story: StoryState,
    pub stats: GameStats,
}

impl GameState {
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
