//! Enemy configuration structures

use serde::{Deserialize, Serialize};

use crate::alignment::Alignment;
use crate::config::MoveType;

/// Enemy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnemyConfig {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Intrinsic type, the fallback for every pattern
    #[serde(rename = "type")]
    pub move_type: MoveType,
    pub max_hp: i32,
    #[serde(default)]
    pub pattern: EnemyPattern,
    #[serde(default)]
    pub is_boss: bool,
    /// Enemies without an alignment deal base damage
    pub alignment: Option<Alignment>,
    /// Move ids the enemy draws from, first match per type wins
    #[serde(default)]
    pub moves: Vec<String>,
    #[serde(default)]
    pub rewards: EnemyRewards,
}

/// Rewards granted on defeating an enemy
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnemyRewards {
    #[serde(default)]
    pub xp: u32,
    #[serde(default)]
    pub gold: u32,
    #[serde(default)]
    pub items: Vec<String>,
}

/// Enemy move-selection pattern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EnemyPattern {
    /// Always the same move
    Predictable {
        #[serde(rename = "move")]
        move_type: MoveType,
    },
    /// Reacts to the player's last move
    Reactive {
        #[serde(default = "default_counters")]
        counters: bool,
    },
    /// Uniformly random
    Random,
    /// Fixed rotation; `index` is persisted by the caller
    Sequence {
        moves: Vec<MoveType>,
        #[serde(default)]
        index: usize,
    },
    /// HP-gated phases, each with its own pattern
    Phase {
        phases: Vec<EnemyPhase>,
        #[serde(default, rename = "currentPhase")]
        current_phase: usize,
    },
    /// Unrecognised tag in content data
    #[serde(other)]
    Unknown,
}

fn default_counters() -> bool {
    true
}

impl Default for EnemyPattern {
    fn default() -> Self {
        EnemyPattern::Random
    }
}

/// One phase of a boss pattern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnemyPhase {
    #[serde(default)]
    pub name: String,
    /// Active while HP percentage is at or below this value
    pub hp_threshold: f64,
    /// Replaces the enemy's type as the fallback move while this phase is active
    pub preferred_move: Option<MoveType>,
    pub pattern: Box<EnemyPattern>,
}
