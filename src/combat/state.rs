//! Per-battle combat state and end-of-battle rules

use serde::{Deserialize, Serialize};

use crate::alignment::Alignment;
use crate::combat::types::RoundResult;
use crate::config::{CombatRules, EnemyConfig, EnemyPattern, EnemyPhase, MoveType};

/// An enemy instance for one battle
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enemy {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub move_type: MoveType,
    pub max_hp: i32,
    pub current_hp: i32,
    /// Live pattern, including the persisted sequence index
    pub pattern: EnemyPattern,
    pub is_boss: bool,
    pub alignment: Option<Alignment>,
}

impl Enemy {
    /// Fresh instance at full HP
    pub fn from_config(config: &EnemyConfig) -> Self {
        Self {
            id: config.id.clone(),
            name: config.name.clone(),
            move_type: config.move_type,
            max_hp: config.max_hp,
            current_hp: config.max_hp,
            pattern: config.pattern.clone(),
            is_boss: config.is_boss,
            alignment: config.alignment,
        }
    }

    /// Boss phases, when the pattern has any
    pub fn phases(&self) -> Option<&[EnemyPhase]> {
        match &self.pattern {
            EnemyPattern::Phase { phases, .. } => Some(phases),
            _ => None,
        }
    }
}

/// Combat phase tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CombatPhase {
    Waiting,
    Revealing,
    Resolving,
    Victory,
    Defeat,
}

impl CombatPhase {
    pub fn is_over(self) -> bool {
        matches!(self, CombatPhase::Victory | CombatPhase::Defeat)
    }
}

/// Battle end check result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BattleEnd {
    Victory,
    Defeat,
    Ongoing,
}

/// Player HP at or below zero is a defeat, checked before enemy HP
pub fn check_battle_end(player_hp: i32, enemy_hp: i32) -> BattleEnd {
    if player_hp <= 0 {
        BattleEnd::Defeat
    } else if enemy_hp <= 0 {
        BattleEnd::Victory
    } else {
        BattleEnd::Ongoing
    }
}

/// Symbol Break gate with the default rules
///
/// Open when resolve is full, or as a comeback after three straight wins
/// while at 50 HP or less.
pub fn can_use_symbol_break(resolve: i32, consecutive_wins: u32, current_hp: i32) -> bool {
    CombatRules::default().can_use_symbol_break(resolve, consecutive_wins, current_hp)
}

impl CombatRules {
    pub fn can_use_symbol_break(&self, resolve: i32, consecutive_wins: u32, current_hp: i32) -> bool {
        resolve >= self.symbol_break_resolve
            || (consecutive_wins >= self.comeback_wins && current_hp <= self.comeback_hp)
    }
}

/// Mutable state of one battle
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatState {
    pub player_hp: i32,
    pub player_max_hp: i32,
    pub enemy_hp: i32,
    pub enemy_max_hp: i32,
    pub resolve: i32,
    pub max_resolve: i32,
    pub round: u32,
    pub history: Vec<RoundResult>,
    /// Moves of the round in flight or last resolved
    pub current_moves: Option<(MoveType, MoveType)>,
    pub phase: CombatPhase,
    pub consecutive_wins: u32,
    pub symbol_break_available: bool,
}

impl CombatState {
    pub fn new(player_hp: i32, player_max_hp: i32, enemy_max_hp: i32, max_resolve: i32) -> Self {
        Self {
            player_hp,
            player_max_hp,
            enemy_hp: enemy_max_hp,
            enemy_max_hp,
            resolve: 0,
            max_resolve,
            round: 0,
            history: Vec::new(),
            current_moves: None,
            phase: CombatPhase::Waiting,
            consecutive_wins: 0,
            symbol_break_available: false,
        }
    }

    pub fn battle_end(&self) -> BattleEnd {
        check_battle_end(self.player_hp, self.enemy_hp)
    }
}
