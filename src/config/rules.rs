//! Combat tuning knobs

use serde::{Deserialize, Serialize};

/// Combat rule constants, overridable from content data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CombatRules {
    /// Stamina damage each side deals on a tie
    pub tie_damage: i32,
    pub max_resolve: i32,
    pub resolve_base_gain: i32,
    /// Resolve needed for the economy path to Symbol Break
    pub symbol_break_resolve: i32,
    /// Win streak needed for the comeback path
    pub comeback_wins: u32,
    /// HP at or below which the comeback path opens
    pub comeback_hp: i32,
    pub symbol_break_base_damage: i32,
}

impl Default for CombatRules {
    fn default() -> Self {
        Self {
            tie_damage: 5,
            max_resolve: 100,
            resolve_base_gain: 10,
            symbol_break_resolve: 100,
            comeback_wins: 3,
            comeback_hp: 50,
            symbol_break_base_damage: 40,
        }
    }
}
