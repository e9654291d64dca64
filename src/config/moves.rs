//! Move configuration structures

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AetherisError;

/// Base damage of the fallback move used when an enemy has no move of a type
pub const BASIC_MOVE_DAMAGE: i32 = 20;

/// The three move types of Rock-Paper-Scissors combat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveType {
    Rock,
    Paper,
    Scissors,
}

impl MoveType {
    pub const ALL: [MoveType; 3] = [MoveType::Rock, MoveType::Paper, MoveType::Scissors];

    /// The type this one defeats
    #[inline]
    pub fn beats(self) -> MoveType {
        match self {
            MoveType::Rock => MoveType::Scissors,
            MoveType::Paper => MoveType::Rock,
            MoveType::Scissors => MoveType::Paper,
        }
    }

    /// The type that defeats this one
    #[inline]
    pub fn counter(self) -> MoveType {
        match self {
            MoveType::Rock => MoveType::Paper,
            MoveType::Paper => MoveType::Scissors,
            MoveType::Scissors => MoveType::Rock,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MoveType::Rock => "rock",
            MoveType::Paper => "paper",
            MoveType::Scissors => "scissors",
        }
    }

    /// Capitalized name for player-facing text
    pub fn label(self) -> &'static str {
        match self {
            MoveType::Rock => "Rock",
            MoveType::Paper => "Paper",
            MoveType::Scissors => "Scissors",
        }
    }
}

impl fmt::Display for MoveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MoveType {
    type Err = AetherisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rock" => Ok(MoveType::Rock),
            "paper" => Ok(MoveType::Paper),
            "scissors" => Ok(MoveType::Scissors),
            _ => Err(AetherisError::MoveNotFound(s.to_string())),
        }
    }
}

/// Move effect kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EffectKind {
    /// Reduces incoming damage by `value` percent
    Defense,
    /// Avoids stamina damage on ties
    Speed,
    /// Opponent picks its move at random
    Confusion,
    /// Opponent's winning moves deal no damage
    Stun,
    /// Bounces `value` percent of received damage back
    Reflect,
    /// Guaranteed critical hit
    Critical,
    /// Bypasses defense and reflect
    IgnoreDefense,
}

impl EffectKind {
    /// Whether the effect lands on the opponent rather than the user
    pub fn targets_opponent(self) -> bool {
        matches!(self, EffectKind::Confusion | EffectKind::Stun)
    }

    /// Whether the effect persists across rounds
    pub fn is_timed(self) -> bool {
        !matches!(self, EffectKind::Critical | EffectKind::IgnoreDefense)
    }
}

/// Effect attached to a move
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveEffect {
    pub kind: EffectKind,
    #[serde(default)]
    pub value: i32,
    /// Rounds the effect lasts; one round when absent
    pub duration: Option<u32>,
}

impl MoveEffect {
    pub fn rounds(&self) -> u32 {
        self.duration.unwrap_or(1).max(1)
    }
}

/// Move configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveConfig {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub move_type: MoveType,
    pub base_damage: i32,
    pub effect: Option<MoveEffect>,
}

impl MoveConfig {
    /// Plain move of the given type with no effect
    pub fn basic(move_type: MoveType) -> Self {
        Self {
            id: format!("basic_{}", move_type),
            name: move_type.label().to_string(),
            move_type,
            base_damage: BASIC_MOVE_DAMAGE,
            effect: None,
        }
    }

    #[inline]
    pub fn is_guaranteed_critical(&self) -> bool {
        self.has_effect(EffectKind::Critical)
    }

    #[inline]
    pub fn ignores_defense(&self) -> bool {
        self.has_effect(EffectKind::IgnoreDefense)
    }

    #[inline]
    fn has_effect(&self, kind: EffectKind) -> bool {
        self.effect.as_ref().is_some_and(|e| e.kind == kind)
    }
}
