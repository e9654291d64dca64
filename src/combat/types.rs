//! Round result types

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::config::{EffectKind, MoveType};

/// A combatant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    #[inline]
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }
}

/// Round winner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Player,
    Enemy,
    Tie,
}

impl Winner {
    /// Decide a round by Rock-Paper-Scissors precedence
    #[inline]
    pub fn decide(player: MoveType, enemy: MoveType) -> Winner {
        if player == enemy {
            Winner::Tie
        } else if player.beats() == enemy {
            Winner::Player
        } else {
            Winner::Enemy
        }
    }

    pub fn side(self) -> Option<Side> {
        match self {
            Winner::Player => Some(Side::Player),
            Winner::Enemy => Some(Side::Enemy),
            Winner::Tie => None,
        }
    }
}

/// Something notable that happened during a round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum RoundEffect {
    /// A move effect landed on `target`
    Applied {
        target: Side,
        kind: EffectKind,
        value: i32,
        duration: u32,
    },
    /// `side` landed a critical hit
    Critical { side: Side },
    /// Defense on `side` absorbed damage
    Blocked { side: Side, amount: i32 },
    /// Reflect on `side` bounced damage back
    Reflected { side: Side, amount: i32 },
    /// `side` won the exchange but was stunned
    Stunned { side: Side },
    /// Speed spared `side` the tie penalty
    Evaded { side: Side },
    /// Boss moved to another phase
    PhaseShift { phase: usize, name: String },
}

/// Outcome of a single round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundResult {
    pub round: u32,
    pub player_move: MoveType,
    pub enemy_move: MoveType,
    pub player_move_id: String,
    pub enemy_move_id: String,
    pub winner: Winner,
    /// Damage dealt by the player
    pub player_damage: i32,
    /// Damage dealt by the enemy
    pub enemy_damage: i32,
    pub critical: bool,
    pub effects: SmallVec<[RoundEffect; 2]>,
}

impl RoundResult {
    /// Damage dealt by a side
    #[inline]
    pub fn damage_by(&self, side: Side) -> i32 {
        match side {
            Side::Player => self.player_damage,
            Side::Enemy => self.enemy_damage,
        }
    }

    #[inline]
    pub(crate) fn damage_by_mut(&mut self, side: Side) -> &mut i32 {
        match side {
            Side::Player => &mut self.player_damage,
            Side::Enemy => &mut self.enemy_damage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decide_all_pairs() {
        use MoveType::*;
        assert_eq!(Winner::decide(Rock, Scissors), Winner::Player);
        assert_eq!(Winner::decide(Paper, Rock), Winner::Player);
        assert_eq!(Winner::decide(Scissors, Paper), Winner::Player);
        assert_eq!(Winner::decide(Scissors, Rock), Winner::Enemy);
        assert_eq!(Winner::decide(Rock, Paper), Winner::Enemy);
        assert_eq!(Winner::decide(Paper, Scissors), Winner::Enemy);
        for t in MoveType::ALL {
            assert_eq!(Winner::decide(t, t), Winner::Tie);
        }
    }

    #[test]
    fn test_side_opponent() {
        assert_eq!(Side::Player.opponent(), Side::Enemy);
        assert_eq!(Side::Enemy.opponent(), Side::Player);
        assert_eq!(Winner::Tie.side(), None);
    }
}
