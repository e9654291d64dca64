//! Round resolution and damage math

use smallvec::SmallVec;

use crate::alignment::Alignment;
use crate::combat::types::{RoundEffect, RoundResult, Side, Winner};
use crate::config::{CombatRules, MoveConfig, MoveType};

/// Default resolve gained by a winning round
pub const DEFAULT_RESOLVE_GAIN: i32 = 10;

/// Damage of a move for the given alignment
///
/// `floor(base * (1 + (alignment[type] / 10) * 0.1))`, then doubled when
/// critical. The floor happens before the doubling and the result saturates
/// at `i32::MAX`.
#[inline]
pub fn calculate_damage(
    mv: &MoveConfig,
    alignment: &Alignment,
    move_type: MoveType,
    is_critical: bool,
) -> i32 {
    damage_with_affinity(mv, alignment.get(move_type), is_critical)
}

/// Damage of a move for a raw affinity percentage
#[inline]
pub fn damage_with_affinity(mv: &MoveConfig, affinity: i32, is_critical: bool) -> i32 {
    let base = mv.base_damage as f64;
    let bonus = (base * (1.0 + (affinity as f64 / 10.0) * 0.1)).floor() as i32;

    if is_critical || mv.is_guaranteed_critical() {
        bonus.saturating_mul(2)
    } else {
        bonus
    }
}

/// Resolve one round against an enemy without alignment
pub fn resolve_round(
    player_move: &MoveConfig,
    enemy_move: &MoveConfig,
    player_alignment: &Alignment,
) -> RoundResult {
    resolve_round_with(
        player_move,
        enemy_move,
        player_alignment,
        None,
        &CombatRules::default(),
    )
}

/// Resolve one round
///
/// Ties cost both sides the stamina penalty. Otherwise only the winner deals
/// damage, scaled by the winner's own alignment; an enemy without alignment
/// gets no bonus. The returned round number is 0; the caller numbers rounds.
pub fn resolve_round_with(
    player_move: &MoveConfig,
    enemy_move: &MoveConfig,
    player_alignment: &Alignment,
    enemy_alignment: Option<&Alignment>,
    rules: &CombatRules,
) -> RoundResult {
    let winner = Winner::decide(player_move.move_type, enemy_move.move_type);

    let mut result = RoundResult {
        round: 0,
        player_move: player_move.move_type,
        enemy_move: enemy_move.move_type,
        player_move_id: player_move.id.clone(),
        enemy_move_id: enemy_move.id.clone(),
        winner,
        player_damage: 0,
        enemy_damage: 0,
        critical: false,
        effects: SmallVec::new(),
    };

    match winner {
        Winner::Tie => {
            result.player_damage = rules.tie_damage;
            result.enemy_damage = rules.tie_damage;
        }
        Winner::Player => {
            let affinity = player_alignment.get(player_move.move_type);
            result.player_damage = damage_with_affinity(player_move, affinity, false);
            if player_move.is_guaranteed_critical() {
                result.critical = true;
                result.effects.push(RoundEffect::Critical { side: Side::Player });
            }
        }
        Winner::Enemy => {
            let affinity = enemy_alignment.map_or(0, |a| a.get(enemy_move.move_type));
            result.enemy_damage = damage_with_affinity(enemy_move, affinity, false);
            if enemy_move.is_guaranteed_critical() {
                result.critical = true;
                result.effects.push(RoundEffect::Critical { side: Side::Enemy });
            }
        }
    }

    log::debug!(
        "Round resolved: {} vs {} -> {:?} ({} / {})",
        result.player_move,
        result.enemy_move,
        result.winner,
        result.player_damage,
        result.enemy_damage
    );

    result
}

/// Resolve gained from a round: full on a win, half on a loss, 30% on a tie
pub fn calculate_resolve_gain(result: &RoundResult, base_gain: i32) -> i32 {
    let base = base_gain as f64;
    match result.winner {
        Winner::Player => base_gain,
        Winner::Enemy => (base * 0.5).floor() as i32,
        Winner::Tie => (base * 0.3).floor() as i32,
    }
}
