//! Enemy move selection
//!
//! Selection never mutates the pattern. Progression state (the sequence
//! index and the active boss phase) is carried forward by `advance_pattern`,
//! whose result the caller stores for the next round.

use rand::Rng;

use crate::combat::state::Enemy;
use crate::combat::types::RoundResult;
use crate::config::{EnemyPattern, EnemyPhase, MoveType};

/// HP as a percentage of max HP; zero when max HP is not positive
#[inline]
pub fn hp_percent(current_hp: i32, max_hp: i32) -> f64 {
    if max_hp <= 0 {
        return 0.0;
    }
    current_hp as f64 / max_hp as f64 * 100.0
}

/// Index of the first phase, in declared order, whose threshold is at or above `hp_pct`
pub fn select_phase(phases: &[EnemyPhase], hp_pct: f64) -> Option<usize> {
    phases.iter().position(|phase| phase.hp_threshold >= hp_pct)
}

/// Pick the enemy's move for this round using the thread RNG
pub fn get_enemy_move(enemy: &Enemy, history: &[RoundResult], current_hp: i32) -> MoveType {
    get_enemy_move_with_rng(enemy, history, current_hp, &mut rand::thread_rng())
}

/// Pick the enemy's move for this round
///
/// Inside a boss phase, the phase's preferred move stands in for the enemy's
/// own type wherever a pattern has nothing to go on.
pub fn get_enemy_move_with_rng<R: Rng + ?Sized>(
    enemy: &Enemy,
    history: &[RoundResult],
    current_hp: i32,
    rng: &mut R,
) -> MoveType {
    let hp_pct = hp_percent(current_hp, enemy.max_hp);
    move_from_pattern(&enemy.pattern, enemy.move_type, history, hp_pct, rng)
}

/// Uniformly random move type
pub fn random_move<R: Rng + ?Sized>(rng: &mut R) -> MoveType {
    MoveType::ALL[rng.gen_range(0..MoveType::ALL.len())]
}

fn move_from_pattern<R: Rng + ?Sized>(
    pattern: &EnemyPattern,
    fallback: MoveType,
    history: &[RoundResult],
    hp_pct: f64,
    rng: &mut R,
) -> MoveType {
    match pattern {
        EnemyPattern::Predictable { move_type } => *move_type,
        EnemyPattern::Reactive { counters } => match history.last() {
            Some(last) if *counters => last.player_move.counter(),
            Some(last) => last.player_move,
            None => fallback,
        },
        EnemyPattern::Random => random_move(rng),
        EnemyPattern::Sequence { moves, index } => {
            if moves.is_empty() {
                fallback
            } else {
                moves[index % moves.len()]
            }
        }
        EnemyPattern::Phase { phases, .. } => match select_phase(phases, hp_pct) {
            Some(i) => {
                let phase = &phases[i];
                let fallback = phase.preferred_move.unwrap_or(fallback);
                move_from_pattern(&phase.pattern, fallback, history, hp_pct, rng)
            }
            None => fallback,
        },
        EnemyPattern::Unknown => fallback,
    }
}

/// Pattern state for the next round
///
/// Sequences step their index by one (wrapping). Phase patterns record the
/// phase active at `hp_pct` and advance that phase's own pattern. Other
/// patterns carry no progression state and are returned as-is.
pub fn advance_pattern(pattern: &EnemyPattern, hp_pct: f64) -> EnemyPattern {
    match pattern {
        EnemyPattern::Sequence { moves, index } => EnemyPattern::Sequence {
            moves: moves.clone(),
            index: if moves.is_empty() {
                0
            } else {
                (index + 1) % moves.len()
            },
        },
        EnemyPattern::Phase {
            phases,
            current_phase,
        } => {
            let active = select_phase(phases, hp_pct);
            let mut phases = phases.clone();
            if let Some(i) = active {
                phases[i].pattern = Box::new(advance_pattern(&phases[i].pattern, hp_pct));
            }
            EnemyPattern::Phase {
                phases,
                current_phase: active.unwrap_or(*current_phase),
            }
        }
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::types::Winner;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use smallvec::SmallVec;

    fn enemy(pattern: EnemyPattern) -> Enemy {
        Enemy {
            id: "test".to_string(),
            name: "Test".to_string(),
            move_type: MoveType::Scissors,
            max_hp: 100,
            current_hp: 100,
            pattern,
            is_boss: false,
            alignment: None,
        }
    }

    fn round_with_player_move(player_move: MoveType) -> RoundResult {
        RoundResult {
            round: 1,
            player_move,
            enemy_move: MoveType::Rock,
            player_move_id: String::new(),
            enemy_move_id: String::new(),
            winner: Winner::decide(player_move, MoveType::Rock),
            player_damage: 0,
            enemy_damage: 0,
            critical: false,
            effects: SmallVec::new(),
        }
    }

    fn phase(threshold: f64, pattern: EnemyPattern) -> EnemyPhase {
        EnemyPhase {
            name: format!("phase {}", threshold),
            hp_threshold: threshold,
            preferred_move: None,
            pattern: Box::new(pattern),
        }
    }

    #[test]
    fn test_predictable() {
        let e = enemy(EnemyPattern::Predictable {
            move_type: MoveType::Paper,
        });
        assert_eq!(get_enemy_move(&e, &[], 100), MoveType::Paper);
    }

    #[test]
    fn test_reactive_counters_last_move() {
        let e = enemy(EnemyPattern::Reactive { counters: true });
        assert_eq!(get_enemy_move(&e, &[], 100), MoveType::Scissors);

        for t in MoveType::ALL {
            let history = vec![round_with_player_move(MoveType::Paper), round_with_player_move(t)];
            let chosen = get_enemy_move(&e, &history, 100);
            assert_eq!(chosen, t.counter());
            assert_eq!(chosen.beats(), t);
        }
    }

    #[test]
    fn test_reactive_mirror() {
        let e = enemy(EnemyPattern::Reactive { counters: false });
        let history = vec![round_with_player_move(MoveType::Rock)];
        assert_eq!(get_enemy_move(&e, &history, 100), MoveType::Rock);
    }

    #[test]
    fn test_sequence_index_and_wrap() {
        let moves = vec![MoveType::Rock, MoveType::Rock, MoveType::Paper];
        let e = enemy(EnemyPattern::Sequence {
            moves: moves.clone(),
            index: 2,
        });
        assert_eq!(get_enemy_move(&e, &[], 100), MoveType::Paper);

        let e = enemy(EnemyPattern::Sequence { moves, index: 5 });
        assert_eq!(get_enemy_move(&e, &[], 100), MoveType::Paper);

        let e = enemy(EnemyPattern::Sequence {
            moves: vec![],
            index: 0,
        });
        assert_eq!(get_enemy_move(&e, &[], 100), MoveType::Scissors);
    }

    #[test]
    fn test_phase_first_match_in_declared_order() {
        let e = enemy(EnemyPattern::Phase {
            phases: vec![
                phase(
                    50.0,
                    EnemyPattern::Predictable {
                        move_type: MoveType::Rock,
                    },
                ),
                phase(
                    100.0,
                    EnemyPattern::Predictable {
                        move_type: MoveType::Paper,
                    },
                ),
            ],
            current_phase: 0,
        });
        assert_eq!(get_enemy_move(&e, &[], 40), MoveType::Rock);
        assert_eq!(get_enemy_move(&e, &[], 50), MoveType::Rock);
        assert_eq!(get_enemy_move(&e, &[], 70), MoveType::Paper);
    }

    #[test]
    fn test_phase_without_match_falls_back() {
        let e = enemy(EnemyPattern::Phase {
            phases: vec![phase(
                30.0,
                EnemyPattern::Predictable {
                    move_type: MoveType::Rock,
                },
            )],
            current_phase: 0,
        });
        assert_eq!(get_enemy_move(&e, &[], 90), MoveType::Scissors);
    }

    #[test]
    fn test_phase_preferred_move_is_the_fallback() {
        let mut opening = phase(100.0, EnemyPattern::Reactive { counters: true });
        opening.preferred_move = Some(MoveType::Paper);
        let mut broken = phase(
            50.0,
            EnemyPattern::Sequence {
                moves: vec![],
                index: 0,
            },
        );
        broken.preferred_move = Some(MoveType::Rock);
        let e = enemy(EnemyPattern::Phase {
            phases: vec![broken, opening],
            current_phase: 1,
        });

        assert_eq!(get_enemy_move(&e, &[], 100), MoveType::Paper);
        assert_eq!(get_enemy_move(&e, &[], 40), MoveType::Rock);
        let history = vec![round_with_player_move(MoveType::Scissors)];
        assert_eq!(get_enemy_move(&e, &history, 100), MoveType::Rock);
    }

    #[test]
    fn test_phase_recurses_into_reactive() {
        let e = enemy(EnemyPattern::Phase {
            phases: vec![phase(100.0, EnemyPattern::Reactive { counters: true })],
            current_phase: 0,
        });
        assert_eq!(get_enemy_move(&e, &[], 80), MoveType::Scissors);
        let history = vec![round_with_player_move(MoveType::Rock)];
        assert_eq!(get_enemy_move(&e, &history, 80), MoveType::Paper);
    }

    #[test]
    fn test_unknown_falls_back_to_type() {
        let e = enemy(EnemyPattern::Unknown);
        assert_eq!(get_enemy_move(&e, &[], 100), MoveType::Scissors);
    }

    #[test]
    fn test_random_with_seeded_rng_covers_all_types() {
        let e = enemy(EnemyPattern::Random);
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = [false; 3];
        for _ in 0..200 {
            match get_enemy_move_with_rng(&e, &[], 100, &mut rng) {
                MoveType::Rock => seen[0] = true,
                MoveType::Paper => seen[1] = true,
                MoveType::Scissors => seen[2] = true,
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_advance_sequence_wraps() {
        let mut pattern = EnemyPattern::Sequence {
            moves: vec![MoveType::Rock, MoveType::Paper],
            index: 0,
        };
        pattern = advance_pattern(&pattern, 100.0);
        assert!(matches!(pattern, EnemyPattern::Sequence { index: 1, .. }));
        pattern = advance_pattern(&pattern, 100.0);
        assert!(matches!(pattern, EnemyPattern::Sequence { index: 0, .. }));
    }

    #[test]
    fn test_advance_phase_tracks_active_phase() {
        let pattern = EnemyPattern::Phase {
            phases: vec![
                phase(
                    50.0,
                    EnemyPattern::Sequence {
                        moves: vec![MoveType::Rock, MoveType::Paper],
                        index: 0,
                    },
                ),
                phase(100.0, EnemyPattern::Random),
            ],
            current_phase: 1,
        };

        let advanced = advance_pattern(&pattern, 40.0);
        match advanced {
            EnemyPattern::Phase {
                phases,
                current_phase,
            } => {
                assert_eq!(current_phase, 0);
                assert!(matches!(
                    *phases[0].pattern,
                    EnemyPattern::Sequence { index: 1, .. }
                ));
            }
            other => panic!("Expected phase pattern, got {:?}", other),
        }
    }

    #[test]
    fn test_advance_leaves_stateless_patterns() {
        let pattern = EnemyPattern::Reactive { counters: true };
        assert_eq!(advance_pattern(&pattern, 10.0), pattern);
    }

    #[test]
    fn test_hp_percent_zero_max() {
        assert_eq!(hp_percent(10, 0), 0.0);
        assert_eq!(hp_percent(40, 100), 40.0);
    }
}
