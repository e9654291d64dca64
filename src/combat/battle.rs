//! Battle driver
//!
//! Threads `CombatState` between rounds: enemy move selection, round
//! resolution, timed move effects, resolve and streak bookkeeping, boss phase
//! tracking and the end-of-battle delta. The pure functions in the sibling
//! modules do the actual math.

use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::HashMap;

use crate::alignment::{Alignment, AlignmentDelta};
use crate::combat::pattern::{
    advance_pattern, get_enemy_move_with_rng, hp_percent, random_move, select_phase,
};
use crate::combat::resolver::{calculate_damage, calculate_resolve_gain, resolve_round_with};
use crate::combat::state::{BattleEnd, CombatPhase, CombatState, Enemy};
use crate::combat::types::{RoundEffect, RoundResult, Side, Winner};
use crate::config::{
    CombatRules, ContentTables, EffectKind, EnemyConfig, EnemyPattern, EnemyRewards, MoveConfig,
    MoveType,
};
use crate::error::{AetherisError, Result};
use crate::state::{GameStats, PlayerState, StateDelta};

/// A timed effect currently in play
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveEffect {
    pub target: Side,
    pub kind: EffectKind,
    pub value: i32,
    /// Rounds left, including the next one
    pub remaining: u32,
}

/// Result of a Symbol Break
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolBreakResult {
    pub move_type: MoveType,
    pub damage: i32,
    pub enemy_hp: i32,
    pub effects: SmallVec<[RoundEffect; 2]>,
}

/// Final result of a finished battle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleOutcome {
    pub victory: bool,
    pub rounds: u32,
    pub delta: StateDelta,
}

/// One fight between the player and an enemy
#[derive(Debug, Clone)]
pub struct Battle {
    state: CombatState,
    enemy: Enemy,
    enemy_moves: HashMap<MoveType, MoveConfig>,
    rewards: EnemyRewards,
    player_alignment: Alignment,
    rules: CombatRules,
    effects: Vec<ActiveEffect>,
    active_phase: Option<usize>,
    symbol_breaks: u32,
}

impl Battle {
    /// Start a battle against an enemy from the content tables
    pub fn start(player: &PlayerState, enemy: &EnemyConfig, content: &ContentTables) -> Self {
        Self::with_rules(
            player,
            enemy,
            content.enemy_move_set(enemy),
            content.rules.clone(),
        )
    }

    /// Start a battle with an explicit enemy move set and rules
    pub fn with_rules(
        player: &PlayerState,
        enemy: &EnemyConfig,
        enemy_moves: HashMap<MoveType, MoveConfig>,
        rules: CombatRules,
    ) -> Self {
        let mut enemy_instance = Enemy::from_config(enemy);
        let active_phase = enemy_instance
            .phases()
            .and_then(|phases| select_phase(phases, 100.0));
        if let (EnemyPattern::Phase { current_phase, .. }, Some(index)) =
            (&mut enemy_instance.pattern, active_phase)
        {
            *current_phase = index;
        }

        let mut battle = Self {
            state: CombatState::new(
                player.hp,
                player.max_hp,
                enemy_instance.max_hp,
                rules.max_resolve,
            ),
            enemy: enemy_instance,
            enemy_moves,
            rewards: enemy.rewards.clone(),
            player_alignment: player.alignment,
            rules,
            effects: Vec::new(),
            active_phase,
            symbol_breaks: 0,
        };
        battle.update_phase();

        log::debug!(
            "Battle started: {} ({} HP) vs player ({} HP)",
            battle.enemy.id,
            battle.state.enemy_hp,
            battle.state.player_hp
        );

        battle
    }

    pub fn state(&self) -> &CombatState {
        &self.state
    }

    pub fn enemy(&self) -> &Enemy {
        &self.enemy
    }

    pub fn rules(&self) -> &CombatRules {
        &self.rules
    }

    pub fn active_effects(&self) -> &[ActiveEffect] {
        &self.effects
    }

    pub fn history(&self) -> &[RoundResult] {
        &self.state.history
    }

    pub fn is_over(&self) -> bool {
        self.state.phase.is_over()
    }

    /// Play one round with the player's chosen move
    ///
    /// # Errors
    /// `BattleOver` once the battle has been decided
    pub fn play_round<R: Rng + ?Sized>(
        &mut self,
        player_move: &MoveConfig,
        rng: &mut R,
    ) -> Result<RoundResult> {
        if self.is_over() {
            return Err(AetherisError::BattleOver);
        }

        self.state.phase = CombatPhase::Revealing;
        let hp_before = hp_percent(self.enemy.current_hp, self.enemy.max_hp);

        let enemy_type = if self.has_effect(Side::Enemy, EffectKind::Confusion) {
            random_move(rng)
        } else {
            get_enemy_move_with_rng(&self.enemy, &self.state.history, self.enemy.current_hp, rng)
        };
        let enemy_move = self
            .enemy_moves
            .get(&enemy_type)
            .cloned()
            .unwrap_or_else(|| MoveConfig::basic(enemy_type));
        self.state.current_moves = Some((player_move.move_type, enemy_type));

        self.state.phase = CombatPhase::Resolving;
        let mut result = resolve_round_with(
            player_move,
            &enemy_move,
            &self.player_alignment,
            self.enemy.alignment.as_ref(),
            &self.rules,
        );
        self.apply_active_effects(&mut result, player_move, &enemy_move);

        self.tick_effects();
        if let Some(side) = result.winner.side() {
            let winning_move = match side {
                Side::Player => player_move,
                Side::Enemy => &enemy_move,
            };
            if let Some(applied) = self.add_effect(side, winning_move) {
                result.effects.push(applied);
            }
        }

        self.state.round += 1;
        result.round = self.state.round;

        self.state.player_hp = (self.state.player_hp - result.enemy_damage).max(0);
        self.state.enemy_hp = (self.state.enemy_hp - result.player_damage).max(0);
        self.enemy.current_hp = self.state.enemy_hp;

        let gain = calculate_resolve_gain(&result, self.rules.resolve_base_gain);
        self.state.resolve = (self.state.resolve + gain).min(self.state.max_resolve);

        if result.winner == Winner::Player {
            self.state.consecutive_wins += 1;
        } else {
            self.state.consecutive_wins = 0;
        }

        self.enemy.pattern = advance_pattern(&self.enemy.pattern, hp_before);
        if let Some(shift) = self.sync_boss_phase() {
            result.effects.push(shift);
        }

        self.state.history.push(result.clone());
        self.update_phase();

        log::debug!(
            "Round {}: {:?}, player {} HP, enemy {} HP, resolve {}",
            result.round,
            result.winner,
            self.state.player_hp,
            self.state.enemy_hp,
            self.state.resolve
        );

        Ok(result)
    }

    /// Unleash a Symbol Break
    ///
    /// A forced critical with the player's dominant alignment type. It
    /// bypasses defense, consumes all resolve and resets the win streak. It
    /// takes no round and the enemy does not answer it.
    ///
    /// # Errors
    /// `BattleOver` once the battle has been decided, `SymbolBreakUnavailable`
    /// when neither the resolve nor the comeback path is open
    pub fn symbol_break(&mut self) -> Result<SymbolBreakResult> {
        if self.is_over() {
            return Err(AetherisError::BattleOver);
        }
        if !self.rules.can_use_symbol_break(
            self.state.resolve,
            self.state.consecutive_wins,
            self.state.player_hp,
        ) {
            return Err(AetherisError::SymbolBreakUnavailable);
        }

        let move_type = self.player_alignment.dominant();
        let strike = MoveConfig {
            id: "symbol_break".to_string(),
            name: "Symbol Break".to_string(),
            move_type,
            base_damage: self.rules.symbol_break_base_damage,
            effect: None,
        };
        let damage = calculate_damage(&strike, &self.player_alignment, move_type, true);

        self.state.enemy_hp = (self.state.enemy_hp - damage).max(0);
        self.enemy.current_hp = self.state.enemy_hp;
        self.state.resolve = 0;
        self.state.consecutive_wins = 0;
        self.symbol_breaks += 1;

        let mut effects = SmallVec::new();
        effects.push(RoundEffect::Critical { side: Side::Player });
        if let Some(shift) = self.sync_boss_phase() {
            effects.push(shift);
        }
        self.update_phase();

        log::debug!(
            "Symbol Break ({}) for {} damage, enemy at {} HP",
            move_type,
            damage,
            self.state.enemy_hp
        );

        Ok(SymbolBreakResult {
            move_type,
            damage,
            enemy_hp: self.state.enemy_hp,
            effects,
        })
    }

    /// State delta for a decided battle, `None` while it is still going
    ///
    /// Every round the player won shifts alignment by one point toward the
    /// winning move's type. Rewards are only granted on victory.
    pub fn outcome(&self) -> Option<BattleOutcome> {
        let victory = match self.state.phase {
            CombatPhase::Victory => true,
            CombatPhase::Defeat => false,
            _ => return None,
        };

        let mut alignment = AlignmentDelta::default();
        for round in &self.state.history {
            if round.winner == Winner::Player {
                alignment.add(round.player_move, 1);
            }
        }

        let mut delta = StateDelta {
            alignment,
            hp: Some(self.state.player_hp),
            stats: GameStats {
                battles_won: u32::from(victory),
                battles_lost: u32::from(!victory),
                symbol_breaks_used: self.symbol_breaks,
                rounds_played: self.state.round,
            },
            ..Default::default()
        };

        if victory {
            delta.xp = self.rewards.xp;
            delta.gold = self.rewards.gold;
            delta.items = self.rewards.items.clone();
            delta.defeated_enemy = Some(self.enemy.id.clone());
        }

        Some(BattleOutcome {
            victory,
            rounds: self.state.round,
            delta,
        })
    }

    fn has_effect(&self, target: Side, kind: EffectKind) -> bool {
        self.effect_value(target, kind).is_some()
    }

    fn effect_value(&self, target: Side, kind: EffectKind) -> Option<i32> {
        self.effects
            .iter()
            .find(|e| e.target == target && e.kind == kind)
            .map(|e| e.value)
    }

    /// Adjust the round's damage for effects already in play
    fn apply_active_effects(
        &self,
        result: &mut RoundResult,
        player_move: &MoveConfig,
        enemy_move: &MoveConfig,
    ) {
        let Some(attacker) = result.winner.side() else {
            for side in [Side::Player, Side::Enemy] {
                if self.has_effect(side, EffectKind::Speed) {
                    *result.damage_by_mut(side.opponent()) = 0;
                    result.effects.push(RoundEffect::Evaded { side });
                }
            }
            return;
        };

        if self.has_effect(attacker, EffectKind::Stun) {
            *result.damage_by_mut(attacker) = 0;
            result.effects.push(RoundEffect::Stunned { side: attacker });
            return;
        }

        let attacking_move = match attacker {
            Side::Player => player_move,
            Side::Enemy => enemy_move,
        };
        if attacking_move.ignores_defense() {
            return;
        }

        let defender = attacker.opponent();
        let mut damage = result.damage_by(attacker);

        if let Some(value) = self.effect_value(defender, EffectKind::Defense) {
            let blocked = percent_of(damage, value);
            if blocked > 0 {
                damage -= blocked;
                result.effects.push(RoundEffect::Blocked {
                    side: defender,
                    amount: blocked,
                });
            }
        }
        *result.damage_by_mut(attacker) = damage;

        if let Some(value) = self.effect_value(defender, EffectKind::Reflect) {
            let reflected = percent_of(damage, value);
            if reflected > 0 {
                let bounced = result.damage_by_mut(defender);
                *bounced = bounced.saturating_add(reflected);
                result.effects.push(RoundEffect::Reflected {
                    side: defender,
                    amount: reflected,
                });
            }
        }
    }

    fn tick_effects(&mut self) {
        for effect in &mut self.effects {
            effect.remaining = effect.remaining.saturating_sub(1);
        }
        self.effects.retain(|e| e.remaining > 0);
    }

    /// Put the winning move's timed effect in play, replacing one of the same kind
    fn add_effect(&mut self, user: Side, mv: &MoveConfig) -> Option<RoundEffect> {
        let effect = mv.effect.as_ref().filter(|e| e.kind.is_timed())?;
        let target = if effect.kind.targets_opponent() {
            user.opponent()
        } else {
            user
        };
        let duration = effect.rounds();

        self.effects
            .retain(|e| !(e.target == target && e.kind == effect.kind));
        self.effects.push(ActiveEffect {
            target,
            kind: effect.kind,
            value: effect.value,
            remaining: duration,
        });

        Some(RoundEffect::Applied {
            target,
            kind: effect.kind,
            value: effect.value,
            duration,
        })
    }

    /// Record a boss phase change at the enemy's current HP
    fn sync_boss_phase(&mut self) -> Option<RoundEffect> {
        let hp_pct = hp_percent(self.enemy.current_hp, self.enemy.max_hp);
        let EnemyPattern::Phase {
            phases,
            current_phase,
        } = &mut self.enemy.pattern
        else {
            return None;
        };

        let next = select_phase(phases, hp_pct);
        if next == self.active_phase {
            return None;
        }
        self.active_phase = next;

        let index = next?;
        *current_phase = index;
        log::info!("{} enters phase {}", self.enemy.id, phases[index].name);
        Some(RoundEffect::PhaseShift {
            phase: index,
            name: phases[index].name.clone(),
        })
    }

    fn update_phase(&mut self) {
        self.state.phase = match self.state.battle_end() {
            BattleEnd::Victory => CombatPhase::Victory,
            BattleEnd::Defeat => CombatPhase::Defeat,
            BattleEnd::Ongoing => CombatPhase::Waiting,
        };
        self.state.symbol_break_available = !self.state.phase.is_over()
            && self.rules.can_use_symbol_break(
                self.state.resolve,
                self.state.consecutive_wins,
                self.state.player_hp,
            );
    }
}

/// `floor(amount * percent / 100)` with the percentage clamped to [0, 100]
#[inline]
fn percent_of(amount: i32, percent: i32) -> i32 {
    // percent <= 100, so the quotient fits back in i32
    (i64::from(amount) * i64::from(percent.clamp(0, 100)) / 100) as i32
}
