//! State deltas produced by the engines and applied by the state store

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::alignment::AlignmentDelta;
use crate::dialogue::apply_relationship_delta;
use crate::state::{GameState, GameStats};

/// Changes to apply to a `GameState`
///
/// Engines only ever build deltas. Applying one is the state store's job;
/// `apply_to` implements the store-side rules so every caller agrees on them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StateDelta {
    pub alignment: AlignmentDelta,
    pub relationships: BTreeMap<String, i32>,
    pub flags: Vec<String>,
    pub items: Vec<String>,
    pub xp: u32,
    pub gold: u32,
    /// Player HP to set, if any
    pub hp: Option<i32>,
    pub defeated_enemy: Option<String>,
    pub stats: GameStats,
}

impl StateDelta {
    pub fn is_empty(&self) -> bool {
        *self == StateDelta::default()
    }

    /// Fold another delta into this one
    pub fn merge(&mut self, other: &StateDelta) {
        self.alignment.merge(&other.alignment);
        for (npc, delta) in &other.relationships {
            *self.relationships.entry(npc.clone()).or_insert(0) += delta;
        }
        for flag in &other.flags {
            if !self.flags.contains(flag) {
                self.flags.push(flag.clone());
            }
        }
        for item in &other.items {
            if !self.items.contains(item) {
                self.items.push(item.clone());
            }
        }
        self.xp += other.xp;
        self.gold += other.gold;
        if other.hp.is_some() {
            self.hp = other.hp;
        }
        if other.defeated_enemy.is_some() {
            self.defeated_enemy = other.defeated_enemy.clone();
        }
        self.stats.battles_won += other.stats.battles_won;
        self.stats.battles_lost += other.stats.battles_lost;
        self.stats.symbol_breaks_used += other.stats.symbol_breaks_used;
        self.stats.rounds_played += other.stats.rounds_played;
    }

    /// Apply to a state: alignment renormalized, relationships clamped to
    /// [-100, 100] individually, flags set, items granted once
    pub fn apply_to(&self, state: &mut GameState) {
        if !self.alignment.is_zero() {
            state.player.alignment = state.player.alignment.apply_delta(&self.alignment);
        }

        for (npc, delta) in &self.relationships {
            let current = state.story.relationship(npc);
            state
                .story
                .npc_relationships
                .insert(npc.clone(), apply_relationship_delta(current, *delta));
        }

        for flag in &self.flags {
            state.story.story_flags.insert(flag.clone(), true);
        }

        for item in &self.items {
            if !state.player.has_item(item) {
                state.player.inventory.push(item.clone());
            }
        }

        state.player.xp += self.xp;
        state.player.gold += self.gold;
        if let Some(hp) = self.hp {
            state.player.hp = hp.clamp(0, state.player.max_hp);
        }

        if let Some(ref enemy) = self.defeated_enemy {
            if !state.story.defeated_enemies.contains(enemy) {
                state.story.defeated_enemies.push(enemy.clone());
            }
        }

        let stats = &mut state.stats;
        stats.battles_won += self.stats.battles_won;
        stats.battles_lost += self.stats.battles_lost;
        stats.symbol_breaks_used += self.stats.symbol_breaks_used;
        stats.rounds_played += self.stats.rounds_played;
    }
}
