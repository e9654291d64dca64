//! Condition evaluator

use std::borrow::Cow;

use crate::condition::ast::{CollectionProperty, Expr, NumberProperty, Predicate};
use crate::dialogue::RelationshipStatus;
use crate::state::GameState;

/// Evaluate an expression against a GameState
pub fn check(expr: &Expr, state: &GameState) -> bool {
    match expr {
        Expr::Test(predicate) => test(predicate, state),
        Expr::And(left, right) => check(left, state) && check(right, state),
        Expr::Or(left, right) => check(left, state) || check(right, state),
    }
}

fn test(predicate: &Predicate, state: &GameState) -> bool {
    match predicate {
        Predicate::Number {
            property,
            comparison,
            value,
        } => comparison.holds(property.read(state) as f64, *value),
        Predicate::Dominant { test, values } => {
            test.holds(values.contains(&state.player.alignment.dominant()))
        }
        Predicate::Status { npc, test, values } => {
            let status = RelationshipStatus::from_value(state.story.relationship(npc));
            test.holds(values.contains(&status))
        }
        Predicate::Collection {
            property,
            test,
            values,
        } => {
            let held = property.read(state);
            test.holds(values.iter().any(|v| held.contains(v)))
        }
    }
}

impl NumberProperty {
    /// Current value in `state`; unset flags and unknown NPCs read as 0
    pub fn read(&self, state: &GameState) -> i64 {
        let player = &state.player;
        let stats = &state.stats;
        match self {
            NumberProperty::Alignment(move_type) => player.alignment.get(*move_type).into(),
            NumberProperty::Level => player.level.into(),
            NumberProperty::Xp => player.xp.into(),
            NumberProperty::Gold => player.gold.into(),
            NumberProperty::Hp => player.hp.into(),
            NumberProperty::BattlesWon => stats.battles_won.into(),
            NumberProperty::BattlesLost => stats.battles_lost.into(),
            NumberProperty::SymbolBreaks => stats.symbol_breaks_used.into(),
            NumberProperty::Rounds => stats.rounds_played.into(),
            NumberProperty::Flag(name) => state.story.flag(name).into(),
            NumberProperty::Relationship(npc) => state.story.relationship(npc).into(),
        }
    }
}

impl CollectionProperty {
    pub fn read<'s>(&self, state: &'s GameState) -> Cow<'s, [String]> {
        match self {
            CollectionProperty::Items => Cow::Borrowed(state.player.inventory.as_slice()),
            CollectionProperty::Flags => Cow::Owned(state.story.set_flags()),
            CollectionProperty::Defeated => Cow::Borrowed(state.story.defeated_enemies.as_slice()),
        }
    }
}
