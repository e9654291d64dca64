//! Side-effect deltas for dialogue nodes and choices

use crate::config::{DialogueChoice, DialogueNode, SideEffects};
use crate::state::{GameState, StateDelta};

/// Alignment points a choice's tag adds to its type
pub const CHOICE_ALIGNMENT_SHIFT: i32 = 5;

/// Delta for entering a node
///
/// Flags already set and items already held are left out. The state itself
/// is never touched.
pub fn apply_effects(node: &DialogueNode, state: &GameState) -> StateDelta {
    node.side_effects
        .as_ref()
        .map(|effects| side_effects_delta(effects, state))
        .unwrap_or_default()
}

/// Delta for taking a choice: its alignment tag plus its own side effects
pub fn apply_choice_effects(choice: &DialogueChoice, state: &GameState) -> StateDelta {
    let mut delta = choice
        .side_effects
        .as_ref()
        .map(|effects| side_effects_delta(effects, state))
        .unwrap_or_default();

    if let Some(move_type) = choice.alignment.move_type() {
        delta.alignment.add(move_type, CHOICE_ALIGNMENT_SHIFT);
    }

    delta
}

/// Delta described by a side-effect block, relative to the current state
pub fn side_effects_delta(effects: &SideEffects, state: &GameState) -> StateDelta {
    let mut delta = StateDelta {
        relationships: effects.relationships.clone(),
        ..Default::default()
    };

    if let Some(alignment) = &effects.alignment {
        delta.alignment = *alignment;
    }

    for flag in &effects.flags {
        if !state.story.flag(flag) && !delta.flags.contains(flag) {
            delta.flags.push(flag.clone());
        }
    }

    for item in &effects.items {
        if !state.player.has_item(item) && !delta.items.contains(item) {
            delta.items.push(item.clone());
        }
    }

    delta
}
