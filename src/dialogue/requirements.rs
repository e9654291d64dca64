//! Choice requirement checks and lock reasons

use crate::config::ChoiceRequirements;
use crate::state::GameState;

/// Separator between lock reasons of different categories
pub const LOCK_REASON_SEPARATOR: &str = "; ";

/// Whether a choice's requirements hold; no requirements always hold
pub fn meets_requirements(requirements: Option<&ChoiceRequirements>, state: &GameState) -> bool {
    requirements.map_or(true, |req| lock_reasons(req, state).is_empty())
}

/// Tooltip for a locked choice, `None` when the choice is available
pub fn lock_tooltip(requirements: Option<&ChoiceRequirements>, state: &GameState) -> Option<String> {
    let reasons = lock_reasons(requirements?, state);
    if reasons.is_empty() {
        None
    } else {
        Some(reasons.join(LOCK_REASON_SEPARATOR))
    }
}

/// One label per failing category: alignment, items, flags, relationships
pub fn lock_reasons(req: &ChoiceRequirements, state: &GameState) -> Vec<String> {
    let mut reasons = Vec::new();

    if let Some(min) = &req.min_alignment {
        let missing: Vec<String> = min
            .minimums()
            .filter(|&(t, value)| state.player.alignment.get(t) < value)
            .map(|(t, value)| format!("{} {}%", t.label(), value))
            .collect();
        if !missing.is_empty() {
            reasons.push(format!("Requires {}", missing.join(", ")));
        }
    }

    let missing_items: Vec<&str> = req
        .items
        .iter()
        .filter(|item| !state.player.has_item(item))
        .map(String::as_str)
        .collect();
    if !missing_items.is_empty() {
        reasons.push(format!("Requires item: {}", missing_items.join(", ")));
    }

    let missing_flags: Vec<&str> = req
        .flags
        .iter()
        .filter(|flag| !state.story.flag(flag))
        .map(String::as_str)
        .collect();
    if !missing_flags.is_empty() {
        reasons.push(format!("Requires: {}", missing_flags.join(", ")));
    }

    let low_relationships: Vec<String> = req
        .relationships
        .iter()
        .filter(|(npc, min)| state.story.relationship(npc) < **min)
        .map(|(npc, min)| format!("{} relationship {}", npc, min))
        .collect();
    if !low_relationships.is_empty() {
        reasons.push(format!("Requires {}", low_relationships.join(", ")));
    }

    reasons
}
