//! Dialogue node evaluation and navigation

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::condition::check_condition_or_false;
use crate::config::{ChoiceAlignment, DialogueChoice, DialogueNode};
use crate::dialogue::effects::{apply_choice_effects, apply_effects};
use crate::dialogue::requirements::lock_tooltip;
use crate::error::{AetherisError, Result};
use crate::state::{GameState, StateDelta};

/// Reroutes followed by `DialogueEngine::display` before giving up
pub const MAX_REROUTE_HOPS: usize = 16;

/// A choice as the player sees it right now
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluatedChoice {
    pub id: String,
    pub text: String,
    pub alignment: ChoiceAlignment,
    pub next_node_id: Option<String>,
    pub locked: bool,
    pub locked_tooltip: Option<String>,
}

/// A node ready for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeView {
    pub id: String,
    pub speaker: String,
    pub text: String,
    pub choices: Vec<EvaluatedChoice>,
    pub next_node_id: Option<String>,
    /// Side effects of entering this node
    pub delta: StateDelta,
}

/// What a node resolves to for the current state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "node", rename_all = "lowercase")]
pub enum EffectiveNode {
    /// Show another node instead
    Reroute(String),
    Show(NodeView),
}

/// Outcome of taking a choice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceOutcome {
    pub next_node_id: Option<String>,
    pub delta: StateDelta,
}

/// Evaluate a choice's lock state
pub fn evaluate_choice(choice: &DialogueChoice, state: &GameState) -> EvaluatedChoice {
    let locked_tooltip = lock_tooltip(choice.requirements.as_ref(), state);
    EvaluatedChoice {
        id: choice.id.clone(),
        text: choice.text.clone(),
        alignment: choice.alignment,
        next_node_id: choice.next_node_id.clone(),
        locked: locked_tooltip.is_some(),
        locked_tooltip,
    }
}

/// First conditional reroute whose condition holds, in declared order
pub fn find_reroute<'a>(node: &'a DialogueNode, state: &GameState) -> Option<&'a str> {
    node.conditional_next
        .iter()
        .find(|entry| check_condition_or_false(&entry.condition, state))
        .map(|entry| entry.next_node_id.as_str())
}

/// Evaluate a node against the current state
pub fn evaluate_node(node: &DialogueNode, state: &GameState) -> EffectiveNode {
    if let Some(target) = find_reroute(node, state) {
        return EffectiveNode::Reroute(target.to_string());
    }

    EffectiveNode::Show(NodeView {
        id: node.id.clone(),
        speaker: node.speaker.clone(),
        text: node.text.clone(),
        choices: node
            .choices
            .iter()
            .map(|choice| evaluate_choice(choice, state))
            .collect(),
        next_node_id: node.next_node_id.clone(),
        delta: apply_effects(node, state),
    })
}

/// Navigation over a dialogue node table
pub struct DialogueEngine<'a> {
    nodes: &'a HashMap<String, DialogueNode>,
}

impl<'a> DialogueEngine<'a> {
    pub fn new(nodes: &'a HashMap<String, DialogueNode>) -> Self {
        Self { nodes }
    }

    fn node(&self, id: &str) -> Result<&'a DialogueNode> {
        self.nodes
            .get(id)
            .ok_or_else(|| AetherisError::NodeNotFound(id.to_string()))
    }

    /// The node to show for `node_id`, following reroutes
    ///
    /// # Errors
    /// `NodeNotFound` for a missing node along the way, `RerouteLoop` after
    /// more than `MAX_REROUTE_HOPS` reroutes
    pub fn display(&self, node_id: &str, state: &GameState) -> Result<NodeView> {
        let mut current = node_id.to_string();

        for _ in 0..=MAX_REROUTE_HOPS {
            match evaluate_node(self.node(&current)?, state) {
                EffectiveNode::Show(view) => return Ok(view),
                EffectiveNode::Reroute(next) => {
                    log::debug!("Dialogue reroute {} -> {}", current, next);
                    current = next;
                }
            }
        }

        Err(AetherisError::RerouteLoop(node_id.to_string()))
    }

    /// Take a choice on a displayed node
    ///
    /// Without its own target the choice continues to the node's `nextNodeId`.
    ///
    /// # Errors
    /// `NodeNotFound`, `ChoiceNotFound`, or `ChoiceLocked` when requirements fail
    pub fn choose(&self, node_id: &str, choice_id: &str, state: &GameState) -> Result<ChoiceOutcome> {
        let node = self.node(node_id)?;
        let choice = node
            .choices
            .iter()
            .find(|c| c.id == choice_id)
            .ok_or_else(|| AetherisError::ChoiceNotFound {
                node: node_id.to_string(),
                choice: choice_id.to_string(),
            })?;

        if let Some(reason) = lock_tooltip(choice.requirements.as_ref(), state) {
            return Err(AetherisError::ChoiceLocked(choice_id.to_string(), reason));
        }

        Ok(ChoiceOutcome {
            next_node_id: choice
                .next_node_id
                .clone()
                .or_else(|| node.next_node_id.clone()),
            delta: apply_choice_effects(choice, state),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alignment::Alignment;
    use crate::config::{sample_content, ConditionalNext};

    fn node(id: &str, reroutes: &[(&str, &str)]) -> DialogueNode {
        DialogueNode {
            id: id.to_string(),
            speaker: "Narrator".to_string(),
            text: id.to_string(),
            choices: Vec::new(),
            side_effects: None,
            conditional_next: reroutes
                .iter()
                .map(|(condition, next)| ConditionalNext {
                    condition: condition.to_string(),
                    next_node_id: next.to_string(),
                })
                .collect(),
            next_node_id: None,
        }
    }

    #[test]
    fn test_choices_lock_on_alignment() {
        let content = sample_content();
        let greeting = content.get_node("elder_greeting").unwrap();

        let mut state = GameState::default();
        state.player.alignment = Alignment::normalized(49, 51, 0);
        let EffectiveNode::Show(view) = evaluate_node(greeting, &state) else {
            panic!("Expected greeting to display");
        };
        let boast = view.choices.iter().find(|c| c.id == "boast").unwrap();
        assert!(boast.locked);
        assert_eq!(boast.locked_tooltip.as_deref(), Some("Requires Rock 50%"));
        assert!(!view.choices.iter().find(|c| c.id == "slip").unwrap().locked);

        state.player.alignment = Alignment::normalized(50, 50, 0);
        let EffectiveNode::Show(view) = evaluate_node(greeting, &state) else {
            panic!("Expected greeting to display");
        };
        assert!(!view.choices[0].locked);
        assert!(view.choices[0].locked_tooltip.is_none());
    }

    #[test]
    fn test_first_matching_reroute_wins() {
        let content = sample_content();
        let greeting = content.get_node("elder_greeting").unwrap();

        let mut state = GameState::default();
        state
            .story
            .story_flags
            .insert("golem_defeated".to_string(), true);
        state.story.npc_relationships.insert("elder".to_string(), -80);

        assert_eq!(
            evaluate_node(greeting, &state),
            EffectiveNode::Reroute("elder_grateful".to_string())
        );

        state.story.story_flags.clear();
        assert_eq!(
            evaluate_node(greeting, &state),
            EffectiveNode::Reroute("elder_cold".to_string())
        );
    }

    #[test]
    fn test_unparsable_reroute_is_skipped() {
        let n = node("start", &[("((", "broken"), ("LEVEL>=1", "next")]);
        assert_eq!(
            evaluate_node(&n, &GameState::default()),
            EffectiveNode::Reroute("next".to_string())
        );
    }

    #[test]
    fn test_display_follows_reroutes() {
        let content = sample_content();
        let engine = DialogueEngine::new(&content.dialogue);

        let mut state = GameState::default();
        state
            .story
            .story_flags
            .insert("golem_defeated".to_string(), true);

        let view = engine.display("elder_greeting", &state).unwrap();
        assert_eq!(view.id, "elder_grateful");
        assert_eq!(view.delta.relationships.get("elder"), Some(&30));
        assert_eq!(view.delta.flags, vec!["elder_thanked".to_string()]);
    }

    #[test]
    fn test_display_detects_loops() {
        let mut nodes = HashMap::new();
        nodes.insert("a".to_string(), node("a", &[("LEVEL>=1", "b")]));
        nodes.insert("b".to_string(), node("b", &[("LEVEL>=1", "a")]));
        let engine = DialogueEngine::new(&nodes);

        assert!(matches!(
            engine.display("a", &GameState::default()),
            Err(AetherisError::RerouteLoop(id)) if id == "a"
        ));
        assert!(matches!(
            engine.display("missing", &GameState::default()),
            Err(AetherisError::NodeNotFound(_))
        ));
    }

    #[test]
    fn test_choose() {
        let content = sample_content();
        let engine = DialogueEngine::new(&content.dialogue);
        let state = GameState::default();

        let outcome = engine.choose("elder_greeting", "slip", &state).unwrap();
        assert_eq!(outcome.next_node_id.as_deref(), Some("elder_farewell"));
        assert_eq!(outcome.delta.relationships.get("elder"), Some(&-5));
        assert_eq!(outcome.delta.alignment.scissors, 5);

        assert!(matches!(
            engine.choose("elder_greeting", "study", &state),
            Err(AetherisError::ChoiceLocked(..))
        ));
        assert!(matches!(
            engine.choose("elder_greeting", "dance", &state),
            Err(AetherisError::ChoiceNotFound { .. })
        ));
    }

    #[test]
    fn test_applied_delta_unlocks_choice() {
        let content = sample_content();
        let engine = DialogueEngine::new(&content.dialogue);
        let mut state = GameState::default();
        state.player.inventory.push("library_pass".to_string());
        state.story.npc_relationships.insert("elder".to_string(), 15);

        assert!(engine.choose("elder_greeting", "study", &state).is_err());

        let warning = engine.display("elder_warning", &state).unwrap();
        warning.delta.apply_to(&mut state);
        assert_eq!(state.story.relationship("elder"), 20);

        let outcome = engine.choose("elder_greeting", "study", &state).unwrap();
        assert_eq!(outcome.next_node_id.as_deref(), Some("elder_archives"));
    }
}
