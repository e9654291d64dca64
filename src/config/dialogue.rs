//! Dialogue configuration structures

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::alignment::AlignmentDelta;
use crate::config::MoveType;

/// A node of the dialogue graph
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogueNode {
    pub id: String,
    pub speaker: String,
    pub text: String,
    #[serde(default)]
    pub choices: Vec<DialogueChoice>,
    pub side_effects: Option<SideEffects>,
    /// Checked in order, first match reroutes
    #[serde(default)]
    pub conditional_next: Vec<ConditionalNext>,
    /// Follow-up for nodes without choices
    pub next_node_id: Option<String>,
}

/// A player choice on a dialogue node
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogueChoice {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub alignment: ChoiceAlignment,
    pub next_node_id: Option<String>,
    pub side_effects: Option<SideEffects>,
    pub requirements: Option<ChoiceRequirements>,
}

/// Alignment flavour of a choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChoiceAlignment {
    Rock,
    Paper,
    Scissors,
    #[default]
    Neutral,
}

impl ChoiceAlignment {
    pub fn move_type(self) -> Option<MoveType> {
        match self {
            ChoiceAlignment::Rock => Some(MoveType::Rock),
            ChoiceAlignment::Paper => Some(MoveType::Paper),
            ChoiceAlignment::Scissors => Some(MoveType::Scissors),
            ChoiceAlignment::Neutral => None,
        }
    }
}

/// Requirements gating a choice
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceRequirements {
    pub min_alignment: Option<AlignmentRequirement>,
    #[serde(default)]
    pub items: Vec<String>,
    #[serde(default)]
    pub flags: Vec<String>,
    /// Minimum relationship per NPC id
    #[serde(default)]
    pub relationships: BTreeMap<String, i32>,
}

/// Per-type minimum alignment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlignmentRequirement {
    pub rock: Option<i32>,
    pub paper: Option<i32>,
    pub scissors: Option<i32>,
}

impl AlignmentRequirement {
    /// Listed minimums in rock, paper, scissors order
    pub fn minimums(&self) -> impl Iterator<Item = (MoveType, i32)> + '_ {
        [
            (MoveType::Rock, self.rock),
            (MoveType::Paper, self.paper),
            (MoveType::Scissors, self.scissors),
        ]
        .into_iter()
        .filter_map(|(t, min)| min.map(|m| (t, m)))
    }
}

/// Effects applied when a node is shown or a choice is taken
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SideEffects {
    pub alignment: Option<AlignmentDelta>,
    #[serde(default)]
    pub relationships: BTreeMap<String, i32>,
    #[serde(default)]
    pub flags: Vec<String>,
    #[serde(default)]
    pub items: Vec<String>,
}

/// Conditional reroute entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionalNext {
    /// Condition expression, e.g. "FLAG.met_elder=1 & REL.elder>=20"
    pub condition: String,
    pub next_node_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_node() {
        let json = r#"{
            "id": "gate",
            "speaker": "Warden",
            "text": "Halt.",
            "choices": [
                {
                    "id": "force",
                    "text": "Push past",
                    "alignment": "rock",
                    "nextNodeId": "fight",
                    "requirements": {"minAlignment": {"rock": 50}, "items": ["iron_key"]}
                },
                {"id": "leave", "text": "Walk away", "nextNodeId": "road"}
            ],
            "conditionalNext": [{"condition": "FLAG.gate_open=1", "nextNodeId": "courtyard"}]
        }"#;
        let node: DialogueNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.choices.len(), 2);
        assert_eq!(node.choices[0].alignment, ChoiceAlignment::Rock);
        assert_eq!(node.choices[1].alignment, ChoiceAlignment::Neutral);
        let req = node.choices[0].requirements.as_ref().unwrap();
        let mins: Vec<_> = req.min_alignment.as_ref().unwrap().minimums().collect();
        assert_eq!(mins, vec![(MoveType::Rock, 50)]);
        assert_eq!(node.conditional_next[0].next_node_id, "courtyard");
    }
}
