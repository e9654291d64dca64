//! Achievement configuration structures

use serde::{Deserialize, Serialize};

use crate::config::SideEffects;

/// Achievement configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AchievementConfig {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Condition expression evaluated against the game state
    pub condition: String,
    /// Applied by the state store when the achievement unlocks
    pub reward: Option<SideEffects>,
}
