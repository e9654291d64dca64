//! Achievement checking logic

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::condition::cache::check_condition_or_false;
use crate::config::AchievementConfig;
use crate::dialogue::side_effects_delta;
use crate::state::{GameState, StateDelta};

/// Achievement info for results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Reward delta relative to the state the check ran against
    pub reward: StateDelta,
}

/// Achievements whose condition now holds and that are not yet unlocked,
/// sorted by id
pub fn check_achievements(
    state: &GameState,
    unlocked: &HashSet<String>,
    achievements: &HashMap<String, AchievementConfig>,
) -> Vec<AchievementInfo> {
    let mut new_achievements: Vec<AchievementInfo> = achievements
        .values()
        .filter(|a| !unlocked.contains(&a.id))
        .filter(|a| check_condition_or_false(&a.condition, state))
        .map(|a| AchievementInfo {
            id: a.id.clone(),
            name: a.name.clone(),
            description: a.description.clone(),
            reward: a
                .reward
                .as_ref()
                .map(|r| side_effects_delta(r, state))
                .unwrap_or_default(),
        })
        .collect();

    new_achievements.sort_by(|a, b| a.id.cmp(&b.id));
    new_achievements
}

/// Unlock an achievement, returning the new unlocked set
pub fn unlock_achievement(achievement_id: &str, unlocked: &HashSet<String>) -> HashSet<String> {
    let mut next = unlocked.clone();
    next.insert(achievement_id.to_string());
    next
}
