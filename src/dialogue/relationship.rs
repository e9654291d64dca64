//! NPC relationship values and status tiers

use serde::{Deserialize, Serialize};
use std::fmt;

pub const RELATIONSHIP_MIN: i32 = -100;
pub const RELATIONSHIP_MAX: i32 = 100;

/// Status tier derived from a relationship value
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipStatus {
    Hostile,
    Unfriendly,
    Neutral,
    Friendly,
    Trusted,
}

impl RelationshipStatus {
    /// Tier for a value: hostile < -50 <= unfriendly < -20 <= neutral < 20 <= friendly < 50 <= trusted
    pub fn from_value(value: i32) -> Self {
        match value {
            v if v < -50 => RelationshipStatus::Hostile,
            v if v < -20 => RelationshipStatus::Unfriendly,
            v if v < 20 => RelationshipStatus::Neutral,
            v if v < 50 => RelationshipStatus::Friendly,
            _ => RelationshipStatus::Trusted,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RelationshipStatus::Hostile => "hostile",
            RelationshipStatus::Unfriendly => "unfriendly",
            RelationshipStatus::Neutral => "neutral",
            RelationshipStatus::Friendly => "friendly",
            RelationshipStatus::Trusted => "trusted",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "hostile" => Some(RelationshipStatus::Hostile),
            "unfriendly" => Some(RelationshipStatus::Unfriendly),
            "neutral" => Some(RelationshipStatus::Neutral),
            "friendly" => Some(RelationshipStatus::Friendly),
            "trusted" => Some(RelationshipStatus::Trusted),
            _ => None,
        }
    }
}

impl fmt::Display for RelationshipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[inline]
pub fn clamp_relationship(value: i32) -> i32 {
    value.clamp(RELATIONSHIP_MIN, RELATIONSHIP_MAX)
}

/// Add a delta to a relationship, clamped to [-100, 100]
#[inline]
pub fn apply_relationship_delta(current: i32, delta: i32) -> i32 {
    clamp_relationship(current.saturating_add(delta))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(RelationshipStatus::from_value(-100), RelationshipStatus::Hostile);
        assert_eq!(RelationshipStatus::from_value(-51), RelationshipStatus::Hostile);
        assert_eq!(RelationshipStatus::from_value(-50), RelationshipStatus::Unfriendly);
        assert_eq!(RelationshipStatus::from_value(-21), RelationshipStatus::Unfriendly);
        assert_eq!(RelationshipStatus::from_value(-20), RelationshipStatus::Neutral);
        assert_eq!(RelationshipStatus::from_value(19), RelationshipStatus::Neutral);
        assert_eq!(RelationshipStatus::from_value(20), RelationshipStatus::Friendly);
        assert_eq!(RelationshipStatus::from_value(49), RelationshipStatus::Friendly);
        assert_eq!(RelationshipStatus::from_value(50), RelationshipStatus::Trusted);
        assert_eq!(RelationshipStatus::from_value(100), RelationshipStatus::Trusted);
    }

    #[test]
    fn test_status_names() {
        for value in [-80, -30, 0, 30, 80] {
            let status = RelationshipStatus::from_value(value);
            assert_eq!(RelationshipStatus::from_name(status.as_str()), Some(status));
        }
        assert_eq!(RelationshipStatus::from_name("Trusted"), None);
    }

    #[test]
    fn test_clamping() {
        assert_eq!(apply_relationship_delta(90, 30), 100);
        assert_eq!(apply_relationship_delta(-90, -30), -100);
        assert_eq!(apply_relationship_delta(10, -5), 5);
        assert_eq!(apply_relationship_delta(0, i32::MAX), 100);
    }
}
