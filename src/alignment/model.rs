//! Alignment split and its arithmetic

use serde::{Deserialize, Serialize};

use crate::config::MoveType;
use crate::error::{AetherisError, Result};

/// Total every alignment sums to
pub const ALIGNMENT_TOTAL: i32 = 100;

/// Allowed drift from the total when validating
const SUM_TOLERANCE: i32 = 1;

/// Percentage affinity across the three move types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alignment {
    pub rock: i32,
    pub paper: i32,
    pub scissors: i32,
}

/// Component-wise change to an alignment, renormalized after applying
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignmentDelta {
    pub rock: i32,
    pub paper: i32,
    pub scissors: i32,
}

impl Alignment {
    /// Create a validated alignment
    ///
    /// # Errors
    /// `InvalidAlignment` when a component is negative or the sum is off
    pub fn new(rock: i32, paper: i32, scissors: i32) -> Result<Self> {
        let alignment = Self {
            rock,
            paper,
            scissors,
        };
        if alignment.is_valid() {
            Ok(alignment)
        } else {
            Err(AetherisError::InvalidAlignment(format!(
                "{}/{}/{} must be non-negative and sum to {}",
                rock, paper, scissors, ALIGNMENT_TOTAL
            )))
        }
    }

    /// Even split, remainder to rock
    pub fn balanced() -> Self {
        Self {
            rock: 34,
            paper: 33,
            scissors: 33,
        }
    }

    /// Scale arbitrary weights to a split summing to exactly 100
    ///
    /// Negative weights count as zero. Shares are floored and the leftover
    /// points go to the largest fractional parts, ties broken rock, paper,
    /// scissors. All-zero weights give the balanced split.
    pub fn normalized(rock: i32, paper: i32, scissors: i32) -> Self {
        let weights = [rock.max(0), paper.max(0), scissors.max(0)];
        let total: i64 = weights.iter().map(|&w| w as i64).sum();
        if total == 0 {
            return Self::balanced();
        }

        let mut shares = [0i32; 3];
        let mut remainders = [(0i64, 0usize); 3];
        for (i, &w) in weights.iter().enumerate() {
            let scaled = w as i64 * ALIGNMENT_TOTAL as i64;
            shares[i] = (scaled / total) as i32;
            remainders[i] = (scaled % total, i);
        }

        let mut leftover = ALIGNMENT_TOTAL - shares.iter().sum::<i32>();
        // Stable sort keeps rock/paper/scissors order among equal remainders
        remainders.sort_by(|a, b| b.0.cmp(&a.0));
        for (_, i) in remainders {
            if leftover == 0 {
                break;
            }
            shares[i] += 1;
            leftover -= 1;
        }

        Self {
            rock: shares[0],
            paper: shares[1],
            scissors: shares[2],
        }
    }

    #[inline]
    pub fn get(&self, move_type: MoveType) -> i32 {
        match move_type {
            MoveType::Rock => self.rock,
            MoveType::Paper => self.paper,
            MoveType::Scissors => self.scissors,
        }
    }

    #[inline]
    pub fn sum(&self) -> i32 {
        self.rock + self.paper + self.scissors
    }

    pub fn is_valid(&self) -> bool {
        self.rock >= 0
            && self.paper >= 0
            && self.scissors >= 0
            && (self.sum() - ALIGNMENT_TOTAL).abs() <= SUM_TOLERANCE
    }

    /// Highest component, ties resolved rock, paper, scissors
    pub fn dominant(&self) -> MoveType {
        let mut best = MoveType::Rock;
        for t in [MoveType::Paper, MoveType::Scissors] {
            if self.get(t) > self.get(best) {
                best = t;
            }
        }
        best
    }

    /// Add a delta component-wise and renormalize to 100
    pub fn apply_delta(&self, delta: &AlignmentDelta) -> Self {
        Self::normalized(
            self.rock + delta.rock,
            self.paper + delta.paper,
            self.scissors + delta.scissors,
        )
    }
}

impl Default for Alignment {
    fn default() -> Self {
        Self::balanced()
    }
}

impl AlignmentDelta {
    /// Delta touching a single type
    pub fn toward(move_type: MoveType, amount: i32) -> Self {
        let mut delta = Self::default();
        delta.add(move_type, amount);
        delta
    }

    pub fn add(&mut self, move_type: MoveType, amount: i32) {
        match move_type {
            MoveType::Rock => self.rock += amount,
            MoveType::Paper => self.paper += amount,
            MoveType::Scissors => self.scissors += amount,
        }
    }

    pub fn merge(&mut self, other: &AlignmentDelta) {
        self.rock += other.rock;
        self.paper += other.paper;
        self.scissors += other.scissors;
    }

    pub fn is_zero(&self) -> bool {
        self.rock == 0 && self.paper == 0 && self.scissors == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates() {
        assert!(Alignment::new(70, 20, 10).is_ok());
        assert!(Alignment::new(33, 33, 33).is_ok()); // within tolerance
        assert!(Alignment::new(50, 50, 50).is_err());
        assert!(Alignment::new(110, -10, 0).is_err());
    }

    #[test]
    fn test_normalized_exact_sum() {
        let a = Alignment::normalized(1, 1, 1);
        assert_eq!(a, Alignment::balanced());

        let a = Alignment::normalized(75, 25, 20);
        assert_eq!(a.sum(), 100);
        // 62.5 / 20.83 / 16.67 -> 62 + 21 + 17
        assert_eq!(a, Alignment { rock: 62, paper: 21, scissors: 17 });
    }

    #[test]
    fn test_normalized_zero_and_negative() {
        assert_eq!(Alignment::normalized(0, 0, 0), Alignment::balanced());
        assert_eq!(
            Alignment::normalized(-5, 50, 50),
            Alignment { rock: 0, paper: 50, scissors: 50 }
        );
    }

    #[test]
    fn test_apply_delta() {
        let a = Alignment::new(70, 20, 10).unwrap();
        let b = a.apply_delta(&AlignmentDelta::toward(MoveType::Paper, 10));
        // 70/30/10 of 110
        assert_eq!(b.sum(), 100);
        assert!(b.paper > a.paper);
        assert!(b.rock < a.rock);
    }

    #[test]
    fn test_zero_delta_is_identity() {
        let a = Alignment::new(70, 20, 10).unwrap();
        assert_eq!(a.apply_delta(&AlignmentDelta::default()), a);
    }

    #[test]
    fn test_dominant() {
        assert_eq!(Alignment::new(70, 20, 10).unwrap().dominant(), MoveType::Rock);
        assert_eq!(Alignment::new(10, 20, 70).unwrap().dominant(), MoveType::Scissors);
        assert_eq!(Alignment::new(40, 40, 20).unwrap().dominant(), MoveType::Rock);
    }
}
