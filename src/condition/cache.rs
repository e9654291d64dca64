//! Condition parsing cache

use crate::condition::ast::Expr;
use crate::condition::parser;
use crate::error::Result;
use crate::state::GameState;
use ahash::AHashMap;
use once_cell::sync::Lazy;
use parking_lot::RwLock;

/// Global condition cache with fast hashing (ahash)
static CONDITION_CACHE: Lazy<RwLock<AHashMap<String, Expr>>> = Lazy::new(|| {
    let map = AHashMap::with_capacity(256);
    RwLock::new(map)
});

/// Get or parse a condition string, using cache for repeated conditions
#[inline]
pub fn get_or_parse(condition: &str) -> Result<Expr> {
    // Fast path: check read lock first
    {
        let cache = CONDITION_CACHE.read();
        if let Some(ast) = cache.get(condition) {
            return Ok(ast.clone());
        }
    }

    // Slow path: parse and cache
    let ast = parser::parse(condition)?;

    {
        let mut cache = CONDITION_CACHE.write();
        cache.insert(condition.to_string(), ast.clone());
    }

    Ok(ast)
}

/// Check a condition against a GameState, using the cached expression
///
/// An empty condition always holds.
#[inline]
pub fn check_condition(condition: &str, state: &GameState) -> Result<bool> {
    if condition.trim().is_empty() {
        return Ok(true);
    }

    let ast = get_or_parse(condition)?;
    Ok(crate::condition::evaluator::check(&ast, state))
}

/// Check a condition, treating unparsable input as false
///
/// Content predicates are static data; a broken one is logged and never
/// matches rather than aborting the caller.
pub fn check_condition_or_false(condition: &str, state: &GameState) -> bool {
    match check_condition(condition, state) {
        Ok(result) => result,
        Err(err) => {
            log::warn!("Ignoring condition {:?}: {}", condition, err);
            false
        }
    }
}

/// Clear the condition cache (useful for testing)
#[allow(dead_code)]
pub fn clear_cache() {
    let mut cache = CONDITION_CACHE.write();
    cache.clear();
}

/// Whether a condition string is currently cached
#[allow(dead_code)]
pub fn is_cached(condition: &str) -> bool {
    CONDITION_CACHE.read().contains_key(condition)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_hit() {
        let state = GameState::default();
        let condition = "LEVEL>=1 & HP>0";

        let result1 = check_condition(condition, &state).unwrap();
        assert!(result1);
        assert!(is_cached(condition));

        let result2 = check_condition(condition, &state).unwrap();
        assert!(result2);
    }

    #[test]
    fn test_empty_condition() {
        let state = GameState::default();
        assert!(check_condition("", &state).unwrap());
        assert!(check_condition("  ", &state).unwrap());
    }

    #[test]
    fn test_misspelled_property_never_matches() {
        let mut state = GameState::default();
        state.stats.battles_won = 4;
        assert!(check_condition("BATTLES_WON>=1", &state).unwrap());
        assert!(check_condition("BATLES_WON>=1", &state).is_err());
        assert!(!check_condition_or_false("BATLES_WON>=1", &state));
        assert!(!is_cached("BATLES_WON>=1"));
    }

    #[test]
    fn test_invalid_condition() {
        let state = GameState::default();
        assert!(check_condition("LEVEL>=", &state).is_err());
        assert!(!check_condition_or_false("LEVEL>=", &state));
        assert!(!is_cached("LEVEL>="));
    }
}
