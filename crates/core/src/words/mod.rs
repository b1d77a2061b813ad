//! Word supply - the pools secret words are dealt from
//!
//! Where the words come from is up to the embedder. The game only asks for
//! a pool by difficulty key and falls back to [`FALLBACK_WORDS`] when the
//! pool is too small to deal both teams.

use std::collections::{BTreeMap, HashSet};

use crate::models::WORDS_PER_TEAM;

/// Words needed to deal both teams
pub const WORDS_NEEDED: usize = WORDS_PER_TEAM * 2;

/// Built-in pool used when a difficulty has too few words
pub const FALLBACK_WORDS: &[&str] = &[
    "apple", "banana", "melon", "grape", "cat", "dog", "rabbit", "bird", "river", "castle",
    "rocket", "piano", "winter", "candle", "forest", "anchor",
];

/// Supplies candidate words for a difficulty key
pub trait WordSupply {
    /// Candidate words for `difficulty` (may be empty)
    fn words_for(&self, difficulty: &str) -> Vec<String>;
}

/// Word pools held in memory, keyed by difficulty
#[derive(Debug, Clone, Default)]
pub struct StaticWordSupply {
    pools: BTreeMap<String, Vec<String>>,
}

impl StaticWordSupply {
    pub fn new(pools: BTreeMap<String, Vec<String>>) -> Self {
        Self { pools }
    }

    /// Supply with no pools at all; every draw uses the fallback
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_pool<I, S>(mut self, difficulty: impl Into<String>, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pools
            .insert(difficulty.into(), words.into_iter().map(Into::into).collect());
        self
    }

    pub fn difficulties(&self) -> impl Iterator<Item = &str> {
        self.pools.keys().map(String::as_str)
    }
}

impl WordSupply for StaticWordSupply {
    fn words_for(&self, difficulty: &str) -> Vec<String> {
        self.pools.get(difficulty).cloned().unwrap_or_default()
    }
}

impl<T: WordSupply + ?Sized> WordSupply for &T {
    fn words_for(&self, difficulty: &str) -> Vec<String> {
        (**self).words_for(difficulty)
    }
}

/// Resolve the pool to deal from
///
/// Blank entries and duplicates are dropped first so every dealt word is
/// distinct. Pools left with fewer than [`WORDS_NEEDED`] words are replaced
/// by the fallback pool.
pub fn dealing_pool(supply: &impl WordSupply, difficulty: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let pool: Vec<String> = supply
        .words_for(difficulty)
        .into_iter()
        .map(|w| w.trim().to_string())
        .filter(|w| !w.is_empty() && seen.insert(w.clone()))
        .collect();

    if pool.len() < WORDS_NEEDED {
        tracing::debug!(
            difficulty,
            available = pool.len(),
            "Word pool too small, using fallback"
        );
        return FALLBACK_WORDS.iter().map(|w| w.to_string()).collect();
    }

    pool
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_is_large_and_distinct() {
        let unique: HashSet<_> = FALLBACK_WORDS.iter().collect();
        assert!(FALLBACK_WORDS.len() >= WORDS_NEEDED);
        assert_eq!(unique.len(), FALLBACK_WORDS.len());
    }

    #[test]
    fn test_missing_difficulty_uses_fallback() {
        let supply = StaticWordSupply::empty();
        let pool = dealing_pool(&supply, "hard");
        assert_eq!(pool.len(), FALLBACK_WORDS.len());
    }

    #[test]
    fn test_small_pool_uses_fallback() {
        let supply = StaticWordSupply::empty().with_pool("easy", ["sun", "moon", "star"]);
        assert_eq!(dealing_pool(&supply, "easy")[0], "apple");
    }

    #[test]
    fn test_duplicates_do_not_count() {
        let words = ["a", "b", "c", "d", "a", "b", "c", "d", " ", "e"];
        let supply = StaticWordSupply::empty().with_pool("easy", words);
        // Only five distinct words survive
        assert_eq!(dealing_pool(&supply, "easy")[0], "apple");
    }

    #[test]
    fn test_large_pool_kept() {
        let words: Vec<String> = (0..12).map(|i| format!("word{i}")).collect();
        let supply = StaticWordSupply::empty().with_pool("easy", words.clone());
        assert_eq!(dealing_pool(&supply, "easy"), words);
    }
}
