//! Term-frequency maps — the sparse vector representation compared by
//! the similarity engine

use ahash::AHashMap;

/// Mapping from token to occurrence count.
///
/// Accumulation is pure counting: no case folding, no deduplication.
/// Counting is associative across chunks, so a map built from successive
/// chunks equals one built from the concatenated text, provided no token
/// was split at a chunk boundary (the ingestor guarantees that).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrequencyMap {
    counts: AHashMap<String, u64>,
}

impl FrequencyMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct tokens
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Occurrence count for a token (0 if absent)
    pub fn count(&self, token: &str) -> u64 {
        self.counts.get(token).copied().unwrap_or(0)
    }

    /// Increment each token's count by 1, inserting absent tokens at 1
    pub fn accumulate<I>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = String>,
    {
        for token in tokens {
            *self.counts.entry(token).or_insert(0) += 1;
        }
    }

    /// Iterate over (token, count) pairs in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(t, &c)| (t.as_str(), c))
    }
}
