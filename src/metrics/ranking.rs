//! Frequency ranking: group by key, count, sort descending, truncate.
//!
//! Ties keep the order in which their keys were first encountered, so the
//! same input always yields the same ranking.

use std::collections::HashMap;

use serde::Serialize;

/// A `(key, count)` pair produced by the reducer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    pub key: String,
    pub count: u64,
}

impl RankedEntry {
    pub fn new(key: impl Into<String>, count: u64) -> Self {
        Self {
            key: key.into(),
            count,
        }
    }
}

/// Rank `items` by the key `key_fn` extracts, one unit per item.
///
/// `limit` of `None` keeps every distinct key.
pub fn rank_by<I, F, K>(items: I, key_fn: F, limit: Option<usize>) -> Vec<RankedEntry>
where
    I: IntoIterator,
    F: Fn(&I::Item) -> K,
    K: Into<String>,
{
    rank_weighted(
        items.into_iter().map(|item| (key_fn(&item).into(), 1)),
        limit,
    )
}

/// Rank pre-weighted `(key, weight)` pairs.
///
/// Feeding a previous ranking back in (each entry weighted by its count)
/// reproduces the same order.
pub fn rank_weighted<I, K>(pairs: I, limit: Option<usize>) -> Vec<RankedEntry>
where
    I: IntoIterator<Item = (K, u64)>,
    K: Into<String>,
{
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut entries: Vec<RankedEntry> = Vec::new();

    for (key, weight) in pairs {
        let key = key.into();
        match slots.get(&key) {
            Some(&idx) => entries[idx].count += weight,
            None => {
                slots.insert(key.clone(), entries.len());
                entries.push(RankedEntry { key, count: weight });
            }
        }
    }

    // `entries` is in first-seen order; sort_by is stable.
    entries.sort_by(|a, b| b.count.cmp(&a.count));

    if let Some(n) = limit {
        entries.truncate(n);
    }

    entries
}

/// Sum of counts across a ranking.
pub fn total_count(entries: &[RankedEntry]) -> u64 {
    entries.iter().map(|e| e.count).sum()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_and_orders_descending() {
        let items = ["b", "a", "b", "c", "b", "a"];
        let ranked = rank_by(items, |s| s.to_string(), None);

        assert_eq!(
            ranked,
            vec![
                RankedEntry::new("b", 3),
                RankedEntry::new("a", 2),
                RankedEntry::new("c", 1),
            ]
        );
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let items = ["x", "y", "z", "z", "y", "x"];
        let ranked = rank_by(items, |s| s.to_string(), None);
        let keys: Vec<&str> = ranked.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["x", "y", "z"]);
    }

    #[test]
    fn limit_truncates() {
        let items = ["a", "a", "a", "b", "b", "c"];
        let ranked = rank_by(items, |s| s.to_string(), Some(2));
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].key, "a");
        assert_eq!(ranked[1].key, "b");
    }

    #[test]
    fn empty_input_yields_empty_ranking() {
        let ranked = rank_by(Vec::<String>::new(), |s| s.clone(), Some(5));
        assert!(ranked.is_empty());
    }

    #[test]
    fn weighted_rerank_is_stable() {
        let items = ["m", "s", "m", "l", "s", "xl"];
        let first = rank_by(items, |s| s.to_string(), None);
        let second = rank_weighted(first.iter().map(|e| (e.key.clone(), e.count)), None);
        assert_eq!(first, second);
        assert_eq!(total_count(&second), 6);
    }
}
