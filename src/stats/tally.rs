//! Frequency counting with a fixed tie-break.
//!
//! Every "most common" value in the statistics comes from [`Tally::mode`]: among
//! the values sharing the highest count, the one seen first in table order wins.
//! [`Tally::ranked`] orders by descending count, then by first appearance.

use std::{collections::HashMap, hash::Hash};

#[derive(Debug, Clone)]
pub struct Tally<K> {
    /// value → (count, index of first appearance)
    counts: HashMap<K, (usize, usize)>,
    seen: usize,
}

impl<K: Eq + Hash + Clone> Default for Tally<K> {
    fn default() -> Self {
        Self {
            counts: HashMap::new(),
            seen: 0,
        }
    }
}

impl<K: Eq + Hash + Clone> Tally<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: K) {
        let order = self.seen;
        self.seen += 1;
        self.counts.entry(key).or_insert((0, order)).0 += 1;
    }

    /// Number of values added.
    pub fn total(&self) -> usize {
        self.seen
    }

    pub fn is_empty(&self) -> bool {
        self.seen == 0
    }

    /// Most frequent value; ties go to the earliest first appearance.
    pub fn mode(&self) -> Option<K> {
        self.counts
            .iter()
            .min_by_key(|(_, (count, first))| (std::cmp::Reverse(*count), *first))
            .map(|(k, _)| k.clone())
    }

    /// Every distinct value with its count, highest count first.
    pub fn ranked(&self) -> Vec<(K, usize)> {
        let mut entries: Vec<(&K, &(usize, usize))> = self.counts.iter().collect();
        entries.sort_by_key(|(_, (count, first))| (std::cmp::Reverse(*count), *first));
        entries
            .into_iter()
            .map(|(k, (count, _))| (k.clone(), *count))
            .collect()
    }
}

impl<K: Eq + Hash + Clone> FromIterator<K> for Tally<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tally = Self::new();
        for key in iter {
            tally.add(key);
        }
        tally
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_has_no_mode() {
        let t: Tally<&str> = Tally::new();
        assert!(t.is_empty());
        assert_eq!(t.mode(), None);
        assert!(t.ranked().is_empty());
    }

    #[test]
    fn ties_resolve_to_first_seen() {
        let t: Tally<&str> = ["b", "a", "a", "b", "c"].into_iter().collect();
        assert_eq!(t.mode(), Some("b"));

        let t: Tally<&str> = ["c", "a", "b", "a", "b"].into_iter().collect();
        assert_eq!(t.mode(), Some("a"));
    }

    #[test]
    fn ranked_is_count_desc_then_first_seen() {
        let t: Tally<&str> = ["x", "y", "z", "z", "y", "w"].into_iter().collect();
        assert_eq!(t.ranked(), vec![("y", 2), ("z", 2), ("x", 1), ("w", 1)]);
        assert_eq!(t.total(), 6);
        assert_eq!(t.ranked().iter().map(|(_, c)| c).sum::<usize>(), t.total());
    }
}
