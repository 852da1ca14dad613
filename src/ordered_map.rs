// Copyright (c) 2024-present, corestructs contributors
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! Entry-packed `K -> V` adapters over the AVL and skip-list ordered sets
//! (spec.md §3, L3 row: `avlordmap`/`slordmap`).
//!
//! Both backings store `Entry<K, V>`, ordered by `K` alone, so neither
//! `avl`/`skiplist` needs to know about values at all. [`AnyOrdered`] picks
//! between the two at construction time and forwards every operation to
//! whichever is active. The teacher models this exact "one of several
//! interchangeable backings, picked once, forwarded to forever" shape with
//! `enum_dispatch` over `AnyTree` (`src/any_tree.rs`); that macro only
//! supports non-generic traits, and `OrderedBacking` here is generic over
//! `K, V`, so the dispatch below is the same shape hand-expanded instead of
//! macro-generated.

use crate::avl::AvlSet;
use crate::skiplist::SkipList;
use std::cmp::Ordering;

struct Entry<K, V> {
    key: K,
    value: V,
}

impl<K: PartialEq, V> PartialEq for Entry<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<K: Eq, V> Eq for Entry<K, V> {}

impl<K: PartialOrd, V> PartialOrd for Entry<K, V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.key.partial_cmp(&other.key)
    }
}

impl<K: Ord, V> Ord for Entry<K, V> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

/// Which ordered set backs an [`AnyOrdered`] map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backing {
    Avl,
    SkipList,
}

/// An AVL-backed ordered `K -> V` map (`avlordmap`).
pub struct AvlOrdMap<K, V> {
    inner: AvlSet<Entry<K, V>>,
}

/// A skip-list-backed ordered `K -> V` map (`slordmap`).
pub struct SlOrdMap<K, V> {
    inner: SkipList<Entry<K, V>>,
}

impl<K: Ord, V> Default for AvlOrdMap<K, V> {
    fn default() -> Self {
        Self { inner: AvlSet::new() }
    }
}

impl<K: Ord, V> Default for SlOrdMap<K, V> {
    fn default() -> Self {
        Self { inner: SkipList::new() }
    }
}

/// Picks one of `avlordmap`/`slordmap` at construction and forwards every
/// operation to it for the map's lifetime.
pub enum AnyOrdered<K, V> {
    Avl(AvlOrdMap<K, V>),
    SkipList(SlOrdMap<K, V>),
}

impl<K: Ord, V> AnyOrdered<K, V> {
    #[must_use]
    pub fn new(backing: Backing) -> Self {
        match backing {
            Backing::Avl => Self::Avl(AvlOrdMap::default()),
            Backing::SkipList => Self::SkipList(SlOrdMap::default()),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Avl(m) => m.inner.len(),
            Self::SkipList(m) => m.inner.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        let cmp = |candidate: &Entry<K, V>| key.cmp(&candidate.key);
        match self {
            Self::Avl(m) => m.inner.get_by(cmp),
            Self::SkipList(m) => m.inner.get_by(cmp),
        }
        .map(|e| &e.value)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let cmp = |candidate: &Entry<K, V>| key.cmp(&candidate.key);
        match self {
            Self::Avl(m) => m.inner.get_mut_by(cmp),
            Self::SkipList(m) => m.inner.get_mut_by(cmp),
        }
        .map(|e| &mut e.value)
    }

    /// Inserts `value` under `key`. If `key` was already present, only the
    /// value is overwritten in place (the retained `Entry`'s key is left
    /// untouched) and the previous value is returned, matching
    /// [`crate::hashmap::HashMap::insert`]'s resolved overwrite semantics.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(slot) = self.get_mut(&key) {
            return Some(std::mem::replace(slot, value));
        }
        match self {
            Self::Avl(m) => {
                m.inner.insert(Entry { key, value });
            }
            Self::SkipList(m) => {
                m.inner.insert(Entry { key, value });
            }
        }
        None
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        let cmp = |candidate: &Entry<K, V>| key.cmp(&candidate.key);
        match self {
            Self::Avl(m) => m.inner.remove_by(cmp),
            Self::SkipList(m) => m.inner.remove_by(cmp),
        }
        .map(|e| e.value)
    }

    /// In ascending key order.
    pub fn iter(&self) -> Box<dyn Iterator<Item = (&K, &V)> + '_> {
        match self {
            Self::Avl(m) => Box::new(m.inner.iter().map(|e| (&e.key, &e.value))),
            Self::SkipList(m) => Box::new(m.inner.iter().map(|e| (&e.key, &e.value))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn avl_backing_insert_get_remove_round_trip() {
        let mut m = AnyOrdered::new(Backing::Avl);
        for (k, v) in [(3, "c"), (1, "a"), (2, "b")] {
            assert_eq!(m.insert(k, v), None);
        }
        assert_eq!(m.get(&2), Some(&"b"));
        assert_eq!(m.remove(&2), Some("b"));
        assert_eq!(m.get(&2), None);
        assert_eq!(m.len(), 2);
    }

    #[test]
    fn skiplist_backing_insert_get_remove_round_trip() {
        let mut m = AnyOrdered::new(Backing::SkipList);
        for (k, v) in [(3, "c"), (1, "a"), (2, "b")] {
            assert_eq!(m.insert(k, v), None);
        }
        assert_eq!(m.get(&2), Some(&"b"));
        assert_eq!(m.remove(&2), Some("b"));
        assert_eq!(m.get(&2), None);
        assert_eq!(m.len(), 2);
    }

    #[test]
    fn insert_on_existing_key_overwrites_value_and_keeps_len() {
        let mut m = AnyOrdered::new(Backing::Avl);
        m.insert("k", 1);
        let old = m.insert("k", 2);
        assert_eq!(old, Some(1));
        assert_eq!(m.get(&"k"), Some(&2));
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn iter_yields_entries_in_ascending_key_order() {
        let mut m = AnyOrdered::new(Backing::SkipList);
        for k in [5, 1, 4, 2, 3] {
            m.insert(k, k * 10);
        }
        let collected: Vec<_> = m.iter().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(collected, vec![(1, 10), (2, 20), (3, 30), (4, 40), (5, 50)]);
    }

    #[test]
    fn get_mut_allows_in_place_mutation() {
        let mut m = AnyOrdered::new(Backing::Avl);
        m.insert(1, String::from("a"));
        if let Some(v) = m.get_mut(&1) {
            v.push('!');
        }
        assert_eq!(m.get(&1), Some(&String::from("a!")));
    }
}
