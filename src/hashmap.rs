// Copyright (c) 2024-present, corestructs contributors
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! An open-addressed key -> value map with linear probing (spec.md §4.7),
//! and [`HashSet`], a thin hashmap adapter over a zero-sized value
//! (`original_source/libcocada/src/container/hashset.h`).
//!
//! Hashing uses `rustc_hash::FxHasher`, the same hasher the teacher pulls in
//! for its own internal tables.

use crate::config::LoadFactorBand;
use crate::error::Result;
use rustc_hash::FxHasher;
use std::hash::{Hash, Hasher};

enum Slot<K, V> {
    Free,
    Active(K, V),
    Deleted,
}

/// An open-addressed hash map with linear probing.
pub struct HashMap<K, V> {
    slots: Vec<Slot<K, V>>,
    n_active: usize,
    n_deleted: usize,
    band: LoadFactorBand,
}

fn hash_of<K: Hash>(key: &K) -> u64 {
    let mut hasher = FxHasher::default();
    key.hash(&mut hasher);
    hasher.finish()
}

impl<K: Eq + Hash, V> Default for HashMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash, V> HashMap<K, V> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_band(LoadFactorBand::default()).expect("default band is valid")
    }

    pub fn with_band(band: LoadFactorBand) -> Result<Self> {
        let band = band.validated()?;
        let mut slots = Vec::with_capacity(band.cap_min);
        slots.resize_with(band.cap_min, || Slot::Free);
        Ok(Self {
            slots,
            n_active: 0,
            n_deleted: 0,
            band,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.n_active
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.n_active == 0
    }

    fn cap(&self) -> usize {
        self.slots.len()
    }

    /// Returns the slot index holding `key` if active, or the first
    /// free/deleted slot on the probe sequence if absent (so insert can
    /// reuse it).
    fn probe(&self, key: &K) -> (Option<usize>, Option<usize>) {
        let cap = self.cap();
        let start = (hash_of(key) as usize) % cap;
        let mut first_reusable = None;
        for step in 0..cap {
            let idx = (start + step) % cap;
            match &self.slots[idx] {
                Slot::Free => return (None, first_reusable.or(Some(idx))),
                Slot::Deleted => {
                    if first_reusable.is_none() {
                        first_reusable = Some(idx);
                    }
                }
                Slot::Active(k, _) if k == key => return (Some(idx), None),
                Slot::Active(_, _) => {}
            }
        }
        (None, first_reusable)
    }

    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.probe(key).0.is_some()
    }

    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        let idx = self.probe(key).0?;
        match &self.slots[idx] {
            Slot::Active(_, v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let idx = self.probe(key).0?;
        match &mut self.slots[idx] {
            Slot::Active(_, v) => Some(v),
            _ => None,
        }
    }

    /// Inserts `key -> value`. If `key` was already present, only the value
    /// slot is overwritten; the previously stored key bytes are left
    /// untouched (spec.md §9's resolved open question), and the old value
    /// is returned.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.grow_if_needed();
        let (existing, reusable) = self.probe(&key);
        if let Some(idx) = existing {
            let Slot::Active(_, old) = std::mem::replace(&mut self.slots[idx], Slot::Free) else {
                unreachable!("probe returned an active slot");
            };
            self.slots[idx] = Slot::Active(key, value);
            return Some(old);
        }
        let idx = reusable.expect("probe must find a free or deleted slot after growth check");
        let was_deleted = matches!(self.slots[idx], Slot::Deleted);
        self.slots[idx] = Slot::Active(key, value);
        self.n_active += 1;
        if was_deleted {
            self.n_deleted -= 1;
        }
        None
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_taking(key).map(|(_, v)| v)
    }

    /// Removes `key`, returning the dissociated `(key, value)` pair so a
    /// caller can release ownership of heap-backed keys/values without a
    /// leak (spec.md §4.7).
    pub fn remove_taking(&mut self, key: &K) -> Option<(K, V)> {
        let idx = self.probe(key).0?;
        let slot = std::mem::replace(&mut self.slots[idx], Slot::Deleted);
        let Slot::Active(k, v) = slot else {
            unreachable!("probe returned an active slot");
        };
        self.n_active -= 1;
        self.n_deleted += 1;
        self.shrink_if_needed();
        Some((k, v))
    }

    fn load_factor(&self) -> f64 {
        (self.n_active + self.n_deleted) as f64 / self.cap() as f64
    }

    fn rehash_to(&mut self, new_cap: usize) {
        let old = std::mem::take(&mut self.slots);
        self.slots = Vec::with_capacity(new_cap);
        self.slots.resize_with(new_cap, || Slot::Free);
        self.n_active = 0;
        self.n_deleted = 0;
        for slot in old {
            if let Slot::Active(k, v) = slot {
                let cap = self.slots.len();
                let start = (hash_of(&k) as usize) % cap;
                for step in 0..cap {
                    let idx = (start + step) % cap;
                    if matches!(self.slots[idx], Slot::Free) {
                        self.slots[idx] = Slot::Active(k, v);
                        self.n_active += 1;
                        break;
                    }
                }
            }
        }
    }

    fn grow_if_needed(&mut self) {
        if self.load_factor() > self.band.max {
            let new_cap = ((self.cap() as f64) * 1.62).ceil() as usize;
            self.rehash_to(new_cap.max(self.cap() + 1));
        }
    }

    fn shrink_if_needed(&mut self) {
        if self.cap() <= self.band.cap_min {
            return;
        }
        if self.load_factor() < self.band.min {
            let new_cap = (((self.cap() as f64) / 1.62).ceil() as usize)
                .max(self.band.cap_min)
                .max(self.n_active);
            if new_cap < self.cap() {
                self.rehash_to(new_cap);
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.slots.iter().filter_map(|s| match s {
            Slot::Active(k, v) => Some((k, v)),
            _ => None,
        })
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, v)| v)
    }
}

impl<K: Eq + Hash, V> IntoIterator for HashMap<K, V> {
    type Item = (K, V);
    type IntoIter = std::iter::FilterMap<std::vec::IntoIter<Slot<K, V>>, fn(Slot<K, V>) -> Option<(K, V)>>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.into_iter().filter_map(|s| match s {
            Slot::Active(k, v) => Some((k, v)),
            _ => None,
        })
    }
}

/// A hash set, implemented as a [`HashMap`] with a zero-sized value
/// (`original_source/libcocada/src/container/hashset.h`).
pub struct HashSet<T>(HashMap<T, ()>);

impl<T: Eq + Hash> Default for HashSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Eq + Hash> HashSet<T> {
    #[must_use]
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if `value` was newly inserted.
    pub fn insert(&mut self, value: T) -> bool {
        self.0.insert(value, ()).is_none()
    }

    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.0.contains(value)
    }

    pub fn remove(&mut self, value: &T) -> bool {
        self.0.remove(value).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.0.keys()
    }
}

impl<T: Eq + Hash> IntoIterator for HashSet<T> {
    type Item = T;
    type IntoIter = std::iter::Map<
        std::iter::FilterMap<std::vec::IntoIter<Slot<T, ()>>, fn(Slot<T, ()>) -> Option<(T, ())>>,
        fn((T, ())) -> T,
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter().map(|(k, ())| k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn insert_on_existing_key_overwrites_value_only() {
        let mut m = HashMap::new();
        m.insert("k", 1);
        let old = m.insert("k", 2);
        assert_eq!(old, Some(1));
        assert_eq!(m.get(&"k"), Some(&2));
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn remove_taking_returns_the_dissociated_pair() {
        let mut m = HashMap::new();
        m.insert(String::from("hello"), 42);
        let (k, v) = m.remove_taking(&String::from("hello")).unwrap();
        assert_eq!(k, "hello");
        assert_eq!(v, 42);
        assert!(!m.contains(&String::from("hello")));
    }

    #[test]
    fn hashset_tracks_membership() {
        let mut s = HashSet::new();
        assert!(s.insert(1));
        assert!(!s.insert(1));
        assert!(s.contains(&1));
        assert!(s.remove(&1));
        assert!(!s.contains(&1));
    }

    #[test]
    fn shrinks_after_bulk_removal() {
        let mut m = HashMap::new();
        for k in 0..5000u64 {
            m.insert(k, k);
        }
        for k in 0..4990u64 {
            m.remove(&k);
        }
        assert!(m.len() == 10);
    }
}
