// Copyright (c) 2024-present, corestructs contributors
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! A van Emde Boas integer set over a power-of-two universe (spec.md §4.9),
//! ported from `original_source/libcocada/src/container/vebset.c`.
//!
//! Every `VebTree` recurses by splitting an element into `hi = x / sqrt(U)`
//! and `lo = x % sqrt(U)`, delegating `lo` to a per-`hi` cluster and
//! recording which clusters are non-empty in a `summary` subtree one level
//! smaller. Clusters are created lazily, in our own [`crate::hashmap::HashMap`]
//! rather than the original's raw id -> pointer hashmap. At the 1-bit leaf,
//! `(min, max)` directly encode membership of `{0, 1}`.
//!
//! The original encodes "empty on this side" with sentinel values (`min = U`,
//! `max = -1`, and a leaf sentinel `2`); this port instead uses `Option<u32>`
//! throughout, for both the internal tree and the public `succ`/`pred` API.

use crate::error::{Error, Result};
use crate::hashmap::HashMap;

struct VebTree {
    min: Option<u32>,
    max: Option<u32>,
    summary: Option<Box<VebTree>>,
    clusters: Option<HashMap<u32, VebTree>>,
}

impl VebTree {
    fn new() -> Self {
        Self { min: None, max: None, summary: None, clusters: None }
    }

    fn is_empty(&self) -> bool {
        self.min.is_none()
    }

    fn sqrt_univ(nbits: u32) -> u32 {
        1u32 << (nbits / 2)
    }

    fn high(x: u32, nbits: u32) -> u32 {
        x >> (nbits / 2)
    }

    fn low(x: u32, nbits: u32) -> u32 {
        x & (Self::sqrt_univ(nbits) - 1)
    }

    fn index(hi: u32, lo: u32, nbits: u32) -> u32 {
        (hi << (nbits / 2)) | lo
    }

    fn contains(&self, x: u32, nbits: u32) -> bool {
        let (Some(mn), Some(mx)) = (self.min, self.max) else {
            return false;
        };
        if x < mn || x > mx {
            return false;
        }
        if x == mn || x == mx {
            return true;
        }
        let hi = Self::high(x, nbits);
        self.clusters
            .as_ref()
            .and_then(|c| c.get(&hi))
            .is_some_and(|cluster| cluster.contains(Self::low(x, nbits), nbits / 2))
    }

    fn add(&mut self, mut x: u32, nbits: u32) -> bool {
        if self.min == Some(x) || self.max == Some(x) {
            return false;
        }
        if nbits == 1 {
            let mut changed = false;
            if self.min.is_none_or(|mn| x < mn) {
                self.min = Some(x);
                changed = true;
            }
            if self.max.is_none_or(|mx| x > mx) {
                self.max = Some(x);
                changed = true;
            }
            return changed;
        }
        if self.is_empty() {
            self.min = Some(x);
            self.max = Some(x);
            return true;
        }
        if x < self.min.expect("checked non-empty above") {
            let swp = self.min.expect("checked non-empty above");
            self.min = Some(x);
            x = swp;
        }
        if x > self.max.expect("checked non-empty above") {
            self.max = Some(x);
        }
        if self.summary.is_none() {
            self.summary = Some(Box::new(VebTree::new()));
            self.clusters = Some(HashMap::new());
        }
        let hi = Self::high(x, nbits);
        let lo = Self::low(x, nbits);
        let clusters = self.clusters.as_mut().expect("lazily created above");
        if !clusters.contains(&hi) {
            clusters.insert(hi, VebTree::new());
        }
        if clusters.get(&hi).expect("just inserted or already present").is_empty() {
            self.summary.as_mut().expect("lazily created above").add(hi, nbits / 2);
        }
        clusters.get_mut(&hi).expect("just inserted or already present").add(lo, nbits / 2)
    }

    fn del(&mut self, mut x: u32, nbits: u32) -> bool {
        if self.is_empty() {
            return false;
        }
        if nbits == 1 {
            let mut deleted = false;
            if Some(x) == self.min {
                self.min = if self.max != Some(x) { self.max } else { None };
                deleted = true;
            }
            if Some(x) == self.max {
                self.max = if self.min.is_some() { self.min } else { None };
                deleted = true;
            }
            return deleted;
        }
        let mut deleted = false;
        if Some(x) == self.min {
            deleted = true;
            if self.max == Some(x) {
                self.min = None;
                self.max = None;
                return true;
            }
            let hi = self.summary.as_ref().expect("non-empty multi-bit tree has a summary").min.expect("summary non-empty");
            let lo = self
                .clusters
                .as_ref()
                .expect("non-empty multi-bit tree has clusters")
                .get(&hi)
                .expect("summary points at an existing cluster")
                .min
                .expect("cluster non-empty");
            self.min = Some(Self::index(hi, lo, nbits));
            x = self.min.expect("just set");
        }
        let hi = Self::high(x, nbits);
        let lo = Self::low(x, nbits);
        let Some(clusters) = self.clusters.as_mut() else {
            return false;
        };
        if !clusters.contains(&hi) {
            return false;
        }
        let cluster = clusters.get_mut(&hi).expect("just checked");
        deleted = cluster.del(lo, nbits / 2);
        let cluster_now_empty = cluster.is_empty();
        if deleted && cluster_now_empty {
            self.summary.as_mut().expect("non-empty multi-bit tree has a summary").del(hi, nbits / 2);
        }
        if Some(x) == self.max {
            if self.summary.as_ref().expect("non-empty multi-bit tree has a summary").is_empty() {
                self.max = self.min;
            } else {
                let summary = self.summary.as_ref().expect("just checked non-empty");
                let hi = summary.max.expect("summary non-empty");
                let cluster = self.clusters.as_ref().expect("non-empty multi-bit tree has clusters").get(&hi).expect("summary points at an existing cluster");
                let lo = cluster.max.expect("cluster non-empty");
                self.max = Some(Self::index(hi, lo, nbits));
            }
        }
        deleted
    }

    fn succ(&self, x: u32, nbits: u32) -> Option<u32> {
        match self.max {
            None => return None,
            Some(mx) if x >= mx => return None,
            _ => {}
        }
        if let Some(mn) = self.min {
            if x < mn {
                return Some(mn);
            }
        }
        if nbits == 1 {
            return if x == 0 && self.max == Some(1) { Some(1) } else { None };
        }
        let hi0 = Self::high(x, nbits);
        let lo0 = Self::low(x, nbits);
        if let Some(cluster) = self.clusters.as_ref().and_then(|c| c.get(&hi0)) {
            if let Some(cmax) = cluster.max {
                if lo0 < cmax {
                    let lo = cluster.succ(lo0, nbits / 2).expect("lo0 < cluster max guarantees a successor");
                    return Some(Self::index(hi0, lo, nbits));
                }
            }
        }
        let summary = self.summary.as_ref().expect("non-empty multi-bit tree has a summary");
        let hi = summary.succ(hi0, nbits / 2)?;
        let cluster = self.clusters.as_ref().expect("non-empty multi-bit tree has clusters").get(&hi).expect("summary points at an existing cluster");
        let lo = cluster.min.expect("cluster non-empty");
        Some(Self::index(hi, lo, nbits))
    }

    fn pred(&self, x: u32, nbits: u32) -> Option<u32> {
        match self.min {
            None => return None,
            Some(mn) if x <= mn => return None,
            _ => {}
        }
        if let Some(mx) = self.max {
            if x > mx {
                return Some(mx);
            }
        }
        if nbits == 1 {
            return if x == 1 && self.min == Some(0) { Some(0) } else { None };
        }
        let hi0 = Self::high(x, nbits);
        let lo0 = Self::low(x, nbits);
        if let Some(cluster) = self.clusters.as_ref().and_then(|c| c.get(&hi0)) {
            if let Some(cmin) = cluster.min {
                if cmin < lo0 {
                    let lo = cluster.pred(lo0, nbits / 2).expect("cluster min < lo0 guarantees a predecessor");
                    return Some(Self::index(hi0, lo, nbits));
                }
            }
        }
        let summary = self.summary.as_ref().expect("non-empty multi-bit tree has a summary");
        match summary.pred(hi0, nbits / 2) {
            Some(hi) => {
                let cluster = self.clusters.as_ref().expect("non-empty multi-bit tree has clusters").get(&hi).expect("summary points at an existing cluster");
                let lo = cluster.max.expect("cluster non-empty");
                Some(Self::index(hi, lo, nbits))
            }
            None => self.min,
        }
    }
}

/// An integer set over `[0, universe)` with O(log log universe) membership,
/// insert, delete, successor and predecessor.
pub struct VebSet {
    universe: u64,
    nbits: u32,
    size: usize,
    tree: VebTree,
}

impl Default for VebSet {
    /// A set over the full 32-bit universe, matching the original's
    /// hardcoded `vebset_new`.
    fn default() -> Self {
        Self::new(1u64 << 32).expect("2^32 is a power of two")
    }
}

impl VebSet {
    /// `universe` must be a power of two no smaller than 2.
    pub fn new(universe: u64) -> Result<Self> {
        if universe < 2 || !universe.is_power_of_two() {
            return Err(Error::UniverseNotPowerOfTwo(universe));
        }
        Ok(Self {
            universe,
            nbits: universe.trailing_zeros(),
            size: 0,
            tree: VebTree::new(),
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    fn in_universe(&self, x: u32) -> bool {
        u64::from(x) < self.universe
    }

    /// Out-of-universe values are rejected with a warning rather than a
    /// panic, matching `log::warn!`-on-reject used elsewhere in this crate.
    pub fn insert(&mut self, x: u32) -> bool {
        if !self.in_universe(x) {
            log::warn!("value {x} is outside the vEB universe of size {}", self.universe);
            return false;
        }
        let added = self.tree.add(x, self.nbits);
        if added {
            self.size += 1;
        }
        added
    }

    pub fn remove(&mut self, x: u32) -> bool {
        if !self.in_universe(x) {
            return false;
        }
        let removed = self.tree.del(x, self.nbits);
        if removed {
            self.size -= 1;
        }
        removed
    }

    #[must_use]
    pub fn contains(&self, x: u32) -> bool {
        self.in_universe(x) && self.tree.contains(x, self.nbits)
    }

    #[must_use]
    pub fn min(&self) -> Option<u32> {
        self.tree.min
    }

    #[must_use]
    pub fn max(&self) -> Option<u32> {
        self.tree.max
    }

    /// `min{y ∈ S : y >= x}` (spec.md §8, inclusive of `x` itself).
    #[must_use]
    pub fn succ(&self, x: u32) -> Option<u32> {
        if self.contains(x) {
            return Some(x);
        }
        self.tree.succ(x, self.nbits)
    }

    /// `max{y ∈ S : y <= x}` (spec.md §8, inclusive of `x` itself).
    #[must_use]
    pub fn pred(&self, x: u32) -> Option<u32> {
        if self.contains(x) {
            return Some(x);
        }
        self.tree.pred(x, self.nbits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn new_rejects_non_power_of_two_universes() {
        assert!(VebSet::new(100).is_err());
        assert!(VebSet::new(256).is_ok());
    }

    #[test]
    fn insert_contains_and_min_max_round_trip() {
        let mut set = VebSet::new(1024).unwrap();
        for v in [5, 900, 1, 500, 0, 1023] {
            assert!(set.insert(v));
        }
        assert_eq!(set.len(), 6);
        assert_eq!(set.min(), Some(0));
        assert_eq!(set.max(), Some(1023));
        for v in [5, 900, 1, 500, 0, 1023] {
            assert!(set.contains(v));
        }
        assert!(!set.contains(2));
    }

    #[test]
    fn duplicate_insert_is_a_no_op() {
        let mut set = VebSet::new(64).unwrap();
        assert!(set.insert(10));
        assert!(!set.insert(10));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn out_of_universe_insert_is_rejected() {
        let mut set = VebSet::new(16).unwrap();
        assert!(!set.insert(16));
        assert!(!set.contains(16));
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn delete_shrinks_set_and_fixes_min_max() {
        let mut set = VebSet::new(64).unwrap();
        for v in [1, 2, 3, 60] {
            set.insert(v);
        }
        assert!(set.remove(1));
        assert_eq!(set.min(), Some(2));
        assert!(set.remove(60));
        assert_eq!(set.max(), Some(3));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn deleting_every_element_leaves_an_empty_set() {
        let mut set = VebSet::new(32).unwrap();
        for v in 0..32 {
            set.insert(v);
        }
        for v in 0..32 {
            assert!(set.remove(v));
        }
        assert!(set.is_empty());
        assert_eq!(set.min(), None);
        assert_eq!(set.max(), None);
        assert_eq!(set.succ(0), None);
    }

    #[test]
    fn singleton_set_successor_and_predecessor_are_itself() {
        let mut set = VebSet::new(16).unwrap();
        set.insert(7);
        assert_eq!(set.succ(7), Some(7));
        assert_eq!(set.pred(7), Some(7));
        assert_eq!(set.succ(0), Some(7));
        assert_eq!(set.pred(15), Some(7));
        assert_eq!(set.succ(8), None);
        assert_eq!(set.pred(6), None);
    }
}
