// Copyright (c) 2024-present, corestructs contributors
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! A roaring bit vector over a fixed domain (spec.md §4.11), ported from
//! `original_source/libcocadastrproc/src/roaring.c`.
//!
//! The domain is split into 65536-wide buckets, each an explicit
//! [`Container`] sum type (no vtable, per the redesign the original's
//! `void *data` + `ctnr_type` tag called for): `Empty` while untouched,
//! `Array` of sorted `u16` offsets while sparse, and `Bitmap` once a
//! bucket's cardinality crosses [`crate::config::RoaringPolicy::array_to_bitmap_threshold`].
//! A [`crate::segment_tree::SegmentTree`] over per-bucket cardinalities
//! answers "how many set bits before bucket b" in `O(log ncntrs)`, which
//! `rank`/`select` combine with an in-bucket query.

use crate::bitvec::BitVec;
use crate::config::RoaringPolicy;
use crate::segment_tree::SegmentTree;

const CTNR_SIZE: usize = 1 << 16;

enum Container {
    Empty,
    Array(Vec<u16>),
    Bitmap(BitVec),
}

fn sum_u32(a: &u32, b: &u32) -> u32 {
    a + b
}

impl Container {
    fn card(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Array(v) => v.len(),
            Self::Bitmap(b) => b.count_ones(),
        }
    }

    fn get(&self, idx: u16) -> bool {
        match self {
            Self::Empty => false,
            Self::Array(v) => v.binary_search(&idx).is_ok(),
            Self::Bitmap(b) => b.get(idx as usize),
        }
    }

    /// Sets `idx` to `val`, converting between representations as the
    /// `threshold` is crossed. Returns the change in cardinality: `-1`, `0`
    /// or `+1`.
    fn set(&mut self, idx: u16, val: bool, threshold: usize) -> i32 {
        match self {
            Self::Empty => {
                if val {
                    *self = Self::Array(vec![idx]);
                    1
                } else {
                    0
                }
            }
            Self::Array(v) => {
                let delta = match v.binary_search(&idx) {
                    Ok(pos) => {
                        if val {
                            0
                        } else {
                            v.remove(pos);
                            -1
                        }
                    }
                    Err(pos) => {
                        if val {
                            v.insert(pos, idx);
                            1
                        } else {
                            0
                        }
                    }
                };
                if v.len() > threshold {
                    let mut bitmap = BitVec::with_len(CTNR_SIZE);
                    for &x in v.iter() {
                        bitmap.set(x as usize, true);
                    }
                    *self = Self::Bitmap(bitmap);
                }
                delta
            }
            Self::Bitmap(b) => {
                let delta = if b.get(idx as usize) == val {
                    0
                } else {
                    b.set(idx as usize, val);
                    if val {
                        1
                    } else {
                        -1
                    }
                };
                if b.count_ones() <= threshold {
                    let mut arr = Vec::new();
                    for i in 0..CTNR_SIZE {
                        if b.get(i) {
                            arr.push(i as u16);
                        }
                    }
                    *self = Self::Array(arr);
                }
                delta
            }
        }
    }

    /// Count of set bits strictly before `idx`, within this bucket.
    fn rank1(&self, idx: u16) -> usize {
        match self {
            Self::Empty => 0,
            Self::Array(v) => v.partition_point(|&x| x < idx),
            Self::Bitmap(b) => b.rank1(idx as usize),
        }
    }

    /// Position of the `rank`-th (0-indexed) bit equal to `bit`, within
    /// this bucket, or `None` if there's no such bit here.
    fn select(&self, bit: bool, rank: usize) -> Option<u32> {
        match self {
            Self::Empty => None,
            Self::Array(v) => {
                if bit {
                    v.get(rank).map(|&x| u32::from(x))
                } else {
                    array_select0(v, rank)
                }
            }
            Self::Bitmap(b) => {
                let pos = if bit { b.select1(rank) } else { b.select0(rank) };
                (pos < CTNR_SIZE).then_some(pos as u32)
            }
        }
    }
}

/// Position of the `rank`-th zero among `v`'s complement within
/// `[0, CTNR_SIZE)`, given `v` sorted ascending.
fn array_select0(v: &[u16], rank: usize) -> Option<u32> {
    if v.is_empty() {
        return Some(rank as u32);
    }
    let zeros_before = |i: usize| v[i] as usize - i;
    if rank < zeros_before(0) {
        return Some(rank as u32);
    }
    let (mut l, mut r) = (0usize, v.len());
    while r - l > 1 {
        let m = l + (r - l) / 2;
        if rank < zeros_before(m) {
            r = m;
        } else {
            l = m;
        }
    }
    let c0 = zeros_before(l);
    Some(u32::from(v[l]) + (rank - c0) as u32 + 1)
}

/// A bitmap over a fixed-size domain, with `O(log n)`-ish rank and select.
pub struct RoaringBitVec {
    size: u32,
    ctnrs: Vec<Container>,
    count_st: SegmentTree<u32, fn(&u32, &u32) -> u32>,
    policy: RoaringPolicy,
}

impl RoaringBitVec {
    #[must_use]
    pub fn new(size: u32) -> Self {
        Self::with_policy(size, RoaringPolicy::default())
    }

    #[must_use]
    pub fn with_policy(size: u32, policy: RoaringPolicy) -> Self {
        let ncntrs = (size as usize).div_ceil(CTNR_SIZE).max(1);
        Self {
            size,
            ctnrs: (0..ncntrs).map(|_| Container::Empty).collect(),
            count_st: SegmentTree::new(ncntrs, 0u32, sum_u32 as fn(&u32, &u32) -> u32),
            policy,
        }
    }

    #[must_use]
    pub fn len(&self) -> u32 {
        self.size
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    #[must_use]
    pub fn card(&self) -> u32 {
        if self.size == 0 {
            0
        } else {
            self.count_st.range_query(0, self.ctnrs.len())
        }
    }

    #[must_use]
    pub fn count(&self, bit: bool) -> u32 {
        if bit {
            self.card()
        } else {
            self.size - self.card()
        }
    }

    /// Panics (bounds violation) if `pos >= len()`.
    pub fn set(&mut self, pos: u32, val: bool) {
        assert!(pos < self.size, "index out of bounds");
        let bucket = (pos >> 16) as usize;
        let idx = (pos & 0xFFFF) as u16;
        let old_card = self.ctnrs[bucket].card() as u32;
        let delta = self.ctnrs[bucket].set(idx, val, self.policy.array_to_bitmap_threshold);
        if delta != 0 {
            let new_card = (i64::from(old_card) + i64::from(delta)) as u32;
            self.count_st.update(bucket, new_card);
        }
    }

    /// Panics (bounds violation) if `pos >= len()`.
    #[must_use]
    pub fn get(&self, pos: u32) -> bool {
        assert!(pos < self.size, "index out of bounds");
        let bucket = (pos >> 16) as usize;
        let idx = (pos & 0xFFFF) as u16;
        self.ctnrs[bucket].get(idx)
    }

    #[must_use]
    pub fn rank1(&self, pos: u32) -> u32 {
        let pos = pos.min(self.size);
        let bucket = (pos >> 16) as usize;
        let idx = (pos & 0xFFFF) as u16;
        let mut ret = self.count_st.range_query(0, bucket);
        ret += self.ctnrs[bucket].rank1(idx) as u32;
        ret
    }

    #[must_use]
    pub fn rank0(&self, pos: u32) -> u32 {
        pos.min(self.size) - self.rank1(pos)
    }

    #[must_use]
    pub fn rank(&self, bit: bool, pos: u32) -> u32 {
        if bit {
            self.rank1(pos)
        } else {
            self.rank0(pos)
        }
    }

    fn bucket_rank(&self, bucket: usize, bit: bool) -> u32 {
        if bit {
            self.count_st.range_query(0, bucket)
        } else {
            self.size.min((bucket * CTNR_SIZE) as u32) - self.count_st.range_query(0, bucket)
        }
    }

    /// Position of the `rank`-th (0-indexed) bit equal to `bit`, or `len()`
    /// if fewer than `rank + 1` such bits exist.
    #[must_use]
    pub fn select(&self, bit: bool, rank: u32) -> u32 {
        if rank >= self.count(bit) {
            return self.size;
        }
        let ncntrs = self.ctnrs.len();
        let (mut l, mut r) = (0usize, ncntrs);
        while r - l > 1 {
            let m = l + (r - l) / 2;
            if rank < self.bucket_rank(m, bit) {
                r = m;
            } else {
                l = m;
            }
        }
        let bkt_rank = self.bucket_rank(l, bit);
        let base = (l * CTNR_SIZE) as u32;
        let local_rank = (rank - bkt_rank) as usize;
        match self.ctnrs[l].select(bit, local_rank) {
            Some(v) => base + v,
            None => base + local_rank as u32,
        }
    }

    #[must_use]
    pub fn select0(&self, rank: u32) -> u32 {
        self.select(false, rank)
    }

    #[must_use]
    pub fn select1(&self, rank: u32) -> u32 {
        self.select(true, rank)
    }
}
