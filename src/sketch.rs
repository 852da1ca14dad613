// Copyright (c) 2024-present, corestructs contributors
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! Single-pass distinct-count sketches (spec.md §4.14): a Flajolet-Martin
//! stochastic-averaging sketch (`original_source/src/streaming/fmalg.c`) and
//! a BJKST sketch (`original_source/src/streaming/bjkst.c`). Both expose the
//! same `update`/`query` contract: feed values one at a time, then read an
//! estimate of the number of distinct values seen.
//!
//! Neither original hashes with a dedicated pairwise-independent family
//! (`kwayrng`/`twuhash`); there is no such crate in this workspace's stack,
//! so every "independent hash" here is `xxhash_rust::xxh3_64_with_seed` under
//! a distinct seed, which is good enough for the stochastic-averaging
//! argument these sketches rely on but is not a formal substitute.

use crate::hashmap::HashSet;

fn lsb(hash: u64, max_bit: u32) -> u32 {
    if hash == 0 {
        max_bit
    } else {
        hash.trailing_zeros().min(max_bit)
    }
}

/// A Flajolet-Martin distinct-count sketch using `m` groups of `n` bitmaps
/// each (stochastic averaging): every group tracks, per subhash, the
/// lowest bit position ever set by a hashed value, the group estimate is
/// `2^(average lowest bit across its n subhashes)`, and the final estimate
/// is the median across the `m` groups.
pub struct FmSketch {
    n_groups: usize,
    n_subhashes: usize,
    max_bit: u32,
    seeds: Vec<u64>,
    lowest_bit: Vec<Vec<u32>>,
}

impl FmSketch {
    /// `n_groups` and `n_subhashes` trade variance for memory: more groups
    /// narrow the estimate, more subhashes per group smooth out
    /// single-hash noise. `max_bit` bounds the tracked bit position and
    /// should be at least `log2` of the expected cardinality.
    ///
    /// Panics (bounds violation) if `n_groups == 0` or `n_subhashes == 0`.
    #[must_use]
    pub fn new(n_groups: usize, n_subhashes: usize, max_bit: u32) -> Self {
        assert!(n_groups > 0 && n_subhashes > 0, "group/subhash counts must be positive");
        let total = n_groups * n_subhashes;
        Self {
            n_groups,
            n_subhashes,
            max_bit,
            seeds: (0..total as u64).collect(),
            lowest_bit: vec![vec![0u32; n_subhashes]; n_groups],
        }
    }

    pub fn update(&mut self, value: u64) {
        for g in 0..self.n_groups {
            for s in 0..self.n_subhashes {
                let seed = self.seeds[g * self.n_subhashes + s];
                let h = crate::hash::hash64_seeded(&value.to_le_bytes(), seed);
                let bit = lsb(h, self.max_bit);
                if bit > self.lowest_bit[g][s] {
                    self.lowest_bit[g][s] = bit;
                }
            }
        }
    }

    /// Median, across groups, of each group's average `2^lowest_bit`.
    #[must_use]
    pub fn query(&self) -> f64 {
        let mut group_estimates: Vec<f64> = self
            .lowest_bit
            .iter()
            .map(|bits| {
                let sum: f64 = bits.iter().map(|&b| 2f64.powi(b as i32)).sum();
                sum / self.n_subhashes as f64
            })
            .collect();
        group_estimates.sort_by(|a, b| a.partial_cmp(b).expect("estimates are never NaN"));
        let mid = group_estimates.len() / 2;
        if group_estimates.len() % 2 == 0 {
            (group_estimates[mid - 1] + group_estimates[mid]) / 2.0
        } else {
            group_estimates[mid]
        }
    }
}

/// A BJKST distinct-count sketch: hashed values are bucketed by the number
/// of trailing zero bits in their hash, kept in a shared-capacity buffer,
/// and when that buffer fills the lowest-numbered bucket is discarded and
/// the acceptance threshold raised. The final estimate is
/// `2^min_zeros * |buffer|`, counting only the buckets actually retained.
pub struct Bjkst {
    max_bit: u32,
    capacity: usize,
    size: usize,
    min_zeros: u32,
    seed: u64,
    buckets: Vec<HashSet<u64>>,
}

impl Bjkst {
    /// `epsilon` sets the relative-error target (`capacity = floor(1/eps^2)`,
    /// truncating like the original's `(size_t)(1.0 / (eps * eps))` cast);
    /// `max_bit` bounds the tracked trailing-zero count and should be at
    /// least `log2` of the expected cardinality.
    ///
    /// Panics (bounds violation) if `epsilon` is not in `(0, 1)`.
    #[must_use]
    pub fn new(epsilon: f64, max_bit: u32) -> Self {
        assert!(epsilon > 0.0 && epsilon < 1.0, "epsilon out of range");
        let capacity = (1.0 / (epsilon * epsilon)) as usize;
        Self::with_capacity(capacity.max(1), max_bit)
    }

    #[must_use]
    pub fn with_capacity(capacity: usize, max_bit: u32) -> Self {
        Self {
            max_bit,
            capacity,
            size: 0,
            min_zeros: 0,
            seed: 0x5be7_7e19_d15_7,
            buckets: (0..=max_bit).map(|_| HashSet::new()).collect(),
        }
    }

    pub fn update(&mut self, value: u64) {
        let h = crate::hash::hash64_seeded(&value.to_le_bytes(), self.seed);
        let zeros = lsb(h, self.max_bit);
        if zeros < self.min_zeros || self.buckets[zeros as usize].contains(&h) {
            return;
        }
        while self.size >= self.capacity && self.min_zeros < self.max_bit {
            self.size -= self.buckets[self.min_zeros as usize].len();
            self.buckets[self.min_zeros as usize] = HashSet::new();
            self.min_zeros += 1;
        }
        if zeros < self.min_zeros {
            return;
        }
        if self.buckets[zeros as usize].insert(h) {
            self.size += 1;
        }
    }

    /// `2^min_nonempty_zeros * |buffer|`, where `min_nonempty_zeros` is the
    /// lowest retained bucket that is not (yet) empty.
    #[must_use]
    pub fn query(&self) -> u64 {
        let mut m = self.min_zeros;
        while m < self.max_bit && self.buckets[m as usize].is_empty() {
            m += 1;
        }
        (1u64 << m) * self.size as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn lsb_caps_at_max_bit_and_treats_zero_as_max_bit() {
        assert_eq!(lsb(0, 32), 32);
        assert_eq!(lsb(1, 32), 0);
        assert_eq!(lsb(0b1000, 32), 3);
        assert_eq!(lsb(1 << 40, 32), 32);
    }
}
