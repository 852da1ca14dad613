// Copyright (c) 2024-present, corestructs contributors
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! The KLL epsilon-approximate quantile summary (spec.md §4.13), ported
//! from `original_source/libcocadasketch/src/kll.c`.
//!
//! Values are held in a cascade of levels, each with a shrinking capacity;
//! once a level overflows, it is sorted, half its elements (alternating
//! which half via a coin flip that itself alternates with the previous
//! flip) are promoted one level up, and the rest are discarded. A value's
//! approximate rank is the weighted sum, over levels, of its rank within
//! each level's sorted buffer, weighted by `2^level`.
//!
//! The reference header defining `KLL_DEFAULT_C`,
//! `KLL_MIN_K_BIG_OH_CONST` and `KLL_DEFAULT_CAP` was not available in this
//! tree; [`DEFAULT_K_CONST`] and [`DEFAULT_CAP_FLOOR`] below are
//! placeholders chosen to keep the capacity-vs-error invariant the
//! original asserts (`cap >= 2k`) satisfiable for any `retention_constant`
//! in `(0.5, 1)`, and are documented as such rather than presented as the
//! original's tuned values.

use crate::config::KllConfig;
use crate::error::{Error, Result};
use rand::Rng;

/// Placeholder for the original's `KLL_MIN_K_BIG_OH_CONST`.
const DEFAULT_K_CONST: f64 = 1.0;

/// Placeholder for the original's `KLL_DEFAULT_CAP`.
const DEFAULT_CAP_FLOOR: usize = 32;

fn min_k(epsilon: f64) -> f64 {
    DEFAULT_K_CONST * (1.0 / epsilon) * (1.0 / epsilon).ln().sqrt()
}

/// A KLL epsilon-approximate quantile summary over a stream of `T`.
pub struct KllSummary<T> {
    epsilon: f64,
    c: f64,
    k: f64,
    levels: Vec<Vec<T>>,
    coins: Vec<u8>,
    npts: usize,
    cap: usize,
}

impl<T: Ord + Clone> KllSummary<T> {
    /// Builds a summary whose capacity is derived from `config.epsilon` and
    /// `config.retention_constant`, matching the original's default-capacity
    /// constructor.
    #[must_use]
    pub fn new(config: KllConfig) -> Self {
        let k = min_k(config.epsilon);
        let cap = ((1.0 / (1.0 - config.retention_constant)) * k).ceil() as usize;
        Self::with_capacity(config, cap).expect("derived capacity always satisfies the minimum")
    }

    /// Builds a summary with an explicit capacity budget.
    ///
    /// Errors if `capacity` (floored at [`DEFAULT_CAP_FLOOR`]) is too small
    /// to guarantee `config.epsilon`.
    pub fn with_capacity(config: KllConfig, capacity: usize) -> Result<Self> {
        let k_min = min_k(config.epsilon);
        let cap = capacity.max(DEFAULT_CAP_FLOOR) as f64;
        if cap < 2.0 * k_min {
            return Err(Error::InsufficientKllCapacity {
                capacity: cap as usize,
                minimum: (2.0 * k_min).ceil() as usize,
            });
        }
        let mut c = config.retention_constant;
        if cap * (1.0 - c) < k_min {
            c = 1.0 - (k_min / cap);
        }
        let k = cap * (1.0 - c);
        Ok(Self {
            epsilon: config.epsilon,
            c,
            k,
            levels: vec![Vec::new()],
            coins: vec![0],
            npts: 0,
            cap: cap as usize,
        })
    }

    /// The number of points currently retained across all levels. Every
    /// `update` adds one, and every compaction discards the half of an
    /// overflowing level that isn't promoted, decrementing this count by the
    /// number of points dropped (`original_source/libcocadasketch/src/kll.c:167`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.npts
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.npts == 0
    }

    #[must_use]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.cap
    }

    fn level_cap(&self, i: usize) -> usize {
        let depth = self.levels.len() - 1 - i;
        let ret = self.k * self.c.powi(depth as i32);
        (ret as usize).max(2)
    }

    pub fn update(&mut self, value: T) {
        self.levels[0].push(value);
        self.npts += 1;
        self.compress();
    }

    fn compress(&mut self) {
        let mut i = 0;
        while i < self.levels.len() {
            let cap = self.level_cap(i);
            self.levels[i].sort();
            if self.levels[i].len() > cap {
                if i + 1 == self.levels.len() {
                    self.levels.push(Vec::new());
                    self.coins.push(0);
                }
                let stored = self.coins[i];
                let start = if stored == 0 {
                    let bit = u8::from(rand::rng().random_bool(0.5));
                    self.coins[i] = bit + 1;
                    bit as usize
                } else {
                    self.coins[i] = 0;
                    stored as usize
                };
                let buf = std::mem::take(&mut self.levels[i]);
                let total = buf.len();
                let mut promoted = Vec::new();
                for (idx, v) in buf.into_iter().enumerate() {
                    if idx >= start && (idx - start) % 2 == 0 {
                        promoted.push(v);
                    }
                }
                self.npts -= total - promoted.len();
                self.levels[i + 1].extend(promoted);
            }
            i += 1;
        }
    }

    /// An estimate of `value`'s rank, within the configured `epsilon` of
    /// the true rank.
    #[must_use]
    pub fn rank(&self, value: &T) -> usize {
        let mut ret: u64 = 0;
        let mut weight: u64 = 1;
        for level in &self.levels {
            ret += rank_in_sorted(level, value) as u64 * weight;
            weight *= 2;
        }
        ret as usize
    }
}

/// Position of the first element `>= val` in an already-sorted `buf`.
fn rank_in_sorted<T: Ord>(buf: &[T], val: &T) -> usize {
    if buf.is_empty() || &buf[0] >= val {
        return 0;
    }
    if &buf[buf.len() - 1] < val {
        return buf.len();
    }
    let (mut l, mut r) = (0, buf.len() - 1);
    while r - l > 1 {
        let m = l + (r - l) / 2;
        if &buf[m] < val {
            l = m;
        } else {
            r = m;
        }
    }
    r
}
