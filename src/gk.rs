// Copyright (c) 2024-present, corestructs contributors
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! The Greenwald-Khanna epsilon-approximate quantile summary (spec.md
//! §4.13), ported from `original_source/libcocadasketch/src/gk.c`.
//!
//! Each retained value carries a `(g, delta)` pair bounding how many values
//! could rank just below it: `g` is the minimum possible gap since the
//! previous retained value, `delta` the uncertainty in that gap. A final,
//! implicit `+infinity` entry anchors every binary search, matching the
//! original's own "last element is treated as infinity" sentinel.

use crate::config::GkConfig;

struct Entry<T> {
    /// `None` only for the trailing sentinel.
    value: Option<T>,
    g: usize,
    delta: usize,
}

/// An epsilon-approximate quantile summary over a stream of `T`.
pub struct GkSummary<T> {
    entries: Vec<Entry<T>>,
    epsilon: f64,
    total_qty: usize,
}

fn less_than_candidate<T: PartialOrd>(val: &T, candidate: &Option<T>) -> bool {
    match candidate {
        None => true,
        Some(c) => val < c,
    }
}

/// Index of the first entry not less than `val`, per the original's binary
/// search over a sentinel-terminated vector.
fn succ_pos<T: PartialOrd>(entries: &[Entry<T>], val: &T) -> usize {
    if entries.len() <= 1 || less_than_candidate(val, &entries[0].value) {
        return 0;
    }
    let (mut l, mut r) = (0, entries.len() - 1);
    while r - l > 1 {
        let m = l + (r - l) / 2;
        if less_than_candidate(val, &entries[m].value) {
            r = m;
        } else {
            l = m;
        }
    }
    r
}

impl<T: PartialOrd> GkSummary<T> {
    #[must_use]
    pub fn new(config: GkConfig) -> Self {
        Self {
            entries: vec![Entry { value: None, g: 1, delta: 0 }],
            epsilon: config.epsilon,
            total_qty: 0,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.total_qty
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_qty == 0
    }

    fn qty_thres(&self) -> usize {
        (2.0 * self.epsilon * self.total_qty as f64).ceil() as usize
    }

    pub fn update(&mut self, value: T) {
        self.total_qty += 1;
        let pos = succ_pos(&self.entries, &value);
        let thres = self.qty_thres();
        if self.entries[pos].g + self.entries[pos].delta + 1 < thres {
            self.entries[pos].g += 1;
            return;
        }
        let new_delta = self.entries[pos].g + self.entries[pos].delta - 1;
        self.entries.insert(pos, Entry { value: Some(value), g: 1, delta: new_delta });
        self.compress_one_pass(thres);
    }

    /// Merges a single adjacent pair once a compaction opportunity is found,
    /// matching `update`'s `break`-after-first-merge behaviour in the
    /// original.
    fn compress_one_pass(&mut self, thres: usize) {
        let mut i = 0;
        while i + 1 < self.entries.len() {
            if self.entries[i].g + self.entries[i + 1].g + self.entries[i + 1].delta < thres {
                self.entries[i + 1].g += self.entries[i].g;
                self.entries.remove(i);
                break;
            }
            i += 1;
        }
    }

    /// Repeatedly merges adjacent entries until no further compaction is
    /// possible, matching the full compaction pass `merge` runs in the
    /// original.
    fn compress_full(&mut self, thres: usize) {
        let mut i = 0;
        while i + 1 < self.entries.len() {
            if self.entries[i].g + self.entries[i + 1].g + self.entries[i + 1].delta < thres {
                self.entries[i + 1].g += self.entries[i].g;
                self.entries.remove(i);
            } else {
                i += 1;
            }
        }
    }

    /// Runs a full compaction pass at the current error threshold.
    pub fn compress(&mut self) {
        let thres = self.qty_thres();
        self.compress_full(thres);
    }

    /// An estimate of `val`'s rank, within `epsilon * len()` of the true
    /// rank.
    #[must_use]
    pub fn rank(&self, value: &T) -> usize {
        if self.entries.len() == 1 {
            return 0;
        }
        let pos = succ_pos(&self.entries, value);
        let below: usize = self.entries[..pos].iter().map(|e| e.g).sum();
        let succ = &self.entries[pos];
        // The original computes `below - 1 + (g + delta) / 2`, which
        // underflows when `pos == 0` (querying a value smaller than every
        // retained entry); saturate instead of wrapping.
        below.saturating_sub(1) + (succ.g + succ.delta) / 2
    }

    /// Merges `other` (same `epsilon`) into `self`.
    ///
    /// Panics (bounds violation) if the two summaries have different error
    /// bounds.
    pub fn merge(&mut self, other: &Self)
    where
        T: Clone,
    {
        assert!(
            (self.epsilon - other.epsilon).abs() < 1e-12,
            "cannot merge summaries with different error bounds"
        );
        let (mut i, mut j) = (0usize, 0usize);
        while i < self.entries.len() - 1 && j < other.entries.len() - 1 {
            let self_le_other = match (&self.entries[i].value, &other.entries[j].value) {
                (Some(a), Some(b)) => a <= b,
                _ => unreachable!("non-terminal entries always carry a value"),
            };
            if self_le_other {
                let (g, delta) = (other.entries[j].g, other.entries[j].delta);
                self.entries[i].delta += g + delta - 1;
                i += 1;
            } else {
                let new_delta = other.entries[j].delta + self.entries[i].g + self.entries[i].delta - 1;
                self.entries.insert(i, Entry {
                    value: other.entries[j].value.clone(),
                    g: other.entries[j].g,
                    delta: new_delta,
                });
                i += 1;
                j += 1;
            }
        }
        while j < other.entries.len() - 1 {
            self.entries.insert(i, Entry {
                value: other.entries[j].value.clone(),
                g: other.entries[j].g,
                delta: other.entries[j].delta,
            });
            i += 1;
            j += 1;
        }
        self.total_qty += other.total_qty;
        let thres = self.qty_thres();
        self.compress_full(thres);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn rank_of_the_smallest_value_is_near_zero() {
        let mut gk = GkSummary::new(GkConfig::new(0.05).unwrap());
        for v in 1..=100 {
            gk.update(v);
        }
        assert!(gk.rank(&1) <= 5);
    }

    #[test]
    fn len_tracks_every_update_including_duplicates() {
        let mut gk = GkSummary::new(GkConfig::new(0.1).unwrap());
        for v in [1, 1, 2, 2, 3] {
            gk.update(v);
        }
        assert_eq!(gk.len(), 5);
        assert!(!gk.is_empty());
    }

    #[test]
    fn merge_combines_two_summaries_total_length() {
        let mut a = GkSummary::new(GkConfig::new(0.1).unwrap());
        let mut b = GkSummary::new(GkConfig::new(0.1).unwrap());
        for v in 0..200 {
            a.update(v);
        }
        for v in 200..400 {
            b.update(v);
        }
        a.merge(&b);
        assert_eq!(a.len(), 400);
        assert!(a.rank(&399) >= 380);
    }

    #[test]
    fn explicit_compress_never_increases_rank_error() {
        let epsilon = 0.1;
        let mut gk = GkSummary::new(GkConfig::new(epsilon).unwrap());
        for v in 0..500 {
            gk.update(v);
        }
        gk.compress();
        let estimated = gk.rank(&250) as f64;
        assert!((estimated - 250.0).abs() <= epsilon * 500.0);
    }
}
