// Copyright (c) 2024-present, corestructs contributors
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! Construction-time tuning knobs, one small builder struct per policy, in
//! the teacher's `config/*.rs` style.

use crate::error::{Error, Result};

/// Growth/shrink policy shared by [`crate::vec::DynArray`] and [`crate::deque::Deque`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthPolicy {
    /// Geometric growth factor applied when a push would overflow `cap`.
    pub growth_factor: f64,

    /// Load below which a shrink is triggered (`len as f64 / cap as f64`).
    pub shrink_load: f64,

    /// Floor below which `cap` never shrinks.
    pub cap_min: usize,
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        Self {
            growth_factor: 1.62,
            shrink_load: 0.5,
            cap_min: 4,
        }
    }
}

impl GrowthPolicy {
    #[must_use]
    pub fn with_growth_factor(mut self, g: f64) -> Self {
        self.growth_factor = g;
        self
    }

    #[must_use]
    pub fn with_shrink_load(mut self, l: f64) -> Self {
        self.shrink_load = l;
        self
    }

    #[must_use]
    pub fn with_cap_min(mut self, cap_min: usize) -> Self {
        self.cap_min = cap_min;
        self
    }
}

/// Resize policy for [`crate::hashmap`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadFactorBand {
    pub min: f64,
    pub max: f64,
    pub cap_min: usize,
}

impl Default for LoadFactorBand {
    fn default() -> Self {
        Self {
            min: 0.25,
            max: 0.75,
            cap_min: 128,
        }
    }
}

impl LoadFactorBand {
    pub fn validated(self) -> Result<Self> {
        if self.min > 0.0 && self.min < self.max && self.max <= 1.0 {
            Ok(self)
        } else {
            Err(Error::InvalidLoadFactorBand {
                min: self.min,
                max: self.max,
            })
        }
    }
}

/// Array/bitmap mode-switch threshold for [`crate::roaring`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoaringPolicy {
    pub array_to_bitmap_threshold: usize,
}

impl Default for RoaringPolicy {
    fn default() -> Self {
        Self {
            array_to_bitmap_threshold: 4096,
        }
    }
}

/// Error-bound configuration for [`crate::gk::GkSummary`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GkConfig {
    pub epsilon: f64,
}

impl GkConfig {
    pub fn new(epsilon: f64) -> Result<Self> {
        if epsilon > 0.0 && epsilon < 1.0 {
            Ok(Self { epsilon })
        } else {
            Err(Error::InvalidErrorBound(epsilon))
        }
    }
}

/// Error-bound and retention configuration for [`crate::kll::KllSummary`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KllConfig {
    pub epsilon: f64,
    pub retention_constant: f64,
}

impl KllConfig {
    pub fn new(epsilon: f64) -> Result<Self> {
        Self::with_retention_constant(epsilon, 2.0 / 3.0)
    }

    pub fn with_retention_constant(epsilon: f64, retention_constant: f64) -> Result<Self> {
        if !(epsilon > 0.0 && epsilon < 1.0) {
            return Err(Error::InvalidErrorBound(epsilon));
        }
        if !(retention_constant > 0.5 && retention_constant < 1.0) {
            return Err(Error::InvalidRetentionConstant(retention_constant));
        }
        Ok(Self {
            epsilon,
            retention_constant,
        })
    }
}
