// Copyright (c) 2024-present, corestructs contributors
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! Construction-time errors.
//!
//! Per spec.md §7, almost nothing in this crate is fallible in the `Result`
//! sense: bounds violations and finaliser-shape mismatches are contract
//! violations (panics), capacity exhaustion aborts, hash-map misses and
//! duplicate ordered-set inserts are `Option`/`bool` returns. The only place
//! a caller can hand a constructor a parameter that is simply nonsensical
//! (not "the container happens to reject it") is at construction time, and
//! that's what `Error` covers.

/// Errors that can occur while constructing a container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Error {
    /// A van-Emde-Boas universe size must be a power of two.
    UniverseNotPowerOfTwo(u64),

    /// A Greenwald-Khanna or KLL error bound must lie in `(0, 1)`.
    InvalidErrorBound(f64),

    /// A hash-map load-factor band must satisfy `0 < min < max <= 1`.
    InvalidLoadFactorBand { min: f64, max: f64 },

    /// A KLL retention constant must lie in `(0.5, 1)`.
    InvalidRetentionConstant(f64),

    /// A KLL summary's capacity is too small to guarantee its error bound.
    InsufficientKllCapacity { capacity: usize, minimum: usize },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UniverseNotPowerOfTwo(u) => {
                write!(f, "universe size {u} is not a power of two")
            }
            Self::InvalidErrorBound(eps) => {
                write!(f, "error bound {eps} is not in (0, 1)")
            }
            Self::InvalidLoadFactorBand { min, max } => {
                write!(f, "load-factor band ({min}, {max}] is not a valid band")
            }
            Self::InvalidRetentionConstant(c) => {
                write!(f, "retention constant {c} is not in (0.5, 1)")
            }
            Self::InsufficientKllCapacity { capacity, minimum } => {
                write!(f, "KLL capacity {capacity} is below the minimum {minimum} required for the target error")
            }
        }
    }
}

impl std::error::Error for Error {}

/// Result type used at construction boundaries.
pub type Result<T> = std::result::Result<T, Error>;
