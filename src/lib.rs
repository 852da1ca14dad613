// Copyright (c) 2024-present, corestructs contributors
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! A K.I.S.S. collection of generic, single-threaded container data structures.
//!
//! ##### About
//!
//! This crate is a family of interoperating containers — a dynamic array,
//! deque, AVL tree, skip list, hash map/set, ordered map, van-Emde-Boas
//! integer set, segment tree, roaring bit vector, min-queue, and the
//! Greenwald-Khanna and KLL quantile summaries — built on two cross-cutting
//! mechanisms:
//!
//! - a [`finalize`] graph that drives recursive, type-erased destruction of
//!   nested containers and externally-owned handles, and
//! - the [`iter`] capability that every ordered container exposes through
//!   Rust's native [`Iterator`] trait.
//!
//! Every container here is plain, synchronous, single-threaded library code:
//! there is no I/O, no persistence, and no concurrency. Callers that need
//! multi-threaded access must serialize externally (see the crate-level
//! concurrency notes in `SPEC_FULL.md`).
//!
//! # Example usage
//!
//! ```
//! use corestructs::avl::AvlSet;
//!
//! let mut set = AvlSet::new();
//! for v in [10, 20, 30, 40, 50, 25] {
//!     set.insert(v);
//! }
//! assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![10, 20, 25, 30, 40, 50]);
//! ```

pub mod avl;
pub mod bitvec;
pub mod config;
pub mod deque;
pub mod error;
pub mod finalize;
pub mod gk;
pub mod hash;
pub mod hashmap;
pub mod iter;
pub mod kll;
pub mod minqueue;
pub mod ordered_map;
pub mod roaring;
pub mod segment_tree;
pub mod sketch;
pub mod skiplist;
pub mod vec;
pub mod veb;

pub use error::{Error, Result};
