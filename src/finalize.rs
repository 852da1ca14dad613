// Copyright (c) 2024-present, corestructs contributors
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! A composable, type-erased destruction graph.
//!
//! Most owned Rust values destroy themselves correctly via [`Drop`] and have
//! no use for this module. It exists for the cases spec.md §4.1 actually
//! cares about: a container storing externally-owned handles (a reference
//! container, in the source's terms) where *whether* and *how* to release
//! the referent is a runtime decision, not something the element's type can
//! encode on its own. A [`Finalizer`] is a small tree of release callbacks
//! that gets threaded through such a container at teardown time.
//!
//! The shape mirrors the object lifecycle this crate's container algorithms
//! were grounded on: a release function consumes one value and a reference
//! to its own node so it can recurse into the node's children.

use std::any::Any;

/// One node of a finaliser graph.
///
/// A node has a release function and zero or more child nodes. A leaf
/// release function disposes of a value directly; a parent's release
/// function walks its own structure and hands each contained value to the
/// corresponding child (`children[0]` for the sole/first kind of contained
/// value, `children[1]` for a second kind, as with map keys/values).
pub struct Finalizer {
    release: ReleaseFn,
    children: Vec<Finalizer>,
}

/// Boxed rather than a bare `fn` pointer: container-specific release
/// functions are plain fn items, but callers building ad-hoc finalisers
/// (see the tests below) need to close over state.
type ReleaseFn = Box<dyn Fn(Box<dyn Any>, &Finalizer)>;

impl Finalizer {
    /// A no-op leaf: the value needs no further release beyond its own drop.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            release: Box::new(|_value, _node| {}),
            children: Vec::new(),
        }
    }

    /// A leaf that treats the value as an owned pointer to a `T`: if this
    /// node has a child, the child is finalised on the pointee *before* the
    /// pointee's own storage is released (which happens implicitly, via
    /// `Drop`, once the boxed value goes out of scope).
    #[must_use]
    pub fn pointer<T: 'static>() -> Self {
        Self {
            release: Box::new(|boxed, node| {
                let pointee = boxed
                    .downcast::<T>()
                    .expect("finaliser shape mismatch: expected a boxed pointee");
                if let Some(child) = node.children.first() {
                    child.finalize(Box::new(*pointee));
                }
            }),
            children: Vec::new(),
        }
    }

    /// A container-specific leaf: `release` receives the whole container
    /// value (downcast from the type-erased box) and is responsible for
    /// walking it and applying `node.children` to each contained value.
    #[must_use]
    pub fn for_container<F>(release: F) -> Self
    where
        F: Fn(Box<dyn Any>, &Finalizer) + 'static,
    {
        Self {
            release: Box::new(release),
            children: Vec::new(),
        }
    }

    /// Appends `child` to this node's child list and returns `self`,
    /// mirroring the source's `dtor_cons(parent, child)`.
    #[must_use]
    pub fn cons(mut self, child: Finalizer) -> Self {
        self.children.push(child);
        self
    }

    /// The node's children, in composition order.
    #[must_use]
    pub fn children(&self) -> &[Finalizer] {
        &self.children
    }

    /// Invokes this node's release function on `value`.
    pub fn finalize(&self, value: Box<dyn Any>) {
        (self.release)(value, self);
    }
}

/// Builds a release function for a flat container of `T` that hands every
/// element to `children[0]`. Plug into [`Finalizer::for_container`] via a
/// turbofish, e.g. `Finalizer::for_container(release_vec::<Vec<u32>, u32>)`.
pub fn release_elements<C, T>(boxed: Box<dyn Any>, node: &Finalizer)
where
    C: IntoIterator<Item = T> + 'static,
    T: 'static,
{
    let container = boxed
        .downcast::<C>()
        .unwrap_or_else(|_| panic!("finaliser shape mismatch: expected {}", std::any::type_name::<C>()));
    if let Some(child) = node.children.first() {
        for v in *container {
            child.finalize(Box::new(v));
        }
    }
}

/// Builds a release function for a flat container of `(K, V)` pairs that
/// hands keys to `children[0]` and values to `children[1]`, asserting the
/// map-shaped finaliser contract from spec.md §4.1.
pub fn release_entries<C, K, V>(boxed: Box<dyn Any>, node: &Finalizer)
where
    C: IntoIterator<Item = (K, V)> + 'static,
    K: 'static,
    V: 'static,
{
    let container = boxed
        .downcast::<C>()
        .unwrap_or_else(|_| panic!("finaliser shape mismatch: expected {}", std::any::type_name::<C>()));
    assert!(
        node.children.len() == 2,
        "map finaliser must have exactly two children (keys, values), got {}",
        node.children.len()
    );
    let key_fin = &node.children[0];
    let val_fin = &node.children[1];
    for (k, v) in *container {
        key_fin.finalize(Box::new(k));
        val_fin.finalize(Box::new(v));
    }
}

/// Applies `finalizer` to a heap-allocated `object`, releasing both the
/// object's contents and the finaliser tree itself — the source's
/// `DESTROY` macro.
pub fn destroy_object<T: 'static>(object: Box<T>, finalizer: Finalizer) {
    finalizer.finalize(object);
}
