// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listener handles and the per-node listener registry.
//!
//! ## Identity
//!
//! A [`Listener`] is a reference-counted callback. Cloning it yields the same
//! listener: clones compare equal and [`Tree::remove_listener`](crate::tree::Tree::remove_listener)
//! removes every registered entry that shares its allocation. Wrapping the
//! same closure twice with [`Listener::new`] yields two distinct listeners.

use alloc::borrow::Cow;
use alloc::collections::BTreeMap;
use alloc::rc::Rc;
use alloc::vec::Vec;

use crate::tree::Tree;
use crate::types::Event;

type Callback<E> = dyn Fn(&mut Tree<E>, &mut Event) -> Result<(), E>;

/// A callback registered against a node and event type.
///
/// The callback receives the tree (so it may register listeners, relink
/// parents, or dispatch further events) and the event being bubbled.
/// Returning `Err` aborts the dispatch; see [`Tree::dispatch`](crate::tree::Tree::dispatch).
pub struct Listener<E> {
    callback: Rc<Callback<E>>,
}

impl<E> Listener<E> {
    /// Wrap a closure as a new listener with its own identity.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut Tree<E>, &mut Event) -> Result<(), E> + 'static,
    {
        Self {
            callback: Rc::new(f),
        }
    }

    /// Returns true if both handles refer to the same listener.
    pub fn same(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.callback, &other.callback)
    }

    pub(crate) fn call(&self, tree: &mut Tree<E>, event: &mut Event) -> Result<(), E> {
        (self.callback)(tree, event)
    }
}

impl<E> Clone for Listener<E> {
    fn clone(&self) -> Self {
        Self {
            callback: Rc::clone(&self.callback),
        }
    }
}

impl<E> PartialEq for Listener<E> {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl<E> Eq for Listener<E> {}

impl<E> core::fmt::Debug for Listener<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Listener")
            .field("ptr", &Rc::as_ptr(&self.callback).cast::<()>())
            .finish_non_exhaustive()
    }
}

/// Listener sequences keyed by event type, in registration order.
pub(crate) struct Registry<E> {
    by_kind: BTreeMap<Cow<'static, str>, Vec<Listener<E>>>,
}

impl<E> Default for Registry<E> {
    fn default() -> Self {
        Self {
            by_kind: BTreeMap::new(),
        }
    }
}

impl<E> core::fmt::Debug for Registry<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut m = f.debug_map();
        for (kind, seq) in &self.by_kind {
            m.entry(kind, &seq.len());
        }
        m.finish()
    }
}

impl<E> Registry<E> {
    pub(crate) fn add(&mut self, kind: Cow<'static, str>, listener: Listener<E>) {
        self.by_kind.entry(kind).or_default().push(listener);
    }

    pub(crate) fn remove(&mut self, kind: &str, listener: &Listener<E>) {
        if let Some(seq) = self.by_kind.get_mut(kind) {
            seq.retain(|l| !l.same(listener));
        }
    }

    pub(crate) fn count(&self, kind: &str) -> usize {
        self.by_kind.get(kind).map_or(0, Vec::len)
    }

    /// Copy of the sequence for `kind` as it stands now.
    ///
    /// Dispatch iterates this copy so listeners may edit the registry mid-pass.
    pub(crate) fn snapshot(&self, kind: &str) -> Vec<Listener<E>> {
        self.by_kind.get(kind).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    fn noop() -> Listener<Infallible> {
        Listener::new(|_, _| Ok(()))
    }

    #[test]
    fn clones_share_identity() {
        let a = noop();
        let b = a.clone();
        assert!(a.same(&b));
        assert_eq!(a, b);
    }

    #[test]
    fn separate_wraps_are_distinct() {
        let a = noop();
        let b = noop();
        assert!(!a.same(&b));
    }

    #[test]
    fn duplicates_are_kept_and_removed_together() {
        let mut reg = Registry::default();
        let a = noop();
        let b = noop();
        reg.add("click".into(), a.clone());
        reg.add("click".into(), b.clone());
        reg.add("click".into(), a.clone());
        assert_eq!(reg.count("click"), 3);

        reg.remove("click", &a);
        let rest = reg.snapshot("click");
        assert_eq!(rest.len(), 1);
        assert!(rest[0].same(&b));
    }

    #[test]
    fn removal_preserves_order_of_the_rest() {
        let mut reg = Registry::default();
        let (a, b, c, d) = (noop(), noop(), noop(), noop());
        for l in [&a, &b, &c, &d] {
            reg.add("k".into(), l.clone());
        }
        reg.remove("k", &b);
        let rest = reg.snapshot("k");
        assert_eq!(rest, alloc::vec![a, c, d]);
    }

    #[test]
    fn removal_from_unknown_kind_is_a_no_op() {
        let mut reg = Registry::default();
        let a = noop();
        reg.add("click".into(), a.clone());
        reg.remove("hover", &a);
        reg.remove("click", &noop());
        assert_eq!(reg.count("click"), 1);
        assert_eq!(reg.count("hover"), 0);
    }

    #[test]
    fn snapshot_is_detached_from_later_edits() {
        let mut reg = Registry::default();
        let a = noop();
        reg.add("click".into(), a.clone());
        let snap = reg.snapshot("click");
        reg.remove("click", &a);
        reg.add("click".into(), noop());
        assert_eq!(snap.len(), 1);
        assert!(snap[0].same(&a));
    }
}
