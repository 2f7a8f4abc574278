// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event target tree: nodes, parent links, listener registration, and dispatch.

use alloc::borrow::Cow;
use alloc::vec::Vec;
use core::convert::Infallible;

use crate::listener::{Listener, Registry};
use crate::types::{DispatchError, Event, NodeId};

#[cfg(feature = "tracing")]
use tracing::trace;

#[cfg(not(feature = "tracing"))]
macro_rules! trace {
    ($($arg:tt)*) => {};
}

/// An arena of event targets linked into a forest by parent handles.
///
/// `E` is the error type listeners may return. Trees whose listeners never
/// fail can use the default, [`Infallible`].
///
/// ## Usage
///
/// - Create targets with [`Tree::insert`] and link them with [`Tree::set_parent`].
/// - Register callbacks with [`Tree::add_listener`] or [`Tree::on`].
/// - Call [`Tree::dispatch`] to run the target's listeners and bubble the
///   event up the parent chain.
pub struct Tree<E = Infallible> {
    nodes: Vec<Node<E>>,
}

struct Node<E> {
    name: Cow<'static, str>,
    parent: Option<NodeId>,
    listeners: Registry<E>,
}

impl<E> core::fmt::Debug for Node<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Node")
            .field("name", &self.name)
            .field("parent", &self.parent)
            .field("listeners", &self.listeners)
            .finish()
    }
}

impl<E> core::fmt::Debug for Tree<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tree")
            .field("nodes", &self.nodes)
            .finish()
    }
}

impl<E> Default for Tree<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Tree<E> {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns true if `node` names a node of this tree.
    pub fn contains(&self, node: NodeId) -> bool {
        node.idx() < self.nodes.len()
    }

    /// Insert a new root target with an empty listener registry.
    pub fn insert(&mut self, name: impl Into<Cow<'static, str>>) -> NodeId {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "NodeId uses 32-bit indices by design."
        )]
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(Node {
            name: name.into(),
            parent: None,
            listeners: Registry::default(),
        });
        id
    }

    /// The label given to `node` at insertion.
    pub fn name(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node.idx()).map(|n| &*n.name)
    }

    /// The current parent of `node`, if any.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.idx()).and_then(|n| n.parent)
    }

    /// Replace the parent of `node`; `None` makes it a root.
    ///
    /// Nothing is validated beyond membership: self-parenting and cycles are
    /// accepted here and only reported when a dispatch runs into them.
    /// Unknown handles are ignored.
    pub fn set_parent(&mut self, node: NodeId, parent: Option<NodeId>) {
        if let Some(p) = parent
            && !self.contains(p)
        {
            return;
        }
        if let Some(n) = self.nodes.get_mut(node.idx()) {
            n.parent = parent;
        }
    }

    /// Iterate the bubble path of `node`: the node itself, then each parent.
    ///
    /// The walk is capped at [`Tree::len`] steps so cyclic chains terminate.
    pub fn bubble_path(&self, node: NodeId) -> BubblePath<'_, E> {
        BubblePath {
            tree: self,
            next: self.contains(node).then_some(node),
            remaining: self.nodes.len(),
        }
    }

    /// Returns true if the chain starting at `node` ends at a root.
    fn reaches_root(&self, node: NodeId) -> bool {
        self.bubble_path(node)
            .last()
            .is_some_and(|last| self.parent(last).is_none())
    }

    /// Append `listener` to the sequence for `kind` on `node`.
    ///
    /// Adding the same listener twice registers it twice. Unknown handles are ignored.
    pub fn add_listener(
        &mut self,
        node: NodeId,
        kind: impl Into<Cow<'static, str>>,
        listener: Listener<E>,
    ) {
        if let Some(n) = self.nodes.get_mut(node.idx()) {
            n.listeners.add(kind.into(), listener);
        }
    }

    /// Wrap `f` in a new [`Listener`], register it, and return the handle for later removal.
    pub fn on<F>(&mut self, node: NodeId, kind: impl Into<Cow<'static, str>>, f: F) -> Listener<E>
    where
        F: Fn(&mut Self, &mut Event) -> Result<(), E> + 'static,
    {
        let listener = Listener::new(f);
        self.add_listener(node, kind, listener.clone());
        listener
    }

    /// Remove every registration of `listener` for `kind` on `node`.
    ///
    /// The remaining listeners keep their relative order. Removing something
    /// that was never registered is a no-op.
    pub fn remove_listener(&mut self, node: NodeId, kind: &str, listener: &Listener<E>) {
        if let Some(n) = self.nodes.get_mut(node.idx()) {
            n.listeners.remove(kind, listener);
        }
    }

    /// Number of listeners registered for `kind` on `node`.
    pub fn listener_count(&self, node: NodeId, kind: &str) -> usize {
        self.nodes
            .get(node.idx())
            .map_or(0, |n| n.listeners.count(kind))
    }

    /// Dispatch `event` at `node` and bubble it toward the root.
    ///
    /// At each node on the way up:
    /// 1) `event.target()` is set to that node.
    /// 2) Its listeners for `event.kind()` run in registration order. The
    ///    sequence is copied first, so listeners may add or remove listeners
    ///    (or dispatch other events) without disturbing the current pass.
    /// 3) If no listener stopped propagation and the node has a parent, the
    ///    same event moves to the parent. The parent is read after the pass,
    ///    so relinking from a listener changes the remaining path.
    ///
    /// A listener returning `Err(e)` ends the dispatch at once with
    /// [`DispatchError::Listener`]; later listeners on that node and every
    /// ancestor are skipped.
    ///
    /// Every [`Tree::len`] hops the remaining chain is checked: if it no longer
    /// reaches a root, the parent chain loops and [`DispatchError::Cycle`] is
    /// returned. A chain that listeners keep relinking without ever forming a
    /// loop bubbles on.
    pub fn dispatch(&mut self, node: NodeId, event: &mut Event) -> Result<(), DispatchError<E>> {
        let mut current = node;
        let mut hops = 0_usize;
        loop {
            let Some(n) = self.nodes.get(current.idx()) else {
                return Err(DispatchError::UnknownNode(current));
            };
            let snapshot = n.listeners.snapshot(event.kind());
            event.set_target(current);
            trace!(node = ?current, kind = event.kind(), listeners = snapshot.len(), "bubble pass");
            for listener in &snapshot {
                if let Err(e) = listener.call(self, event) {
                    trace!(node = ?current, kind = event.kind(), "listener failed; dispatch aborted");
                    return Err(DispatchError::Listener(e));
                }
            }
            if event.propagation_stopped() {
                trace!(node = ?current, kind = event.kind(), "propagation stopped");
                return Ok(());
            }
            let Some(parent) = self.parent(current) else {
                return Ok(());
            };
            hops += 1;
            if hops >= self.nodes.len() {
                if !self.reaches_root(parent) {
                    trace!(node = ?parent, kind = event.kind(), "parent chain loops");
                    return Err(DispatchError::Cycle(parent));
                }
                hops = 0;
            }
            current = parent;
        }
    }
}

/// Iterator returned by [`Tree::bubble_path`].
pub struct BubblePath<'a, E> {
    tree: &'a Tree<E>,
    next: Option<NodeId>,
    remaining: usize,
}

impl<E> core::fmt::Debug for BubblePath<'_, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BubblePath")
            .field("next", &self.next)
            .field("remaining", &self.remaining)
            .finish_non_exhaustive()
    }
}

impl<E> Iterator for BubblePath<'_, E> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        if self.remaining == 0 {
            return None;
        }
        let cur = self.next?;
        self.remaining -= 1;
        self.next = self.tree.parent(cur);
        Some(cur)
    }
}
