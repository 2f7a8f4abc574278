// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types: node handles, the bubbling [`Event`], and dispatch errors.

use alloc::borrow::Cow;

/// Identifier for an event target in a [`Tree`](crate::tree::Tree).
///
/// This is a small, copyable handle. Nodes are never removed from a tree, so
/// a `NodeId` stays valid for the lifetime of the tree that issued it.
///
/// Handles are not tied to a particular tree. Passing a handle issued by a
/// different tree is not detected unless its slot is out of range, in which
/// case operations treat it as unknown.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32) -> Self {
        Self(idx)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// One occurrence of an event, carried up the parent chain by
/// [`Tree::dispatch`](crate::tree::Tree::dispatch).
///
/// ## Current target
///
/// [`Event::target`] is the node whose listeners are running right now, not
/// the node dispatch started on. It is reassigned at every bubbling hop, so
/// an ancestor's listener always observes itself as the target.
///
/// ## Stopping
///
/// [`Event::stop_propagation`] only suppresses further bubbling. Listeners
/// that share the stopping node's pass still run; the flag is checked once
/// that node's pass completes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    kind: Cow<'static, str>,
    target: Option<NodeId>,
    propagation_stopped: bool,
}

impl Event {
    /// Create an event of the given type with no target.
    ///
    /// Any string is accepted, including the empty string.
    pub fn new(kind: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind: kind.into(),
            target: None,
            propagation_stopped: false,
        }
    }

    /// The event type used to select listeners.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The node currently dispatching this event, or `None` before dispatch.
    pub fn target(&self) -> Option<NodeId> {
        self.target
    }

    /// Whether a listener has called [`Event::stop_propagation`].
    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    /// Stop bubbling past the current node. Calling it again has no effect.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub(crate) fn set_target(&mut self, node: NodeId) {
        self.target = Some(node);
    }
}

/// Reasons a [`Tree::dispatch`](crate::tree::Tree::dispatch) call ended early.
///
/// `E` is the error type listeners return.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError<E> {
    /// Dispatch started on a handle that does not name a node in this tree.
    #[error("node {0:?} is not part of this tree")]
    UnknownNode(NodeId),
    /// The parent chain loops; bubbling stepped to this node without ever reaching a root.
    #[error("parent chain loops back through node {0:?}")]
    Cycle(NodeId),
    /// A listener failed. Remaining listeners and all further bubbling were skipped.
    #[error("listener failed: {0}")]
    Listener(E),
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::{String, ToString};

    #[test]
    fn new_event_has_no_target_and_is_not_stopped() {
        let ev = Event::new("click");
        assert_eq!(ev.kind(), "click");
        assert_eq!(ev.target(), None);
        assert!(!ev.propagation_stopped());
    }

    #[test]
    fn empty_and_owned_kinds_are_accepted() {
        assert_eq!(Event::new("").kind(), "");
        assert_eq!(Event::new(String::from("hover")).kind(), "hover");
    }

    #[test]
    fn stop_propagation_is_idempotent() {
        let mut ev = Event::new("click");
        ev.stop_propagation();
        let once = ev.clone();
        ev.stop_propagation();
        assert!(ev.propagation_stopped());
        assert_eq!(ev, once);
    }

    #[test]
    fn error_messages_name_the_cause() {
        let e: DispatchError<String> = DispatchError::Listener("boom".into());
        assert_eq!(e.to_string(), "listener failed: boom");
        let e: DispatchError<String> = DispatchError::UnknownNode(NodeId::new(4));
        assert_eq!(e.to_string(), "node NodeId(4) is not part of this tree");
    }
}
