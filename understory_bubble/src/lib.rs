// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Bubble: deterministic, `no_std` event targets with synchronous bubbling.
//!
//! ## Overview
//!
//! A [`Tree`](crate::tree::Tree) holds event targets linked into a forest by parent handles.
//! Each target keeps listeners per event type. Dispatching an [`Event`](crate::types::Event) at a
//! target runs that target's listeners, then hands the same event to its parent, and so on until a
//! root is reached or a listener calls [`Event::stop_propagation`](crate::types::Event::stop_propagation).
//!
//! There is no capture phase, no default action, and no listener priority beyond registration order.
//!
//! ## Targets and links
//!
//! Targets are created with [`Tree::insert`](crate::tree::Tree::insert) and addressed by
//! [`NodeId`](crate::types::NodeId). Parent links are plain handles set with
//! [`Tree::set_parent`](crate::tree::Tree::set_parent); they may change at any time, and the shape
//! at dispatch time decides the bubble path.
//!
//! ## Listeners
//!
//! A [`Listener`](crate::listener::Listener) is a cloneable callback handle. Clones share identity,
//! which is what [`Tree::remove_listener`](crate::tree::Tree::remove_listener) matches on.
//! Listeners receive `&mut Tree`, so they can edit registrations, relink targets, or dispatch other
//! events. Each target's pass iterates a snapshot of its listeners, so such edits take effect on
//! the next pass.
//!
//! ## Failure
//!
//! Listeners return `Result<(), E>`. The first `Err` ends the whole dispatch and is returned as
//! [`DispatchError::Listener`](crate::types::DispatchError::Listener). A parent chain that loops is
//! reported as [`DispatchError::Cycle`](crate::types::DispatchError::Cycle) instead of running forever.
//!
//! ## Example
//!
//! ```
//! use core::cell::RefCell;
//! use std::rc::Rc;
//! use understory_bubble::tree::Tree;
//! use understory_bubble::types::Event;
//!
//! let mut tree: Tree = Tree::new();
//! let parent = tree.insert("parent");
//! let child = tree.insert("child");
//! tree.set_parent(child, Some(parent));
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! for node in [parent, child] {
//!     let seen = seen.clone();
//!     tree.on(node, "click", move |tree, ev| {
//!         let name = tree.name(ev.target().unwrap()).unwrap().to_owned();
//!         seen.borrow_mut().push(name);
//!         Ok(())
//!     });
//! }
//!
//! tree.dispatch(child, &mut Event::new("click")).unwrap();
//! assert_eq!(*seen.borrow(), ["child", "parent"]);
//! ```
//!
//! ## Features
//!
//! - `tracing`: emit `trace!` records for every bubbling pass, stop, and abort.
//! - `std`: enable std support in dependencies.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod listener;
pub mod tree;
pub mod types;
