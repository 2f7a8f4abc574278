// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bubbling basics.
//!
//! Builds a grandparent ← parent ← child chain, registers a `click` listener
//! on each, and dispatches at the child. Every listener sees itself as the
//! current target.
//!
//! Run:
//! - `cargo run -p understory_demos --example bubble_basics`
//! - `RUST_LOG=trace cargo run -p understory_demos --example bubble_basics` to see each hop

use tracing_subscriber::EnvFilter;
use understory_bubble::tree::Tree;
use understory_bubble::types::Event;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(true)
        .init();

    let mut tree: Tree = Tree::new();
    let grandparent = tree.insert("grandparent");
    let parent = tree.insert("parent");
    let child = tree.insert("child");

    tree.set_parent(parent, Some(grandparent));
    tree.set_parent(child, Some(parent));

    for (node, label) in [
        (grandparent, "Grandparent"),
        (parent, "Parent"),
        (child, "Child"),
    ] {
        tree.on(node, "click", move |tree, ev| {
            let from = ev.target().and_then(|t| tree.name(t)).unwrap_or("?");
            println!("{label} received event from {from}");
            Ok(())
        });
    }

    let mut click = Event::new("click");
    if let Err(e) = tree.dispatch(child, &mut click) {
        tracing::error!(error = %e, "dispatch failed");
    }
}
