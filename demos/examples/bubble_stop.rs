// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stopping, removal, and failure.
//!
//! - The parent stops propagation, so the grandparent never hears the click.
//! - A listener is removed by handle and no longer fires.
//! - A failing listener aborts the dispatch and the error reaches the caller.
//!
//! Run:
//! - `cargo run -p understory_demos --example bubble_stop`

use tracing_subscriber::EnvFilter;
use understory_bubble::tree::Tree;
use understory_bubble::types::Event;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut tree: Tree<String> = Tree::new();
    let grandparent = tree.insert("grandparent");
    let parent = tree.insert("parent");
    let child = tree.insert("child");
    tree.set_parent(parent, Some(grandparent));
    tree.set_parent(child, Some(parent));

    tree.on(grandparent, "click", |_, _| {
        println!("  grandparent: click (should not appear)");
        Ok(())
    });
    tree.on(parent, "click", |_, ev| {
        println!("  parent: click, stopping propagation");
        ev.stop_propagation();
        Ok(())
    });
    let child_click = tree.on(child, "click", |_, _| {
        println!("  child: click");
        Ok(())
    });

    println!("== Stop at parent ==");
    report(tree.dispatch(child, &mut Event::new("click")));

    println!("== After removing the child listener ==");
    tree.remove_listener(child, "click", &child_click);
    report(tree.dispatch(child, &mut Event::new("click")));

    println!("== Failing listener ==");
    tree.on(child, "save", |tree, ev| {
        let name = ev.target().and_then(|t| tree.name(t)).unwrap_or("?");
        Err(format!("{name} has nothing to save"))
    });
    tree.on(grandparent, "save", |_, _| {
        println!("  grandparent: save (should not appear)");
        Ok(())
    });
    report(tree.dispatch(child, &mut Event::new("save")));
}

fn report(res: Result<(), understory_bubble::types::DispatchError<String>>) {
    match res {
        Ok(()) => println!("  -> done"),
        Err(e) => println!("  -> {e}"),
    }
}
