// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_bubble::tree::Tree;
use understory_bubble::types::{Event, NodeId};

/// A single chain of `depth` nodes, each with `per_node` listeners for `click`.
/// Returns the tree and the deepest node.
fn build_chain(depth: usize, per_node: usize) -> (Tree, NodeId) {
    let mut tree = Tree::new();
    let mut prev: Option<NodeId> = None;
    let mut leaf = None;
    for _ in 0..depth {
        let n = tree.insert("n");
        tree.set_parent(n, prev);
        for _ in 0..per_node {
            tree.on(n, "click", |_, ev| {
                black_box(ev.target());
                Ok(())
            });
        }
        prev = Some(n);
        leaf = Some(n);
    }
    (tree, leaf.expect("depth must be non-zero"))
}

fn bench_bubble_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("bubble_depth");
    for &depth in &[4_usize, 32, 256] {
        let (mut tree, leaf) = build_chain(depth, 2);
        group.throughput(Throughput::Elements(depth as u64));
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, _| {
            b.iter(|| {
                let mut ev = Event::new("click");
                tree.dispatch(black_box(leaf), &mut ev).unwrap();
                black_box(ev.target())
            });
        });
    }
    group.finish();
}

fn bench_stop_early(c: &mut Criterion) {
    let (mut tree, leaf) = build_chain(256, 1);
    tree.on(leaf, "click", |_, ev| {
        ev.stop_propagation();
        Ok(())
    });
    c.bench_function("stop_at_leaf_depth_256", |b| {
        b.iter(|| {
            let mut ev = Event::new("click");
            tree.dispatch(black_box(leaf), &mut ev).unwrap();
            black_box(ev.propagation_stopped())
        });
    });
}

fn bench_unmatched_kind(c: &mut Criterion) {
    let (mut tree, leaf) = build_chain(256, 4);
    c.bench_function("unmatched_kind_depth_256", |b| {
        b.iter(|| {
            let mut ev = Event::new("hover");
            tree.dispatch(black_box(leaf), &mut ev).unwrap();
        });
    });
}

criterion_group!(
    benches,
    bench_bubble_depth,
    bench_stop_early,
    bench_unmatched_kind
);
criterion_main!(benches);
