// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage of Understory Quadtree: insert, split, query, remove, merge.

use kurbo::{Point, Rect};
use understory_quadtree::{ObjectKind, QuadTree, Quadrant};

fn main() {
    let pts = [
        Point::new(-1.5, -1.5),
        Point::new(0.75, -0.75),
        Point::new(0.75, 1.25),
        Point::new(1.25, 0.75),
    ];
    let mut tree = QuadTree::new(ObjectKind::Point, Rect::new(-2.0, -2.0, 2.0, 2.0), 3);
    for p in &pts {
        tree.insert(p);
    }
    println!("split after 4 inserts: {}", tree.is_split(tree.root()));
    for q in Quadrant::ALL {
        if let Some(child) = tree.child(tree.root(), q) {
            println!("  {q:?}: {:?}", tree.objects(child));
        }
    }

    let hits = tree.query_circle(Point::new(1.0, 1.0), 0.75);
    println!("within 0.75 of (1,1): {hits:?}");

    tree.remove(&pts[1]);
    println!(
        "after removing {:?}: split={}, root holds {:?}",
        pts[1],
        tree.is_split(tree.root()),
        tree.objects(tree.root())
    );
}
