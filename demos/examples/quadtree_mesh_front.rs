// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A mesh-builder style workflow: index the boundary edges of a domain, then look
//! for edges near a candidate vertex before accepting it, the way an advancing
//! front checks for conflicts.

use kurbo::{Line, Point, Rect};
use tracing_subscriber::EnvFilter;
use understory_quadtree::{Containment, ObjectKind, QuadTree, QuadTreeConfig};

fn main() {
    // `RUST_LOG=understory_quadtree=trace` shows every split and merge.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Boundary loop of a 20 x 10 rectangle, with 5-unit edges along the long sides.
    let mut corners = Vec::new();
    for i in 0..=4 {
        corners.push(Point::new(f64::from(i) * 5.0, 0.0));
    }
    for i in (0..=4).rev() {
        corners.push(Point::new(f64::from(i) * 5.0, 10.0));
    }
    let edges: Vec<Line> = (0..corners.len())
        .map(|i| Line::new(corners[i], corners[(i + 1) % corners.len()]))
        .collect();

    let mut front = QuadTree::with_config(
        ObjectKind::Segment,
        Rect::new(-1.0, -1.0, 21.0, 11.0),
        QuadTreeConfig::with_capacity(3),
    );
    for e in &edges {
        front.insert(e);
    }
    println!(
        "{} front edges in {} nodes ({} leaves, depth {})",
        front.len(),
        front.node_count(),
        front.leaf_count(),
        front.max_depth_reached()
    );

    for candidate in [Point::new(10.0, 5.0), Point::new(18.5, 1.0)] {
        let near = front.query_circle(candidate, 3.0);
        println!("candidate {candidate:?}: {} nearby edges", near.len());
        for e in near {
            println!("  {:?} -> {:?}", e.p0, e.p1);
        }
    }

    // Retire the first edge as if a triangle had been built on it.
    front.remove(&edges[0]);
    println!(
        "edge 0 still on front: {}",
        front.contains(&edges[0], Containment::Recursive)
    );
    if let Err(err) = front.validate() {
        println!("front index is inconsistent: {err}");
    }
}
