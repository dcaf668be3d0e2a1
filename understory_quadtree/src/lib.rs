// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_quadtree --heading-base-level=0

//! Understory Quadtree: an adaptive 2D region quadtree over externally owned objects.
//!
//! Understory Quadtree is the spatial index a mesh generator keeps next to its
//! vertices, edges, and faces so that neighborhood searches do not scan every object.
//!
//! - Insert, remove, and test membership of objects by address identity.
//! - Query by closed rectangle or closed disk; results come back in a fixed,
//!   quadrant-local order.
//! - Leaves split when they exceed a fixed capacity and collapse again once their
//!   parent's subtree shrinks back to capacity.
//!
//! The tree holds `&T` references and never owns, moves, or drops the objects it
//! indexes. Anything implementing [`Spatial`] can be indexed; implementations are
//! provided for Kurbo's [`Point`](kurbo::Point), [`Line`](kurbo::Line) (located at
//! its midpoint) and [`Triangle`](kurbo::Triangle) (located at its centroid).
//!
//! # Example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use understory_quadtree::{Containment, ObjectKind, QuadTree, Quadrant};
//!
//! let pts = [
//!     Point::new(-1.5, -1.5),
//!     Point::new(0.75, -0.75),
//!     Point::new(0.75, 1.25),
//!     Point::new(1.25, 0.75),
//! ];
//! let mut tree = QuadTree::new(ObjectKind::Point, Rect::new(-2.0, -2.0, 2.0, 2.0), 3);
//! for p in &pts {
//!     assert!(tree.insert(p));
//! }
//!
//! // The fourth insert overflowed the root and split it.
//! let root = tree.root();
//! assert!(tree.is_split(root));
//! let ne = tree.child(root, Quadrant::NorthEast).unwrap();
//! assert!(tree.contains_in(ne, &pts[3], Containment::Local));
//! assert!(!tree.contains(&pts[3], Containment::Local));
//! assert!(tree.contains(&pts[3], Containment::Recursive));
//!
//! // Range queries.
//! let near: Vec<_> = tree.query_circle(Point::new(1.0, 1.0), 0.75);
//! assert_eq!(near, [&pts[2], &pts[3]]);
//! let boxed = tree.query_rect(Rect::new(-2.0, -2.0, 0.0, 0.0));
//! assert_eq!(boxed, [&pts[0]]);
//! ```
//!
//! ## Ordering
//!
//! Every traversal is depth-first pre-order with children visited north-east,
//! north-west, south-west, south-east. Within a leaf, objects keep insertion order.
//! A merge drains its children in the same order.
//!
//! ## Boundaries
//!
//! Membership is boundary-inclusive everywhere. A coordinate exactly on a node's
//! vertical or horizontal dividing line goes to the east or north child.
//!
//! ## Errors
//!
//! - Offering an object outside the root region is an ordinary `false` result.
//! - Offering an object of the wrong [`ObjectKind`] panics.
//! - A refused explicit [`QuadTree::try_merge`] returns a [`MergeError`]; the
//!   automatic merge attempted after removals is skipped quietly (logged at `debug`).
//! - [`QuadTree::validate`] reports the first broken invariant as a [`ValidationError`].
//!
//! ## Concurrency
//!
//! The tree is a plain single-owner structure. Mutation requires `&mut self`;
//! share it across threads behind your own lock.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod config;
pub mod error;
pub mod query;
pub mod region;
pub mod spatial;
pub mod tree;
pub mod types;
mod validate;

pub use config::{QuadTreeConfig, SplitPolicy};
pub use error::{MergeError, ValidationError};
pub use query::Objects;
pub use region::Region;
pub use spatial::{ObjectKind, Spatial};
pub use tree::QuadTree;
pub use types::{Containment, NodeId, Quadrant};
