// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for merges and structural validation.

use crate::types::{NodeId, Quadrant};

/// Reasons a [`QuadTree::try_merge`](crate::QuadTree::try_merge) is refused.
///
/// A refused merge leaves the tree untouched.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MergeError {
    /// The id does not refer to a live node.
    #[error("node {0:?} is not alive")]
    StaleNode(NodeId),
    /// The node is already a leaf.
    #[error("node is not split")]
    NotSplit,
    /// A child is itself split; merges only collapse one level at a time.
    #[error("cannot merge: child {0:?} is still split")]
    ChildSplit(Quadrant),
    /// The merged leaf would exceed the leaf capacity.
    #[error("cannot merge: {total} objects exceed capacity {capacity}")]
    OverCapacity {
        /// Objects in the subtree.
        total: usize,
        /// Leaf capacity of the tree.
        capacity: usize,
    },
}

/// First structural invariant found broken by [`QuadTree::validate`](crate::QuadTree::validate).
#[derive(Copy, Clone, Debug, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// A split node's children do not quarter its region at its center.
    #[error("children of {node:?} do not tile its region")]
    BadTiling {
        /// The split node.
        node: NodeId,
    },
    /// A split node still stores objects of its own.
    #[error("split node {node:?} stores {len} objects directly")]
    ObjectsOnSplitNode {
        /// The split node.
        node: NodeId,
        /// Number of stray objects.
        len: usize,
    },
    /// An object's position lies outside the region of the leaf holding it.
    #[error("leaf {node:?} holds an object at ({x}, {y}) outside its region")]
    OutOfRegion {
        /// The leaf.
        node: NodeId,
        /// Object x coordinate.
        x: f64,
        /// Object y coordinate.
        y: f64,
    },
    /// A splittable leaf holds more than `capacity` objects.
    #[error("leaf {node:?} holds {len} objects, capacity is {capacity}")]
    OverCapacity {
        /// The leaf.
        node: NodeId,
        /// Objects stored.
        len: usize,
        /// Leaf capacity of the tree.
        capacity: usize,
    },
    /// The maintained total disagrees with a recount.
    #[error("node {node:?} reports {maintained} objects, recount finds {counted}")]
    CountMismatch {
        /// The node.
        node: NodeId,
        /// Value of the maintained counter.
        maintained: usize,
        /// Recursive recount.
        counted: usize,
    },
    /// A child's parent link or depth does not match its position in the tree.
    #[error("child {node:?} has a wrong parent link or depth")]
    BadLink {
        /// The child.
        node: NodeId,
    },
}
