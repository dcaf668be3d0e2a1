// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the quadtree: node identifiers, quadrants, and lookup modes.

/// Identifier for a node in the tree.
///
/// A small, copyable handle consisting of an arena slot and a generation counter.
/// Nodes are created by splits and destroyed by merges, so a `NodeId` obtained
/// before a merge goes stale once its node is collapsed into the parent.
///
/// - Fresh slots start at generation `1`.
/// - A freed slot that is reused gets its generation incremented, so stale ids
///   never alias a different live node.
///
/// Use [`QuadTree::is_alive`](crate::QuadTree::is_alive) to check liveness.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    pub(crate) const fn generation(self) -> u32 {
        self.1
    }
}

/// One of the four children of a split node.
///
/// The declaration order is the traversal order used by every operation:
/// north-east, north-west, south-west, south-east.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// `x >= center.x`, `y >= center.y`.
    NorthEast = 0,
    /// `x < center.x`, `y >= center.y`.
    NorthWest = 1,
    /// `x < center.x`, `y < center.y`.
    SouthWest = 2,
    /// `x >= center.x`, `y < center.y`.
    SouthEast = 3,
}

impl Quadrant {
    /// All quadrants in traversal order.
    pub const ALL: [Self; 4] = [
        Self::NorthEast,
        Self::NorthWest,
        Self::SouthWest,
        Self::SouthEast,
    ];

    /// Position of this quadrant in [`Quadrant::ALL`].
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Classify a point relative to a center. Points on a dividing line go east/north.
    #[inline]
    pub fn classify(east: bool, north: bool) -> Self {
        match (east, north) {
            (true, true) => Self::NorthEast,
            (false, true) => Self::NorthWest,
            (false, false) => Self::SouthWest,
            (true, false) => Self::SouthEast,
        }
    }
}

/// How far [`QuadTree::contains`](crate::QuadTree::contains) looks.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Containment {
    /// Only the objects stored directly on the node; children are ignored even
    /// when the node is split.
    Local,
    /// The node's whole subtree.
    #[default]
    Recursive,
}
