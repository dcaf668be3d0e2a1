// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural diagnostics: node statistics and a full invariant check.

use crate::config::SplitPolicy;
use crate::error::ValidationError;
use crate::spatial::Spatial;
use crate::tree::QuadTree;
use crate::types::{NodeId, Quadrant};

impl<T: Spatial + ?Sized> QuadTree<'_, T> {
    /// Number of live nodes, split and leaf.
    pub fn node_count(&self) -> usize {
        self.live_nodes().count()
    }

    /// Number of live leaves.
    pub fn leaf_count(&self) -> usize {
        self.live_nodes()
            .filter(|(_, n)| n.children.is_none())
            .count()
    }

    /// Depth of the deepest live node.
    pub fn max_depth_reached(&self) -> u32 {
        self.live_nodes().map(|(_, n)| n.depth).max().unwrap_or(0)
    }

    /// Walk the whole tree and check its structural invariants.
    ///
    /// Checks that split nodes store no objects and are exactly tiled by their
    /// children, that children link back to their parent one level down, that
    /// every object lies inside its leaf, that splittable leaves are within
    /// capacity, and that every maintained total equals a recount.
    ///
    /// Under [`SplitPolicy::Lazy`] the capacity check is skipped: a split leaves
    /// overfull children as they are until the next insert reaches them.
    ///
    /// This is O(n) and meant for tests and debugging.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.validate_node(self.root()).map(|_| ())
    }

    /// Returns the recounted number of objects under `id`.
    fn validate_node(&self, id: NodeId) -> Result<usize, ValidationError> {
        let node = self.node(id);
        let counted = match node.children {
            Some(children) => {
                if !node.objects.is_empty() {
                    return Err(ValidationError::ObjectsOnSplitNode {
                        node: id,
                        len: node.objects.len(),
                    });
                }
                let mut sum = 0;
                for (q, c) in Quadrant::ALL.into_iter().zip(children) {
                    let child = self.node_opt(c).ok_or(ValidationError::BadLink { node: c })?;
                    if child.parent != Some(id) || child.depth != node.depth + 1 {
                        return Err(ValidationError::BadLink { node: c });
                    }
                    if child.region != node.region.quadrant(q) {
                        return Err(ValidationError::BadTiling { node: id });
                    }
                    sum += self.validate_node(c)?;
                }
                sum
            }
            None => {
                for obj in &node.objects {
                    let p = obj.position();
                    if !node.region.contains(p) {
                        return Err(ValidationError::OutOfRegion {
                            node: id,
                            x: p.x,
                            y: p.y,
                        });
                    }
                }
                let capacity = self.capacity();
                if self.config().split_policy == SplitPolicy::Cascade
                    && node.objects.len() > capacity
                    && node.depth < self.config().max_depth
                {
                    return Err(ValidationError::OverCapacity {
                        node: id,
                        len: node.objects.len(),
                        capacity,
                    });
                }
                node.objects.len()
            }
        };
        if counted != node.total {
            return Err(ValidationError::CountMismatch {
                node: id,
                maintained: node.total,
                counted,
            });
        }
        Ok(counted)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;
    use core::cell::Cell;

    use kurbo::{Point, Rect};

    use crate::config::{QuadTreeConfig, SplitPolicy};
    use crate::error::ValidationError;
    use crate::spatial::{ObjectKind, Spatial};
    use crate::tree::QuadTree;
    use crate::types::Quadrant;

    fn corners() -> Vec<Point> {
        [(-1.0, -1.0), (-1.0, 1.0), (1.0, -1.0), (1.0, 1.0)]
            .into_iter()
            .map(|(x, y)| Point::new(x, y))
            .collect()
    }

    fn square() -> Rect {
        Rect::new(-2.0, -2.0, 2.0, 2.0)
    }

    /// A vertex the test can move after it was indexed.
    #[derive(Debug)]
    struct Drifting {
        at: Cell<Point>,
    }

    impl Spatial for Drifting {
        fn kind(&self) -> ObjectKind {
            ObjectKind::Point
        }

        fn position(&self) -> Point {
            self.at.get()
        }
    }

    #[test]
    fn statistics_follow_splits() {
        let p = corners();
        let mut tree = QuadTree::new(ObjectKind::Point, square(), 3);
        assert_eq!((tree.node_count(), tree.leaf_count(), tree.max_depth_reached()), (1, 1, 0));
        for q in &p {
            tree.insert(q);
        }
        assert_eq!((tree.node_count(), tree.leaf_count(), tree.max_depth_reached()), (5, 4, 1));
        assert_eq!(tree.validate(), Ok(()));
    }

    #[test]
    fn lazy_trees_skip_the_capacity_check() {
        let p: Vec<_> = (1..=5).map(|i| Point::new(0.1 * f64::from(i), 0.1)).collect();
        let cfg = QuadTreeConfig::with_capacity(3).split_policy(SplitPolicy::Lazy);
        let mut tree = QuadTree::with_config(ObjectKind::Point, square(), cfg);
        for q in &p[..4] {
            tree.insert(q);
        }
        let ne = tree.child(tree.root(), Quadrant::NorthEast).unwrap();
        assert_eq!(tree.objects(ne).len(), 4);
        assert_eq!(tree.validate(), Ok(()));

        // Splitting NE drops all five into its south-west child.
        tree.insert(&p[4]);
        let ne_sw = tree.child(ne, Quadrant::SouthWest).unwrap();
        assert_eq!(tree.objects(ne_sw).len(), 5);
        assert_eq!(tree.validate(), Ok(()));
    }

    #[test]
    fn overfull_leaf_is_reported() {
        let p = corners();
        let extra = Point::new(0.5, 0.5);
        let mut tree = QuadTree::new(ObjectKind::Point, square(), 3);
        for q in &p[..3] {
            tree.insert(q);
        }
        let root = tree.root();
        let node = tree.node_mut(root);
        node.objects.push(&extra);
        node.total += 1;
        assert_eq!(
            tree.validate(),
            Err(ValidationError::OverCapacity {
                node: root,
                len: 4,
                capacity: 3
            })
        );
    }

    #[test]
    fn moved_object_is_reported_out_of_region() {
        let v = Drifting {
            at: Cell::new(Point::new(0.5, 0.5)),
        };
        let mut tree = QuadTree::new(ObjectKind::Point, square(), 3);
        assert!(tree.insert(&v));
        assert_eq!(tree.validate(), Ok(()));
        v.at.set(Point::new(3.0, -4.0));
        assert_eq!(
            tree.validate(),
            Err(ValidationError::OutOfRegion {
                node: tree.root(),
                x: 3.0,
                y: -4.0
            })
        );
    }

    #[test]
    fn drifted_total_is_reported() {
        let p = corners();
        let mut tree = QuadTree::new(ObjectKind::Point, square(), 3);
        for q in &p {
            tree.insert(q);
        }
        let root = tree.root();
        tree.node_mut(root).total = 7;
        assert_eq!(
            tree.validate(),
            Err(ValidationError::CountMismatch {
                node: root,
                maintained: 7,
                counted: 4
            })
        );
    }

    #[test]
    fn mismatched_child_region_is_reported() {
        let p = corners();
        let mut tree = QuadTree::new(ObjectKind::Point, square(), 3);
        for q in &p {
            tree.insert(q);
        }
        let root = tree.root();
        let ne = tree.child(root, Quadrant::NorthEast).unwrap();
        let nw_region = tree.region(tree.child(root, Quadrant::NorthWest).unwrap()).unwrap();
        tree.node_mut(ne).region = nw_region;
        assert_eq!(tree.validate(), Err(ValidationError::BadTiling { node: root }));
    }

    #[test]
    fn broken_parent_link_and_depth_are_reported() {
        let p = corners();
        let mut tree = QuadTree::new(ObjectKind::Point, square(), 3);
        for q in &p {
            tree.insert(q);
        }
        let root = tree.root();
        let sw = tree.child(root, Quadrant::SouthWest).unwrap();
        tree.node_mut(sw).parent = None;
        assert_eq!(tree.validate(), Err(ValidationError::BadLink { node: sw }));

        tree.node_mut(sw).parent = Some(root);
        tree.node_mut(sw).depth = 3;
        assert_eq!(tree.validate(), Err(ValidationError::BadLink { node: sw }));

        tree.node_mut(sw).depth = 1;
        assert_eq!(tree.validate(), Ok(()));
    }
}
