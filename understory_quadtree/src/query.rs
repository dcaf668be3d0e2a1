// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Range queries and in-order traversal.
//!
//! All traversals are depth-first and pre-order, visiting children north-east,
//! north-west, south-west, south-east. Within a leaf, objects come out in
//! insertion order. Callers doing adjacency searches rely on this ordering.

use alloc::vec::Vec;
use core::fmt;
use core::slice;

use kurbo::{Point, Rect};

use crate::region::Region;
use crate::spatial::Spatial;
use crate::tree::QuadTree;
use crate::types::NodeId;

impl<'a, T: Spatial + ?Sized> QuadTree<'a, T> {
    /// Objects whose position lies in the closed rectangle `rect`.
    ///
    /// Subtrees whose region does not touch `rect` are skipped.
    pub fn query_rect(&self, rect: Rect) -> Vec<&'a T> {
        let mut out = Vec::new();
        self.query_rect_into(rect, &mut out);
        out
    }

    /// Like [`query_rect`](Self::query_rect), appending to `out`.
    pub fn query_rect_into(&self, rect: Rect, out: &mut Vec<&'a T>) {
        let rect = rect.abs();
        self.collect_where(
            self.root(),
            &|region: &Region| region.intersects_rect(&rect),
            &|p: Point| rect.x0 <= p.x && p.x <= rect.x1 && rect.y0 <= p.y && p.y <= rect.y1,
            out,
        );
    }

    /// Objects whose position lies in the closed disk at `center` with `radius`.
    ///
    /// Distances are compared squared. A negative radius matches nothing.
    pub fn query_circle(&self, center: Point, radius: f64) -> Vec<&'a T> {
        let mut out = Vec::new();
        self.query_circle_into(center, radius, &mut out);
        out
    }

    /// Like [`query_circle`](Self::query_circle), appending to `out`.
    pub fn query_circle_into(&self, center: Point, radius: f64, out: &mut Vec<&'a T>) {
        if radius < 0.0 {
            return;
        }
        let r2 = radius * radius;
        self.collect_where(
            self.root(),
            &|region: &Region| region.intersects_circle(center, radius),
            &|p: Point| (p - center).hypot2() <= r2,
            out,
        );
    }

    /// Objects located exactly at `p`.
    pub fn query_point(&self, p: Point) -> Vec<&'a T> {
        self.query_rect(Rect::from_points(p, p))
    }

    /// Every indexed object in traversal order.
    pub fn iter(&self) -> Objects<'_, 'a, T> {
        let mut stack = Vec::new();
        stack.push(self.root());
        let empty: &[&'a T] = &[];
        Objects {
            tree: self,
            stack,
            leaf: empty.iter(),
        }
    }

    fn collect_where<R, K>(&self, id: NodeId, prune: &R, keep: &K, out: &mut Vec<&'a T>)
    where
        R: Fn(&Region) -> bool,
        K: Fn(Point) -> bool,
    {
        let node = self.node(id);
        if !prune(&node.region) {
            return;
        }
        match node.children {
            Some(children) => {
                for c in children {
                    self.collect_where(c, prune, keep, out);
                }
            }
            None => out.extend(node.objects.iter().copied().filter(|o| keep(o.position()))),
        }
    }
}

/// Iterator over all objects of a [`QuadTree`], in traversal order.
///
/// Returned by [`QuadTree::iter`].
pub struct Objects<'t, 'a, T: Spatial + ?Sized> {
    tree: &'t QuadTree<'a, T>,
    stack: Vec<NodeId>,
    leaf: slice::Iter<'t, &'a T>,
}

impl<'a, T: Spatial + ?Sized> Iterator for Objects<'_, 'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(obj) = self.leaf.next() {
                return Some(*obj);
            }
            let id = self.stack.pop()?;
            let node = self.tree.node(id);
            match node.children {
                // Reversed so the north-east child is popped first.
                Some(children) => self.stack.extend(children.into_iter().rev()),
                None => self.leaf = node.objects.iter(),
            }
        }
    }
}

impl<T: Spatial + ?Sized> fmt::Debug for Objects<'_, '_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Objects")
            .field("pending_nodes", &self.stack.len())
            .field("pending_in_leaf", &self.leaf.len())
            .finish_non_exhaustive()
    }
}
