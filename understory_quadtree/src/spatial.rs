// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The capability a value needs to be indexed: a kind tag and a 2D position.

use kurbo::{Line, Point, Triangle};

/// Category of object a [`QuadTree`](crate::QuadTree) indexes.
///
/// A tree is bound to exactly one kind at construction. Offering it an object of
/// another kind is a programming error and panics.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    /// Mesh vertices, located at themselves.
    Point,
    /// Mesh edges, located at their midpoint.
    Segment,
    /// Mesh faces, located at their centroid.
    Triangle,
}

/// Spatial object capability used by the quadtree.
///
/// The tree only ever asks for these two things. It never calls back into the
/// owner of the object for anything else.
pub trait Spatial {
    /// Kind of this object; must match the kind of the tree it is offered to.
    fn kind(&self) -> ObjectKind;

    /// The coordinate the tree sorts this object by.
    fn position(&self) -> Point;
}

impl Spatial for Point {
    #[inline]
    fn kind(&self) -> ObjectKind {
        ObjectKind::Point
    }

    #[inline]
    fn position(&self) -> Point {
        *self
    }
}

impl Spatial for Line {
    #[inline]
    fn kind(&self) -> ObjectKind {
        ObjectKind::Segment
    }

    #[inline]
    fn position(&self) -> Point {
        self.p0.midpoint(self.p1)
    }
}

impl Spatial for Triangle {
    #[inline]
    fn kind(&self) -> ObjectKind {
        ObjectKind::Triangle
    }

    #[inline]
    fn position(&self) -> Point {
        Point::new(
            (self.a.x + self.b.x + self.c.x) / 3.0,
            (self.a.y + self.b.y + self.c.y) / 3.0,
        )
    }
}

impl<S: Spatial + ?Sized> Spatial for &S {
    #[inline]
    fn kind(&self) -> ObjectKind {
        (**self).kind()
    }

    #[inline]
    fn position(&self) -> Point {
        (**self).position()
    }
}
