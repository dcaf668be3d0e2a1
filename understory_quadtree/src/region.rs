// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node regions: bounds, center and extent, plus the predicates used by descent and pruning.

use kurbo::{Point, Rect, Vec2};

use crate::types::Quadrant;

/// Axis-aligned region covered by a quadtree node.
///
/// All membership tests are boundary-inclusive. Sibling regions therefore share
/// their common edges; [`Region::quadrant_of`] breaks those ties toward east/north.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Region {
    bounds: Rect,
    center: Point,
    extent: Vec2,
}

impl Region {
    /// Create a region from two corners. Corners are normalized, so
    /// `min`/`max` may be given in either order.
    pub fn new(min: Point, max: Point) -> Self {
        Self::from_rect(Rect::from_points(min, max))
    }

    /// Create a region covering `rect`.
    pub fn from_rect(rect: Rect) -> Self {
        let bounds = rect.abs();
        Self {
            bounds,
            center: bounds.center(),
            extent: Vec2::new(bounds.width(), bounds.height()),
        }
    }

    /// The closed bounds `[min, max]`.
    #[inline]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Lower-left corner.
    #[inline]
    pub fn min(&self) -> Point {
        Point::new(self.bounds.x0, self.bounds.y0)
    }

    /// Upper-right corner.
    #[inline]
    pub fn max(&self) -> Point {
        Point::new(self.bounds.x1, self.bounds.y1)
    }

    /// Midpoint of the bounds; the split point for children.
    #[inline]
    pub fn center(&self) -> Point {
        self.center
    }

    /// `max - min`.
    #[inline]
    pub fn extent(&self) -> Vec2 {
        self.extent
    }

    /// Whether `p` lies within the closed bounds.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        let b = &self.bounds;
        b.x0 <= p.x && p.x <= b.x1 && b.y0 <= p.y && p.y <= b.y1
    }

    /// The quadrant `p` is routed to when this region is split.
    ///
    /// A coordinate exactly on a dividing line belongs to the east/north side.
    #[inline]
    pub fn quadrant_of(&self, p: Point) -> Quadrant {
        Quadrant::classify(p.x >= self.center.x, p.y >= self.center.y)
    }

    /// The child region for `q`, quartering this region at its center.
    pub fn quadrant(&self, q: Quadrant) -> Self {
        let b = &self.bounds;
        let c = self.center;
        let rect = match q {
            Quadrant::NorthEast => Rect::new(c.x, c.y, b.x1, b.y1),
            Quadrant::NorthWest => Rect::new(b.x0, c.y, c.x, b.y1),
            Quadrant::SouthWest => Rect::new(b.x0, b.y0, c.x, c.y),
            Quadrant::SouthEast => Rect::new(c.x, b.y0, b.x1, c.y),
        };
        Self::from_rect(rect)
    }

    /// Whether this region and `rect` share at least one point (edges included).
    #[inline]
    pub fn intersects_rect(&self, rect: &Rect) -> bool {
        let b = &self.bounds;
        b.x0 <= rect.x1 && rect.x0 <= b.x1 && b.y0 <= rect.y1 && rect.y0 <= b.y1
    }

    /// Whether this region and the closed disk at `center` with `radius` overlap.
    ///
    /// Compares the squared distance from `center` to the nearest point of the region.
    #[inline]
    pub fn intersects_circle(&self, center: Point, radius: f64) -> bool {
        let b = &self.bounds;
        let nearest = Point::new(center.x.clamp(b.x0, b.x1), center.y.clamp(b.y0, b.y1));
        (nearest - center).hypot2() <= radius * radius
    }
}
