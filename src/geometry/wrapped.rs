//! Toroidal wrapping of the simulation grid.
//!
//! The world is a `width` x `height` rectangle whose opposite edges are
//! glued together. Every geometric question that crosses an edge is answered
//! by considering the nine non-wrapped duplicates of a coordinate, one per
//! copy of the fundamental rectangle in the 3x3 tiling around it.

use crate::geometry::{distance, BoundingBox, Point, Vec2};

/// The wrapped simulation space. Cheap to copy; carries no cell data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrappedTorusSpace {
    pub width: i32,
    pub height: i32,
}

impl WrappedTorusSpace {
    pub fn new(width: i32, height: i32) -> Self {
        assert!(width > 0 && height > 0, "world dimensions must be positive");
        Self { width, height }
    }

    pub fn area(&self) -> i32 {
        self.width * self.height
    }

    /// Canonical representative of `p` inside `[0, width) x [0, height)`.
    pub fn wrap(&self, p: Point) -> Point {
        Point::new(p.x.rem_euclid(self.width), p.y.rem_euclid(self.height))
    }

    /// Canonical representative of a continuous position.
    pub fn wrap_vec(&self, v: Vec2) -> Vec2 {
        Vec2::new(
            v.x.rem_euclid(self.width as f32),
            v.y.rem_euclid(self.height as f32),
        )
    }

    /// Whether `p` falls outside the fundamental rectangle.
    pub fn out_of_bounds(&self, p: Point) -> bool {
        p.x < 0 || p.x >= self.width || p.y < 0 || p.y >= self.height
    }

    /// The offsets of the nine copies of the fundamental rectangle.
    pub fn frame_offsets(&self) -> [Point; 9] {
        let w = self.width;
        let h = self.height;
        [
            Point::new(-w, -h),
            Point::new(0, -h),
            Point::new(w, -h),
            Point::new(-w, 0),
            Point::new(0, 0),
            Point::new(w, 0),
            Point::new(-w, h),
            Point::new(0, h),
            Point::new(w, h),
        ]
    }

    /// The nine unwrapped copies of `p`, one per frame.
    pub fn duplicates(&self, p: Point) -> [Point; 9] {
        self.frame_offsets().map(|o| p + o)
    }

    /// The nine unwrapped copies of a continuous position.
    pub fn duplicates_vec(&self, v: Vec2) -> [Vec2; 9] {
        self.frame_offsets().map(|o| v + Vec2::extend(o))
    }

    /// Shortest distance between `a` and any duplicate of `b`.
    pub fn distance(&self, a: Point, b: Point) -> f32 {
        let b = self.wrap(b);
        self.duplicates(b)
            .iter()
            .map(|dup| distance(a, *dup))
            .fold(f32::INFINITY, f32::min)
    }

    /// Shortest distance between two continuous positions.
    pub fn distance_vec(&self, a: Vec2, b: Vec2) -> f32 {
        let b = self.wrap_vec(b);
        self.duplicates_vec(b)
            .iter()
            .map(|dup| (*dup - a).len())
            .fold(f32::INFINITY, f32::min)
    }

    /// The duplicate of `b` closest to `a`, in unwrapped coordinates.
    pub fn nearest_duplicate(&self, a: Vec2, b: Vec2) -> Vec2 {
        let b = self.wrap_vec(b);
        let mut best = b;
        let mut best_dist = f32::INFINITY;
        for dup in self.duplicates_vec(b) {
            let d = (dup - a).len();
            if d < best_dist {
                best_dist = d;
                best = dup;
            }
        }
        best
    }

    /// Whether two points denote the same cell on the torus.
    pub fn points_equal(&self, a: Point, b: Point) -> bool {
        self.wrap(a) == self.wrap(b)
    }

    /// The wrapped 4-neighborhood of `p`, deduplicated.
    ///
    /// On degenerate worlds (width or height 1) opposite neighbors collapse
    /// onto the same cell and appear once.
    pub fn neighbors(&self, p: Point) -> Vec<Point> {
        let mut out: Vec<Point> = p.neighbors().iter().map(|n| self.wrap(*n)).collect();
        out.sort();
        out.dedup();
        out
    }

    /// The wrapped 8-neighborhood of `p`, deduplicated.
    pub fn neighbors8(&self, p: Point) -> Vec<Point> {
        let mut out = Vec::with_capacity(8);
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                out.push(self.wrap(p + Point::new(dx, dy)));
            }
        }
        out.sort();
        out.dedup();
        out.retain(|n| !self.points_equal(*n, p));
        out
    }

    /// Whether two cells are 4-adjacent on the torus.
    pub fn are_neighbors(&self, a: Point, b: Point) -> bool {
        let b = self.wrap(b);
        self.neighbors(a).contains(&b)
    }

    /// Whether any duplicate of `p` lies inside the box.
    pub fn within_bounding_box(&self, b: &BoundingBox, p: Point) -> bool {
        self.duplicates(p).iter().any(|dup| b.contains(*dup))
    }

    /// The duplicate of `p` lying inside `b`, if any.
    pub fn get_unwrapped(&self, b: &BoundingBox, p: Point) -> Option<Point> {
        self.duplicates(p).into_iter().find(|dup| b.contains(*dup))
    }

    /// Wrapped overlap test between two boxes.
    ///
    /// Checks corner containment of each box's corners against the
    /// duplicates of the other. Misses cross-shaped overlaps where neither
    /// box holds a corner of the other; callers tolerate that by treating a
    /// positive as a hint and re-testing per cell.
    pub fn bounding_boxes_overlap(&self, a: &BoundingBox, b: &BoundingBox) -> bool {
        a.corners()
            .iter()
            .any(|c| self.within_bounding_box(b, self.wrap(*c)))
            || b.corners()
                .iter()
                .any(|c| self.within_bounding_box(a, self.wrap(*c)))
    }
}
