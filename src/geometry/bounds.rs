//! Axis-aligned bounding boxes over the integer grid.

use crate::geometry::Point;

/// A rectangle of grid cells, anchored at `location` and extending
/// `dimensions` cells in +x and +y. Cells on the upper edges are exclusive.
///
/// Dimensions must be strictly positive; an empty box is a construction bug.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub location: Point,
    pub dimensions: Point,
}

impl BoundingBox {
    pub fn new(location: Point, dimensions: Point) -> Self {
        assert!(
            dimensions.x > 0 && dimensions.y > 0,
            "bounding box dimensions must be positive, got {:?}",
            dimensions
        );
        Self { location, dimensions }
    }

    /// Smallest box containing every point in the slice.
    /// Panics on an empty slice.
    pub fn around(points: &[Point]) -> Self {
        assert!(!points.is_empty(), "cannot bound an empty point set");
        let mut min = points[0];
        let mut max = points[0];
        for p in &points[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Self::new(min, max - min + Point::new(1, 1))
    }

    pub fn width(&self) -> i32 {
        self.dimensions.x
    }

    pub fn height(&self) -> i32 {
        self.dimensions.y
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.location.x
            && p.x < self.location.x + self.dimensions.x
            && p.y >= self.location.y
            && p.y < self.location.y + self.dimensions.y
    }

    /// The four corner cells, inclusive on every edge.
    pub fn corners(&self) -> [Point; 4] {
        let far = self.location + self.dimensions - Point::new(1, 1);
        [
            self.location,
            Point::new(far.x, self.location.y),
            Point::new(self.location.x, far.y),
            far,
        ]
    }

    /// The box grown by one cell on every side.
    pub fn expand_by_one(&self) -> Self {
        Self::new(
            self.location - Point::new(1, 1),
            self.dimensions + Point::new(2, 2),
        )
    }

    /// Whether `p` lies in the one-cell ring directly outside the box.
    pub fn next_to(&self, p: Point) -> bool {
        self.expand_by_one().contains(p) && !self.contains(p)
    }

    /// Exact overlap test in plain (non-wrapped) space.
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        intervals_overlap(
            self.location.x,
            self.dimensions.x,
            other.location.x,
            other.dimensions.x,
        ) && intervals_overlap(
            self.location.y,
            self.dimensions.y,
            other.location.y,
            other.dimensions.y,
        )
    }
}

fn intervals_overlap(start_a: i32, len_a: i32, start_b: i32, len_b: i32) -> bool {
    start_a < start_b + len_b && start_b < start_a + len_a
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_exclusive_on_upper_edges() {
        let b = BoundingBox::new(Point::new(2, 3), Point::new(4, 2));
        assert!(b.contains(Point::new(2, 3)));
        assert!(b.contains(Point::new(5, 4)));
        assert!(!b.contains(Point::new(6, 4)));
        assert!(!b.contains(Point::new(5, 5)));
    }

    #[test]
    fn around_bounds_the_point_set_tightly() {
        let b = BoundingBox::around(&[
            Point::new(1, 5),
            Point::new(4, 2),
            Point::new(3, 3),
        ]);
        assert_eq!(b.location, Point::new(1, 2));
        assert_eq!(b.dimensions, Point::new(4, 4));
    }

    #[test]
    #[should_panic]
    fn around_panics_on_empty_input() {
        BoundingBox::around(&[]);
    }

    #[test]
    fn corners_are_inclusive_cells() {
        let b = BoundingBox::new(Point::new(0, 0), Point::new(3, 3));
        let corners = b.corners();
        for c in corners {
            assert!(b.contains(c), "corner {:?} outside box", c);
        }
        assert_eq!(corners[3], Point::new(2, 2));
    }

    #[test]
    fn next_to_matches_the_outer_ring() {
        let b = BoundingBox::new(Point::new(0, 0), Point::new(2, 2));
        assert!(b.next_to(Point::new(-1, 0)));
        assert!(b.next_to(Point::new(2, 2)));
        assert!(!b.next_to(Point::new(1, 1)));
        assert!(!b.next_to(Point::new(3, 0)));
    }

    #[test]
    fn overlap_test_catches_containment() {
        let big = BoundingBox::new(Point::new(0, 0), Point::new(10, 10));
        let inner = BoundingBox::new(Point::new(4, 4), Point::new(2, 2));
        let outside = BoundingBox::new(Point::new(10, 0), Point::new(2, 2));

        assert!(big.overlaps(&inner));
        assert!(inner.overlaps(&big));
        assert!(!big.overlaps(&outside));
    }
}
