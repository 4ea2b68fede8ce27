//! Occupancy masks and connected-component partitioning.
//!
//! Regions and the world both need to answer "which cells form one connected
//! lump". The partitioner runs a single row-major scan over a boolean mask,
//! labelling each occupied cell eagerly and merging label groups whenever a
//! cell bridges two of them.

use crate::geometry::Point;

/// A dense boolean grid, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: i32,
    height: i32,
    cells: Vec<bool>,
}

impl Mask {
    pub fn new(width: i32, height: i32) -> Self {
        assert!(width > 0 && height > 0, "mask dimensions must be positive");
        Self {
            width,
            height,
            cells: vec![false; (width * height) as usize],
        }
    }

    /// Build a mask just large enough for the given dimensions, with the
    /// listed cells set. Points must already be in-bounds.
    pub fn from_points(width: i32, height: i32, points: &[Point]) -> Self {
        let mut mask = Self::new(width, height);
        for p in points {
            mask.set(*p, true);
        }
        mask
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    fn index(&self, p: Point) -> usize {
        debug_assert!(self.in_bounds(p), "mask access out of bounds: {:?}", p);
        (p.y * self.width + p.x) as usize
    }

    pub fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.x < self.width && p.y >= 0 && p.y < self.height
    }

    /// Out-of-bounds cells read as unoccupied.
    pub fn get(&self, p: Point) -> bool {
        self.in_bounds(p) && self.cells[self.index(p)]
    }

    pub fn set(&mut self, p: Point, value: bool) {
        let idx = self.index(p);
        self.cells[idx] = value;
    }

    pub fn count(&self) -> usize {
        self.cells.iter().filter(|c| **c).count()
    }

    /// All occupied cells in row-major order.
    pub fn points(&self) -> Vec<Point> {
        let mut out = Vec::with_capacity(self.count());
        for y in 0..self.height {
            for x in 0..self.width {
                let p = Point::new(x, y);
                if self.cells[self.index(p)] {
                    out.push(p);
                }
            }
        }
        out
    }
}

/// Split the occupied cells of `mask` into 4-connected components.
///
/// With `wrapped` set, opposite edges of the mask are treated as adjacent.
/// Component order follows the first cell of each component in row-major
/// scan order, and points within a component keep scan order too.
pub fn partition(mask: &Mask, wrapped: bool) -> Vec<Vec<Point>> {
    let mut labels: Vec<Option<usize>> =
        vec![None; (mask.width() * mask.height()) as usize];
    let mut components: Vec<Vec<Point>> = Vec::new();

    let label_at = |labels: &[Option<usize>], p: Point| -> Option<usize> {
        let p = if wrapped {
            Point::new(p.x.rem_euclid(mask.width()), p.y.rem_euclid(mask.height()))
        } else if !mask.in_bounds(p) {
            return None;
        } else {
            p
        };
        labels[(p.y * mask.width() + p.x) as usize]
    };

    for y in 0..mask.height() {
        for x in 0..mask.width() {
            let p = Point::new(x, y);
            if !mask.get(p) {
                continue;
            }

            // Labels already assigned among the 4-neighbors of this cell.
            let mut adjacent: Vec<usize> =
                p.neighbors().iter().filter_map(|n| label_at(&labels, *n)).collect();
            adjacent.sort_unstable();
            adjacent.dedup();

            let target = match adjacent.first() {
                None => {
                    components.push(Vec::new());
                    components.len() - 1
                }
                Some(first) => *first,
            };
            labels[(y * mask.width() + x) as usize] = Some(target);
            components[target].push(p);

            // This cell bridges two or more labelled groups. Fold each
            // larger group into the smallest and renumber everything above.
            for &other in adjacent.iter().skip(1).rev() {
                let absorbed = components.remove(other);
                for q in &absorbed {
                    labels[(q.y * mask.width() + q.x) as usize] = Some(target);
                }
                components[target].extend(absorbed);
                for label in labels.iter_mut() {
                    if let Some(l) = label {
                        if *l > other {
                            *l -= 1;
                        }
                    }
                }
            }
        }
    }

    components
}

/// Whether the occupied cells form at most one connected component.
pub fn is_contiguous(mask: &Mask) -> bool {
    partition(mask, false).len() <= 1
}

/// Whether the mask is cropped tight: every edge row and column holds at
/// least one occupied cell.
pub fn is_minimum_size(mask: &Mask) -> bool {
    let touches_column = |x: i32| (0..mask.height()).any(|y| mask.get(Point::new(x, y)));
    let touches_row = |y: i32| (0..mask.width()).any(|x| mask.get(Point::new(x, y)));
    touches_column(0)
        && touches_column(mask.width() - 1)
        && touches_row(0)
        && touches_row(mask.height() - 1)
}
