//! Contiguous lumps of crust.
//!
//! A region is a small area of the world that moves as one piece: a local
//! grid of optional chunks, a parallel depth map (meters each column sits
//! below the mantle surface), and a continuous position and velocity in
//! global space. Plates are groups of regions; it is region behavior that
//! drives the plate, not the other way around. Regions let a plate develop
//! internal rifts, carry accreted islands, and move at different speeds in
//! different places.

use crate::chunk::{Chunk, Layer, RockType};
use crate::constants::{CHUNK_WIDTH_KM, DIVISION_RATIO, MAX_DIVIDE_DEPTH};
use crate::geometry::{distance, BoundingBox, Length, Point, Vec2};
use crate::partition::{self, Mask};
use rand::Rng;

#[derive(Debug, Clone)]
pub struct Region {
    width: i32,
    height: i32,
    position: Vec2,
    velocity: Vec2,
    chunks: Vec<Option<Chunk>>,
    depths: Vec<f32>,
}

impl Region {
    /// An empty region grid of the given dimensions at `position`.
    pub fn new(width: i32, height: i32, position: Vec2) -> Self {
        assert!(width > 0 && height > 0, "region dimensions must be positive");
        Self {
            width,
            height,
            position,
            velocity: Vec2::ZERO,
            chunks: vec![None; (width * height) as usize],
            depths: vec![0.0; (width * height) as usize],
        }
    }

    /// A region with a freshly generated 1 km column of random rock wherever
    /// the mask is set.
    pub fn from_mask<R: Rng>(mask: &Mask, position: Vec2, rng: &mut R) -> Self {
        let mut region = Self::new(mask.width(), mask.height(), position);
        for p in mask.points() {
            let layer = Layer::new(RockType::random(rng), Length::from_kilometers(1.0));
            region.set_chunk(p, Chunk::new(layer));
        }
        region
    }

    /// Build the smallest region holding the given chunks. Input points are
    /// local to some parent grid whose origin sits at `position`; the new
    /// region is anchored at the chunks' minimum corner.
    ///
    /// Panics on empty input: a region with no chunks has no well-defined
    /// placement.
    pub fn build_region(chunk_pairs: Vec<(Point, Chunk)>, position: Vec2) -> Self {
        assert!(!chunk_pairs.is_empty(), "cannot build a region from no chunks");

        let points: Vec<Point> = chunk_pairs.iter().map(|(p, _)| *p).collect();
        let bounds = BoundingBox::around(&points);
        let origin = bounds.location;

        let mut region = Self::new(
            bounds.width(),
            bounds.height(),
            position + Vec2::extend(origin),
        );
        for (p, chunk) in chunk_pairs {
            region.set_chunk(p - origin, chunk);
        }
        region
    }

    fn index(&self, local: Point) -> usize {
        (local.y * self.width + local.x) as usize
    }

    fn in_grid(&self, local: Point) -> bool {
        local.x >= 0 && local.x < self.width && local.y >= 0 && local.y < self.height
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    /// Convert a global grid point to this region's local coordinates.
    pub fn to_local(&self, global: Point) -> Point {
        global - self.position.truncate()
    }

    /// Convert a local grid point to global coordinates.
    pub fn to_global(&self, local: Point) -> Point {
        local + self.position.truncate()
    }

    pub fn contains(&self, local: Point) -> bool {
        self.chunk_at(local).is_some()
    }

    pub fn contains_global(&self, global: Point) -> bool {
        self.contains(self.to_local(global))
    }

    /// The chunk at a local cell. Out-of-grid reads are simply absent.
    pub fn chunk_at(&self, local: Point) -> Option<&Chunk> {
        if self.in_grid(local) {
            self.chunks[self.index(local)].as_ref()
        } else {
            None
        }
    }

    /// Meters this column sits below the mantle surface. Zero off-grid.
    pub fn depth_at(&self, local: Point) -> f32 {
        if self.in_grid(local) {
            self.depths[self.index(local)]
        } else {
            0.0
        }
    }

    fn set_depth_at(&mut self, local: Point, depth: f32) {
        if self.in_grid(local) {
            let idx = self.index(local);
            self.depths[idx] = depth;
        }
    }

    /// Surface elevation in meters: column thickness minus sunk depth.
    /// Zero where no chunk exists.
    pub fn elevation_at(&self, local: Point) -> f32 {
        match self.chunk_at(local) {
            Some(chunk) => chunk.thickness().meters() - self.depth_at(local),
            None => 0.0,
        }
    }

    /// `(max, min)` elevation over the occupied cells, `(0, 0)` when empty.
    pub fn elevation_range(&self) -> (f32, f32) {
        let mut max = f32::NEG_INFINITY;
        let mut min = f32::INFINITY;
        for p in self.points() {
            let e = self.elevation_at(p);
            max = max.max(e);
            min = min.min(e);
        }
        if max < min {
            (0.0, 0.0)
        } else {
            (max, min)
        }
    }

    /// Place a chunk at a local cell. Placing outside the current grid
    /// rebuilds the region around the union of old and new cells, keeping
    /// position continuity, velocity, and the existing depth map.
    pub fn set_chunk(&mut self, local: Point, chunk: Chunk) {
        if self.in_grid(local) {
            let idx = self.index(local);
            self.chunks[idx] = Some(chunk);
            return;
        }

        let old_pairs = self.chunk_pairs();
        let mut pairs = old_pairs.clone();
        pairs.push((local, chunk));

        let mut grown = Self::build_region(pairs, self.position);
        grown.velocity = self.velocity;
        for (p, _) in &old_pairs {
            let depth = self.depth_at(*p);
            let in_grown = grown.to_local(self.to_global(*p));
            grown.set_depth_at(in_grown, depth);
        }
        *self = grown;
    }

    /// Remove the chunk at a local cell. Off-grid removals are no-ops.
    pub fn remove_chunk(&mut self, local: Point) {
        if self.in_grid(local) {
            let idx = self.index(local);
            self.chunks[idx] = None;
        }
    }

    /// Occupied local cells in row-major order.
    pub fn points(&self) -> Vec<Point> {
        let mut out = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                let p = Point::new(x, y);
                if self.contains(p) {
                    out.push(p);
                }
            }
        }
        out
    }

    pub fn global_points(&self) -> Vec<Point> {
        self.points().into_iter().map(|p| self.to_global(p)).collect()
    }

    /// Whether the local cell is occupied and touches an unoccupied
    /// 4-neighbor. The region grid does not wrap.
    pub fn on_boundary(&self, local: Point) -> bool {
        self.contains(local) && local.neighbors().iter().any(|n| !self.contains(*n))
    }

    /// Occupied cells with at least one unoccupied 4-neighbor.
    pub fn boundary(&self) -> Vec<Point> {
        self.points().into_iter().filter(|p| self.on_boundary(*p)).collect()
    }

    pub fn global_boundary(&self) -> Vec<Point> {
        self.boundary().into_iter().map(|p| self.to_global(p)).collect()
    }

    /// Unoccupied cells 4-adjacent to the boundary, deduplicated.
    pub fn exterior_neighbors(&self) -> Vec<Point> {
        let mut out: Vec<Point> = self
            .boundary()
            .iter()
            .flat_map(|p| p.neighbors())
            .filter(|n| !self.contains(*n))
            .collect();
        out.sort();
        out.dedup();
        out
    }

    pub fn global_exterior_neighbors(&self) -> Vec<Point> {
        self.exterior_neighbors()
            .into_iter()
            .map(|p| self.to_global(p))
            .collect()
    }

    /// The cells one step opposite `direction` from each boundary cell,
    /// excluding cells the region occupies. When a region moves along
    /// `direction`, its shadow is the ground it is about to vacate behind
    /// itself and expose ahead of itself.
    pub fn shadow(&self, direction: Point) -> Vec<Point> {
        self.boundary()
            .into_iter()
            .map(|p| p - direction)
            .filter(|p| !self.contains(*p))
            .collect()
    }

    pub fn global_shadow(&self, direction: Point) -> Vec<Point> {
        self.shadow(direction)
            .into_iter()
            .map(|p| self.to_global(p))
            .collect()
    }

    /// The four cardinal shadows, in `Point::DIRECTIONS` order.
    pub fn shadows(&self) -> [Vec<Point>; 4] {
        Point::DIRECTIONS.map(|d| self.shadow(d))
    }

    /// The region's grid footprint in global coordinates.
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::new(self.position.truncate(), Point::new(self.width, self.height))
    }

    /// Mean of the occupied cells in global continuous coordinates.
    /// Zero for an empty region.
    pub fn centroid(&self) -> Vec2 {
        let points = self.points();
        if points.is_empty() {
            return Vec2::ZERO;
        }
        let mut sum = Vec2::ZERO;
        for p in &points {
            sum = sum + Vec2::extend(*p);
        }
        self.position + sum.scale(1.0 / points.len() as f32)
    }

    /// A region is roughly convex when it contains its own centroid.
    pub fn is_roughly_convex(&self) -> bool {
        self.contains(self.to_local(self.centroid().truncate()))
    }

    /// Whether the grid is cropped tight around the occupied cells.
    pub fn is_minimum_size(&self) -> bool {
        partition::is_minimum_size(&self.to_mask())
    }

    pub fn to_mask(&self) -> Mask {
        Mask::from_points(self.width, self.height, &self.points())
    }

    /// Occupied cells paired with clones of their chunks, row-major.
    pub fn chunk_pairs(&self) -> Vec<(Point, Chunk)> {
        self.points()
            .into_iter()
            .filter_map(|p| self.chunk_at(p).cloned().map(|c| (p, c)))
            .collect()
    }

    /// Uniformly raise every occupied column by `dz` meters.
    pub fn lift(&mut self, dz: f32) {
        for p in self.points() {
            let depth = self.depth_at(p);
            self.set_depth_at(p, depth - dz);
        }
    }

    /// Recompute each column's isostatic depth from its mass, returning the
    /// total mantle volume the region displaces in cubic kilometers.
    pub fn re_evaluate_height_map(&mut self, mantle_density: f32) -> f32 {
        let mut total_depth_m = 0.0;
        for p in self.points() {
            let sunk = match self.chunk_at(p) {
                Some(chunk) => chunk.depth_sunk(mantle_density).meters(),
                None => continue,
            };
            self.set_depth_at(p, sunk);
            total_depth_m += sunk;
        }
        Length::from_meters(total_depth_m).kilometers() * CHUNK_WIDTH_KM * CHUNK_WIDTH_KM
    }

    /// Split into one region per 4-connected component. Children keep their
    /// chunks, depths, velocity, and global placement. An empty region
    /// yields no children.
    pub fn partition(&self) -> Vec<Region> {
        let components = partition::partition(&self.to_mask(), false);
        let mut regions = Vec::with_capacity(components.len());

        for component in components {
            let pairs: Vec<(Point, Chunk)> = component
                .iter()
                .filter_map(|p| self.chunk_at(*p).cloned().map(|c| (*p, c)))
                .collect();
            let mut child = Self::build_region(pairs, self.position);
            child.velocity = self.velocity;
            for p in &component {
                let local = child.to_local(self.to_global(*p));
                child.set_depth_at(local, self.depth_at(*p));
            }
            regions.push(child);
        }

        regions
    }

    /// Carve the region into cells around randomly chosen seed points, each
    /// cell holding the points nearest its seed (first seed wins ties).
    /// Cells that fail the rough-convexity check are re-divided, to a
    /// bounded depth, so no sliver cell wraps around another.
    pub fn divide<R: Rng>(&self, rng: &mut R) -> Vec<Region> {
        self.divide_to_depth(rng, 0)
    }

    fn divide_to_depth<R: Rng>(&self, rng: &mut R, depth: usize) -> Vec<Region> {
        let mut points = self.points();
        assert!(!points.is_empty(), "cannot divide an empty region");

        let seed_count = 1 + (DIVISION_RATIO * points.len() as f32) as usize;
        let mut seeds: Vec<Point> = Vec::with_capacity(seed_count);
        let mut groups: Vec<Vec<(Point, Chunk)>> = Vec::with_capacity(seed_count);

        for _ in 0..seed_count {
            let chosen = points.swap_remove(rng.gen_range(0..points.len()));
            seeds.push(chosen);
            let chunk = self
                .chunk_at(chosen)
                .cloned()
                .unwrap_or_else(|| unreachable!("seed chosen from occupied points"));
            groups.push(vec![(chosen, chunk)]);
        }

        for p in points {
            let mut best = 0;
            let mut best_dist = f32::INFINITY;
            for (i, seed) in seeds.iter().enumerate() {
                let d = distance(p, *seed);
                if d < best_dist {
                    best_dist = d;
                    best = i;
                }
            }
            if let Some(chunk) = self.chunk_at(p).cloned() {
                groups[best].push((p, chunk));
            }
        }

        let mut cells = Vec::with_capacity(seed_count);
        for group in groups {
            let cell = Self::build_region(group, self.position);
            if depth < MAX_DIVIDE_DEPTH && !cell.is_roughly_convex() && seed_count > 1 {
                cells.extend(cell.divide_to_depth(rng, depth + 1));
            } else {
                cells.push(cell);
            }
        }
        cells
    }
}
