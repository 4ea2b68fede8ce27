//! The top-level tectonic simulation.
//!
//! The simulation owns the canonical region arena; plates and the neighbor
//! graph refer to regions by [`RegionId`]. Each update step relaxes the
//! spring network between neighboring regions, fills rifts opened by region
//! movement, resolves overlapping claims to a cell, and re-balances the
//! isostatic height maps.

use crate::boundary::{self, BoundaryType};
use crate::chunk::Chunk;
use crate::constants::{
    BOUNDARY_THRESHOLD, CHUNK_WIDTH_KM, DELTA_T, MANTLE_DENSITY, MAX_INIT_VELOCITY,
    SPRING_CONSTANT,
};
use crate::geometry::{BoundingBox, Point, Vec2, WrappedTorusSpace};
use crate::graph::NeighborGraph;
use crate::partition::Mask;
use crate::plate::{Plate, RegionId};
use crate::region::Region;
use crate::terrain;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{HashMap, HashSet, VecDeque};

/// Payload on a neighbor-graph edge: whether the two regions share a plate,
/// and the centroid distance the spring relaxes toward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adjacency {
    pub same_plate: bool,
    pub rest_length: f32,
}

/// World-generation knobs for [`Simulation::with_config`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    plate_count: usize,
    terrain_cell: i32,
    min_thickness_m: f32,
    max_thickness_m: f32,
}

impl SimulationConfig {
    pub fn new() -> Self {
        Self {
            plate_count: 5,
            terrain_cell: 50,
            min_thickness_m: 500.0,
            max_thickness_m: 4000.0,
        }
    }

    pub fn with_plate_count(mut self, plate_count: usize) -> Self {
        assert!(plate_count > 1, "a world needs at least two plates");
        self.plate_count = plate_count;
        self
    }

    /// Side length, in cells, of one tile of the coarse terrain noise.
    pub fn with_terrain_cell(mut self, cell: i32) -> Self {
        assert!(cell > 0, "terrain cell must be positive");
        self.terrain_cell = cell;
        self
    }

    /// Initial crust thickness range in meters.
    pub fn with_thickness_range(mut self, min_m: f32, max_m: f32) -> Self {
        assert!(min_m > 0.0 && max_m >= min_m, "invalid thickness range");
        self.min_thickness_m = min_m;
        self.max_thickness_m = max_m;
        self
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct Simulation {
    space: WrappedTorusSpace,
    regions: Vec<Region>,
    plates: Vec<Plate>,
    graph: NeighborGraph<Adjacency>,
    rng: StdRng,
}

impl Simulation {
    /// Build a world of the given dimensions split into `plate_count`
    /// plates, deterministically from `seed`.
    pub fn new(width: i32, height: i32, plate_count: usize, seed: u64) -> Self {
        Self::with_config(
            width,
            height,
            seed,
            SimulationConfig::new().with_plate_count(plate_count),
        )
    }

    pub fn with_config(width: i32, height: i32, seed: u64, config: SimulationConfig) -> Self {
        let space = WrappedTorusSpace::new(width, height);
        let mut rng = StdRng::seed_from_u64(seed);

        info!(
            "creating {}x{} world with {} plates",
            width, height, config.plate_count
        );

        let groups = split_area(&space, config.plate_count, &mut rng);
        let field = terrain::generate_chunk_field(
            width,
            height,
            config.terrain_cell,
            config.min_thickness_m,
            config.max_thickness_m,
            seed as u32,
        );

        let mut regions: Vec<Region> = Vec::new();
        let mut plates: Vec<Plate> = Vec::with_capacity(config.plate_count);

        for group in groups {
            // Groups are connected on the torus; lay each one out on a
            // plain grid first so the region machinery, which knows
            // nothing about the seam, sees one solid lump.
            let pairs: Vec<(Point, Chunk)> = unwrap_group(&space, &group)
                .into_iter()
                .map(|(plain, cell)| {
                    (plain, field[cell.y as usize][cell.x as usize].clone())
                })
                .collect();
            let mut seed_region = Region::build_region(pairs, Vec2::ZERO);
            // Nudge off the integer lattice so truncation is stable under
            // tiny drifts in either direction.
            seed_region.set_position(seed_region.position() + Vec2::new(0.49, 0.49));

            let drift_speed = MAX_INIT_VELOCITY * rng.gen::<f32>() + 0.001;
            let drift = Vec2::random_direction(&mut rng, drift_speed);

            let mut members = Vec::new();
            for mut cell in seed_region.divide(&mut rng) {
                cell.set_velocity(drift);
                // A Voronoi cell of a ragged group can come out in several
                // pieces; every registered region must be one component.
                for mut part in cell.partition() {
                    part.set_position(space.wrap_vec(part.position()));
                    members.push(regions.len());
                    regions.push(part);
                }
            }
            plates.push(Plate::from_regions(members));
        }

        debug!(
            "partitioned into {} regions across {} plates",
            regions.len(),
            plates.len()
        );

        let graph = build_neighbor_graph(&space, &regions, &plates);
        debug!("neighbor graph carries {} edges", graph.edge_count());

        let mut sim = Self {
            space,
            regions,
            plates,
            graph,
            rng,
        };
        sim.re_evaluate_height_maps();
        sim
    }

    /// Assemble a simulation from caller-built plates of regions. Region
    /// ids are assigned in iteration order.
    pub fn from_plates(width: i32, height: i32, seed: u64, plate_regions: Vec<Vec<Region>>) -> Self {
        let space = WrappedTorusSpace::new(width, height);
        let rng = StdRng::seed_from_u64(seed);

        let mut regions = Vec::new();
        let mut plates = Vec::with_capacity(plate_regions.len());
        for group in plate_regions {
            let mut members = Vec::with_capacity(group.len());
            for region in group {
                members.push(regions.len());
                regions.push(region);
            }
            plates.push(Plate::from_regions(members));
        }

        let graph = build_neighbor_graph(&space, &regions, &plates);
        let mut sim = Self {
            space,
            regions,
            plates,
            graph,
            rng,
        };
        sim.re_evaluate_height_maps();
        sim
    }

    pub fn space(&self) -> &WrappedTorusSpace {
        &self.space
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn region(&self, id: RegionId) -> &Region {
        &self.regions[id]
    }

    pub fn plates(&self) -> &[Plate] {
        &self.plates
    }

    pub fn graph(&self) -> &NeighborGraph<Adjacency> {
        &self.graph
    }

    /// Region ids currently claimed by a plate, in plate order.
    pub fn active_regions(&self) -> Vec<RegionId> {
        self.plates.iter().flat_map(|p| p.regions().iter().copied()).collect()
    }

    /// The plate a region belongs to, if any.
    pub fn plate_of(&self, region: RegionId) -> Option<usize> {
        self.plates.iter().position(|p| p.contains(region))
    }

    /// The region occupying the given global cell, if any. The cell must
    /// actually hold a chunk; an empty cell inside a region's grid does not
    /// count.
    pub fn region_at(&self, point: Point) -> Option<RegionId> {
        let wrapped = self.space.wrap(point);
        self.active_regions().into_iter().find(|&id| {
            let region = &self.regions[id];
            match self.space.get_unwrapped(&region.bounding_box(), wrapped) {
                Some(global) => region.contains_global(global),
                None => false,
            }
        })
    }

    /// The chunk at a global cell, if any region holds one there.
    pub fn chunk_at(&self, point: Point) -> Option<&Chunk> {
        let wrapped = self.space.wrap(point);
        let id = self.region_at(wrapped)?;
        let region = &self.regions[id];
        let global = self.space.get_unwrapped(&region.bounding_box(), wrapped)?;
        region.chunk_at(region.to_local(global))
    }

    /// Regions occupying cells 4-adjacent to the given global cell.
    pub fn neighboring_regions(&self, point: Point) -> Vec<RegionId> {
        let mut out: Vec<RegionId> = self
            .space
            .neighbors(self.space.wrap(point))
            .into_iter()
            .filter_map(|n| self.region_at(n))
            .collect();
        out.sort_unstable();
        out.dedup();
        out
    }

    /// Regions whose crust borders the given region's boundary.
    pub fn neighboring_regions_of(&self, id: RegionId) -> Vec<RegionId> {
        self.active_regions()
            .into_iter()
            .filter(|&other| other != id && self.are_neighbors(id, other))
            .collect()
    }

    /// Whether the crust of two regions touches across any cell edge.
    pub fn are_neighbors(&self, a: RegionId, b: RegionId) -> bool {
        if a == b {
            return false;
        }
        let ra = &self.regions[a];
        let rb = &self.regions[b];
        regions_adjacent(&self.space, ra, rb)
    }

    /// World-sized mask of which cells hold crust.
    pub fn occupancy_mask(&self) -> Mask {
        let mut mask = Mask::new(self.space.width, self.space.height);
        for id in self.active_regions() {
            for p in self.regions[id].global_points() {
                mask.set(self.space.wrap(p), true);
            }
        }
        mask
    }

    /// Global cells holding no crust at all.
    pub fn empty_points(&self) -> Vec<Point> {
        let mask = self.occupancy_mask();
        let mut out = Vec::new();
        for y in 0..self.space.height {
            for x in 0..self.space.width {
                let p = Point::new(x, y);
                if !mask.get(p) {
                    out.push(p);
                }
            }
        }
        out
    }

    /// Classify each boundary cell of a region against the motion of the
    /// foreign crust around it. Points come back in wrapped global
    /// coordinates. Boundary cells with no foreign neighbors read as
    /// stationary.
    pub fn classified_boundary(&self, id: RegionId) -> Vec<(Point, BoundaryType)> {
        let region = &self.regions[id];
        let mut classified = Vec::new();

        for target in region.boundary() {
            let open: Vec<Point> = neighbors8_plain(target)
                .into_iter()
                .filter(|n| !region.contains(*n))
                .collect();

            // Mean offset from the boundary cell toward the open side.
            let mut offset_sum = Vec2::ZERO;
            for n in &open {
                offset_sum = offset_sum + Vec2::extend(*n - target);
            }
            let relative_position = offset_sum.scale(1.0 / open.len() as f32);

            let mut velocity_sum = Vec2::ZERO;
            let mut foreign = 0usize;
            for n in &open {
                let global = self.space.wrap(region.to_global(*n));
                if let Some(other) = self.region_at(global) {
                    velocity_sum = velocity_sum + self.regions[other].velocity();
                    foreign += 1;
                }
            }

            let kind = if foreign == 0 {
                BoundaryType::Stationary
            } else {
                let relative_velocity =
                    velocity_sum.scale(1.0 / foreign as f32) - region.velocity();
                boundary::classify(relative_velocity, relative_position, BOUNDARY_THRESHOLD)
            };

            classified.push((self.space.wrap(region.to_global(target)), kind));
        }

        classified
    }

    /// Advance the world one time step.
    pub fn update(&mut self) {
        let movements = self.relax_springs();
        self.fill_rifts(&movements);
        self.resolve_collisions();
        self.re_evaluate_height_maps();
    }

    /// Spring relaxation over the neighbor graph. Same-plate springs pull
    /// and push; cross-plate springs only push back when compressed would
    /// mean overlap, so separated plates drift freely apart.
    ///
    /// Returns the regions whose truncated grid position changed, with the
    /// cell delta they moved by.
    fn relax_springs(&mut self) -> Vec<(RegionId, Point)> {
        let active = self.active_regions();
        let centroids: HashMap<RegionId, Vec2> = active
            .iter()
            .map(|&id| (id, self.regions[id].centroid()))
            .collect();

        let mut accelerations: HashMap<RegionId, Vec2> = HashMap::new();
        for &id in &active {
            let c0 = centroids[&id];
            let mut acceleration = Vec2::ZERO;

            for neighbor in self.graph.neighbors(id) {
                let c1 = match centroids.get(&neighbor) {
                    Some(c) => *c,
                    None => continue, // neighbor no longer on any plate
                };
                let adjacency = match self.graph.edge_value(id, neighbor) {
                    Some(a) => *a,
                    None => continue,
                };

                let actual = self.space.distance_vec(c0, c1);
                let stretch = actual - adjacency.rest_length;
                let delta = if adjacency.same_plate {
                    stretch
                } else {
                    stretch.max(0.0)
                };

                let toward = (self.space.nearest_duplicate(c0, c1) - c0).normalized();
                acceleration = acceleration + toward.scale(SPRING_CONSTANT * delta);
            }
            accelerations.insert(id, acceleration);
        }

        let mut movements = Vec::new();
        for &id in &active {
            let region = &mut self.regions[id];
            let velocity = region.velocity() + accelerations[&id].scale(DELTA_T);
            region.set_velocity(velocity);

            let old = region.position();
            let unwrapped = old + velocity.scale(DELTA_T);
            region.set_position(self.space.wrap_vec(unwrapped));

            // Cell delta measured before wrapping so a seam crossing reads
            // as a one-cell step, not a world-width jump.
            let moved = unwrapped.truncate() - old.truncate();
            if moved != Point::ZERO {
                movements.push((id, moved));
            }
        }
        movements
    }

    /// Deposit fresh crust in the shadows of moved regions wherever thin
    /// neighboring crust ruptures.
    fn fill_rifts(&mut self, movements: &[(RegionId, Point)]) {
        let mut filled = 0usize;
        for (id, moved) in movements {
            let shadow = self.regions[*id].global_shadow(*moved);

            for shadow_point in shadow {
                let wrapped = self.space.wrap(shadow_point);
                if self.region_at(wrapped).is_some() {
                    continue;
                }
                let candidates = self.neighboring_regions(wrapped);
                if candidates.is_empty() {
                    continue;
                }
                let chosen = candidates[self.rng.gen_range(0..candidates.len())];
                if terrain::fill_empty_point(&self.space, wrapped, &mut self.regions[chosen]) {
                    filled += 1;
                }
            }
        }
        if filled > 0 {
            debug!("rift fill deposited {} chunks", filled);
        }
    }

    /// Enforce one owner per global cell. Where several regions claim a
    /// cell, one random claimant keeps its chunk and the rest lose theirs.
    /// Regions split by the loss are partitioned; emptied regions are
    /// dropped from their plate.
    fn resolve_collisions(&mut self) {
        let mut claims: HashMap<Point, Vec<(RegionId, Point)>> = HashMap::new();
        for id in self.active_regions() {
            for local in self.regions[id].points() {
                let global = self.space.wrap(self.regions[id].to_global(local));
                claims.entry(global).or_default().push((id, local));
            }
        }

        // Sorted cell order keeps the survivor draws reproducible per seed.
        let mut contested: Vec<(&Point, &Vec<(RegionId, Point)>)> =
            claims.iter().filter(|(_, c)| c.len() > 1).collect();
        contested.sort_by_key(|(p, _)| **p);

        let mut losers: Vec<(RegionId, Point)> = Vec::new();
        for (_, claimants) in contested {
            let survivor = self.rng.gen_range(0..claimants.len());
            for (i, claim) in claimants.iter().enumerate() {
                if i != survivor {
                    losers.push(*claim);
                }
            }
        }
        if losers.is_empty() {
            return;
        }
        debug!("removing {} chunks from contested cells", losers.len());

        let mut affected: Vec<RegionId> = losers.iter().map(|(id, _)| *id).collect();
        affected.sort_unstable();
        affected.dedup();

        for (id, local) in losers {
            self.regions[id].remove_chunk(local);
        }

        for id in affected {
            let parts = self.regions[id].partition();
            match parts.len() {
                0 => {
                    // All crust lost; the arena slot stays but no plate
                    // claims it anymore.
                    if let Some(plate) = self.plate_of(id) {
                        self.plates[plate].remove_region(id);
                    }
                }
                1 => {
                    if let Some(mut part) = parts.into_iter().next() {
                        part.set_velocity(self.regions[id].velocity());
                        self.regions[id] = part;
                    }
                }
                _ => {
                    let plate = self.plate_of(id);
                    let velocity = self.regions[id].velocity();
                    for (i, mut part) in parts.into_iter().enumerate() {
                        part.set_velocity(velocity);
                        if i == 0 {
                            self.regions[id] = part;
                        } else {
                            let new_id = self.graph.add_node();
                            debug_assert_eq!(new_id, self.regions.len());
                            self.regions.push(part);
                            if let Some(plate) = plate {
                                self.plates[plate].add_region(new_id);
                            }
                        }
                    }
                }
            }
        }
    }

    /// Recompute every region's isostatic depths, then lift the whole
    /// crust uniformly so the displaced mantle volume is conserved.
    fn re_evaluate_height_maps(&mut self) {
        let mut total_displacement_km3 = 0.0f32;
        for id in self.active_regions() {
            total_displacement_km3 += self.regions[id].re_evaluate_height_map(MANTLE_DENSITY);
        }

        let area_km2 = self.space.area() as f32 * CHUNK_WIDTH_KM * CHUNK_WIDTH_KM;
        let lift_m = total_displacement_km3 / area_km2 * 1000.0;

        for id in self.active_regions() {
            self.regions[id].lift(lift_m);
        }
    }
}

/// The 8-neighborhood in plain local coordinates.
fn neighbors8_plain(p: Point) -> Vec<Point> {
    let mut out = Vec::with_capacity(8);
    for dy in -1..=1 {
        for dx in -1..=1 {
            if dx != 0 || dy != 0 {
                out.push(p + Point::new(dx, dy));
            }
        }
    }
    out
}

/// Boundary adjacency with a cheap bounding-box prefilter.
fn regions_adjacent(space: &WrappedTorusSpace, a: &Region, b: &Region) -> bool {
    if !space.bounding_boxes_overlap(&a.bounding_box().expand_by_one(), &b.bounding_box()) {
        return false;
    }
    let fringes = b.global_exterior_neighbors();
    a.global_boundary()
        .iter()
        .any(|p| fringes.iter().any(|q| space.points_equal(*p, *q)))
}

fn build_neighbor_graph(
    space: &WrappedTorusSpace,
    regions: &[Region],
    plates: &[Plate],
) -> NeighborGraph<Adjacency> {
    let plate_of = |id: RegionId| plates.iter().position(|p| p.contains(id));
    let mut graph = NeighborGraph::new(regions.len());

    for i in 1..regions.len() {
        for j in 0..i {
            if regions_adjacent(space, &regions[i], &regions[j]) {
                let rest_length =
                    space.distance_vec(regions[i].centroid(), regions[j].centroid());
                let same_plate = plate_of(i) == plate_of(j);
                graph.add_edge(j, i, Adjacency { same_plate, rest_length });
            }
        }
    }
    graph
}

/// Lay a torus-connected group of cells out in plain coordinates.
///
/// Cells that touch only across the world seam are translated by a world
/// width or height so they sit next to each other on one grid, then the
/// whole group shifts so its minimum corner lands back in the canonical
/// frame. Returns `(plain, canonical)` pairs, one per input cell, in input
/// order. Panics when the group is empty or not connected on the torus.
fn unwrap_group(space: &WrappedTorusSpace, group: &[Point]) -> Vec<(Point, Point)> {
    let members: HashSet<Point> = group.iter().copied().collect();
    let mut plain: HashMap<Point, Point> = HashMap::with_capacity(group.len());
    let mut queue = VecDeque::new();

    plain.insert(group[0], group[0]);
    queue.push_back(group[0]);
    while let Some(cell) = queue.pop_front() {
        let at = plain[&cell];
        for dir in Point::DIRECTIONS {
            let next = space.wrap(cell + dir);
            if members.contains(&next) && !plain.contains_key(&next) {
                plain.insert(next, at + dir);
                queue.push_back(next);
            }
        }
    }
    assert_eq!(plain.len(), group.len(), "group is not connected on the torus");

    let laid_out: Vec<Point> = plain.values().copied().collect();
    let origin = BoundingBox::around(&laid_out).location;
    let shift = space.wrap(origin) - origin;
    group.iter().map(|cell| (plain[cell] + shift, *cell)).collect()
}

/// Partition the whole map into `plate_count` connected groups by seeded
/// frontier growth: every group claims one random frontier cell per round
/// until no frontier remains, so group sizes stay comparable and every cell
/// lands in exactly one group.
fn split_area<R: Rng>(
    space: &WrappedTorusSpace,
    plate_count: usize,
    rng: &mut R,
) -> Vec<Vec<Point>> {
    assert!(plate_count > 1, "cannot split the world into fewer than two plates");
    assert!(
        (plate_count as i32) <= space.area(),
        "more plates than cells"
    );

    let mut claimed = Mask::new(space.width, space.height);
    let mut groups: Vec<Vec<Point>> = Vec::with_capacity(plate_count);
    let mut frontiers: Vec<Vec<Point>> = Vec::with_capacity(plate_count);

    for _ in 0..plate_count {
        let seed = loop {
            let p = Point::new(
                rng.gen_range(0..space.width),
                rng.gen_range(0..space.height),
            );
            if !claimed.get(p) {
                break p;
            }
        };
        claimed.set(seed, true);
        frontiers.push(space.neighbors(seed));
        groups.push(vec![seed]);
    }

    while frontiers.iter().any(|f| !f.is_empty()) {
        for i in 0..plate_count {
            // Pop until an unclaimed frontier cell turns up.
            let chosen = loop {
                if frontiers[i].is_empty() {
                    break None;
                }
                let idx = rng.gen_range(0..frontiers[i].len());
                let p = frontiers[i].swap_remove(idx);
                if !claimed.get(p) {
                    break Some(p);
                }
            };
            let chosen = match chosen {
                Some(p) => p,
                None => continue,
            };

            claimed.set(chosen, true);
            groups[i].push(chosen);
            for n in space.neighbors(chosen) {
                if !claimed.get(n) {
                    frontiers[i].push(n);
                }
            }
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::{Layer, RockType};
    use crate::geometry::Length;

    fn slab(x0: i32, y0: i32, w: i32, h: i32, thickness_km: f32) -> Region {
        let mut pairs = Vec::new();
        for y in 0..h {
            for x in 0..w {
                let layer = Layer::new(
                    RockType::Basalt,
                    Length::from_kilometers(thickness_km),
                );
                pairs.push((Point::new(x, y), Chunk::new(layer)));
            }
        }
        let mut region = Region::build_region(pairs, Vec2::new(x0 as f32, y0 as f32));
        region.set_position(region.position() + Vec2::new(0.49, 0.49));
        region
    }

    #[test]
    fn seam_spanning_groups_unwrap_into_one_lump() {
        let space = WrappedTorusSpace::new(8, 6);
        let group = vec![Point::new(0, 2), Point::new(7, 2), Point::new(1, 2)];
        let mut cells = unwrap_group(&space, &group);
        cells.sort_by_key(|(plain, _)| *plain);

        let plain: Vec<Point> = cells.iter().map(|(p, _)| *p).collect();
        assert_eq!(
            plain,
            vec![Point::new(7, 2), Point::new(8, 2), Point::new(9, 2)]
        );
        for (plain, cell) in cells {
            assert_eq!(space.wrap(plain), cell);
        }
    }

    #[test]
    fn constructed_regions_are_single_components() {
        // A small world forces at least one plate across the seam.
        let sim = Simulation::new(12, 10, 3, 5);
        for id in sim.active_regions() {
            let region = sim.region(id);
            assert!(!region.points().is_empty(), "region {} is empty", id);
            assert!(
                crate::partition::is_contiguous(&region.to_mask()),
                "region {} is not one connected lump",
                id
            );
        }
    }

    #[test]
    fn split_area_covers_every_cell_once() {
        let space = WrappedTorusSpace::new(16, 12);
        let mut rng = StdRng::seed_from_u64(5);
        let groups = split_area(&space, 4, &mut rng);

        assert_eq!(groups.len(), 4);
        let mut all: Vec<Point> = groups.iter().flatten().copied().collect();
        assert_eq!(all.len(), 16 * 12);
        all.sort();
        all.dedup();
        assert_eq!(all.len(), 16 * 12);
        for group in &groups {
            assert!(!group.is_empty());
        }
    }

    #[test]
    fn split_area_groups_are_connected() {
        let space = WrappedTorusSpace::new(10, 10);
        let mut rng = StdRng::seed_from_u64(99);
        for group in split_area(&space, 3, &mut rng) {
            // Flood from the first cell using wrapped adjacency.
            let mut reached = vec![group[0]];
            let mut frontier = vec![group[0]];
            while let Some(p) = frontier.pop() {
                for n in space.neighbors(p) {
                    if group.contains(&n) && !reached.contains(&n) {
                        reached.push(n);
                        frontier.push(n);
                    }
                }
            }
            assert_eq!(reached.len(), group.len());
        }
    }

    #[test]
    fn construction_is_deterministic_per_seed() {
        let a = Simulation::new(40, 30, 3, 12);
        let b = Simulation::new(40, 30, 3, 12);

        assert_eq!(a.regions.len(), b.regions.len());
        for (ra, rb) in a.regions.iter().zip(b.regions.iter()) {
            assert_eq!(ra.position(), rb.position());
            assert_eq!(ra.points(), rb.points());
        }
    }

    #[test]
    fn every_region_belongs_to_exactly_one_plate() {
        let sim = Simulation::new(40, 30, 4, 3);
        for id in 0..sim.regions().len() {
            let owners = sim.plates().iter().filter(|p| p.contains(id)).count();
            assert_eq!(owners, 1, "region {} owned by {} plates", id, owners);
        }
    }

    #[test]
    fn new_world_has_full_coverage() {
        let sim = Simulation::new(30, 20, 3, 8);
        assert!(sim.empty_points().is_empty());
        assert_eq!(sim.occupancy_mask().count(), 600);
    }

    #[test]
    fn region_at_requires_an_actual_chunk() {
        let region = slab(2, 2, 3, 1, 1.0);
        let sim = Simulation::from_plates(12, 12, 0, vec![vec![region]]);

        assert_eq!(sim.region_at(Point::new(3, 2)), Some(0));
        // Inside nothing: the slab is one row tall.
        assert_eq!(sim.region_at(Point::new(3, 3)), None);
        assert!(sim.chunk_at(Point::new(3, 2)).is_some());
        assert!(sim.chunk_at(Point::new(3, 3)).is_none());
    }

    #[test]
    fn from_plates_connects_adjacent_regions() {
        let left = slab(2, 2, 3, 3, 1.0);
        let right = slab(5, 2, 3, 3, 1.0);
        let far = slab(2, 8, 2, 2, 1.0);
        let sim = Simulation::from_plates(16, 16, 0, vec![vec![left, right], vec![far]]);

        assert!(sim.graph().has_edge(0, 1));
        assert!(!sim.graph().has_edge(0, 2));
        assert!(sim.are_neighbors(0, 1));
        assert_eq!(sim.plate_of(2), Some(1));
        let adjacency = sim.graph().edge_value(0, 1).unwrap();
        assert!(adjacency.same_plate);
        assert!(adjacency.rest_length > 0.0);
    }

    #[test]
    fn adjacency_crosses_the_world_seam() {
        let left_edge = slab(0, 4, 2, 2, 1.0);
        let right_edge = slab(10, 4, 2, 2, 1.0);
        let sim = Simulation::from_plates(12, 12, 0, vec![vec![left_edge], vec![right_edge]]);

        assert!(sim.are_neighbors(0, 1));
        let adjacency = sim.graph().edge_value(0, 1).unwrap();
        assert!(!adjacency.same_plate);
    }

    #[test]
    fn heights_are_isostatic_after_construction() {
        let sim = Simulation::new(30, 20, 3, 21);
        for id in sim.active_regions() {
            let region = sim.region(id);
            for p in region.points() {
                // Crust floats: depth below mantle but above zero.
                let depth = region.depth_at(p);
                let thickness = region
                    .chunk_at(p)
                    .map(|c| c.thickness().meters())
                    .unwrap_or(0.0);
                assert!(depth < thickness);
            }
        }
    }

    #[test]
    fn converging_regions_classify_their_facing_boundary() {
        let mut left = slab(2, 4, 3, 3, 1.0);
        let mut right = slab(7, 4, 3, 3, 1.0);
        left.set_velocity(Vec2::new(0.5, 0.0));
        right.set_velocity(Vec2::new(-0.5, 0.0));
        let sim = Simulation::from_plates(16, 16, 0, vec![vec![left], vec![right]]);

        // Not adjacent, so boundaries facing each other see no foreign
        // crust; classification needs contact.
        let touching_left = slab(2, 4, 3, 3, 1.0);
        let mut touching_right = slab(5, 4, 3, 3, 1.0);
        touching_right.set_velocity(Vec2::new(-0.5, 0.0));
        let sim2 =
            Simulation::from_plates(16, 16, 0, vec![vec![touching_left], vec![touching_right]]);

        let classified = sim2.classified_boundary(0);
        let at_contact: Vec<BoundaryType> = classified
            .iter()
            .filter(|(p, _)| p.x == 4)
            .map(|(_, t)| *t)
            .collect();
        assert!(!at_contact.is_empty());
        assert!(at_contact.iter().any(|t| *t == BoundaryType::Convergent));

        // The isolated pair reads stationary at its facing edge.
        let lonely = sim.classified_boundary(0);
        assert!(lonely.iter().all(|(_, t)| *t == BoundaryType::Stationary));
    }

    #[test]
    fn collision_keeps_one_owner_per_cell() {
        // Two slabs overlapping on one column.
        let a = slab(2, 2, 3, 3, 1.0);
        let b = slab(4, 2, 3, 3, 1.0);
        let mut sim = Simulation::from_plates(16, 16, 0, vec![vec![a], vec![b]]);
        sim.resolve_collisions();

        let mask = sim.occupancy_mask();
        let mut total = 0usize;
        for id in sim.active_regions() {
            total += sim.region(id).points().len();
        }
        // No cell counted twice once collisions are resolved.
        assert_eq!(total, mask.count());
    }

    #[test]
    fn update_preserves_plate_membership_invariant() {
        let mut sim = Simulation::new(40, 30, 3, 17);
        for _ in 0..5 {
            sim.update();
            for id in sim.active_regions() {
                let owners = sim.plates().iter().filter(|p| p.contains(id)).count();
                assert_eq!(owners, 1);
            }
        }
    }

    #[test]
    fn update_wraps_positions_into_the_world() {
        let mut sim = Simulation::new(30, 20, 3, 4);
        for _ in 0..10 {
            sim.update();
        }
        for id in sim.active_regions() {
            let pos = sim.region(id).position();
            assert!(pos.x >= 0.0 && pos.x < 30.0);
            assert!(pos.y >= 0.0 && pos.y < 20.0);
        }
    }

    #[test]
    fn same_plate_springs_restore_rest_length() {
        // Two touching same-plate slabs pulled apart spring back together.
        let left = slab(2, 4, 3, 3, 1.0);
        let right = slab(5, 4, 3, 3, 1.0);
        let mut sim = Simulation::from_plates(20, 20, 0, vec![vec![left, right]]);
        let rest = sim.graph().edge_value(0, 1).unwrap().rest_length;

        // Stretch the pair.
        let shifted = sim.regions[1].position() + Vec2::new(3.0, 0.0);
        sim.regions[1].set_position(shifted);
        let stretched = sim
            .space
            .distance_vec(sim.regions[0].centroid(), sim.regions[1].centroid());
        assert!(stretched > rest);

        for _ in 0..200 {
            sim.update();
        }
        let relaxed = sim
            .space
            .distance_vec(sim.regions[0].centroid(), sim.regions[1].centroid());
        assert!(
            (relaxed - rest).abs() < (stretched - rest).abs(),
            "spring failed to contract: rest {} stretched {} now {}",
            rest,
            stretched,
            relaxed
        );
    }
}
