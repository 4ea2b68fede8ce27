//! World-construction invariants
//!
//! A freshly generated world must tile the full torus with crust, keep every
//! region on exactly one plate, and connect the neighbor graph along real
//! adjacencies.

use terradrift::*;

#[test]
fn new_world_covers_the_whole_torus() {
    let sim = Simulation::new(80, 60, 5, 42);

    assert!(
        sim.empty_points().is_empty(),
        "construction left {} cells bare",
        sim.empty_points().len()
    );
    assert_eq!(sim.occupancy_mask().count(), 80 * 60);
}

#[test]
fn every_cell_has_exactly_one_owner() {
    let sim = Simulation::new(60, 40, 4, 9);

    let total: usize = sim
        .active_regions()
        .iter()
        .map(|&id| sim.region(id).points().len())
        .sum();
    assert_eq!(total, 60 * 40, "region footprints overlap or miss cells");

    for id in sim.active_regions() {
        let owners = sim.plates().iter().filter(|p| p.contains(id)).count();
        assert_eq!(owners, 1, "region {} owned by {} plates", id, owners);
    }
}

#[test]
fn regions_are_contiguous_and_tightly_cropped() {
    let sim = Simulation::new(60, 40, 4, 33);

    for id in sim.active_regions() {
        let region = sim.region(id);
        assert!(
            partition::is_contiguous(&region.to_mask()),
            "region {} is disconnected at construction",
            id
        );
        assert!(
            region.is_minimum_size(),
            "region {} carries slack rows or columns",
            id
        );
    }
}

#[test]
fn graph_edges_match_actual_adjacency() {
    let sim = Simulation::new(50, 40, 3, 18);

    for (a, b, adjacency) in sim.graph().edges() {
        assert!(
            sim.are_neighbors(a, b),
            "edge {}-{} connects regions that do not touch",
            a,
            b
        );
        assert!(
            adjacency.rest_length >= 0.0 && adjacency.rest_length.is_finite(),
            "edge {}-{} has rest length {}",
            a,
            b,
            adjacency.rest_length
        );
        let same = sim.plate_of(a) == sim.plate_of(b);
        assert_eq!(
            adjacency.same_plate, same,
            "edge {}-{} mislabels plate co-membership",
            a, b
        );
    }
}

#[test]
fn every_region_touches_a_neighbor() {
    // With full coverage no region floats alone; each must share an edge.
    let sim = Simulation::new(50, 40, 3, 27);
    for id in sim.active_regions() {
        assert!(
            !sim.graph().neighbors(id).is_empty(),
            "region {} has no neighbors in a fully tiled world",
            id
        );
    }
}

#[test]
fn generation_is_reproducible() {
    let a = Simulation::new(50, 40, 4, 1234);
    let b = Simulation::new(50, 40, 4, 1234);

    assert_eq!(a.regions().len(), b.regions().len());
    assert_eq!(a.graph().edge_count(), b.graph().edge_count());
    for (ra, rb) in a.regions().iter().zip(b.regions().iter()) {
        assert_eq!(ra.position(), rb.position());
        assert_eq!(ra.points(), rb.points());
    }
}

#[test]
fn facing_boundaries_classify_consistently() {
    // Two touching slabs on separate plates closing on each other.
    let build = |x0: f32, velocity: Vec2| {
        let mut pairs = Vec::new();
        for y in 0..4 {
            for x in 0..4 {
                let layer = Layer::new(RockType::Basalt, Length::from_kilometers(1.0));
                pairs.push((Point::new(x, y), Chunk::new(layer)));
            }
        }
        let mut region = Region::build_region(pairs, Vec2::new(x0, 4.0));
        region.set_position(region.position() + Vec2::new(0.49, 0.49));
        region.set_velocity(velocity);
        region
    };

    let left = build(2.0, Vec2::new(0.5, 0.0));
    let right = build(6.0, Vec2::new(-0.5, 0.0));
    let sim = Simulation::from_plates(20, 20, 0, vec![vec![left], vec![right]]);

    assert!(sim.are_neighbors(0, 1));

    // Both sides of the contact must agree the boundary is convergent.
    let left_contact: Vec<BoundaryType> = sim
        .classified_boundary(0)
        .into_iter()
        .filter(|(p, _)| p.x == 5)
        .map(|(_, t)| t)
        .collect();
    let right_contact: Vec<BoundaryType> = sim
        .classified_boundary(1)
        .into_iter()
        .filter(|(p, _)| p.x == 6)
        .map(|(_, t)| t)
        .collect();

    assert!(!left_contact.is_empty() && !right_contact.is_empty());
    assert!(left_contact.contains(&BoundaryType::Convergent));
    assert!(right_contact.contains(&BoundaryType::Convergent));
}
