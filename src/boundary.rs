//! Boundary classification between neighboring regions.
//!
//! Classification reduces the relative motion of two regions at a boundary
//! point to the classic three boundary kinds plus a stationary catch-all.
//! The decision is made from two projections of the relative velocity: one
//! along the separation axis, one lateral to it.

use crate::geometry::{project, Vec2};

/// Kind of tectonic boundary between two adjacent regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundaryType {
    /// The regions move toward one another; crust collides.
    Convergent,
    /// The regions move apart; new crust wells up in the rift.
    Divergent,
    /// The regions slide laterally past one another.
    Transform,
    /// Relative motion below the classification threshold.
    Stationary,
}

impl BoundaryType {
    /// Human-readable description of the boundary type.
    pub fn description(&self) -> &'static str {
        match self {
            BoundaryType::Convergent => "Convergent (Collision)",
            BoundaryType::Divergent => "Divergent (Spreading)",
            BoundaryType::Transform => "Transform (Sliding)",
            BoundaryType::Stationary => "Stationary",
        }
    }
}

/// Classify the motion of a neighbor relative to a boundary point.
///
/// `relative_velocity` is the neighbor's velocity minus the local one and
/// `relative_position` points from the boundary point toward the neighbor.
/// Approach along the separation axis reads as negative axial speed, so a
/// projection below `-threshold` is convergent and one above `threshold`
/// divergent. Otherwise lateral speed beyond the threshold is transform,
/// and anything smaller is stationary.
pub fn classify(relative_velocity: Vec2, relative_position: Vec2, threshold: f32) -> BoundaryType {
    let axial = project(relative_velocity, relative_position);
    if axial < -threshold {
        return BoundaryType::Convergent;
    }
    if axial > threshold {
        return BoundaryType::Divergent;
    }

    let lateral = project(relative_velocity.perpendicular(), relative_position);
    if lateral.abs() > threshold {
        BoundaryType::Transform
    } else {
        BoundaryType::Stationary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::BOUNDARY_THRESHOLD;

    // The neighbor sits to the right in all of these.
    const TOWARD_NEIGHBOR: Vec2 = Vec2::UNIT_X;

    #[test]
    fn approach_classifies_as_convergent() {
        let closing = Vec2::new(-0.5, 0.0);
        assert_eq!(
            classify(closing, TOWARD_NEIGHBOR, BOUNDARY_THRESHOLD),
            BoundaryType::Convergent
        );
    }

    #[test]
    fn separation_classifies_as_divergent() {
        let opening = Vec2::new(0.5, 0.0);
        assert_eq!(
            classify(opening, TOWARD_NEIGHBOR, BOUNDARY_THRESHOLD),
            BoundaryType::Divergent
        );
    }

    #[test]
    fn lateral_slip_classifies_as_transform() {
        let sliding = Vec2::new(0.0, 0.5);
        assert_eq!(
            classify(sliding, TOWARD_NEIGHBOR, BOUNDARY_THRESHOLD),
            BoundaryType::Transform
        );
    }

    #[test]
    fn sub_threshold_motion_is_stationary() {
        let crawl = Vec2::new(0.0002, 0.0002);
        assert_eq!(
            classify(crawl, TOWARD_NEIGHBOR, BOUNDARY_THRESHOLD),
            BoundaryType::Stationary
        );
        assert_eq!(
            classify(Vec2::ZERO, TOWARD_NEIGHBOR, BOUNDARY_THRESHOLD),
            BoundaryType::Stationary
        );
    }

    #[test]
    fn zero_separation_axis_is_stationary() {
        // With no direction to the neighbor, both projections vanish.
        let v = Vec2::new(1.0, 1.0);
        assert_eq!(classify(v, Vec2::ZERO, BOUNDARY_THRESHOLD), BoundaryType::Stationary);
    }

    #[test]
    fn classification_is_symmetric_between_the_sides() {
        // Swapping perspective negates both arguments and must agree.
        let rel_v = Vec2::new(-0.3, 0.1);
        let rel_p = Vec2::new(1.0, 0.2);
        let here = classify(rel_v, rel_p, BOUNDARY_THRESHOLD);
        let there = classify(-rel_v, -rel_p, BOUNDARY_THRESHOLD);
        assert_eq!(here, there);
    }

    #[test]
    fn descriptions_name_the_motion() {
        assert!(BoundaryType::Divergent.description().contains("Spreading"));
        assert!(BoundaryType::Transform.description().contains("Sliding"));
    }
}
