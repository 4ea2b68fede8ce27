//! Constants used throughout the tectonic simulation

/// Epsilon value for floating point comparisons
pub const EPSILON: f32 = 1e-6;

/// Fraction of a region's occupied cells chosen as Voronoi seeds by
/// [`Region::divide`](crate::region::Region::divide). The seed count is
/// `1 + floor(DIVISION_RATIO * cells)`.
pub const DIVISION_RATIO: f32 = 0.003;

/// Maximum recursion depth for the divide-until-convex refinement.
/// Prevents unbounded re-division of pathological shapes.
pub const MAX_DIVIDE_DEPTH: usize = 4;

/// Crust at or below this thickness (meters) can rupture, letting new
/// basalt well up behind a moving region.
pub const RUPTURE_THICKNESS_M: f32 = 2_000.0;

/// Threshold on projected relative velocity used when classifying a
/// boundary point as convergent/divergent/transform.
pub const BOUNDARY_THRESHOLD: f32 = 0.001;

/// Spring constant for the neighbor-graph relaxation forces.
pub const SPRING_CONSTANT: f32 = 0.001;

/// Maximum magnitude of the random drift velocity a plate receives at
/// construction, in cells per time unit.
pub const MAX_INIT_VELOCITY: f32 = 0.029;

/// Density of the mantle in kg/m^3, the reference for isostatic sinking.
pub const MANTLE_DENSITY: f32 = 4500.0;

/// Integration time step for one `update()` tick.
pub const DELTA_T: f32 = 0.1;

/// Side length of one chunk's square footprint in kilometers.
pub const CHUNK_WIDTH_KM: f32 = 1.0;
