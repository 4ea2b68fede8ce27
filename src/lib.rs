//! # Terradrift - Toroidal Tectonic Plate Simulation
//!
//! A 2-D tectonic plate simulation library on a wraparound (toroidal) world.
//! Crust is tracked as regions of rock-column chunks grouped into plates;
//! region drift is driven by a spring network between neighbors, and the
//! height map follows from isostasy. This library provides:
//!
//! - **Wrapped torus space** so plates drift seamlessly across world edges
//! - **Spring-driven motion** relaxing regions toward their rest distances
//! - **Isostatic height maps** derived from per-column rock density
//! - **Boundary classification** (convergent, divergent, transform)
//! - **Rift filling and collision resolution** as crust spreads and collides
//! - **Deterministic generation** for reproducible worlds
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! terradrift = "0.1"
//! ```
//!
//! ## Basic Usage
//!
//! ```rust
//! use terradrift::{Point, Simulation};
//!
//! // Create a 100x80 world with 5 plates, seeded for determinism
//! let mut sim = Simulation::new(100, 80, 5, 42);
//!
//! // Query which region owns a cell
//! let point = Point::new(10, 20);
//! if let Some(id) = sim.region_at(point) {
//!     println!("Cell {:?} belongs to region {}", point, id);
//! }
//!
//! // Advance the simulation
//! for _ in 0..10 {
//!     sim.update();
//! }
//!
//! // Examine a region's classified boundary
//! for (cell, kind) in sim.classified_boundary(0) {
//!     println!("{:?}: {}", cell, kind.description());
//! }
//! ```
//!
//! ## Advanced Configuration
//!
//! ```rust
//! use terradrift::{Simulation, SimulationConfig};
//!
//! let config = SimulationConfig::new()
//!     .with_plate_count(8)
//!     .with_thickness_range(800.0, 3000.0);
//!
//! let sim = Simulation::with_config(200, 150, 42, config);
//! ```
//!
//! ## Boundary Types
//!
//! Boundaries are classified from the relative motion of adjacent crust:
//!
//! - **Divergent**: regions moving apart (rifts, spreading centers)
//! - **Convergent**: regions moving together (collision, crust loss)
//! - **Transform**: regions sliding past each other
//! - **Stationary**: relative motion below the classification threshold
//!
//! ## Modules
//!
//! - [`geometry`]: grid points, vectors, bounding boxes, and the torus wrap
//! - [`partition`]: occupancy masks and connected-component splitting
//! - [`chunk`]: rock taxonomy and crust columns
//! - [`region`]: contiguous lumps of crust with height maps
//! - [`plate`]: groups of regions drifting together
//! - [`graph`]: the neighbor graph the spring network runs on
//! - [`terrain`]: initial crust generation and rift filling
//! - [`boundary`]: boundary classification
//! - [`simulation`]: the top-level simulation container
//! - [`constants`]: physical constants and simulation parameters

pub mod boundary;
pub mod chunk;
pub mod constants;
pub mod geometry;
pub mod graph;
pub mod partition;
pub mod plate;
pub mod region;
pub mod simulation;
pub mod terrain;

// Re-export core types for convenience
pub use boundary::{classify, BoundaryType};
pub use chunk::{Chunk, Layer, RockClass, RockType};
pub use geometry::{BoundingBox, Length, Point, Vec2, WrappedTorusSpace};
pub use graph::NeighborGraph;
pub use partition::Mask;
pub use plate::{Plate, RegionId};
pub use region::Region;
pub use simulation::{Adjacency, Simulation, SimulationConfig};
