//! Geometric primitives for the wrapped simulation grid
//!
//! This module contains the building blocks shared by the rest of the
//! simulation:
//! - Integer grid points and float vectors
//! - Unit-tagged physical lengths
//! - Axis-aligned bounding boxes
//! - The toroidal wrapping of the world

pub mod bounds;
pub mod length;
pub mod point;
pub mod wrapped;

pub use bounds::BoundingBox;
pub use length::Length;
pub use point::{distance, project, Point, Vec2};
pub use wrapped::WrappedTorusSpace;
