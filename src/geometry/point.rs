//! Core value types for the toroidal grid: integer points and float vectors

use rand::Rng;
use std::ops::{Add, Neg, Sub};

/// A cell coordinate on the simulation grid.
///
/// Points are plain integer pairs with no wrapping behavior of their own;
/// wrap-aware arithmetic lives in
/// [`WrappedTorusSpace`](crate::geometry::WrappedTorusSpace).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0, y: 0 };

    /// The four cardinal unit offsets, in +x, -x, +y, -y order.
    pub const DIRECTIONS: [Point; 4] = [
        Point { x: 1, y: 0 },
        Point { x: -1, y: 0 },
        Point { x: 0, y: 1 },
        Point { x: 0, y: -1 },
    ];

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The four cardinal neighbors in plain (non-wrapped) space.
    pub fn neighbors(&self) -> [Point; 4] {
        [
            Point::new(self.x + 1, self.y),
            Point::new(self.x - 1, self.y),
            Point::new(self.x, self.y + 1),
            Point::new(self.x, self.y - 1),
        ]
    }

    /// Whether the two points are 4-adjacent in plain euclidean space.
    pub fn is_adjacent(&self, other: Point) -> bool {
        (other.x - self.x).abs() + (other.y - self.y).abs() == 1
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

/// Euclidean distance between two grid points.
pub fn distance(a: Point, b: Point) -> f32 {
    let dx = (b.x - a.x) as f32;
    let dy = (b.y - a.y) as f32;
    (dx * dx + dy * dy).sqrt()
}

/// An immutable 2-D float vector.
///
/// All operations return new values; nothing mutates in place.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };
    pub const UNIT_X: Vec2 = Vec2 { x: 1.0, y: 0.0 };
    pub const UNIT_Y: Vec2 = Vec2 { x: 0.0, y: 1.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Promote a grid point to a float vector.
    pub fn extend(p: Point) -> Self {
        Self::new(p.x as f32, p.y as f32)
    }

    /// The unit vector pointing along `radians`.
    pub fn from_angle(radians: f32) -> Self {
        Self::new(radians.cos(), radians.sin())
    }

    /// A vector of the given magnitude in a uniformly random direction.
    pub fn random_direction<R: Rng>(rng: &mut R, magnitude: f32) -> Self {
        let angle = rng.gen_range(0.0..std::f32::consts::TAU);
        Self::from_angle(angle).scale(magnitude)
    }

    pub fn len(&self) -> f32 {
        self.dot(*self).sqrt()
    }

    pub fn scale(&self, scalar: f32) -> Self {
        Self::new(self.x * scalar, self.y * scalar)
    }

    pub fn dot(&self, other: Vec2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// The unit vector in this direction, or zero for the zero vector.
    pub fn normalized(&self) -> Self {
        let len = self.len();
        if len < crate::constants::EPSILON {
            Self::ZERO
        } else {
            self.scale(1.0 / len)
        }
    }

    pub fn rotate(&self, radians: f32) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self::new(cos * self.x - sin * self.y, sin * self.x + cos * self.y)
    }

    /// The vector rotated a quarter turn counterclockwise.
    pub fn perpendicular(&self) -> Self {
        Self::new(-self.y, self.x)
    }

    /// Truncate both components toward zero, yielding a grid point.
    pub fn truncate(&self) -> Point {
        Point::new(self.x as i32, self.y as i32)
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Vec2 {
        self.scale(-1.0)
    }
}

/// Scalar projection of `v` onto `onto`.
/// Projecting onto the zero vector is defined as 0.
pub fn project(v: Vec2, onto: Vec2) -> f32 {
    let unit = onto.normalized();
    if unit == Vec2::ZERO {
        0.0
    } else {
        v.dot(unit)
    }
}
