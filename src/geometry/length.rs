//! Physical length with explicit unit conversions.
//!
//! Crust thicknesses are tracked in meters internally; volume bookkeeping
//! during isostatic re-evaluation works in kilometers. Keeping the unit in a
//! newtype stops the two from being mixed up silently.

use std::ops::{Add, AddAssign};

/// A physical length, stored internally in meters.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Length(f32);

impl Length {
    pub const ZERO: Length = Length(0.0);

    pub fn from_meters(m: f32) -> Self {
        Length(m)
    }

    pub fn from_kilometers(km: f32) -> Self {
        Length(km * 1000.0)
    }

    pub fn from_centimeters(cm: f32) -> Self {
        Length(cm / 100.0)
    }

    pub fn meters(&self) -> f32 {
        self.0
    }

    pub fn kilometers(&self) -> f32 {
        self.0 / 1000.0
    }

    pub fn centimeters(&self) -> f32 {
        self.0 * 100.0
    }

    pub fn scale(&self, factor: f32) -> Self {
        Length(self.0 * factor)
    }
}

impl Add for Length {
    type Output = Length;

    fn add(self, rhs: Length) -> Length {
        Length(self.0 + rhs.0)
    }
}

impl AddAssign for Length {
    fn add_assign(&mut self, rhs: Length) {
        self.0 += rhs.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions_are_consistent() {
        let l = Length::from_kilometers(1.5);
        assert_eq!(l.meters(), 1500.0);
        assert_eq!(l.centimeters(), 150_000.0);
        assert_eq!(Length::from_centimeters(250.0).meters(), 2.5);
    }

    #[test]
    fn lengths_add_and_compare() {
        let sum = Length::from_meters(400.0) + Length::from_meters(600.0);
        assert_eq!(sum, Length::from_kilometers(1.0));
        assert!(Length::from_meters(1.0) < Length::from_kilometers(1.0));
    }
}
