//! Circle entity

use super::EntityCommon;
use crate::types::Vector3;

/// A circle entity
#[derive(Debug, Clone)]
pub struct Circle {
    /// Common entity data
    pub common: EntityCommon,
    /// Center point
    pub center: Vector3,
    /// Radius
    pub radius: f64,
    /// Thickness (extrusion in Z direction)
    pub thickness: f64,
    /// Extrusion direction
    pub extrusion: Vector3,
}

impl Circle {
    /// Create a unit circle at the origin
    pub fn new() -> Self {
        Circle {
            common: EntityCommon::new(),
            center: Vector3::ZERO,
            radius: 1.0,
            thickness: 0.0,
            extrusion: Vector3::UNIT_Z,
        }
    }

    /// Create a circle from center and radius
    pub fn from_center_radius(center: Vector3, radius: f64) -> Self {
        Circle {
            center,
            radius,
            ..Self::new()
        }
    }

    /// Diameter of the circle
    pub fn diameter(&self) -> f64 {
        self.radius * 2.0
    }

    /// Area of the circle
    pub fn area(&self) -> f64 {
        std::f64::consts::PI * self.radius * self.radius
    }
}

impl Default for Circle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_center_radius() {
        let c = Circle::from_center_radius(Vector3::new(5.0, 5.0, 0.0), 10.0);
        assert_eq!(c.radius, 10.0);
        assert_eq!(c.diameter(), 20.0);
    }

    #[test]
    fn test_area() {
        let c = Circle::from_center_radius(Vector3::ZERO, 5.0);
        assert!((c.area() - 78.53981633974483).abs() < 1e-10);
    }
}
