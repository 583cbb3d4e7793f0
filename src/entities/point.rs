//! Point entity

use super::EntityCommon;
use crate::types::Vector3;

/// A point entity
#[derive(Debug, Clone)]
pub struct Point {
    /// Common entity data
    pub common: EntityCommon,
    /// Location of the point
    pub location: Vector3,
    /// Thickness (extrusion in Z direction)
    pub thickness: f64,
    /// Extrusion direction
    pub extrusion: Vector3,
    /// Rotation of the point display marker, in radians
    pub x_axis_angle: f64,
}

impl Point {
    /// Create a point at the origin
    pub fn new() -> Self {
        Point {
            common: EntityCommon::new(),
            location: Vector3::ZERO,
            thickness: 0.0,
            extrusion: Vector3::UNIT_Z,
            x_axis_angle: 0.0,
        }
    }

    /// Create a point at a location
    pub fn at(location: Vector3) -> Self {
        Point {
            location,
            ..Self::new()
        }
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_at() {
        let p = Point::at(Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(p.location, Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(p.extrusion, Vector3::UNIT_Z);
    }
}
