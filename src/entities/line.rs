//! Line entity

use super::EntityCommon;
use crate::types::Vector3;

/// A straight line segment
#[derive(Debug, Clone)]
pub struct Line {
    /// Common entity data
    pub common: EntityCommon,
    /// Start point
    pub start: Vector3,
    /// End point
    pub end: Vector3,
    /// Thickness (extrusion in Z direction)
    pub thickness: f64,
    /// Extrusion direction
    pub extrusion: Vector3,
}

impl Line {
    /// Create a degenerate line at the origin
    pub fn new() -> Self {
        Line {
            common: EntityCommon::new(),
            start: Vector3::ZERO,
            end: Vector3::ZERO,
            thickness: 0.0,
            extrusion: Vector3::UNIT_Z,
        }
    }

    /// Create a line between two points
    pub fn from_points(start: Vector3, end: Vector3) -> Self {
        Line {
            start,
            end,
            ..Self::new()
        }
    }

    /// Length of the segment
    pub fn length(&self) -> f64 {
        self.start.distance(&self.end)
    }
}

impl Default for Line {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_length() {
        let l = Line::from_points(Vector3::ZERO, Vector3::new(3.0, 4.0, 0.0));
        assert!((l.length() - 5.0).abs() < 1e-12);
    }
}
