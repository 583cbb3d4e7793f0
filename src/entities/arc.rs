//! Arc entity

use super::EntityCommon;
use crate::types::Vector3;

/// A circular arc entity
#[derive(Debug, Clone)]
pub struct Arc {
    /// Common entity data
    pub common: EntityCommon,
    /// Center point
    pub center: Vector3,
    /// Radius
    pub radius: f64,
    /// Start angle in radians, counter-clockwise from X
    pub start_angle: f64,
    /// End angle in radians
    pub end_angle: f64,
    /// Thickness (extrusion in Z direction)
    pub thickness: f64,
    /// Extrusion direction
    pub extrusion: Vector3,
}

impl Arc {
    /// Create a unit half-arc at the origin
    pub fn new() -> Self {
        Arc {
            common: EntityCommon::new(),
            center: Vector3::ZERO,
            radius: 1.0,
            start_angle: 0.0,
            end_angle: std::f64::consts::PI,
            thickness: 0.0,
            extrusion: Vector3::UNIT_Z,
        }
    }

    /// Create an arc from center, radius and angle range
    pub fn from_center_radius_angles(
        center: Vector3,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    ) -> Self {
        Arc {
            center,
            radius,
            start_angle,
            end_angle,
            ..Self::new()
        }
    }

    /// Swept angle in radians, normalized to [0, 2π)
    pub fn sweep(&self) -> f64 {
        let tau = std::f64::consts::TAU;
        ((self.end_angle - self.start_angle) % tau + tau) % tau
    }
}

impl Default for Arc {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_sweep() {
        let a = Arc::from_center_radius_angles(Vector3::ZERO, 1.0, 0.0, PI);
        assert!((a.sweep() - PI).abs() < 1e-12);

        // crossing the 0 angle
        let a = Arc::from_center_radius_angles(Vector3::ZERO, 1.0, 1.5 * PI, 0.5 * PI);
        assert!((a.sweep() - PI).abs() < 1e-12);
    }
}
