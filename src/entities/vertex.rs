//! Polyline vertex entities.
//!
//! Vertices are ordinary entities: they live in the registry with their own
//! handles and are chained as siblings under their owning polyline, which
//! closes the sequence with a SEQEND terminator.

use super::EntityCommon;
use crate::types::Vector3;

bitflags::bitflags! {
    /// Vertex role flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct VertexFlags: u8 {
        /// Extra vertex created by curve fitting
        const CURVE_FIT_EXTRA = 1;
        /// Curve-fit tangent defined
        const TANGENT_DEFINED = 2;
        /// Spline frame-control vertex
        const SPLINE_CONTROL = 16;
        /// Vertex of a 3D polyline
        const POLYLINE_3D = 32;
        /// Vertex of a polygon mesh
        const MESH = 64;
    }
}

/// A vertex owned by a 2D polyline
#[derive(Debug, Clone)]
pub struct Vertex2D {
    /// Common entity data
    pub common: EntityCommon,
    /// Location (X, Y in OCS; Z carries the elevation)
    pub location: Vector3,
    /// Start width override (0 = use polyline default)
    pub start_width: f64,
    /// End width override (0 = use polyline default)
    pub end_width: f64,
    /// Bulge: 0 = straight, otherwise tan of a quarter of the arc's angle
    pub bulge: f64,
    /// Curve fit tangent direction in radians
    pub tangent: f64,
    /// Vertex identifier (stored from AC1024 on)
    pub vertex_id: i32,
    /// Role flags
    pub flags: VertexFlags,
}

impl Vertex2D {
    /// Create a straight vertex at a location
    pub fn at(location: Vector3) -> Self {
        Vertex2D {
            common: EntityCommon::new(),
            location,
            start_width: 0.0,
            end_width: 0.0,
            bulge: 0.0,
            tangent: 0.0,
            vertex_id: 0,
            flags: VertexFlags::empty(),
        }
    }

    /// Set the bulge, turning the following segment into an arc
    pub fn with_bulge(mut self, bulge: f64) -> Self {
        self.bulge = bulge;
        self
    }
}

/// A vertex owned by a 3D polyline
#[derive(Debug, Clone)]
pub struct Vertex3D {
    /// Common entity data
    pub common: EntityCommon,
    /// Location
    pub location: Vector3,
    /// Role flags
    pub flags: VertexFlags,
}

impl Vertex3D {
    /// Create a vertex at a location
    pub fn at(location: Vector3) -> Self {
        Vertex3D {
            common: EntityCommon::new(),
            location,
            flags: VertexFlags::POLYLINE_3D,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex2d_bulge() {
        let v = Vertex2D::at(Vector3::new(1.0, 1.0, 0.0)).with_bulge(0.5);
        assert_eq!(v.bulge, 0.5);
        assert!(v.flags.is_empty());
    }

    #[test]
    fn test_vertex3d_flag() {
        let v = Vertex3D::at(Vector3::ZERO);
        assert!(v.flags.contains(VertexFlags::POLYLINE_3D));
    }
}
