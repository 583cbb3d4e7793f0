//! Heavy polyline entities (vertex containers).
//!
//! A polyline owns its vertices as chained sibling entities and closes the
//! sequence with a SEQEND terminator. The container state (first/last
//! sibling, owned handle array) lives in an [`EntityChain`].

use super::EntityCommon;
use crate::chain::EntityChain;
use crate::types::{Handle, Vector3};

bitflags::bitflags! {
    /// Polyline flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PolylineFlags: u16 {
        /// Polyline is closed
        const CLOSED = 1;
        /// Curve-fit vertices were added
        const CURVE_FIT = 2;
        /// Spline-fit vertices were added
        const SPLINE_FIT = 4;
        /// 3D polyline
        const IS_3D = 8;
        /// Polygon mesh
        const MESH = 16;
        /// Mesh closed in N direction
        const CLOSED_N = 32;
        /// Polyface mesh
        const POLYFACE = 64;
        /// Generate linetype pattern continuously around vertices
        const CONTINUOUS_PATTERN = 128;
    }
}

/// A heavy 2D polyline: a container of [`super::Vertex2D`] entities
#[derive(Debug, Clone)]
pub struct Polyline2D {
    /// Common entity data
    pub common: EntityCommon,
    /// Polyline flags
    pub flags: PolylineFlags,
    /// Default start width for segments
    pub start_width: f64,
    /// Default end width for segments
    pub end_width: f64,
    /// OCS elevation of all vertices
    pub elevation: f64,
    /// Thickness (extrusion in Z direction)
    pub thickness: f64,
    /// Extrusion direction
    pub extrusion: Vector3,
    /// Sibling chain of owned vertices
    pub chain: EntityChain,
    /// Terminator record closing the vertex sequence
    pub seqend: Option<Handle>,
}

impl Polyline2D {
    /// Create an empty 2D polyline
    pub fn new() -> Self {
        Polyline2D {
            common: EntityCommon::new(),
            flags: PolylineFlags::empty(),
            start_width: 0.0,
            end_width: 0.0,
            elevation: 0.0,
            thickness: 0.0,
            extrusion: Vector3::UNIT_Z,
            chain: EntityChain::new(),
            seqend: None,
        }
    }

    /// Whether the polyline is closed
    pub fn is_closed(&self) -> bool {
        self.flags.contains(PolylineFlags::CLOSED)
    }
}

impl Default for Polyline2D {
    fn default() -> Self {
        Self::new()
    }
}

/// A 3D polyline: a container of [`super::Vertex3D`] entities
#[derive(Debug, Clone)]
pub struct Polyline3D {
    /// Common entity data
    pub common: EntityCommon,
    /// Polyline flags; `IS_3D` is always set
    pub flags: PolylineFlags,
    /// Sibling chain of owned vertices
    pub chain: EntityChain,
    /// Terminator record closing the vertex sequence
    pub seqend: Option<Handle>,
}

impl Polyline3D {
    /// Create an empty 3D polyline
    pub fn new() -> Self {
        Polyline3D {
            common: EntityCommon::new(),
            flags: PolylineFlags::IS_3D,
            chain: EntityChain::new(),
            seqend: None,
        }
    }
}

impl Default for Polyline3D {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_polyline_is_open_and_empty() {
        let p = Polyline2D::new();
        assert!(!p.is_closed());
        assert!(p.chain.is_empty());
        assert!(p.seqend.is_none());
    }

    #[test]
    fn test_polyline3d_flag() {
        let p = Polyline3D::new();
        assert!(p.flags.contains(PolylineFlags::IS_3D));
    }
}
