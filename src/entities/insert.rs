//! Insert (block reference) entity.
//!
//! An insert places a block definition in space. When attributes are
//! attached, the insert becomes a container: the attributes are chained as
//! sibling entities and closed by a SEQEND terminator, like polyline
//! vertices.

use super::EntityCommon;
use crate::chain::EntityChain;
use crate::reference::HandleRef;
use crate::types::{Handle, Vector3};

/// A block reference entity
#[derive(Debug, Clone)]
pub struct Insert {
    /// Common entity data
    pub common: EntityCommon,
    /// Referenced block header (hard pointer)
    pub block_header: HandleRef,
    /// Insertion point
    pub insertion_point: Vector3,
    /// Per-axis scale factors
    pub scale: Vector3,
    /// Rotation in radians
    pub rotation: f64,
    /// Extrusion direction
    pub extrusion: Vector3,
    /// Whether attribute entities follow this insert
    pub has_attribs: bool,
    /// Sibling chain of owned attributes
    pub chain: EntityChain,
    /// Terminator record closing the attribute sequence
    pub seqend: Option<Handle>,
}

impl Insert {
    /// Create an insert of a block at the origin
    pub fn new(block_header: HandleRef) -> Self {
        Insert {
            common: EntityCommon::new(),
            block_header,
            insertion_point: Vector3::ZERO,
            scale: Vector3::new(1.0, 1.0, 1.0),
            rotation: 0.0,
            extrusion: Vector3::UNIT_Z,
            has_attribs: false,
            chain: EntityChain::new(),
            seqend: None,
        }
    }

    /// Create an insert of a block at a point
    pub fn at(block_header: HandleRef, insertion_point: Vector3) -> Self {
        Insert {
            insertion_point,
            ..Self::new(block_header)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_defaults() {
        let i = Insert::at(HandleRef::hard_pointer(Handle::new(0x1F)), Vector3::ZERO);
        assert_eq!(i.scale, Vector3::new(1.0, 1.0, 1.0));
        assert!(!i.has_attribs);
        assert!(i.chain.is_empty());
    }
}
