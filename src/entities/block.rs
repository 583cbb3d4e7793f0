//! Synthetic block bracket entities.
//!
//! Every block definition's entity chain is bracketed by a BLOCK entity at
//! the absolute front and an ENDBLK entity at the absolute back. The
//! brackets are real chained entities but are excluded from the block's
//! owned-member array and count.

use super::EntityCommon;
use crate::types::Vector3;

/// Block-open bracket entity
#[derive(Debug, Clone)]
pub struct BlockBegin {
    /// Common entity data
    pub common: EntityCommon,
    /// Block name, repeated from the block header
    pub name: String,
    /// Block base point
    pub base_point: Vector3,
}

impl BlockBegin {
    /// Create the opening bracket for a named block
    pub fn new(name: impl Into<String>) -> Self {
        BlockBegin {
            common: EntityCommon::new(),
            name: name.into(),
            base_point: Vector3::ZERO,
        }
    }
}

/// Block-close bracket entity
#[derive(Debug, Clone)]
pub struct BlockEnd {
    /// Common entity data
    pub common: EntityCommon,
}

impl BlockEnd {
    /// Create the closing bracket
    pub fn new() -> Self {
        BlockEnd {
            common: EntityCommon::new(),
        }
    }
}

impl Default for BlockEnd {
    fn default() -> Self {
        Self::new()
    }
}
