//! Seqend entity - terminator closing an owned entity sub-sequence.
//!
//! A SEQEND carries no data of its own. It sits at the tail of every
//! terminated sub-sequence (polyline vertices, insert attributes), after
//! all member entities, and each such sequence has exactly one.

use super::EntityCommon;

/// End-of-sequence terminator entity
#[derive(Debug, Clone)]
pub struct Seqend {
    /// Common entity data
    pub common: EntityCommon,
}

impl Seqend {
    /// Create a terminator
    pub fn new() -> Self {
        Seqend {
            common: EntityCommon::new(),
        }
    }
}

impl Default for Seqend {
    fn default() -> Self {
        Self::new()
    }
}
