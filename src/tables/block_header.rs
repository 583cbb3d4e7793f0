//! Block header table record.
//!
//! A block header is the container of a block definition's entities. Its
//! chain is always bracketed by a BLOCK entity at the front and an ENDBLK
//! entity at the back; the brackets are chained but excluded from the
//! owned-member array.

use crate::chain::EntityChain;
use crate::reference::HandleRef;
use crate::types::{Handle, Vector3};

bitflags::bitflags! {
    /// Block header flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct BlockFlags: u16 {
        /// Anonymous block (name generated)
        const ANONYMOUS = 1;
        /// Block contains attribute definitions
        const HAS_ATTDEFS = 2;
        /// Block is an external reference
        const XREF = 4;
        /// Block is an xref overlay
        const XREF_OVERLAY = 8;
    }
}

/// A block header table record
#[derive(Debug, Clone)]
pub struct BlockHeader {
    /// Block name
    pub name: String,
    /// Block flags
    pub flags: BlockFlags,
    /// Base point for insertions
    pub base_point: Vector3,
    /// Opening bracket entity (BLOCK)
    pub block_begin: Option<Handle>,
    /// Closing bracket entity (ENDBLK)
    pub block_end: Option<Handle>,
    /// Associated layout object, if this block backs a layout
    pub layout: HandleRef,
    /// Sibling chain of the block's entities
    pub chain: EntityChain,
    /// Whether the block can be exploded
    pub explodable: bool,
}

impl BlockHeader {
    /// Create a named block header with an empty chain
    pub fn new(name: impl Into<String>) -> Self {
        BlockHeader {
            name: name.into(),
            flags: BlockFlags::empty(),
            base_point: Vector3::ZERO,
            block_begin: None,
            block_end: None,
            layout: HandleRef::NONE,
            chain: EntityChain::new(),
            explodable: true,
        }
    }

    /// The model space block every document carries
    pub fn model_space() -> Self {
        BlockHeader::new("*Model_Space")
    }

    /// The paper space block every document carries
    pub fn paper_space() -> Self {
        BlockHeader::new("*Paper_Space")
    }

    /// Whether this is the model space block
    pub fn is_model_space(&self) -> bool {
        self.name == "*Model_Space"
    }

    /// Whether this is a paper space block
    pub fn is_paper_space(&self) -> bool {
        self.name.starts_with("*Paper_Space")
    }

    /// Whether the name is generated
    pub fn is_anonymous(&self) -> bool {
        self.flags.contains(BlockFlags::ANONYMOUS) || self.name.starts_with('*')
    }
}
