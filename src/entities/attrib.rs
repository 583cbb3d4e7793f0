//! Block attribute entities (instances and definitions)

use super::EntityCommon;
use crate::reference::HandleRef;
use crate::types::{Vector2, Vector3};

bitflags::bitflags! {
    /// Attribute behaviour flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct AttribFlags: u8 {
        /// Attribute is not displayed
        const INVISIBLE = 1;
        /// Value is fixed and not prompted for
        const CONSTANT = 2;
        /// Input is verified on insertion
        const VERIFY = 4;
        /// Attribute is preset (no prompt, default value)
        const PRESET = 8;
    }
}

/// An attribute instance owned by an insert
#[derive(Debug, Clone)]
pub struct Attrib {
    /// Common entity data
    pub common: EntityCommon,
    /// Attribute tag
    pub tag: String,
    /// Attribute value
    pub value: String,
    /// Insertion point (2D, in OCS)
    pub insertion_point: Vector2,
    /// Text height
    pub height: f64,
    /// Rotation in radians
    pub rotation: f64,
    /// Behaviour flags
    pub flags: AttribFlags,
    /// Text style reference (hard pointer)
    pub style: HandleRef,
    /// Extrusion direction
    pub extrusion: Vector3,
}

impl Attrib {
    /// Create an attribute with a tag and value
    pub fn new(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Attrib {
            common: EntityCommon::new(),
            tag: tag.into(),
            value: value.into(),
            insertion_point: Vector2::ZERO,
            height: 1.0,
            rotation: 0.0,
            flags: AttribFlags::empty(),
            style: HandleRef::NONE,
            extrusion: Vector3::UNIT_Z,
        }
    }
}

/// An attribute definition owned by a block definition
#[derive(Debug, Clone)]
pub struct AttDef {
    /// Common entity data
    pub common: EntityCommon,
    /// Attribute tag
    pub tag: String,
    /// Prompt shown when the block is inserted
    pub prompt: String,
    /// Default value
    pub default_value: String,
    /// Insertion point (2D, in OCS)
    pub insertion_point: Vector2,
    /// Text height
    pub height: f64,
    /// Behaviour flags
    pub flags: AttribFlags,
    /// Text style reference (hard pointer)
    pub style: HandleRef,
}

impl AttDef {
    /// Create a definition with a tag, prompt and default
    pub fn new(
        tag: impl Into<String>,
        prompt: impl Into<String>,
        default_value: impl Into<String>,
    ) -> Self {
        AttDef {
            common: EntityCommon::new(),
            tag: tag.into(),
            prompt: prompt.into(),
            default_value: default_value.into(),
            insertion_point: Vector2::ZERO,
            height: 1.0,
            flags: AttribFlags::empty(),
            style: HandleRef::NONE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attrib_new() {
        let a = Attrib::new("PARTNO", "A-113");
        assert_eq!(a.tag, "PARTNO");
        assert_eq!(a.value, "A-113");
        assert!(a.flags.is_empty());
    }

    #[test]
    fn test_attdef_new() {
        let d = AttDef::new("PARTNO", "Part number?", "NONE");
        assert_eq!(d.prompt, "Part number?");
        assert_eq!(d.default_value, "NONE");
    }
}
