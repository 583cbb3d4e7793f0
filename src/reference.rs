//! Handle references and their relationship kinds.
//!
//! Every inter-record link in the graph is a [`HandleRef`]: an absolute
//! handle value plus the relationship it expresses. Ownership references
//! participate in the single-owner invariant; pointer references do not and
//! may legitimately dangle until the whole graph is built.
//!
//! The numeric codes match the absolute handle reference codes of the DWG
//! format (soft owner 2, hard owner 3, soft pointer 4, hard pointer 5).

use crate::record::RecordKind;
use crate::types::Handle;

/// Relationship kind of a handle reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RefKind {
    /// Reference whose target is not (yet) known
    Unresolved = 0,
    /// Ownership without lifetime responsibility (dictionary values)
    SoftOwner = 2,
    /// Full ownership: the target's lifetime and placement follow the owner
    HardOwner = 3,
    /// Non-owning link that tolerates a missing target
    SoftPointer = 4,
    /// Non-owning link that a consumer expects to resolve
    HardPointer = 5,
}

impl RefKind {
    /// Try to create a relationship kind from a raw reference code.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(RefKind::Unresolved),
            2 => Some(RefKind::SoftOwner),
            3 => Some(RefKind::HardOwner),
            4 => Some(RefKind::SoftPointer),
            5 => Some(RefKind::HardPointer),
            _ => None,
        }
    }

    /// Raw reference code.
    pub fn code(&self) -> u8 {
        *self as u8
    }

    /// Whether this kind expresses ownership.
    pub fn is_owner(&self) -> bool {
        matches!(self, RefKind::HardOwner | RefKind::SoftOwner)
    }

    /// Whether this kind is a plain pointer.
    pub fn is_pointer(&self) -> bool {
        matches!(self, RefKind::HardPointer | RefKind::SoftPointer)
    }
}

/// A typed reference to another record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandleRef {
    /// Absolute handle value of the target
    pub value: Handle,
    /// Relationship expressed by this reference
    pub kind: RefKind,
}

impl HandleRef {
    /// An unresolved reference with no target.
    pub const NONE: HandleRef = HandleRef {
        value: Handle::NULL,
        kind: RefKind::Unresolved,
    };

    /// Hard ownership of `target`.
    pub fn hard_owner(target: Handle) -> Self {
        HandleRef {
            value: target,
            kind: RefKind::HardOwner,
        }
    }

    /// Soft ownership of `target`.
    pub fn soft_owner(target: Handle) -> Self {
        HandleRef {
            value: target,
            kind: RefKind::SoftOwner,
        }
    }

    /// Hard pointer to `target`.
    pub fn hard_pointer(target: Handle) -> Self {
        HandleRef {
            value: target,
            kind: RefKind::HardPointer,
        }
    }

    /// Soft pointer to `target`.
    pub fn soft_pointer(target: Handle) -> Self {
        HandleRef {
            value: target,
            kind: RefKind::SoftPointer,
        }
    }

    /// Whether a target handle has been assigned.
    pub fn is_set(&self) -> bool {
        self.value.is_valid() && self.kind != RefKind::Unresolved
    }

    /// Whether this reference expresses ownership.
    pub fn is_owner(&self) -> bool {
        self.kind.is_owner()
    }

    /// Whether this reference is a plain pointer.
    pub fn is_pointer(&self) -> bool {
        self.kind.is_pointer()
    }
}

impl Default for HandleRef {
    fn default() -> Self {
        HandleRef::NONE
    }
}

/// Classify the relationship between an owning/referring record and a
/// referenced record, purely from the two record kinds.
///
/// - A table control owning one of its named records is a hard owner.
/// - A dictionary owning one of its values is a soft owner (hard-owner
///   dictionaries upgrade this per instance, outside this function).
/// - Any other container owning a member (block over its entities, a
///   polyline over its vertices, an insert over its attributes) is a hard
///   owner.
/// - A non-ownership link targeting a named table record (layer, linetype,
///   text style, ...) is a hard pointer; all remaining links are soft
///   pointers.
pub fn classify(owner: RecordKind, referenced: RecordKind) -> RefKind {
    if owner.is_control() && referenced.table_kind() == owner.controlled_table() {
        return RefKind::HardOwner;
    }
    if owner == RecordKind::Dictionary {
        return RefKind::SoftOwner;
    }
    if owner.is_container() && referenced.is_entity() {
        return RefKind::HardOwner;
    }
    if referenced.is_table_record() {
        RefKind::HardPointer
    } else {
        RefKind::SoftPointer
    }
}
