//! Error types for dwg-graph-rs

use crate::schema::{KindFamily, StorageKind};
use thiserror::Error;

/// Main error type for document graph operations
#[derive(Debug, Error)]
pub enum CadError {
    /// A required argument was absent or malformed
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Field name not present in the schema for this record kind
    #[error("Unknown field '{field}' for type {type_name}")]
    UnknownField {
        type_name: &'static str,
        field: String,
    },

    /// Field exists but its declared kind is outside the requested family
    #[error("Kind mismatch on field '{field}': declared {declared:?}, requested {requested:?}")]
    KindMismatch {
        field: String,
        declared: StorageKind,
        requested: KindFamily,
    },

    /// Sub-sequence index beyond the owned count
    #[error("Index {index} out of range (length {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// A reference whose target does not resolve.
    ///
    /// Recoverable for pointer references (re-checked after the graph is
    /// built); fatal to the mutation in progress for owner references.
    #[error("Unresolved reference: {0:#X}")]
    UnresolvedReference(u64),

    /// Absolute handle value already assigned within the document
    #[error("Duplicate handle: {0:#X}")]
    DuplicateHandle(u64),

    /// Named record already exists in its table or dictionary
    #[error("Duplicate name: {0}")]
    DuplicateName(String),

    /// Handle does not resolve to any record
    #[error("Record not found: handle {0:#X}")]
    RecordNotFound(u64),
}

/// Result type alias for document graph operations
pub type Result<T> = std::result::Result<T, CadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CadError::RecordNotFound(0x2E);
        assert_eq!(err.to_string(), "Record not found: handle 0x2E");
    }

    #[test]
    fn test_kind_mismatch_display() {
        let err = CadError::KindMismatch {
            field: "radius".to_string(),
            declared: StorageKind::FloatDouble,
            requested: KindFamily::Point3,
        };
        assert!(err.to_string().contains("radius"));
        assert!(err.to_string().contains("FloatDouble"));
    }
}
