//! Record registry: the flat, append-only collection of all records.
//!
//! Records live in an arena indexed by stable [`RecordId`] slots; a handle
//! map resolves absolute reference values to slots. The registry also
//! issues new handles, monotonically and without reuse. Records are never
//! removed - the graph layer exposes no delete operation.

use crate::error::{CadError, Result};
use crate::record::Record;
use crate::types::Handle;
use ahash::AHashMap;

/// Stable arena slot of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordId(u32);

impl RecordId {
    /// Position of the record in insertion order.
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// The flat record collection of one document.
#[derive(Debug, Clone)]
pub struct Registry {
    /// Records in insertion order
    records: Vec<Record>,
    /// Absolute reference value → arena slot
    by_handle: AHashMap<u64, RecordId>,
    /// Next handle value to issue
    seed: Handle,
}

impl Registry {
    /// Create an empty registry issuing handles from `seed` upward.
    pub fn with_seed(seed: Handle) -> Self {
        Registry {
            records: Vec::new(),
            by_handle: AHashMap::new(),
            seed,
        }
    }

    /// Issue a previously-unused handle.
    ///
    /// Values increase monotonically; assigning records with explicit
    /// higher handles moves the seed past them.
    pub fn next_handle(&mut self) -> Handle {
        let h = self.seed;
        self.seed = self.seed.successor();
        h
    }

    /// The handle the next allocation would produce.
    pub fn peek_handle(&self) -> Handle {
        self.seed
    }

    /// Resolve an absolute reference value to an arena slot.
    ///
    /// Total over all assigned handles; `None` marks an unresolved
    /// reference and is not an error by itself - callers decide whether an
    /// unresolved target is acceptable.
    pub fn resolve(&self, handle: Handle) -> Option<RecordId> {
        if handle.is_null() {
            return None;
        }
        self.by_handle.get(&handle.value()).copied()
    }

    /// Append a record.
    ///
    /// The record must already carry an assigned handle; a null handle is
    /// rejected as an invalid argument and a handle already present in the
    /// document is an internal invariant violation.
    pub fn add(&mut self, record: Record) -> Result<RecordId> {
        let handle = record.handle;
        if handle.is_null() {
            return Err(CadError::InvalidArgument(
                "record has no handle assigned".to_string(),
            ));
        }
        if self.by_handle.contains_key(&handle.value()) {
            return Err(CadError::DuplicateHandle(handle.value()));
        }
        let id = RecordId(self.records.len() as u32);
        self.records.push(record);
        self.by_handle.insert(handle.value(), id);
        if handle >= self.seed {
            self.seed = handle.successor();
        }
        Ok(id)
    }

    /// Record at an arena slot.
    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.records.get(id.index())
    }

    /// Mutable record at an arena slot.
    pub fn get_mut(&mut self, id: RecordId) -> Option<&mut Record> {
        self.records.get_mut(id.index())
    }

    /// Record with the given handle.
    pub fn by_handle(&self, handle: Handle) -> Option<&Record> {
        self.resolve(handle).and_then(|id| self.get(id))
    }

    /// Mutable record with the given handle.
    pub fn by_handle_mut(&mut self, handle: Handle) -> Option<&mut Record> {
        let id = self.resolve(handle)?;
        self.get_mut(id)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the registry holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over all records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }
}

impl Default for Registry {
    fn default() -> Self {
        // Handles below 0x10 are reserved for well-known fixed values
        Registry::with_seed(Handle::new(0x10))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{EntityData, Line};
    use crate::record::{Envelope, RecordData};

    fn line_record(handle: Handle) -> Record {
        Record::new(
            handle,
            Envelope::new(),
            RecordData::Entity(EntityData::Line(Line::new())),
        )
    }

    #[test]
    fn test_handles_are_monotonic() {
        let mut reg = Registry::default();
        let a = reg.next_handle();
        let b = reg.next_handle();
        assert!(b > a);
        assert_eq!(a, Handle::new(0x10));
    }

    #[test]
    fn test_add_and_resolve() {
        let mut reg = Registry::default();
        let h = reg.next_handle();
        let id = reg.add(line_record(h)).unwrap();
        assert_eq!(reg.resolve(h), Some(id));
        assert!(reg.by_handle(h).is_some());
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_null_handle_rejected() {
        let mut reg = Registry::default();
        let err = reg.add(line_record(Handle::NULL)).unwrap_err();
        assert!(matches!(err, CadError::InvalidArgument(_)));
    }

    #[test]
    fn test_duplicate_handle_rejected() {
        let mut reg = Registry::default();
        let h = reg.next_handle();
        reg.add(line_record(h)).unwrap();
        let err = reg.add(line_record(h)).unwrap_err();
        assert!(matches!(err, CadError::DuplicateHandle(v) if v == h.value()));
    }

    #[test]
    fn test_explicit_handle_moves_seed() {
        let mut reg = Registry::default();
        reg.add(line_record(Handle::new(0x100))).unwrap();
        assert!(reg.next_handle() > Handle::new(0x100));
    }

    #[test]
    fn test_resolve_null_and_unknown() {
        let reg = Registry::default();
        assert_eq!(reg.resolve(Handle::NULL), None);
        assert_eq!(reg.resolve(Handle::new(0xDEAD)), None);
    }
}
