//! Dictionary object - an ordered string-key → handle map.
//!
//! Keys and values are held in parallel arrays so entry order is the
//! insertion order. Key equality depends on the document's text context:
//! below the unicode version threshold keys compare by their code-page
//! byte encoding, at or above it by decoded characters. The top-level
//! named-object dictionary is the only record in the graph with no owner.

use crate::reference::HandleRef;
use crate::text::TextContext;
use crate::types::Handle;

/// Duplicate-record cloning behaviour for a dictionary's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i16)]
pub enum CloningFlags {
    NotApplicable = 0,
    KeepExisting = 1,
    UseClone = 2,
    XrefValueName = 3,
    MangleName = 4,
    UnmangleName = 5,
}

/// A dictionary object
#[derive(Debug, Clone)]
pub struct Dictionary {
    /// Entry keys, in insertion order
    keys: Vec<String>,
    /// Entry values, parallel to `keys`
    values: Vec<HandleRef>,
    /// Cloning behaviour for duplicate records
    pub cloning: CloningFlags,
    /// Whether values are hard-owned instead of soft-owned
    pub hard_owner: bool,
}

impl Dictionary {
    /// Create an empty dictionary
    pub fn new() -> Self {
        Dictionary {
            keys: Vec::new(),
            values: Vec::new(),
            cloning: CloningFlags::KeepExisting,
            hard_owner: false,
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the dictionary has no entries
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Position of a key under the given text context, if present
    pub fn index_of(&self, key: &str, ctx: &TextContext) -> Option<usize> {
        self.keys.iter().position(|k| ctx.keys_equal(k, key))
    }

    /// Insert or replace the value for a key.
    ///
    /// An existing context-equal key keeps its position and has its value
    /// replaced; the entry count does not change. Returns the replaced
    /// value if the key already existed.
    pub fn upsert(
        &mut self,
        key: impl Into<String>,
        value: HandleRef,
        ctx: &TextContext,
    ) -> Option<HandleRef> {
        let key = key.into();
        match self.index_of(&key, ctx) {
            Some(i) => {
                let old = self.values[i];
                self.values[i] = value;
                Some(old)
            }
            None => {
                self.keys.push(key);
                self.values.push(value);
                None
            }
        }
    }

    /// The handle stored under a key, if any
    pub fn lookup(&self, key: &str, ctx: &TextContext) -> Option<Handle> {
        self.index_of(key, ctx).map(|i| self.values[i].value)
    }

    /// Iterate over (key, value) pairs in entry order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &HandleRef)> {
        self.keys.iter().map(|k| k.as_str()).zip(self.values.iter())
    }

    /// The entry at a position
    pub fn entry_at(&self, index: usize) -> Option<(&str, &HandleRef)> {
        self.keys
            .get(index)
            .map(|k| (k.as_str(), &self.values[index]))
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::new()
    }
}
