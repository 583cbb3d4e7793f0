//! Handle type for document records
//!
//! A handle is the integer identity of a record inside one document. Every
//! reference between records travels as a handle value, never as a pointer.

use std::fmt;

/// A unique identifier for a record within a document.
///
/// Handles are 64-bit unsigned integers. Handle 0 is reserved: it marks an
/// unassigned or null reference and never resolves to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(u64);

impl Handle {
    /// The null/unassigned handle (0)
    pub const NULL: Handle = Handle(0);

    /// Create a handle from a raw u64 value
    #[inline]
    pub const fn new(value: u64) -> Self {
        Handle(value)
    }

    /// Get the raw u64 value
    #[inline]
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// Check if this is the null handle
    #[inline]
    pub const fn is_null(&self) -> bool {
        self.0 == 0
    }

    /// Check if this handle has been assigned
    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.0 != 0
    }

    /// The handle immediately following this one.
    ///
    /// Used by the registry's handle seed; saturates instead of wrapping
    /// back to the reserved null value.
    #[inline]
    pub const fn successor(&self) -> Handle {
        Handle(self.0.saturating_add(1))
    }
}

impl Default for Handle {
    fn default() -> Self {
        Handle::NULL
    }
}

impl From<u64> for Handle {
    fn from(value: u64) -> Self {
        Handle(value)
    }
}

impl From<Handle> for u64 {
    fn from(handle: Handle) -> Self {
        handle.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#X}", self.0)
    }
}

impl fmt::UpperHex for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_is_reserved() {
        assert!(Handle::NULL.is_null());
        assert!(!Handle::NULL.is_valid());
        assert_eq!(Handle::default(), Handle::NULL);
    }

    #[test]
    fn test_roundtrip_u64() {
        let h: Handle = 0x2E4u64.into();
        assert_eq!(h.value(), 0x2E4);
        let back: u64 = h.into();
        assert_eq!(back, 0x2E4);
    }

    #[test]
    fn test_successor() {
        assert_eq!(Handle::new(0x10).successor(), Handle::new(0x11));
        assert_eq!(Handle::new(u64::MAX).successor(), Handle::new(u64::MAX));
    }

    #[test]
    fn test_display_hex() {
        let h = Handle::new(0x1F);
        assert_eq!(format!("{}", h), "0x1F");
        assert_eq!(format!("{:X}", h), "1F");
    }

    #[test]
    fn test_ordering() {
        assert!(Handle::new(0x11) < Handle::new(0x40));
    }
}
