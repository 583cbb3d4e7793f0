//! Diagnostic notifications collected on the document.
//!
//! Non-fatal conditions met while building or validating the graph - a
//! pointer reference that does not resolve yet, a dictionary key replaced
//! by an upsert - are collected here rather than being silently dropped or
//! escalated to hard errors. After a build or validation pass the caller
//! can inspect [`crate::document::Document::notifications`].

use std::fmt;

/// Severity/category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationType {
    /// Non-fatal condition worth surfacing (dangling pointer, replaced key)
    Warning,
    /// Error that was recovered from
    Error,
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "Warning"),
            Self::Error => write!(f, "Error"),
        }
    }
}

/// A single diagnostic produced during graph construction or validation.
#[derive(Debug, Clone)]
pub struct Notification {
    /// Severity/category
    pub kind: NotificationType,
    /// Human-readable description
    pub message: String,
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

/// Collects notifications across an operation sequence.
#[derive(Debug, Clone, Default)]
pub struct NotificationCollection {
    items: Vec<Notification>,
}

impl NotificationCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Record a notification.
    pub fn notify(&mut self, kind: NotificationType, message: impl Into<String>) {
        self.items.push(Notification {
            kind,
            message: message.into(),
        });
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of notifications.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Iterate over all notifications.
    pub fn iter(&self) -> std::slice::Iter<'_, Notification> {
        self.items.iter()
    }

    /// Whether any notification of the given kind exists.
    pub fn has_kind(&self, kind: NotificationType) -> bool {
        self.items.iter().any(|n| n.kind == kind)
    }

    /// Drop all recorded notifications.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<'a> IntoIterator for &'a NotificationCollection {
    type Item = &'a Notification;
    type IntoIter = std::slice::Iter<'a, Notification>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_and_query() {
        let mut c = NotificationCollection::new();
        assert!(c.is_empty());

        c.notify(NotificationType::Warning, "dangling soft pointer 0x99");
        c.notify(NotificationType::Error, "recovered bad flag word");

        assert_eq!(c.len(), 2);
        assert!(c.has_kind(NotificationType::Warning));
        assert!(c.has_kind(NotificationType::Error));

        c.clear();
        assert!(c.is_empty());
    }

    #[test]
    fn test_display() {
        let mut c = NotificationCollection::new();
        c.notify(NotificationType::Warning, "key 'Standard' replaced");
        let n = c.iter().next().unwrap();
        assert_eq!(format!("{}", n), "[Warning] key 'Standard' replaced");
    }
}
