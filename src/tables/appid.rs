//! Application id table record

/// A registered application table record.
///
/// Applications register a name here before attaching extended data under
/// it.
#[derive(Debug, Clone)]
pub struct AppId {
    /// Registered application name
    pub name: String,
}

impl AppId {
    /// Register a named application
    pub fn new(name: impl Into<String>) -> Self {
        AppId { name: name.into() }
    }

    /// The ACAD application id every document carries
    pub fn acad() -> Self {
        AppId::new("ACAD")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acad() {
        assert_eq!(AppId::acad().name, "ACAD");
    }
}
