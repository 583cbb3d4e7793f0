//! Linetype table record

/// One dash/dot/text element of a linetype pattern
#[derive(Debug, Clone, PartialEq)]
pub struct LineTypeElement {
    /// Dash length; 0 = dot, negative = gap
    pub length: f64,
    /// Embedded shape number; 0 = plain dash
    pub shape_number: i16,
    /// Text printed along the element, if any
    pub text: Option<String>,
}

impl LineTypeElement {
    /// A plain dash or gap of the given length
    pub fn dash(length: f64) -> Self {
        LineTypeElement {
            length,
            shape_number: 0,
            text: None,
        }
    }
}

/// A linetype table record
#[derive(Debug, Clone)]
pub struct LineType {
    /// Linetype name
    pub name: String,
    /// Description shown in linetype listings
    pub description: String,
    /// Total pattern length
    pub pattern_length: f64,
    /// Pattern elements in order
    pub elements: Vec<LineTypeElement>,
}

impl LineType {
    /// Create a named linetype with an empty pattern
    pub fn new(name: impl Into<String>) -> Self {
        LineType {
            name: name.into(),
            description: String::new(),
            pattern_length: 0.0,
            elements: Vec::new(),
        }
    }

    /// The CONTINUOUS linetype every document carries
    pub fn continuous() -> Self {
        LineType {
            description: "Solid line".to_string(),
            ..LineType::new("Continuous")
        }
    }

    /// The symbolic ByLayer linetype record
    pub fn by_layer() -> Self {
        LineType::new("ByLayer")
    }

    /// The symbolic ByBlock linetype record
    pub fn by_block() -> Self {
        LineType::new("ByBlock")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_continuous() {
        let lt = LineType::continuous();
        assert_eq!(lt.name, "Continuous");
        assert!(lt.elements.is_empty());
    }

    #[test]
    fn test_dash_element() {
        let e = LineTypeElement::dash(-0.25);
        assert_eq!(e.length, -0.25);
        assert!(e.text.is_none());
    }
}
