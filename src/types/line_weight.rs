//! Line weight values

/// Plotted line weight of an entity or layer.
///
/// Stored as hundredths of a millimeter; the negative values are the
/// symbolic ByLayer/ByBlock/Default markers of the on-disk encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineWeight {
    /// Resolve through the entity's layer
    ByLayer,
    /// Resolve through the owning block reference
    ByBlock,
    /// Use the document default
    Default,
    /// Explicit weight in 1/100 mm
    Value(i16),
}

impl LineWeight {
    /// Raw i16 as stored by the format (-1 ByLayer, -2 ByBlock, -3 Default)
    pub fn raw(&self) -> i16 {
        match self {
            LineWeight::ByLayer => -1,
            LineWeight::ByBlock => -2,
            LineWeight::Default => -3,
            LineWeight::Value(v) => *v,
        }
    }

    /// Build from the raw stored value
    pub fn from_raw(value: i16) -> Self {
        match value {
            -1 => LineWeight::ByLayer,
            -2 => LineWeight::ByBlock,
            -3 => LineWeight::Default,
            v => LineWeight::Value(v),
        }
    }
}

impl Default for LineWeight {
    fn default() -> Self {
        LineWeight::ByLayer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_roundtrip() {
        for lw in [
            LineWeight::ByLayer,
            LineWeight::ByBlock,
            LineWeight::Default,
            LineWeight::Value(25),
        ] {
            assert_eq!(LineWeight::from_raw(lw.raw()), lw);
        }
    }
}
