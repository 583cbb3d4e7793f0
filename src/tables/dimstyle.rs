//! Dimension style table record

use crate::reference::HandleRef;

/// A dimension style table record.
///
/// Only the members that participate in the graph (name and style
/// references) plus the most common scale settings are modeled; the full
/// variable set belongs to the rendering side.
#[derive(Debug, Clone)]
pub struct DimStyle {
    /// Style name
    pub name: String,
    /// Overall scale factor (DIMSCALE)
    pub scale: f64,
    /// Arrow size (DIMASZ)
    pub arrow_size: f64,
    /// Dimension text height (DIMTXT)
    pub text_height: f64,
    /// Gap between dimension line and text (DIMGAP)
    pub text_gap: f64,
    /// Decimal places for linear dimensions (DIMDEC)
    pub decimal_places: i16,
    /// Text style used for dimension text (hard pointer)
    pub text_style: HandleRef,
    /// Dimension line linetype (AC1021+, hard pointer)
    pub linetype: HandleRef,
}

impl DimStyle {
    /// Create a named dimension style with defaults
    pub fn new(name: impl Into<String>) -> Self {
        DimStyle {
            name: name.into(),
            scale: 1.0,
            arrow_size: 0.18,
            text_height: 0.18,
            text_gap: 0.09,
            decimal_places: 4,
            text_style: HandleRef::NONE,
            linetype: HandleRef::NONE,
        }
    }

    /// The STANDARD dimension style every document carries
    pub fn standard() -> Self {
        DimStyle::new("Standard")
    }
}
