//! Text style table record

/// A text style table record
#[derive(Debug, Clone)]
pub struct TextStyle {
    /// Style name
    pub name: String,
    /// Primary font file name
    pub font_file: String,
    /// Big-font file name for asian double-byte fonts
    pub big_font_file: String,
    /// Fixed text height; 0 = height prompted per entity
    pub fixed_height: f64,
    /// Width scale factor
    pub width_factor: f64,
    /// Oblique (slant) angle in radians
    pub oblique_angle: f64,
    /// Height of the most recently used text
    pub last_height: f64,
    /// Whether this style describes a shape file instead of text
    pub is_shape: bool,
    /// Vertical text generation
    pub is_vertical: bool,
}

impl TextStyle {
    /// Create a named style with defaults
    pub fn new(name: impl Into<String>) -> Self {
        TextStyle {
            name: name.into(),
            font_file: "txt".to_string(),
            big_font_file: String::new(),
            fixed_height: 0.0,
            width_factor: 1.0,
            oblique_angle: 0.0,
            last_height: 0.2,
            is_shape: false,
            is_vertical: false,
        }
    }

    /// The STANDARD style every document carries
    pub fn standard() -> Self {
        TextStyle::new("Standard")
    }
}
