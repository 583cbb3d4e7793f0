//! Drawing format versions and their capability gates.
//!
//! The version is a property of the [`crate::document::Document`] and is
//! threaded through every encoding-sensitive call; there is no process-wide
//! "active version" state.

/// Drawing format version, named by the on-disk version string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CadVersion {
    /// AutoCAD R14
    AC1014,
    /// AutoCAD 2000/2002
    AC1015,
    /// AutoCAD 2004-2006
    AC1018,
    /// AutoCAD 2007-2009
    AC1021,
    /// AutoCAD 2010-2012
    AC1024,
    /// AutoCAD 2013-2017
    AC1027,
    /// AutoCAD 2018+
    AC1032,
}

impl CadVersion {
    /// The on-disk version string
    pub fn name(&self) -> &'static str {
        match self {
            CadVersion::AC1014 => "AC1014",
            CadVersion::AC1015 => "AC1015",
            CadVersion::AC1018 => "AC1018",
            CadVersion::AC1021 => "AC1021",
            CadVersion::AC1024 => "AC1024",
            CadVersion::AC1027 => "AC1027",
            CadVersion::AC1032 => "AC1032",
        }
    }

    /// Parse an on-disk version string
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "AC1014" => Some(CadVersion::AC1014),
            "AC1015" => Some(CadVersion::AC1015),
            "AC1018" => Some(CadVersion::AC1018),
            "AC1021" => Some(CadVersion::AC1021),
            "AC1024" => Some(CadVersion::AC1024),
            "AC1027" => Some(CadVersion::AC1027),
            "AC1032" => Some(CadVersion::AC1032),
            _ => None,
        }
    }

    /// Text fields are stored as wide (UTF-16) characters from AC1021
    /// (AutoCAD 2007) on. Below that, text is single-byte in the drawing
    /// code page, and dictionary keys compare by ordinal byte value.
    pub fn supports_unicode_text(&self) -> bool {
        *self >= CadVersion::AC1021
    }

    /// Plot style references on entities exist from AC1015 on.
    pub fn supports_plot_style(&self) -> bool {
        *self >= CadVersion::AC1015
    }

    /// Material references on entities exist from AC1021 on.
    pub fn supports_material(&self) -> bool {
        *self >= CadVersion::AC1021
    }
}

impl Default for CadVersion {
    fn default() -> Self {
        CadVersion::AC1032
    }
}

impl std::fmt::Display for CadVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
