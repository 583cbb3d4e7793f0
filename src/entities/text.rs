//! Single-line text entity

use super::EntityCommon;
use crate::reference::HandleRef;
use crate::types::{Vector2, Vector3};

/// A single-line text entity.
///
/// The insertion point is two-dimensional; the elevation carries the OCS Z
/// component separately, as the format stores it.
#[derive(Debug, Clone)]
pub struct Text {
    /// Common entity data
    pub common: EntityCommon,
    /// Text content
    pub value: String,
    /// Insertion point (2D, in OCS)
    pub insertion_point: Vector2,
    /// OCS elevation
    pub elevation: f64,
    /// Text height
    pub height: f64,
    /// Rotation in radians
    pub rotation: f64,
    /// Width scale factor
    pub width_factor: f64,
    /// Oblique (slant) angle in radians
    pub oblique_angle: f64,
    /// Mirroring flags (2 = backward, 4 = upside down)
    pub generation: i16,
    /// Text style reference (hard pointer)
    pub style: HandleRef,
    /// Thickness (extrusion in Z direction)
    pub thickness: f64,
    /// Extrusion direction
    pub extrusion: Vector3,
}

impl Text {
    /// Create an empty text entity at the origin
    pub fn new() -> Self {
        Text {
            common: EntityCommon::new(),
            value: String::new(),
            insertion_point: Vector2::ZERO,
            elevation: 0.0,
            height: 1.0,
            rotation: 0.0,
            width_factor: 1.0,
            oblique_angle: 0.0,
            generation: 0,
            style: HandleRef::NONE,
            thickness: 0.0,
            extrusion: Vector3::UNIT_Z,
        }
    }

    /// Create a text entity with content at an insertion point
    pub fn with_value(value: impl Into<String>, insertion_point: Vector2, height: f64) -> Self {
        Text {
            value: value.into(),
            insertion_point,
            height,
            ..Self::new()
        }
    }
}

impl Default for Text {
    fn default() -> Self {
        Self::new()
    }
}
