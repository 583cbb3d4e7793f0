//! Layer table record

use crate::reference::HandleRef;
use crate::types::{Color, LineWeight};

bitflags::bitflags! {
    /// Layer state flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct LayerFlags: u16 {
        /// Layer is frozen
        const FROZEN = 1;
        /// Layer is frozen in newly created viewports
        const FROZEN_IN_NEW = 2;
        /// Layer is locked against editing
        const LOCKED = 4;
    }
}

/// A layer table record
#[derive(Debug, Clone)]
pub struct Layer {
    /// Layer name
    pub name: String,
    /// State flags
    pub flags: LayerFlags,
    /// Layer color; negative palette index means the layer is off
    pub color: Color,
    /// Default line weight for entities on this layer
    pub line_weight: LineWeight,
    /// Linetype reference (hard pointer)
    pub linetype: HandleRef,
    /// Plot style reference (AC1015+)
    pub plot_style: HandleRef,
    /// Material reference (AC1021+)
    pub material: HandleRef,
    /// Whether entities on this layer are plotted
    pub plot: bool,
    /// Whether the layer is displayed
    pub is_on: bool,
}

impl Layer {
    /// Create a named layer with defaults
    pub fn new(name: impl Into<String>) -> Self {
        Layer {
            name: name.into(),
            flags: LayerFlags::empty(),
            color: Color::WHITE,
            line_weight: LineWeight::Default,
            linetype: HandleRef::NONE,
            plot_style: HandleRef::NONE,
            material: HandleRef::NONE,
            plot: true,
            is_on: true,
        }
    }

    /// The default layer "0" every document carries
    pub fn layer_zero() -> Self {
        Layer::new("0")
    }

    /// Whether the layer is frozen
    pub fn is_frozen(&self) -> bool {
        self.flags.contains(LayerFlags::FROZEN)
    }

    /// Whether the layer is locked
    pub fn is_locked(&self) -> bool {
        self.flags.contains(LayerFlags::LOCKED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_zero() {
        let l = Layer::layer_zero();
        assert_eq!(l.name, "0");
        assert!(l.is_on);
        assert!(!l.is_frozen());
    }

    #[test]
    fn test_flags() {
        let mut l = Layer::new("WALLS");
        l.flags |= LayerFlags::LOCKED;
        assert!(l.is_locked());
        assert!(!l.is_frozen());
    }
}
