//! Entity record payloads.
//!
//! Entities are the drawable record kinds. Beyond the envelope every
//! record carries, an entity has display references (layer, linetype,
//! material, plot style), a color, and the previous/next sibling handles
//! that link it into its container's structural chain.

use crate::record::RecordKind;
use crate::reference::HandleRef;
use crate::types::{Color, Handle, LineWeight};

pub mod arc;
pub mod attrib;
pub mod block;
pub mod circle;
pub mod insert;
pub mod line;
pub mod point;
pub mod polyline;
pub mod seqend;
pub mod text;
pub mod vertex;

pub use arc::Arc;
pub use attrib::{AttDef, Attrib, AttribFlags};
pub use block::{BlockBegin, BlockEnd};
pub use circle::Circle;
pub use insert::Insert;
pub use line::Line;
pub use point::Point;
pub use polyline::{Polyline2D, Polyline3D, PolylineFlags};
pub use seqend::Seqend;
pub use text::Text;
pub use vertex::{Vertex2D, Vertex3D, VertexFlags};

/// Common entity data shared by all entity variants.
#[derive(Debug, Clone)]
pub struct EntityCommon {
    /// Layer reference (hard pointer)
    pub layer: HandleRef,
    /// Linetype reference; unset means ByLayer
    pub linetype: HandleRef,
    /// Material reference; only populated at AC1021 and above
    pub material: HandleRef,
    /// Plot style reference; only populated at AC1015 and above
    pub plot_style: HandleRef,
    /// Entity color
    pub color: Color,
    /// Plotted line weight
    pub line_weight: LineWeight,
    /// Linetype pattern scale
    pub linetype_scale: f64,
    /// Visibility flag
    pub invisible: bool,
    /// Previous sibling in the owning container's chain
    pub prev: Option<Handle>,
    /// Next sibling in the owning container's chain
    pub next: Option<Handle>,
}

impl EntityCommon {
    /// Create common entity data with defaults and no sibling links.
    pub fn new() -> Self {
        EntityCommon {
            layer: HandleRef::NONE,
            linetype: HandleRef::NONE,
            material: HandleRef::NONE,
            plot_style: HandleRef::NONE,
            color: Color::ByLayer,
            line_weight: LineWeight::ByLayer,
            linetype_scale: 1.0,
            invisible: false,
            prev: None,
            next: None,
        }
    }

    /// Create common data already pointing at a layer.
    pub fn on_layer(layer: HandleRef) -> Self {
        EntityCommon {
            layer,
            ..Self::new()
        }
    }
}

impl Default for EntityCommon {
    fn default() -> Self {
        Self::new()
    }
}

/// Concrete entity payloads behind the closed record discriminant.
#[derive(Debug, Clone)]
pub enum EntityData {
    /// Point entity
    Point(Point),
    /// Line entity
    Line(Line),
    /// Circle entity
    Circle(Circle),
    /// Arc entity
    Arc(Arc),
    /// Single-line text entity
    Text(Text),
    /// 2D polyline vertex
    Vertex2D(Vertex2D),
    /// 3D polyline vertex
    Vertex3D(Vertex3D),
    /// Heavy 2D polyline (vertex container)
    Polyline2D(Polyline2D),
    /// 3D polyline (vertex container)
    Polyline3D(Polyline3D),
    /// Block reference (attribute container)
    Insert(Insert),
    /// Block attribute instance
    Attrib(Attrib),
    /// Block attribute definition
    AttDef(AttDef),
    /// Synthetic block-open bracket entity
    BlockBegin(BlockBegin),
    /// Synthetic block-close bracket entity
    BlockEnd(BlockEnd),
    /// End-of-sequence terminator
    Seqend(Seqend),
}

impl EntityData {
    /// Concrete record kind of this entity.
    pub fn kind(&self) -> RecordKind {
        match self {
            EntityData::Point(_) => RecordKind::Point,
            EntityData::Line(_) => RecordKind::Line,
            EntityData::Circle(_) => RecordKind::Circle,
            EntityData::Arc(_) => RecordKind::Arc,
            EntityData::Text(_) => RecordKind::Text,
            EntityData::Vertex2D(_) => RecordKind::Vertex2D,
            EntityData::Vertex3D(_) => RecordKind::Vertex3D,
            EntityData::Polyline2D(_) => RecordKind::Polyline2D,
            EntityData::Polyline3D(_) => RecordKind::Polyline3D,
            EntityData::Insert(_) => RecordKind::Insert,
            EntityData::Attrib(_) => RecordKind::Attrib,
            EntityData::AttDef(_) => RecordKind::AttDef,
            EntityData::BlockBegin(_) => RecordKind::BlockBegin,
            EntityData::BlockEnd(_) => RecordKind::BlockEnd,
            EntityData::Seqend(_) => RecordKind::Seqend,
        }
    }

    /// Shared entity header.
    pub fn common(&self) -> &EntityCommon {
        match self {
            EntityData::Point(e) => &e.common,
            EntityData::Line(e) => &e.common,
            EntityData::Circle(e) => &e.common,
            EntityData::Arc(e) => &e.common,
            EntityData::Text(e) => &e.common,
            EntityData::Vertex2D(e) => &e.common,
            EntityData::Vertex3D(e) => &e.common,
            EntityData::Polyline2D(e) => &e.common,
            EntityData::Polyline3D(e) => &e.common,
            EntityData::Insert(e) => &e.common,
            EntityData::Attrib(e) => &e.common,
            EntityData::AttDef(e) => &e.common,
            EntityData::BlockBegin(e) => &e.common,
            EntityData::BlockEnd(e) => &e.common,
            EntityData::Seqend(e) => &e.common,
        }
    }

    /// Mutable shared entity header.
    pub fn common_mut(&mut self) -> &mut EntityCommon {
        match self {
            EntityData::Point(e) => &mut e.common,
            EntityData::Line(e) => &mut e.common,
            EntityData::Circle(e) => &mut e.common,
            EntityData::Arc(e) => &mut e.common,
            EntityData::Text(e) => &mut e.common,
            EntityData::Vertex2D(e) => &mut e.common,
            EntityData::Vertex3D(e) => &mut e.common,
            EntityData::Polyline2D(e) => &mut e.common,
            EntityData::Polyline3D(e) => &mut e.common,
            EntityData::Insert(e) => &mut e.common,
            EntityData::Attrib(e) => &mut e.common,
            EntityData::AttDef(e) => &mut e.common,
            EntityData::BlockBegin(e) => &mut e.common,
            EntityData::BlockEnd(e) => &mut e.common,
            EntityData::Seqend(e) => &mut e.common,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Vector3;

    #[test]
    fn test_kind_dispatch() {
        let e = EntityData::Circle(Circle::from_center_radius(Vector3::ZERO, 2.0));
        assert_eq!(e.kind(), RecordKind::Circle);
        let e = EntityData::Seqend(Seqend::new());
        assert_eq!(e.kind(), RecordKind::Seqend);
    }

    #[test]
    fn test_common_dispatch() {
        let mut e = EntityData::Line(Line::new());
        assert!(e.common().prev.is_none());
        e.common_mut().prev = Some(Handle::new(0x42));
        assert_eq!(e.common().prev, Some(Handle::new(0x42)));
    }
}
