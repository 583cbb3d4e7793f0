//! Record kinds, the common record envelope, and the tagged record type.
//!
//! Some record kinds have fixed numeric type codes in the drawing format;
//! class-based (custom) kinds use class numbers above 0x1F3 and are mapped
//! to [`RecordKind::Unlisted`] here. Every record, entity or object, carries
//! the same [`Envelope`] header regardless of concrete variant.

use crate::entities::EntityData;
use crate::objects::ObjectData;
use crate::reference::HandleRef;
use crate::tables::TableKind;
use crate::types::Handle;
use crate::xdata::XData;

/// Fixed record type codes.
///
/// These are the numeric type identifiers of the drawing format's object
/// space. Codes above the fixed range are class-based and reported as
/// `Unlisted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i16)]
pub enum RecordKind {
    Unlisted = -999,
    Text = 1,
    Attrib = 2,
    AttDef = 3,
    BlockBegin = 4,
    BlockEnd = 5,
    Seqend = 6,
    Insert = 7,
    MInsert = 8,
    Vertex2D = 0x0A,
    Vertex3D = 0x0B,
    VertexMesh = 0x0C,
    VertexPface = 0x0D,
    VertexPfaceFace = 0x0E,
    Polyline2D = 0x0F,
    Polyline3D = 0x10,
    Arc = 0x11,
    Circle = 0x12,
    Line = 0x13,
    DimensionOrdinate = 0x14,
    DimensionLinear = 0x15,
    DimensionAligned = 0x16,
    DimensionAng3Pt = 0x17,
    DimensionAng2Ln = 0x18,
    DimensionRadius = 0x19,
    DimensionDiameter = 0x1A,
    Point = 0x1B,
    Face3D = 0x1C,
    PolylinePface = 0x1D,
    PolylineMesh = 0x1E,
    Solid = 0x1F,
    Trace = 0x20,
    Shape = 0x21,
    Viewport = 0x22,
    Ellipse = 0x23,
    Spline = 0x24,
    Region = 0x25,
    Solid3D = 0x26,
    Body = 0x27,
    Ray = 0x28,
    XLine = 0x29,
    Dictionary = 0x2A,
    OleFrame = 0x2B,
    MText = 0x2C,
    Leader = 0x2D,
    Tolerance = 0x2E,
    MLine = 0x2F,
    BlockControl = 0x30,
    BlockHeader = 0x31,
    LayerControl = 0x32,
    Layer = 0x33,
    StyleControl = 0x34,
    Style = 0x35,
    LtypeControl = 0x38,
    Ltype = 0x39,
    ViewControl = 0x3C,
    View = 0x3D,
    UcsControl = 0x3E,
    Ucs = 0x3F,
    VportControl = 0x40,
    Vport = 0x41,
    AppidControl = 0x42,
    Appid = 0x43,
    DimstyleControl = 0x44,
    Dimstyle = 0x45,
    Group = 0x48,
    MlineStyle = 0x49,
    Ole2Frame = 0x4A,
    LwPolyline = 0x4D,
    Hatch = 0x4E,
    XRecord = 0x4F,
    Placeholder = 0x50,
    Layout = 0x52,
    ProxyEntity = 0x1F2,
    ProxyObject = 0x1F3,
}

impl RecordKind {
    /// Raw numeric type code.
    pub fn raw(&self) -> i16 {
        *self as i16
    }

    /// Create a `RecordKind` from a raw numeric code.
    ///
    /// Unknown codes (class-based records) map to `Unlisted`.
    pub fn from_raw(value: i16) -> Self {
        match value {
            1 => Self::Text,
            2 => Self::Attrib,
            3 => Self::AttDef,
            4 => Self::BlockBegin,
            5 => Self::BlockEnd,
            6 => Self::Seqend,
            7 => Self::Insert,
            8 => Self::MInsert,
            0x0A => Self::Vertex2D,
            0x0B => Self::Vertex3D,
            0x0C => Self::VertexMesh,
            0x0D => Self::VertexPface,
            0x0E => Self::VertexPfaceFace,
            0x0F => Self::Polyline2D,
            0x10 => Self::Polyline3D,
            0x11 => Self::Arc,
            0x12 => Self::Circle,
            0x13 => Self::Line,
            0x14 => Self::DimensionOrdinate,
            0x15 => Self::DimensionLinear,
            0x16 => Self::DimensionAligned,
            0x17 => Self::DimensionAng3Pt,
            0x18 => Self::DimensionAng2Ln,
            0x19 => Self::DimensionRadius,
            0x1A => Self::DimensionDiameter,
            0x1B => Self::Point,
            0x1C => Self::Face3D,
            0x1D => Self::PolylinePface,
            0x1E => Self::PolylineMesh,
            0x1F => Self::Solid,
            0x20 => Self::Trace,
            0x21 => Self::Shape,
            0x22 => Self::Viewport,
            0x23 => Self::Ellipse,
            0x24 => Self::Spline,
            0x25 => Self::Region,
            0x26 => Self::Solid3D,
            0x27 => Self::Body,
            0x28 => Self::Ray,
            0x29 => Self::XLine,
            0x2A => Self::Dictionary,
            0x2B => Self::OleFrame,
            0x2C => Self::MText,
            0x2D => Self::Leader,
            0x2E => Self::Tolerance,
            0x2F => Self::MLine,
            0x30 => Self::BlockControl,
            0x31 => Self::BlockHeader,
            0x32 => Self::LayerControl,
            0x33 => Self::Layer,
            0x34 => Self::StyleControl,
            0x35 => Self::Style,
            0x38 => Self::LtypeControl,
            0x39 => Self::Ltype,
            0x3C => Self::ViewControl,
            0x3D => Self::View,
            0x3E => Self::UcsControl,
            0x3F => Self::Ucs,
            0x40 => Self::VportControl,
            0x41 => Self::Vport,
            0x42 => Self::AppidControl,
            0x43 => Self::Appid,
            0x44 => Self::DimstyleControl,
            0x45 => Self::Dimstyle,
            0x48 => Self::Group,
            0x49 => Self::MlineStyle,
            0x4A => Self::Ole2Frame,
            0x4D => Self::LwPolyline,
            0x4E => Self::Hatch,
            0x4F => Self::XRecord,
            0x50 => Self::Placeholder,
            0x52 => Self::Layout,
            0x1F2 => Self::ProxyEntity,
            0x1F3 => Self::ProxyObject,
            _ => Self::Unlisted,
        }
    }

    /// Textual type name, as used by the field schema and the class table.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Unlisted => "UNLISTED",
            Self::Text => "TEXT",
            Self::Attrib => "ATTRIB",
            Self::AttDef => "ATTDEF",
            Self::BlockBegin => "BLOCK",
            Self::BlockEnd => "ENDBLK",
            Self::Seqend => "SEQEND",
            Self::Insert => "INSERT",
            Self::MInsert => "MINSERT",
            Self::Vertex2D => "VERTEX_2D",
            Self::Vertex3D => "VERTEX_3D",
            Self::VertexMesh => "VERTEX_MESH",
            Self::VertexPface => "VERTEX_PFACE",
            Self::VertexPfaceFace => "VERTEX_PFACE_FACE",
            Self::Polyline2D => "POLYLINE_2D",
            Self::Polyline3D => "POLYLINE_3D",
            Self::Arc => "ARC",
            Self::Circle => "CIRCLE",
            Self::Line => "LINE",
            Self::DimensionOrdinate => "DIMENSION_ORDINATE",
            Self::DimensionLinear => "DIMENSION_LINEAR",
            Self::DimensionAligned => "DIMENSION_ALIGNED",
            Self::DimensionAng3Pt => "DIMENSION_ANG3PT",
            Self::DimensionAng2Ln => "DIMENSION_ANG2LN",
            Self::DimensionRadius => "DIMENSION_RADIUS",
            Self::DimensionDiameter => "DIMENSION_DIAMETER",
            Self::Point => "POINT",
            Self::Face3D => "3DFACE",
            Self::PolylinePface => "POLYLINE_PFACE",
            Self::PolylineMesh => "POLYLINE_MESH",
            Self::Solid => "SOLID",
            Self::Trace => "TRACE",
            Self::Shape => "SHAPE",
            Self::Viewport => "VIEWPORT",
            Self::Ellipse => "ELLIPSE",
            Self::Spline => "SPLINE",
            Self::Region => "REGION",
            Self::Solid3D => "3DSOLID",
            Self::Body => "BODY",
            Self::Ray => "RAY",
            Self::XLine => "XLINE",
            Self::Dictionary => "DICTIONARY",
            Self::OleFrame => "OLEFRAME",
            Self::MText => "MTEXT",
            Self::Leader => "LEADER",
            Self::Tolerance => "TOLERANCE",
            Self::MLine => "MLINE",
            Self::BlockControl => "BLOCK_CONTROL",
            Self::BlockHeader => "BLOCK_HEADER",
            Self::LayerControl => "LAYER_CONTROL",
            Self::Layer => "LAYER",
            Self::StyleControl => "STYLE_CONTROL",
            Self::Style => "STYLE",
            Self::LtypeControl => "LTYPE_CONTROL",
            Self::Ltype => "LTYPE",
            Self::ViewControl => "VIEW_CONTROL",
            Self::View => "VIEW",
            Self::UcsControl => "UCS_CONTROL",
            Self::Ucs => "UCS",
            Self::VportControl => "VPORT_CONTROL",
            Self::Vport => "VPORT",
            Self::AppidControl => "APPID_CONTROL",
            Self::Appid => "APPID",
            Self::DimstyleControl => "DIMSTYLE_CONTROL",
            Self::Dimstyle => "DIMSTYLE",
            Self::Group => "GROUP",
            Self::MlineStyle => "MLINESTYLE",
            Self::Ole2Frame => "OLE2FRAME",
            Self::LwPolyline => "LWPOLYLINE",
            Self::Hatch => "HATCH",
            Self::XRecord => "XRECORD",
            Self::Placeholder => "ACDBPLACEHOLDER",
            Self::Layout => "LAYOUT",
            Self::ProxyEntity => "ACAD_PROXY_ENTITY",
            Self::ProxyObject => "ACAD_PROXY_OBJECT",
        }
    }

    /// All kinds of the fixed-code table, in code order.
    const FIXED: [RecordKind; 73] = [
        Self::Text,
        Self::Attrib,
        Self::AttDef,
        Self::BlockBegin,
        Self::BlockEnd,
        Self::Seqend,
        Self::Insert,
        Self::MInsert,
        Self::Vertex2D,
        Self::Vertex3D,
        Self::VertexMesh,
        Self::VertexPface,
        Self::VertexPfaceFace,
        Self::Polyline2D,
        Self::Polyline3D,
        Self::Arc,
        Self::Circle,
        Self::Line,
        Self::DimensionOrdinate,
        Self::DimensionLinear,
        Self::DimensionAligned,
        Self::DimensionAng3Pt,
        Self::DimensionAng2Ln,
        Self::DimensionRadius,
        Self::DimensionDiameter,
        Self::Point,
        Self::Face3D,
        Self::PolylinePface,
        Self::PolylineMesh,
        Self::Solid,
        Self::Trace,
        Self::Shape,
        Self::Viewport,
        Self::Ellipse,
        Self::Spline,
        Self::Region,
        Self::Solid3D,
        Self::Body,
        Self::Ray,
        Self::XLine,
        Self::Dictionary,
        Self::OleFrame,
        Self::MText,
        Self::Leader,
        Self::Tolerance,
        Self::MLine,
        Self::BlockControl,
        Self::BlockHeader,
        Self::LayerControl,
        Self::Layer,
        Self::StyleControl,
        Self::Style,
        Self::LtypeControl,
        Self::Ltype,
        Self::ViewControl,
        Self::View,
        Self::UcsControl,
        Self::Ucs,
        Self::VportControl,
        Self::Vport,
        Self::AppidControl,
        Self::Appid,
        Self::DimstyleControl,
        Self::Dimstyle,
        Self::Group,
        Self::MlineStyle,
        Self::Ole2Frame,
        Self::LwPolyline,
        Self::Hatch,
        Self::XRecord,
        Self::Placeholder,
        Self::Layout,
        Self::ProxyEntity,
    ];

    /// Look a kind up by its textual type name.
    ///
    /// Class-based (custom) names are not in the fixed table and return
    /// `None`; resolving those is the class registry's job.
    pub fn from_type_name(name: &str) -> Option<Self> {
        if name == Self::ProxyObject.type_name() {
            return Some(Self::ProxyObject);
        }
        Self::FIXED.iter().copied().find(|k| k.type_name() == name)
    }

    /// Whether records of this kind are drawable entities participating in
    /// structural sibling chains.
    pub fn is_entity(&self) -> bool {
        let code = self.raw();
        ((1..=0x2F).contains(&code) && *self != Self::Dictionary)
            || matches!(
                self,
                Self::Ole2Frame | Self::LwPolyline | Self::Hatch | Self::ProxyEntity
            )
    }

    /// Whether this kind is a singleton table control record.
    pub fn is_control(&self) -> bool {
        matches!(
            self,
            Self::BlockControl
                | Self::LayerControl
                | Self::StyleControl
                | Self::LtypeControl
                | Self::ViewControl
                | Self::UcsControl
                | Self::VportControl
                | Self::AppidControl
                | Self::DimstyleControl
        )
    }

    /// Whether this kind is a named table record owned by a control.
    pub fn is_table_record(&self) -> bool {
        self.table_kind().is_some()
    }

    /// Whether records of this kind own a sibling chain of entities.
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            Self::BlockHeader
                | Self::Polyline2D
                | Self::Polyline3D
                | Self::PolylineMesh
                | Self::PolylinePface
                | Self::Insert
                | Self::MInsert
        )
    }

    /// The named table a record of this kind belongs to, if any.
    pub fn table_kind(&self) -> Option<TableKind> {
        match self {
            Self::BlockHeader => Some(TableKind::Block),
            Self::Layer => Some(TableKind::Layer),
            Self::Style => Some(TableKind::Style),
            Self::Ltype => Some(TableKind::Ltype),
            Self::View => Some(TableKind::View),
            Self::Ucs => Some(TableKind::Ucs),
            Self::Vport => Some(TableKind::Vport),
            Self::Appid => Some(TableKind::Appid),
            Self::Dimstyle => Some(TableKind::Dimstyle),
            _ => None,
        }
    }

    /// The named table a control record of this kind governs, if any.
    pub fn controlled_table(&self) -> Option<TableKind> {
        match self {
            Self::BlockControl => Some(TableKind::Block),
            Self::LayerControl => Some(TableKind::Layer),
            Self::StyleControl => Some(TableKind::Style),
            Self::LtypeControl => Some(TableKind::Ltype),
            Self::ViewControl => Some(TableKind::View),
            Self::UcsControl => Some(TableKind::Ucs),
            Self::VportControl => Some(TableKind::Vport),
            Self::AppidControl => Some(TableKind::Appid),
            Self::DimstyleControl => Some(TableKind::Dimstyle),
            _ => None,
        }
    }
}

/// Common header carried by every record regardless of concrete variant.
#[derive(Debug, Clone, Default)]
pub struct Envelope {
    /// Owner reference; unresolved only for the document's designated roots
    pub owner: HandleRef,
    /// Persistent reactor references
    pub reactors: Vec<HandleRef>,
    /// Optional hard-owned extension dictionary
    pub xdict: Option<HandleRef>,
    /// Extended data attached by applications
    pub xdata: XData,
}

impl Envelope {
    /// An envelope with no owner assigned yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// An envelope owned by `owner`.
    pub fn owned_by(owner: HandleRef) -> Self {
        Envelope {
            owner,
            ..Self::default()
        }
    }
}

/// Concrete record payload, split by supertype.
#[derive(Debug, Clone)]
pub enum RecordData {
    /// Drawable entity participating in sibling chains
    Entity(EntityData),
    /// Non-drawable object (tables, dictionaries, controls)
    Object(ObjectData),
}

impl RecordData {
    /// Concrete record kind of this payload.
    pub fn kind(&self) -> RecordKind {
        match self {
            RecordData::Entity(e) => e.kind(),
            RecordData::Object(o) => o.kind(),
        }
    }
}

/// A record in the document graph: stable handle, envelope, typed payload.
#[derive(Debug, Clone)]
pub struct Record {
    /// Unique handle within the document
    pub handle: Handle,
    /// Common header
    pub envelope: Envelope,
    /// Concrete payload
    pub data: RecordData,
}

impl Record {
    /// Create a record from its parts.
    pub fn new(handle: Handle, envelope: Envelope, data: RecordData) -> Self {
        Record {
            handle,
            envelope,
            data,
        }
    }

    /// Concrete record kind.
    pub fn kind(&self) -> RecordKind {
        self.data.kind()
    }

    /// Textual type name.
    pub fn type_name(&self) -> &'static str {
        self.kind().type_name()
    }

    /// Whether this record is a drawable entity.
    pub fn is_entity(&self) -> bool {
        matches!(self.data, RecordData::Entity(_))
    }

    /// Entity payload, if this record is an entity.
    pub fn entity(&self) -> Option<&EntityData> {
        match &self.data {
            RecordData::Entity(e) => Some(e),
            RecordData::Object(_) => None,
        }
    }

    /// Mutable entity payload, if this record is an entity.
    pub fn entity_mut(&mut self) -> Option<&mut EntityData> {
        match &mut self.data {
            RecordData::Entity(e) => Some(e),
            RecordData::Object(_) => None,
        }
    }

    /// Object payload, if this record is a non-entity object.
    pub fn object(&self) -> Option<&ObjectData> {
        match &self.data {
            RecordData::Object(o) => Some(o),
            RecordData::Entity(_) => None,
        }
    }

    /// Mutable object payload, if this record is a non-entity object.
    pub fn object_mut(&mut self) -> Option<&mut ObjectData> {
        match &mut self.data {
            RecordData::Object(o) => Some(o),
            RecordData::Entity(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_fixed_codes() {
        assert_eq!(RecordKind::from_raw(0x12), RecordKind::Circle);
        assert_eq!(RecordKind::from_raw(6), RecordKind::Seqend);
        assert_eq!(RecordKind::from_raw(0x2A), RecordKind::Dictionary);
        // class-based codes are not in the fixed table
        assert_eq!(RecordKind::from_raw(0x1F8), RecordKind::Unlisted);
        assert_eq!(RecordKind::from_raw(0x36), RecordKind::Unlisted);
    }

    #[test]
    fn test_raw_roundtrip() {
        for kind in [
            RecordKind::Text,
            RecordKind::Vertex2D,
            RecordKind::Polyline2D,
            RecordKind::BlockHeader,
            RecordKind::Dimstyle,
            RecordKind::Layout,
        ] {
            assert_eq!(RecordKind::from_raw(kind.raw()), kind);
        }
    }

    #[test]
    fn test_entity_object_split() {
        assert!(RecordKind::Circle.is_entity());
        assert!(RecordKind::Seqend.is_entity());
        assert!(RecordKind::MLine.is_entity());
        assert!(RecordKind::LwPolyline.is_entity());
        assert!(!RecordKind::Dictionary.is_entity());
        assert!(!RecordKind::Layer.is_entity());
        assert!(!RecordKind::BlockControl.is_entity());
    }

    #[test]
    fn test_control_pairing() {
        assert!(RecordKind::LayerControl.is_control());
        assert_eq!(
            RecordKind::LayerControl.controlled_table(),
            RecordKind::Layer.table_kind()
        );
        assert_eq!(
            RecordKind::BlockControl.controlled_table(),
            RecordKind::BlockHeader.table_kind()
        );
        assert!(!RecordKind::Layer.is_control());
    }

    #[test]
    fn test_containers() {
        assert!(RecordKind::Polyline2D.is_container());
        assert!(RecordKind::BlockHeader.is_container());
        assert!(RecordKind::Insert.is_container());
        assert!(!RecordKind::Circle.is_container());
    }

    #[test]
    fn test_type_names() {
        assert_eq!(RecordKind::Circle.type_name(), "CIRCLE");
        assert_eq!(RecordKind::BlockHeader.type_name(), "BLOCK_HEADER");
        assert_eq!(RecordKind::Vertex2D.type_name(), "VERTEX_2D");
    }

    #[test]
    fn test_from_type_name() {
        assert_eq!(RecordKind::from_type_name("CIRCLE"), Some(RecordKind::Circle));
        assert_eq!(
            RecordKind::from_type_name("LAYER_CONTROL"),
            Some(RecordKind::LayerControl)
        );
        assert_eq!(
            RecordKind::from_type_name("ACAD_PROXY_OBJECT"),
            Some(RecordKind::ProxyObject)
        );
        assert_eq!(RecordKind::from_type_name("ACDBASSOCNETWORK"), None);

        // every fixed kind roundtrips through its name
        for kind in RecordKind::FIXED {
            assert_eq!(RecordKind::from_type_name(kind.type_name()), Some(kind));
        }
    }
}
