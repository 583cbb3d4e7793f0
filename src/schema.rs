//! Field schema: declared storage kinds, kind families, and the load-time
//! descriptor table.
//!
//! The schema is the external metadata the generic accessor validates
//! against. Each entry maps (record type name, field name) to a declared
//! storage kind and a pair of accessor functions over the concrete record
//! variant. The facade in [`crate::access`] never invents this metadata;
//! it only validates and dispatches through it.

use crate::entities::EntityData;
use crate::record::{Record, RecordData};
use crate::objects::ObjectData;
use crate::types::{Vector2, Vector3};
use ahash::AHashMap;
use indexmap::IndexMap;
use once_cell::sync::Lazy;

/// Kind family recognized by the accessor facade.
///
/// Each declared storage kind belongs to exactly one family; callers ask
/// for a family and the facade checks the declaration against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KindFamily {
    /// 2D point
    Point2,
    /// 3D point
    Point3,
    /// Text
    Text,
    /// Floating-point number
    Real,
    /// 16-bit integer
    Int16,
    /// 32-bit integer
    Int32,
}

/// Declared storage kind of a field, as the schema records it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKind {
    /// Two raw doubles
    RawDouble2,
    /// 2D point
    Point2,
    /// 3D point
    Point3,
    /// Three raw doubles
    RawDouble3,
    /// Extended-precision ("big") point encoding
    BigPoint,
    /// Single-byte text
    TextByte,
    /// Variable text in the drawing code page
    TextVariable,
    /// Wide (unicode) text
    TextUnicode,
    /// Single-width float
    FloatSingle,
    /// Double-width float
    FloatDouble,
    /// 16-bit integer
    Int16,
    /// 32-bit integer
    Int32,
    /// Modeler-space 32-bit integer
    Int32Modeler,
}

impl StorageKind {
    /// The kind family this storage belongs to.
    pub fn family(&self) -> KindFamily {
        match self {
            StorageKind::RawDouble2 | StorageKind::Point2 => KindFamily::Point2,
            StorageKind::Point3 | StorageKind::RawDouble3 | StorageKind::BigPoint => {
                KindFamily::Point3
            }
            StorageKind::TextByte | StorageKind::TextVariable | StorageKind::TextUnicode => {
                KindFamily::Text
            }
            StorageKind::FloatSingle | StorageKind::FloatDouble => KindFamily::Real,
            StorageKind::Int16 => KindFamily::Int16,
            StorageKind::Int32 | StorageKind::Int32Modeler => KindFamily::Int32,
        }
    }
}

/// A runtime field value, tagged by kind family.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// 2D point
    Point2(Vector2),
    /// 3D point
    Point3(Vector3),
    /// Owned text
    Text(String),
    /// Real number
    Real(f64),
    /// 16-bit integer
    Int16(i16),
    /// 32-bit integer
    Int32(i32),
}

impl FieldValue {
    /// The family of this value.
    pub fn family(&self) -> KindFamily {
        match self {
            FieldValue::Point2(_) => KindFamily::Point2,
            FieldValue::Point3(_) => KindFamily::Point3,
            FieldValue::Text(_) => KindFamily::Text,
            FieldValue::Real(_) => KindFamily::Real,
            FieldValue::Int16(_) => KindFamily::Int16,
            FieldValue::Int32(_) => KindFamily::Int32,
        }
    }
}

type Getter = fn(&Record) -> Option<FieldValue>;
type Setter = fn(&mut Record, &FieldValue) -> bool;

/// Schema entry for one field of one record kind.
pub struct FieldDescriptor {
    /// Field name
    pub name: &'static str,
    /// Declared storage kind
    pub storage: StorageKind,
    pub(crate) get: Getter,
    pub(crate) set: Setter,
}

impl std::fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("storage", &self.storage)
            .finish()
    }
}

/// The field schema: record type name → field name → descriptor.
///
/// The per-type tables keep declaration order, so field listings come
/// out the way the schema declares them.
pub struct Schema {
    fields: AHashMap<&'static str, IndexMap<&'static str, FieldDescriptor>>,
}

impl Schema {
    fn register(
        &mut self,
        type_name: &'static str,
        name: &'static str,
        storage: StorageKind,
        get: Getter,
        set: Setter,
    ) {
        self.fields
            .entry(type_name)
            .or_insert_with(IndexMap::new)
            .insert(
                name,
                FieldDescriptor {
                    name,
                    storage,
                    get,
                    set,
                },
            );
    }

    /// Descriptor of a field for a record type, if declared.
    pub fn descriptor(&self, type_name: &str, field: &str) -> Option<&FieldDescriptor> {
        self.fields.get(type_name)?.get(field)
    }

    /// Names of the declared fields of a record type, in declaration order.
    pub fn field_names(&self, type_name: &str) -> Vec<&'static str> {
        self.fields
            .get(type_name)
            .map(|m| m.keys().copied().collect())
            .unwrap_or_default()
    }

    fn builtin() -> Self {
        let mut s = Schema {
            fields: AHashMap::new(),
        };

        // POINT
        s.register(
            "POINT",
            "location",
            StorageKind::Point3,
            |r| match &r.data {
                RecordData::Entity(EntityData::Point(e)) => Some(FieldValue::Point3(e.location)),
                _ => None,
            },
            |r, v| match (&mut r.data, v) {
                (RecordData::Entity(EntityData::Point(e)), FieldValue::Point3(p)) => {
                    e.location = *p;
                    true
                }
                _ => false,
            },
        );
        s.register(
            "POINT",
            "thickness",
            StorageKind::FloatDouble,
            |r| match &r.data {
                RecordData::Entity(EntityData::Point(e)) => Some(FieldValue::Real(e.thickness)),
                _ => None,
            },
            |r, v| match (&mut r.data, v) {
                (RecordData::Entity(EntityData::Point(e)), FieldValue::Real(x)) => {
                    e.thickness = *x;
                    true
                }
                _ => false,
            },
        );

        // LINE
        s.register(
            "LINE",
            "start_point",
            StorageKind::RawDouble3,
            |r| match &r.data {
                RecordData::Entity(EntityData::Line(e)) => Some(FieldValue::Point3(e.start)),
                _ => None,
            },
            |r, v| match (&mut r.data, v) {
                (RecordData::Entity(EntityData::Line(e)), FieldValue::Point3(p)) => {
                    e.start = *p;
                    true
                }
                _ => false,
            },
        );
        s.register(
            "LINE",
            "end_point",
            StorageKind::RawDouble3,
            |r| match &r.data {
                RecordData::Entity(EntityData::Line(e)) => Some(FieldValue::Point3(e.end)),
                _ => None,
            },
            |r, v| match (&mut r.data, v) {
                (RecordData::Entity(EntityData::Line(e)), FieldValue::Point3(p)) => {
                    e.end = *p;
                    true
                }
                _ => false,
            },
        );

        // CIRCLE
        s.register(
            "CIRCLE",
            "center",
            StorageKind::Point3,
            |r| match &r.data {
                RecordData::Entity(EntityData::Circle(e)) => Some(FieldValue::Point3(e.center)),
                _ => None,
            },
            |r, v| match (&mut r.data, v) {
                (RecordData::Entity(EntityData::Circle(e)), FieldValue::Point3(p)) => {
                    e.center = *p;
                    true
                }
                _ => false,
            },
        );
        s.register(
            "CIRCLE",
            "radius",
            StorageKind::FloatDouble,
            |r| match &r.data {
                RecordData::Entity(EntityData::Circle(e)) => Some(FieldValue::Real(e.radius)),
                _ => None,
            },
            |r, v| match (&mut r.data, v) {
                (RecordData::Entity(EntityData::Circle(e)), FieldValue::Real(x)) => {
                    e.radius = *x;
                    true
                }
                _ => false,
            },
        );
        s.register(
            "CIRCLE",
            "thickness",
            StorageKind::FloatDouble,
            |r| match &r.data {
                RecordData::Entity(EntityData::Circle(e)) => Some(FieldValue::Real(e.thickness)),
                _ => None,
            },
            |r, v| match (&mut r.data, v) {
                (RecordData::Entity(EntityData::Circle(e)), FieldValue::Real(x)) => {
                    e.thickness = *x;
                    true
                }
                _ => false,
            },
        );

        // ARC
        s.register(
            "ARC",
            "center",
            StorageKind::Point3,
            |r| match &r.data {
                RecordData::Entity(EntityData::Arc(e)) => Some(FieldValue::Point3(e.center)),
                _ => None,
            },
            |r, v| match (&mut r.data, v) {
                (RecordData::Entity(EntityData::Arc(e)), FieldValue::Point3(p)) => {
                    e.center = *p;
                    true
                }
                _ => false,
            },
        );
        s.register(
            "ARC",
            "radius",
            StorageKind::FloatDouble,
            |r| match &r.data {
                RecordData::Entity(EntityData::Arc(e)) => Some(FieldValue::Real(e.radius)),
                _ => None,
            },
            |r, v| match (&mut r.data, v) {
                (RecordData::Entity(EntityData::Arc(e)), FieldValue::Real(x)) => {
                    e.radius = *x;
                    true
                }
                _ => false,
            },
        );
        s.register(
            "ARC",
            "start_angle",
            StorageKind::FloatDouble,
            |r| match &r.data {
                RecordData::Entity(EntityData::Arc(e)) => Some(FieldValue::Real(e.start_angle)),
                _ => None,
            },
            |r, v| match (&mut r.data, v) {
                (RecordData::Entity(EntityData::Arc(e)), FieldValue::Real(x)) => {
                    e.start_angle = *x;
                    true
                }
                _ => false,
            },
        );
        s.register(
            "ARC",
            "end_angle",
            StorageKind::FloatDouble,
            |r| match &r.data {
                RecordData::Entity(EntityData::Arc(e)) => Some(FieldValue::Real(e.end_angle)),
                _ => None,
            },
            |r, v| match (&mut r.data, v) {
                (RecordData::Entity(EntityData::Arc(e)), FieldValue::Real(x)) => {
                    e.end_angle = *x;
                    true
                }
                _ => false,
            },
        );

        // TEXT - the insertion point is a 2D storage
        s.register(
            "TEXT",
            "insertion_point",
            StorageKind::RawDouble2,
            |r| match &r.data {
                RecordData::Entity(EntityData::Text(e)) => {
                    Some(FieldValue::Point2(e.insertion_point))
                }
                _ => None,
            },
            |r, v| match (&mut r.data, v) {
                (RecordData::Entity(EntityData::Text(e)), FieldValue::Point2(p)) => {
                    e.insertion_point = *p;
                    true
                }
                _ => false,
            },
        );
        s.register(
            "TEXT",
            "text_value",
            StorageKind::TextVariable,
            |r| match &r.data {
                RecordData::Entity(EntityData::Text(e)) => {
                    Some(FieldValue::Text(e.value.clone()))
                }
                _ => None,
            },
            |r, v| match (&mut r.data, v) {
                (RecordData::Entity(EntityData::Text(e)), FieldValue::Text(t)) => {
                    e.value = t.clone();
                    true
                }
                _ => false,
            },
        );
        s.register(
            "TEXT",
            "height",
            StorageKind::FloatDouble,
            |r| match &r.data {
                RecordData::Entity(EntityData::Text(e)) => Some(FieldValue::Real(e.height)),
                _ => None,
            },
            |r, v| match (&mut r.data, v) {
                (RecordData::Entity(EntityData::Text(e)), FieldValue::Real(x)) => {
                    e.height = *x;
                    true
                }
                _ => false,
            },
        );
        s.register(
            "TEXT",
            "generation",
            StorageKind::Int16,
            |r| match &r.data {
                RecordData::Entity(EntityData::Text(e)) => Some(FieldValue::Int16(e.generation)),
                _ => None,
            },
            |r, v| match (&mut r.data, v) {
                (RecordData::Entity(EntityData::Text(e)), FieldValue::Int16(x)) => {
                    e.generation = *x;
                    true
                }
                _ => false,
            },
        );

        // VERTEX_2D
        s.register(
            "VERTEX_2D",
            "location",
            StorageKind::Point3,
            |r| match &r.data {
                RecordData::Entity(EntityData::Vertex2D(e)) => {
                    Some(FieldValue::Point3(e.location))
                }
                _ => None,
            },
            |r, v| match (&mut r.data, v) {
                (RecordData::Entity(EntityData::Vertex2D(e)), FieldValue::Point3(p)) => {
                    e.location = *p;
                    true
                }
                _ => false,
            },
        );
        s.register(
            "VERTEX_2D",
            "bulge",
            StorageKind::FloatDouble,
            |r| match &r.data {
                RecordData::Entity(EntityData::Vertex2D(e)) => Some(FieldValue::Real(e.bulge)),
                _ => None,
            },
            |r, v| match (&mut r.data, v) {
                (RecordData::Entity(EntityData::Vertex2D(e)), FieldValue::Real(x)) => {
                    e.bulge = *x;
                    true
                }
                _ => false,
            },
        );
        s.register(
            "VERTEX_2D",
            "vertex_id",
            StorageKind::Int32Modeler,
            |r| match &r.data {
                RecordData::Entity(EntityData::Vertex2D(e)) => {
                    Some(FieldValue::Int32(e.vertex_id))
                }
                _ => None,
            },
            |r, v| match (&mut r.data, v) {
                (RecordData::Entity(EntityData::Vertex2D(e)), FieldValue::Int32(x)) => {
                    e.vertex_id = *x;
                    true
                }
                _ => false,
            },
        );

        // POLYLINE_2D
        s.register(
            "POLYLINE_2D",
            "flags",
            StorageKind::Int16,
            |r| match &r.data {
                RecordData::Entity(EntityData::Polyline2D(e)) => {
                    Some(FieldValue::Int16(e.flags.bits() as i16))
                }
                _ => None,
            },
            |r, v| match (&mut r.data, v) {
                (RecordData::Entity(EntityData::Polyline2D(e)), FieldValue::Int16(x)) => {
                    e.flags = crate::entities::PolylineFlags::from_bits_truncate(*x as u16);
                    true
                }
                _ => false,
            },
        );
        s.register(
            "POLYLINE_2D",
            "elevation",
            StorageKind::FloatDouble,
            |r| match &r.data {
                RecordData::Entity(EntityData::Polyline2D(e)) => {
                    Some(FieldValue::Real(e.elevation))
                }
                _ => None,
            },
            |r, v| match (&mut r.data, v) {
                (RecordData::Entity(EntityData::Polyline2D(e)), FieldValue::Real(x)) => {
                    e.elevation = *x;
                    true
                }
                _ => false,
            },
        );

        // INSERT
        s.register(
            "INSERT",
            "insertion_point",
            StorageKind::Point3,
            |r| match &r.data {
                RecordData::Entity(EntityData::Insert(e)) => {
                    Some(FieldValue::Point3(e.insertion_point))
                }
                _ => None,
            },
            |r, v| match (&mut r.data, v) {
                (RecordData::Entity(EntityData::Insert(e)), FieldValue::Point3(p)) => {
                    e.insertion_point = *p;
                    true
                }
                _ => false,
            },
        );
        s.register(
            "INSERT",
            "rotation",
            StorageKind::FloatDouble,
            |r| match &r.data {
                RecordData::Entity(EntityData::Insert(e)) => Some(FieldValue::Real(e.rotation)),
                _ => None,
            },
            |r, v| match (&mut r.data, v) {
                (RecordData::Entity(EntityData::Insert(e)), FieldValue::Real(x)) => {
                    e.rotation = *x;
                    true
                }
                _ => false,
            },
        );

        // ATTRIB
        s.register(
            "ATTRIB",
            "tag",
            StorageKind::TextVariable,
            |r| match &r.data {
                RecordData::Entity(EntityData::Attrib(e)) => {
                    Some(FieldValue::Text(e.tag.clone()))
                }
                _ => None,
            },
            |r, v| match (&mut r.data, v) {
                (RecordData::Entity(EntityData::Attrib(e)), FieldValue::Text(t)) => {
                    e.tag = t.clone();
                    true
                }
                _ => false,
            },
        );
        s.register(
            "ATTRIB",
            "text_value",
            StorageKind::TextVariable,
            |r| match &r.data {
                RecordData::Entity(EntityData::Attrib(e)) => {
                    Some(FieldValue::Text(e.value.clone()))
                }
                _ => None,
            },
            |r, v| match (&mut r.data, v) {
                (RecordData::Entity(EntityData::Attrib(e)), FieldValue::Text(t)) => {
                    e.value = t.clone();
                    true
                }
                _ => false,
            },
        );

        // Table record names
        s.register(
            "LAYER",
            "name",
            StorageKind::TextVariable,
            |r| match &r.data {
                RecordData::Object(ObjectData::Layer(l)) => Some(FieldValue::Text(l.name.clone())),
                _ => None,
            },
            |r, v| match (&mut r.data, v) {
                (RecordData::Object(ObjectData::Layer(l)), FieldValue::Text(t)) => {
                    l.name = t.clone();
                    true
                }
                _ => false,
            },
        );
        s.register(
            "LTYPE",
            "name",
            StorageKind::TextVariable,
            |r| match &r.data {
                RecordData::Object(ObjectData::LineType(l)) => {
                    Some(FieldValue::Text(l.name.clone()))
                }
                _ => None,
            },
            |r, v| match (&mut r.data, v) {
                (RecordData::Object(ObjectData::LineType(l)), FieldValue::Text(t)) => {
                    l.name = t.clone();
                    true
                }
                _ => false,
            },
        );
        s.register(
            "LTYPE",
            "description",
            StorageKind::TextVariable,
            |r| match &r.data {
                RecordData::Object(ObjectData::LineType(l)) => {
                    Some(FieldValue::Text(l.description.clone()))
                }
                _ => None,
            },
            |r, v| match (&mut r.data, v) {
                (RecordData::Object(ObjectData::LineType(l)), FieldValue::Text(t)) => {
                    l.description = t.clone();
                    true
                }
                _ => false,
            },
        );
        s.register(
            "STYLE",
            "name",
            StorageKind::TextVariable,
            |r| match &r.data {
                RecordData::Object(ObjectData::TextStyle(st)) => {
                    Some(FieldValue::Text(st.name.clone()))
                }
                _ => None,
            },
            |r, v| match (&mut r.data, v) {
                (RecordData::Object(ObjectData::TextStyle(st)), FieldValue::Text(t)) => {
                    st.name = t.clone();
                    true
                }
                _ => false,
            },
        );
        s.register(
            "DIMSTYLE",
            "name",
            StorageKind::TextVariable,
            |r| match &r.data {
                RecordData::Object(ObjectData::DimStyle(d)) => {
                    Some(FieldValue::Text(d.name.clone()))
                }
                _ => None,
            },
            |r, v| match (&mut r.data, v) {
                (RecordData::Object(ObjectData::DimStyle(d)), FieldValue::Text(t)) => {
                    d.name = t.clone();
                    true
                }
                _ => false,
            },
        );
        s.register(
            "APPID",
            "name",
            StorageKind::TextVariable,
            |r| match &r.data {
                RecordData::Object(ObjectData::AppId(a)) => Some(FieldValue::Text(a.name.clone())),
                _ => None,
            },
            |r, v| match (&mut r.data, v) {
                (RecordData::Object(ObjectData::AppId(a)), FieldValue::Text(t)) => {
                    a.name = t.clone();
                    true
                }
                _ => false,
            },
        );
        s.register(
            "BLOCK_HEADER",
            "name",
            StorageKind::TextVariable,
            |r| match &r.data {
                RecordData::Object(ObjectData::BlockHeader(b)) => {
                    Some(FieldValue::Text(b.name.clone()))
                }
                _ => None,
            },
            |r, v| match (&mut r.data, v) {
                (RecordData::Object(ObjectData::BlockHeader(b)), FieldValue::Text(t)) => {
                    b.name = t.clone();
                    true
                }
                _ => false,
            },
        );
        s.register(
            "BLOCK_HEADER",
            "base_point",
            StorageKind::Point3,
            |r| match &r.data {
                RecordData::Object(ObjectData::BlockHeader(b)) => {
                    Some(FieldValue::Point3(b.base_point))
                }
                _ => None,
            },
            |r, v| match (&mut r.data, v) {
                (RecordData::Object(ObjectData::BlockHeader(b)), FieldValue::Point3(p)) => {
                    b.base_point = *p;
                    true
                }
                _ => false,
            },
        );

        s
    }
}

/// The built-in field schema, constructed on first use.
pub static SCHEMA: Lazy<Schema> = Lazy::new(Schema::builtin);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_families() {
        assert_eq!(StorageKind::RawDouble2.family(), KindFamily::Point2);
        assert_eq!(StorageKind::BigPoint.family(), KindFamily::Point3);
        assert_eq!(StorageKind::TextUnicode.family(), KindFamily::Text);
        assert_eq!(StorageKind::FloatSingle.family(), KindFamily::Real);
        assert_eq!(StorageKind::Int32Modeler.family(), KindFamily::Int32);
    }

    #[test]
    fn test_descriptor_lookup() {
        let d = SCHEMA.descriptor("CIRCLE", "radius").unwrap();
        assert_eq!(d.storage, StorageKind::FloatDouble);
        assert_eq!(d.storage.family(), KindFamily::Real);
        assert!(SCHEMA.descriptor("CIRCLE", "altitude").is_none());
        assert!(SCHEMA.descriptor("NOSUCH", "radius").is_none());
    }

    #[test]
    fn test_field_names() {
        let names = SCHEMA.field_names("ARC");
        assert!(names.contains(&"radius"));
        assert!(names.contains(&"start_angle"));
    }

    #[test]
    fn test_value_families() {
        assert_eq!(FieldValue::Real(1.0).family(), KindFamily::Real);
        assert_eq!(
            FieldValue::Text("x".to_string()).family(),
            KindFamily::Text
        );
    }
}
