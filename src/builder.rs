//! Document builder operations.
//!
//! Every `add_*` operation allocates a handle, classifies and wires the
//! owner reference, and links the new record into its owning structure
//! (control entry array, sibling chain, dictionary). Arguments are
//! validated before any mutation, so a failed call leaves no
//! partially-linked state behind.

use crate::chain;
use crate::entities::{
    Arc, AttDef, Attrib, BlockBegin, BlockEnd, Circle, EntityCommon, EntityData, Insert, Line,
    Point, Polyline2D, Polyline3D, Seqend, Text, Vertex2D, Vertex3D,
};
use crate::error::{CadError, Result};
use crate::document::Document;
use crate::notification::NotificationType;
use crate::objects::{Dictionary, ObjectData};
use crate::record::{Envelope, Record, RecordData, RecordKind};
use crate::reference::{classify, HandleRef};
use crate::tables::{
    AppId, BlockHeader, Control, DimStyle, Layer, LineType, TableKind, TextStyle,
};
use crate::types::{Handle, Vector2, Vector3};

impl Document {
    /// Entity header defaults: current layer and linetype.
    fn default_entity_common(&self) -> EntityCommon {
        EntityCommon {
            layer: self.header.current_layer,
            linetype: self.header.current_linetype,
            ..EntityCommon::new()
        }
    }

    /// Register an entity record owned by a block and chained into it.
    fn add_entity_record(&mut self, block: Handle, data: EntityData) -> Result<Handle> {
        let container = self
            .record(block)
            .ok_or(CadError::RecordNotFound(block.value()))?;
        if container.kind() != RecordKind::BlockHeader {
            return Err(CadError::InvalidArgument(format!(
                "record {block} ({}) is not a block header",
                container.type_name()
            )));
        }
        let owner_kind = classify(RecordKind::BlockHeader, data.kind());
        let handle = self.registry_mut().next_handle();
        self.registry_mut().add(Record::new(
            handle,
            Envelope::owned_by(HandleRef {
                value: block,
                kind: owner_kind,
            }),
            RecordData::Entity(data),
        ))?;
        chain::append_member(self.registry_mut(), block, handle)?;
        Ok(handle)
    }

    /// Add a point entity to a block.
    pub fn add_point(&mut self, block: Handle, location: Vector3) -> Result<Handle> {
        let mut point = Point::at(location);
        point.common = self.default_entity_common();
        self.add_entity_record(block, EntityData::Point(point))
    }

    /// Add a line entity to a block.
    pub fn add_line(&mut self, block: Handle, start: Vector3, end: Vector3) -> Result<Handle> {
        let mut line = Line::from_points(start, end);
        line.common = self.default_entity_common();
        self.add_entity_record(block, EntityData::Line(line))
    }

    /// Add a circle entity to a block.
    pub fn add_circle(&mut self, block: Handle, center: Vector3, radius: f64) -> Result<Handle> {
        if radius <= 0.0 {
            return Err(CadError::InvalidArgument(format!(
                "circle radius must be positive, got {radius}"
            )));
        }
        let mut circle = Circle::from_center_radius(center, radius);
        circle.common = self.default_entity_common();
        self.add_entity_record(block, EntityData::Circle(circle))
    }

    /// Add an arc entity to a block.
    pub fn add_arc(
        &mut self,
        block: Handle,
        center: Vector3,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    ) -> Result<Handle> {
        if radius <= 0.0 {
            return Err(CadError::InvalidArgument(format!(
                "arc radius must be positive, got {radius}"
            )));
        }
        let mut arc = Arc::from_center_radius_angles(center, radius, start_angle, end_angle);
        arc.common = self.default_entity_common();
        self.add_entity_record(block, EntityData::Arc(arc))
    }

    /// Add a single-line text entity to a block.
    ///
    /// The value is normalized through the document's text context, so a
    /// pre-unicode document stores what its code page can represent.
    pub fn add_text(
        &mut self,
        block: Handle,
        value: &str,
        insertion_point: Vector2,
        height: f64,
    ) -> Result<Handle> {
        let stored = self.text_context().encode_for_storage(value);
        let mut text = Text::with_value(stored, insertion_point, height);
        text.common = self.default_entity_common();
        text.style = self.header.current_text_style;
        self.add_entity_record(block, EntityData::Text(text))
    }

    /// Add an empty heavy 2D polyline to a block.
    ///
    /// Vertices are added with [`Self::add_vertex_2d`]; the SEQEND
    /// terminator is created on the first vertex insertion.
    pub fn add_polyline_2d(&mut self, block: Handle) -> Result<Handle> {
        let mut pl = Polyline2D::new();
        pl.common = self.default_entity_common();
        self.add_entity_record(block, EntityData::Polyline2D(pl))
    }

    /// Add an empty 3D polyline to a block.
    pub fn add_polyline_3d(&mut self, block: Handle) -> Result<Handle> {
        let mut pl = Polyline3D::new();
        pl.common = self.default_entity_common();
        self.add_entity_record(block, EntityData::Polyline3D(pl))
    }

    /// Create the SEQEND terminator of a container if it has none yet.
    fn ensure_terminator(&mut self, container: Handle) -> Result<()> {
        let rec = self
            .record(container)
            .ok_or(CadError::RecordNotFound(container.value()))?;
        if !chain::requires_terminator(rec.kind()) {
            return Err(CadError::InvalidArgument(format!(
                "record {container} ({}) does not take a terminator",
                rec.type_name()
            )));
        }
        if chain::terminator_of(rec).is_some() {
            return Ok(());
        }
        let mut seqend = Seqend::new();
        seqend.common = self.default_entity_common();
        let handle = self.registry_mut().next_handle();
        self.registry_mut().add(Record::new(
            handle,
            Envelope::owned_by(HandleRef::hard_owner(container)),
            RecordData::Entity(EntityData::Seqend(seqend)),
        ))?;
        chain::attach_terminator(self.registry_mut(), container, handle)
    }

    /// Register a member entity under a terminated container (polyline
    /// vertex, insert attribute).
    fn add_sequence_member(&mut self, container: Handle, data: EntityData) -> Result<Handle> {
        self.ensure_terminator(container)?;
        let container_kind = self
            .record(container)
            .ok_or(CadError::RecordNotFound(container.value()))?
            .kind();
        let owner_kind = classify(container_kind, data.kind());
        let handle = self.registry_mut().next_handle();
        self.registry_mut().add(Record::new(
            handle,
            Envelope::owned_by(HandleRef {
                value: container,
                kind: owner_kind,
            }),
            RecordData::Entity(data),
        ))?;
        chain::append_member(self.registry_mut(), container, handle)?;
        Ok(handle)
    }

    /// Add a vertex to a heavy 2D polyline.
    pub fn add_vertex_2d(&mut self, polyline: Handle, location: Vector3) -> Result<Handle> {
        let rec = self
            .record(polyline)
            .ok_or(CadError::RecordNotFound(polyline.value()))?;
        if rec.kind() != RecordKind::Polyline2D {
            return Err(CadError::InvalidArgument(format!(
                "record {polyline} ({}) is not a 2D polyline",
                rec.type_name()
            )));
        }
        let mut v = Vertex2D::at(location);
        v.common = self.default_entity_common();
        self.add_sequence_member(polyline, EntityData::Vertex2D(v))
    }

    /// Add a vertex to a 3D polyline.
    pub fn add_vertex_3d(&mut self, polyline: Handle, location: Vector3) -> Result<Handle> {
        let rec = self
            .record(polyline)
            .ok_or(CadError::RecordNotFound(polyline.value()))?;
        if rec.kind() != RecordKind::Polyline3D {
            return Err(CadError::InvalidArgument(format!(
                "record {polyline} ({}) is not a 3D polyline",
                rec.type_name()
            )));
        }
        let mut v = Vertex3D::at(location);
        v.common = self.default_entity_common();
        self.add_sequence_member(polyline, EntityData::Vertex3D(v))
    }

    /// Add a block reference to a block.
    ///
    /// `referenced_block` is a pointer reference: it may name a block
    /// created later, and is only rechecked by [`Document::validate`].
    pub fn add_insert(
        &mut self,
        block: Handle,
        referenced_block: Handle,
        insertion_point: Vector3,
    ) -> Result<Handle> {
        let mut insert = Insert::at(HandleRef::hard_pointer(referenced_block), insertion_point);
        insert.common = self.default_entity_common();
        self.add_entity_record(block, EntityData::Insert(insert))
    }

    /// Add an attribute to an insert, opening its terminated attribute
    /// sequence on first use.
    pub fn add_attrib(&mut self, insert: Handle, tag: &str, value: &str) -> Result<Handle> {
        let rec = self
            .record(insert)
            .ok_or(CadError::RecordNotFound(insert.value()))?;
        if rec.kind() != RecordKind::Insert {
            return Err(CadError::InvalidArgument(format!(
                "record {insert} ({}) is not an insert",
                rec.type_name()
            )));
        }
        let ctx = self.text_context();
        let mut attrib = Attrib::new(ctx.encode_for_storage(tag), ctx.encode_for_storage(value));
        attrib.common = self.default_entity_common();
        attrib.style = self.header.current_text_style;
        let handle = self.add_sequence_member(insert, EntityData::Attrib(attrib))?;
        if let Some(EntityData::Insert(i)) = self.record_mut(insert).and_then(|r| r.entity_mut())
        {
            i.has_attribs = true;
        }
        Ok(handle)
    }

    /// Add an attribute definition to a block definition.
    pub fn add_attdef(
        &mut self,
        block: Handle,
        tag: &str,
        prompt: &str,
        default_value: &str,
    ) -> Result<Handle> {
        let ctx = self.text_context();
        let mut attdef = AttDef::new(
            ctx.encode_for_storage(tag),
            ctx.encode_for_storage(prompt),
            ctx.encode_for_storage(default_value),
        );
        attdef.common = self.default_entity_common();
        attdef.style = self.header.current_text_style;
        self.add_entity_record(block, EntityData::AttDef(attdef))
    }

    // ------------------------------------------------------------------
    // objects and table records
    // ------------------------------------------------------------------

    /// Create the unowned root dictionary. Runs once per document.
    pub(crate) fn add_root_dictionary(&mut self) -> Result<Handle> {
        if self.header.named_objects_dict.is_valid() {
            return Err(CadError::InvalidArgument(
                "document already has a root dictionary".to_string(),
            ));
        }
        let handle = self.registry_mut().next_handle();
        self.registry_mut().add(Record::new(
            handle,
            Envelope::new(),
            RecordData::Object(ObjectData::Dictionary(Dictionary::new())),
        ))?;
        Ok(handle)
    }

    /// Create a table's singleton control record. Runs once per table.
    pub(crate) fn add_control(&mut self, table: TableKind) -> Result<Handle> {
        if self.control_handle(table).is_valid() {
            return Err(CadError::InvalidArgument(format!(
                "document already has a {table:?} control"
            )));
        }
        let handle = self.registry_mut().next_handle();
        self.registry_mut().add(Record::new(
            handle,
            Envelope::new(),
            RecordData::Object(ObjectData::Control(Control::new(table))),
        ))?;
        Ok(handle)
    }

    /// Register a named table record under its control.
    fn add_table_record(&mut self, table: TableKind, data: ObjectData) -> Result<Handle> {
        let name = data
            .name()
            .ok_or_else(|| {
                CadError::InvalidArgument("table record carries no name".to_string())
            })?
            .to_string();
        if name.is_empty() {
            return Err(CadError::InvalidArgument(
                "table record name must not be empty".to_string(),
            ));
        }
        if self.find_table_record(table, &name).is_some() {
            return Err(CadError::DuplicateName(name));
        }
        let control = self.control_handle(table);
        if self.resolve(control).is_none() {
            return Err(CadError::UnresolvedReference(control.value()));
        }

        let handle = self.registry_mut().next_handle();
        self.registry_mut().add(Record::new(
            handle,
            Envelope::owned_by(HandleRef::hard_owner(control)),
            RecordData::Object(data),
        ))?;
        if let Some(ObjectData::Control(c)) =
            self.record_mut(control).and_then(|r| r.object_mut())
        {
            c.entries.push(HandleRef::hard_owner(handle));
        }
        Ok(handle)
    }

    /// Add a layer, referencing the CONTINUOUS linetype.
    pub fn add_layer(&mut self, name: &str) -> Result<Handle> {
        let mut layer = Layer::new(name);
        layer.linetype = HandleRef::hard_pointer(self.header.continuous_linetype);
        self.add_table_record(TableKind::Layer, ObjectData::Layer(layer))
    }

    /// Add a linetype.
    pub fn add_linetype(&mut self, name: &str, description: &str) -> Result<Handle> {
        let mut lt = LineType::new(name);
        lt.description = description.to_string();
        self.add_table_record(TableKind::Ltype, ObjectData::LineType(lt))
    }

    /// Add a text style.
    pub fn add_text_style(&mut self, name: &str) -> Result<Handle> {
        self.add_table_record(TableKind::Style, ObjectData::TextStyle(TextStyle::new(name)))
    }

    /// Add a dimension style, referencing the current text style.
    pub fn add_dim_style(&mut self, name: &str) -> Result<Handle> {
        let mut ds = DimStyle::new(name);
        ds.text_style = self.header.current_text_style;
        self.add_table_record(TableKind::Dimstyle, ObjectData::DimStyle(ds))
    }

    /// Register an application id.
    pub fn add_app_id(&mut self, name: &str) -> Result<Handle> {
        self.add_table_record(TableKind::Appid, ObjectData::AppId(AppId::new(name)))
    }

    /// Add a block definition: its header record plus the BLOCK/ENDBLK
    /// bracket entities wired as the chain's absolute first and last.
    pub fn add_block(&mut self, name: &str) -> Result<Handle> {
        let header =
            self.add_table_record(TableKind::Block, ObjectData::BlockHeader(BlockHeader::new(name)))?;

        let mut begin = BlockBegin::new(name);
        begin.common = self.default_entity_common();
        let begin_handle = self.registry_mut().next_handle();
        self.registry_mut().add(Record::new(
            begin_handle,
            Envelope::owned_by(HandleRef::hard_owner(header)),
            RecordData::Entity(EntityData::BlockBegin(begin)),
        ))?;

        let mut end = BlockEnd::new();
        end.common = self.default_entity_common();
        let end_handle = self.registry_mut().next_handle();
        self.registry_mut().add(Record::new(
            end_handle,
            Envelope::owned_by(HandleRef::hard_owner(header)),
            RecordData::Entity(EntityData::BlockEnd(end)),
        ))?;

        chain::link_brackets(self.registry_mut(), header, begin_handle, end_handle)?;
        Ok(header)
    }

    /// Add a dictionary.
    ///
    /// The new dictionary is always inserted as a value under the root
    /// dictionary; an anonymous one gets a generated `*D<n>` key. Only
    /// the root itself (created with the document) has no owner.
    pub fn add_dictionary(&mut self, name: Option<&str>) -> Result<Handle> {
        let root = self.header.named_objects_dict;
        if self.resolve(root).is_none() {
            return Err(CadError::UnresolvedReference(root.value()));
        }
        let key = match name {
            Some(n) if n.is_empty() => {
                return Err(CadError::InvalidArgument(
                    "dictionary key must not be empty".to_string(),
                ))
            }
            Some(n) => n.to_string(),
            None => self.next_anon_dict_name(),
        };

        let handle = self.registry_mut().next_handle();
        self.registry_mut().add(Record::new(
            handle,
            Envelope::owned_by(HandleRef::soft_owner(root)),
            RecordData::Object(ObjectData::Dictionary(Dictionary::new())),
        ))?;
        self.dict_upsert(root, &key, handle)?;
        Ok(handle)
    }

    /// Insert or replace a dictionary entry.
    ///
    /// A context-equal existing key keeps its position and gets the new
    /// target; the entry count does not change. The target may be a
    /// forward reference - it is only rechecked by [`Document::validate`].
    pub fn dict_upsert(&mut self, dict: Handle, key: &str, target: Handle) -> Result<()> {
        if target.is_null() {
            return Err(CadError::InvalidArgument(
                "dictionary value must carry a handle".to_string(),
            ));
        }
        let ctx = self.text_context();
        let dict_rec = self
            .record_mut(dict)
            .ok_or(CadError::RecordNotFound(dict.value()))?;
        let d = match dict_rec.object_mut() {
            Some(ObjectData::Dictionary(d)) => d,
            _ => {
                return Err(CadError::InvalidArgument(format!(
                    "record {dict} is not a dictionary"
                )))
            }
        };
        let value = if d.hard_owner {
            HandleRef::hard_owner(target)
        } else {
            HandleRef::soft_owner(target)
        };
        let replaced = d.upsert(key, value, &ctx);
        if let Some(old) = replaced {
            self.notifications.notify(
                NotificationType::Warning,
                format!(
                    "dictionary {dict}: key '{key}' rebound from {} to {target}",
                    old.value
                ),
            );
        }
        Ok(())
    }

    /// Look up a dictionary entry.
    pub fn dict_lookup(&self, dict: Handle, key: &str) -> Option<Handle> {
        let ctx = self.text_context();
        match self.record(dict)?.object()? {
            ObjectData::Dictionary(d) => d.lookup(key, &ctx),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CadVersion;

    #[test]
    fn test_add_line_is_chained_and_owned() {
        let mut doc = Document::new();
        let ms = doc.model_space();
        let line = doc
            .add_line(ms, Vector3::ZERO, Vector3::new(10.0, 0.0, 0.0))
            .unwrap();

        let rec = doc.record(line).unwrap();
        assert_eq!(rec.envelope.owner.value, ms);
        assert!(rec.envelope.owner.is_owner());

        let chained: Vec<Handle> = doc.chain_entities(ms).collect();
        assert!(chained.contains(&line));
        doc.validate().unwrap();
    }

    #[test]
    fn test_add_to_missing_block_fails_cleanly() {
        let mut doc = Document::new();
        let before = doc.record_count();
        let err = doc
            .add_line(Handle::new(0xDEAD), Vector3::ZERO, Vector3::ZERO)
            .unwrap_err();
        assert!(matches!(err, CadError::RecordNotFound(_)));
        assert_eq!(doc.record_count(), before);
    }

    #[test]
    fn test_invalid_radius_rejected_before_mutation() {
        let mut doc = Document::new();
        let ms = doc.model_space();
        let before = doc.record_count();
        assert!(doc.add_circle(ms, Vector3::ZERO, 0.0).is_err());
        assert_eq!(doc.record_count(), before);
    }

    #[test]
    fn test_duplicate_layer_rejected() {
        let mut doc = Document::new();
        doc.add_layer("WALLS").unwrap();
        let err = doc.add_layer("walls").unwrap_err();
        assert!(matches!(err, CadError::DuplicateName(_)));
    }

    #[test]
    fn test_block_brackets_bound_chain() {
        let mut doc = Document::new();
        let door = doc.add_block("DOOR").unwrap();
        let chained: Vec<Handle> = doc.chain_entities(door).collect();
        assert_eq!(chained.len(), 2);

        doc.add_line(door, Vector3::ZERO, Vector3::new(0.0, 2.0, 0.0))
            .unwrap();
        let chained: Vec<Handle> = doc.chain_entities(door).collect();
        assert_eq!(chained.len(), 3);

        let rec = doc.record(door).unwrap();
        let header = match rec.object().unwrap() {
            ObjectData::BlockHeader(b) => b,
            _ => panic!(),
        };
        assert_eq!(chained.first().copied(), header.block_begin);
        assert_eq!(chained.last().copied(), header.block_end);
        assert_eq!(header.chain.count, 1);
        doc.validate().unwrap();
    }

    #[test]
    fn test_attribs_open_terminated_sequence() {
        let mut doc = Document::new();
        let ms = doc.model_space();
        let door = doc.add_block("DOOR").unwrap();
        let ins = doc.add_insert(ms, door, Vector3::ZERO).unwrap();

        doc.add_attrib(ins, "PARTNO", "A-113").unwrap();
        doc.add_attrib(ins, "COLOR", "RED").unwrap();

        let rec = doc.record(ins).unwrap();
        let insert = match rec.entity().unwrap() {
            EntityData::Insert(i) => i,
            _ => panic!(),
        };
        assert!(insert.has_attribs);
        assert_eq!(insert.chain.count, 2);
        assert!(insert.seqend.is_some());
        doc.validate().unwrap();
    }

    #[test]
    fn test_anonymous_dictionary_lands_under_root() {
        let mut doc = Document::new();
        let d = doc.add_dictionary(None).unwrap();
        let root = doc.header.named_objects_dict;
        assert_eq!(doc.dict_lookup(root, "*D1"), Some(d));
        doc.validate().unwrap();
    }

    #[test]
    fn test_legacy_text_is_normalized_at_construction() {
        let mut doc = Document::with_version(CadVersion::AC1015);
        let ms = doc.model_space();
        let t = doc.add_text(ms, "Ω", Vector2::ZERO, 2.5).unwrap();
        let rec = doc.record(t).unwrap();
        let text = match rec.entity().unwrap() {
            EntityData::Text(t) => t,
            _ => panic!(),
        };
        assert_ne!(text.value, "Ω");
    }
}
