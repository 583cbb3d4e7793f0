//! The document: one drawing's record graph and its named roots.
//!
//! A `Document` owns the registry, the format version with its text
//! context, and the header of named handle references (active layer,
//! active linetype, control records, the root dictionary, ...). All
//! mutation goes through `&mut self`: the single-writer discipline is the
//! borrow checker's, not a lock's.

use crate::chain::{self, ChainIter};
use crate::error::{CadError, Result};
use crate::notification::{NotificationCollection, NotificationType};
use crate::objects::ObjectData;
use crate::record::{Record, RecordData};
use crate::reference::HandleRef;
use crate::registry::{RecordId, Registry};
use crate::tables::TableKind;
use crate::text::TextContext;
use crate::types::{CadVersion, Handle};

/// Named handle references of a document.
///
/// These are the graph's well-known entry points: the singleton control
/// records, the root dictionary and its standard sub-dictionaries, the
/// model/paper space blocks, and the "current" style references new
/// entities default to.
#[derive(Debug, Clone, Default)]
pub struct Header {
    /// Block table control
    pub block_control: Handle,
    /// Layer table control
    pub layer_control: Handle,
    /// Text style table control
    pub style_control: Handle,
    /// Linetype table control
    pub linetype_control: Handle,
    /// View table control
    pub view_control: Handle,
    /// UCS table control
    pub ucs_control: Handle,
    /// Viewport table control
    pub vport_control: Handle,
    /// Application id table control
    pub appid_control: Handle,
    /// Dimension style table control
    pub dimstyle_control: Handle,

    /// Root named-object dictionary (the graph's only unowned record)
    pub named_objects_dict: Handle,
    /// ACAD_GROUP dictionary
    pub group_dict: Handle,
    /// ACAD_MLINESTYLE dictionary
    pub mlinestyle_dict: Handle,
    /// ACAD_LAYOUT dictionary
    pub layout_dict: Handle,
    /// ACAD_PLOTSETTINGS dictionary
    pub plotsettings_dict: Handle,
    /// ACAD_PLOTSTYLENAME dictionary
    pub plotstylename_dict: Handle,

    /// *Model_Space block header
    pub model_space_block: Handle,
    /// *Paper_Space block header
    pub paper_space_block: Handle,
    /// CONTINUOUS linetype
    pub continuous_linetype: Handle,
    /// ByLayer linetype
    pub bylayer_linetype: Handle,
    /// ByBlock linetype
    pub byblock_linetype: Handle,

    /// Layer new entities are placed on
    pub current_layer: HandleRef,
    /// Linetype new entities reference
    pub current_linetype: HandleRef,
    /// Text style new text entities reference
    pub current_text_style: HandleRef,
    /// Active dimension style
    pub current_dimstyle: HandleRef,
}

/// A CAD document: the record graph plus its version and named roots.
#[derive(Debug, Clone)]
pub struct Document {
    /// Format version
    pub version: CadVersion,
    /// Named handle references
    pub header: Header,
    /// Diagnostics collected during construction and validation
    pub notifications: NotificationCollection,
    text: TextContext,
    registry: Registry,
    anon_dict_seed: u32,
}

impl Document {
    /// Create a document at the newest supported version with the default
    /// code page, pre-populated with the minimally valid graph.
    pub fn new() -> Self {
        Self::with_version_and_code_page(CadVersion::default(), "ANSI_1252")
    }

    /// Create a document at a specific version.
    pub fn with_version(version: CadVersion) -> Self {
        Self::with_version_and_code_page(version, "ANSI_1252")
    }

    /// Create a document at a specific version and drawing code page.
    pub fn with_version_and_code_page(version: CadVersion, code_page: &str) -> Self {
        let mut doc = Document {
            version,
            header: Header::default(),
            notifications: NotificationCollection::new(),
            text: TextContext::new(version, code_page),
            registry: Registry::default(),
            anon_dict_seed: 0,
        };
        doc.initialize_defaults();
        doc
    }

    /// Build the minimally valid graph: the root dictionary, the table
    /// controls, the default table records, both space blocks with their
    /// brackets, and the standard sub-dictionaries.
    fn initialize_defaults(&mut self) {
        const DEFAULTS: &str = "default graph construction is infallible";

        // the root dictionary is the single unowned record
        let root = self
            .add_root_dictionary()
            .expect(DEFAULTS);
        self.header.named_objects_dict = root;

        // singleton table controls, in table order
        for table in TableKind::ALL {
            let handle = self.add_control(table).expect(DEFAULTS);
            *self.control_slot_mut(table) = handle;
        }

        // default linetypes
        let continuous = self
            .add_linetype("Continuous", "Solid line")
            .expect(DEFAULTS);
        self.header.continuous_linetype = continuous;
        let bylayer = self.add_linetype("ByLayer", "").expect(DEFAULTS);
        self.header.bylayer_linetype = bylayer;
        let byblock = self.add_linetype("ByBlock", "").expect(DEFAULTS);
        self.header.byblock_linetype = byblock;
        self.header.current_linetype = HandleRef::hard_pointer(bylayer);

        // default text style, dimension style, application id
        let standard_style = self.add_text_style("Standard").expect(DEFAULTS);
        self.header.current_text_style = HandleRef::hard_pointer(standard_style);
        let standard_dimstyle = self.add_dim_style("Standard").expect(DEFAULTS);
        self.header.current_dimstyle = HandleRef::hard_pointer(standard_dimstyle);
        self.add_app_id("ACAD").expect(DEFAULTS);

        // layer "0"
        let layer0 = self.add_layer("0").expect(DEFAULTS);
        self.header.current_layer = HandleRef::hard_pointer(layer0);

        // space blocks, bracketed
        self.header.model_space_block = self.add_block("*Model_Space").expect(DEFAULTS);
        self.header.paper_space_block = self.add_block("*Paper_Space").expect(DEFAULTS);

        // standard sub-dictionaries under the root
        self.header.group_dict = self.add_dictionary(Some("ACAD_GROUP")).expect(DEFAULTS);
        self.header.mlinestyle_dict = self
            .add_dictionary(Some("ACAD_MLINESTYLE"))
            .expect(DEFAULTS);
        self.header.layout_dict = self.add_dictionary(Some("ACAD_LAYOUT")).expect(DEFAULTS);
        self.header.plotsettings_dict = self
            .add_dictionary(Some("ACAD_PLOTSETTINGS"))
            .expect(DEFAULTS);
        self.header.plotstylename_dict = self
            .add_dictionary(Some("ACAD_PLOTSTYLENAME"))
            .expect(DEFAULTS);
    }

    pub(crate) fn control_slot_mut(&mut self, table: TableKind) -> &mut Handle {
        match table {
            TableKind::Block => &mut self.header.block_control,
            TableKind::Layer => &mut self.header.layer_control,
            TableKind::Style => &mut self.header.style_control,
            TableKind::Ltype => &mut self.header.linetype_control,
            TableKind::View => &mut self.header.view_control,
            TableKind::Ucs => &mut self.header.ucs_control,
            TableKind::Vport => &mut self.header.vport_control,
            TableKind::Appid => &mut self.header.appid_control,
            TableKind::Dimstyle => &mut self.header.dimstyle_control,
        }
    }

    /// Handle of a table's singleton control.
    pub fn control_handle(&self, table: TableKind) -> Handle {
        match table {
            TableKind::Block => self.header.block_control,
            TableKind::Layer => self.header.layer_control,
            TableKind::Style => self.header.style_control,
            TableKind::Ltype => self.header.linetype_control,
            TableKind::View => self.header.view_control,
            TableKind::Ucs => self.header.ucs_control,
            TableKind::Vport => self.header.vport_control,
            TableKind::Appid => self.header.appid_control,
            TableKind::Dimstyle => self.header.dimstyle_control,
        }
    }

    /// The document's text context (version + code page).
    pub fn text_context(&self) -> TextContext {
        self.text
    }

    /// The record registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub(crate) fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    pub(crate) fn next_anon_dict_name(&mut self) -> String {
        self.anon_dict_seed += 1;
        format!("*D{}", self.anon_dict_seed)
    }

    /// Resolve an absolute reference to an arena slot.
    pub fn resolve(&self, handle: Handle) -> Option<RecordId> {
        self.registry.resolve(handle)
    }

    /// The record with the given handle.
    pub fn record(&self, handle: Handle) -> Option<&Record> {
        self.registry.by_handle(handle)
    }

    /// Mutable record with the given handle.
    pub fn record_mut(&mut self, handle: Handle) -> Option<&mut Record> {
        self.registry.by_handle_mut(handle)
    }

    /// Number of records in the graph.
    pub fn record_count(&self) -> usize {
        self.registry.len()
    }

    /// Iterate over all records in insertion order.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.registry.iter()
    }

    /// The model space block header.
    pub fn model_space(&self) -> Handle {
        self.header.model_space_block
    }

    /// The paper space block header.
    pub fn paper_space(&self) -> Handle {
        self.header.paper_space_block
    }

    /// Whether a record is one of the document's designated roots (the
    /// named-object dictionary and the table controls), which carry no
    /// owner reference.
    pub fn is_root(&self, handle: Handle) -> bool {
        if handle == self.header.named_objects_dict {
            return true;
        }
        TableKind::ALL
            .iter()
            .any(|t| self.control_handle(*t) == handle)
    }

    /// Find a named table record through its control, case-insensitively.
    pub fn find_table_record(&self, table: TableKind, name: &str) -> Option<Handle> {
        let control = self.record(self.control_handle(table))?;
        let entries = match control.object()? {
            ObjectData::Control(c) => &c.entries,
            _ => return None,
        };
        let wanted = name.to_uppercase();
        entries
            .iter()
            .map(|r| r.value)
            .find(|&h| {
                self.record(h)
                    .and_then(|rec| rec.object())
                    .and_then(|o| o.name())
                    .map(|n| n.to_uppercase() == wanted)
                    .unwrap_or(false)
            })
    }

    /// Iterate a container's chained entities front to back.
    pub fn chain_entities(&self, container: Handle) -> ChainIter<'_> {
        ChainIter::new(&self.registry, container)
    }

    /// The owned member of a container at a position in its sub-sequence.
    ///
    /// Brackets and terminators are not members and have no index.
    pub fn member_at(&self, container: Handle, index: usize) -> Result<Handle> {
        let rec = self
            .record(container)
            .ok_or(CadError::RecordNotFound(container.value()))?;
        let chain = chain::chain_ref(rec).ok_or_else(|| {
            CadError::InvalidArgument(format!("record {container} is not a chain container"))
        })?;
        chain
            .owned
            .get(index)
            .map(|r| r.value)
            .ok_or(CadError::IndexOutOfRange {
                index,
                len: chain.owned.len(),
            })
    }

    /// Verify the whole-graph invariants.
    ///
    /// Fatal conditions return an error: an owner reference that does not
    /// resolve, a broken sibling chain, a duplicate dictionary key.
    /// Dangling *pointer* references are the deferred-recheck case: they
    /// are reported as warnings in [`Self::notifications`] and do not fail
    /// validation.
    pub fn validate(&mut self) -> Result<()> {
        // ownership totality (roots excepted)
        for record in self.registry.iter() {
            if self.is_root(record.handle) {
                continue;
            }
            let owner = record.envelope.owner;
            if !owner.is_owner() || self.registry.resolve(owner.value).is_none() {
                return Err(CadError::UnresolvedReference(owner.value.value()));
            }
        }

        // chain/count consistency and terminator placement per container
        let containers: Vec<Handle> = self
            .registry
            .iter()
            .filter(|r| r.kind().is_container())
            .map(|r| r.handle)
            .collect();
        for container in containers {
            chain::verify_chain(&self.registry, container)?;
        }

        // dictionary key uniqueness under the document's equality rule
        for record in self.registry.iter() {
            if let Some(ObjectData::Dictionary(dict)) = record.object() {
                let keys: Vec<&str> = dict.entries().map(|(k, _)| k).collect();
                for (i, a) in keys.iter().enumerate() {
                    for b in keys.iter().skip(i + 1) {
                        if self.text.keys_equal(a, b) {
                            return Err(CadError::DuplicateName((*a).to_string()));
                        }
                    }
                }
            }
        }

        // deferred pointer recheck: dangling pointers become warnings
        let mut dangling: Vec<(Handle, u64)> = Vec::new();
        for record in self.registry.iter() {
            for ptr in pointer_refs(record) {
                if ptr.is_set() && self.registry.resolve(ptr.value).is_none() {
                    dangling.push((record.handle, ptr.value.value()));
                }
            }
        }
        for (holder, target) in dangling {
            self.notifications.notify(
                NotificationType::Warning,
                format!("record {holder} points at unresolved handle {target:#X}"),
            );
        }
        Ok(())
    }
}

/// The pointer-kind references a record carries, for the deferred
/// unresolved-reference pass.
fn pointer_refs(record: &Record) -> Vec<HandleRef> {
    let mut refs = Vec::new();
    match &record.data {
        RecordData::Entity(e) => {
            let c = e.common();
            refs.extend([c.layer, c.linetype, c.material, c.plot_style]);
            if let crate::entities::EntityData::Insert(i) = e {
                refs.push(i.block_header);
            }
            if let crate::entities::EntityData::Text(t) = e {
                refs.push(t.style);
            }
        }
        RecordData::Object(o) => match o {
            ObjectData::Layer(l) => refs.extend([l.linetype, l.plot_style, l.material]),
            ObjectData::DimStyle(d) => refs.extend([d.text_style, d.linetype]),
            ObjectData::Dictionary(d) => {
                // values may be forward references; recheck them all
                return d.entries().map(|(_, r)| *r).filter(|r| r.is_set()).collect();
            }
            _ => {}
        },
    }
    refs.retain(|r| r.is_pointer());
    refs
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
