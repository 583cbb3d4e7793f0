//! Named tables: control records and their table records.
//!
//! Every named-table kind (layers, linetypes, text styles, ...) has exactly
//! one singleton [`Control`] record per document. The control owns the
//! ordered array of handles to that table's named records; each table
//! record's owner reference always targets its control.

use crate::record::RecordKind;
use crate::reference::HandleRef;

pub mod appid;
pub mod block_header;
pub mod dimstyle;
pub mod layer;
pub mod linetype;
pub mod textstyle;

pub use appid::AppId;
pub use block_header::{BlockFlags, BlockHeader};
pub use dimstyle::DimStyle;
pub use layer::{Layer, LayerFlags};
pub use linetype::{LineType, LineTypeElement};
pub use textstyle::TextStyle;

/// The named table kinds of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    Block,
    Layer,
    Style,
    Ltype,
    View,
    Ucs,
    Vport,
    Appid,
    Dimstyle,
}

impl TableKind {
    /// All table kinds, in the order their controls are created.
    pub const ALL: [TableKind; 9] = [
        TableKind::Block,
        TableKind::Layer,
        TableKind::Style,
        TableKind::Ltype,
        TableKind::View,
        TableKind::Ucs,
        TableKind::Vport,
        TableKind::Appid,
        TableKind::Dimstyle,
    ];

    /// The record kind of this table's singleton control.
    pub fn control_kind(&self) -> RecordKind {
        match self {
            TableKind::Block => RecordKind::BlockControl,
            TableKind::Layer => RecordKind::LayerControl,
            TableKind::Style => RecordKind::StyleControl,
            TableKind::Ltype => RecordKind::LtypeControl,
            TableKind::View => RecordKind::ViewControl,
            TableKind::Ucs => RecordKind::UcsControl,
            TableKind::Vport => RecordKind::VportControl,
            TableKind::Appid => RecordKind::AppidControl,
            TableKind::Dimstyle => RecordKind::DimstyleControl,
        }
    }

    /// The record kind of this table's named records.
    pub fn record_kind(&self) -> RecordKind {
        match self {
            TableKind::Block => RecordKind::BlockHeader,
            TableKind::Layer => RecordKind::Layer,
            TableKind::Style => RecordKind::Style,
            TableKind::Ltype => RecordKind::Ltype,
            TableKind::View => RecordKind::View,
            TableKind::Ucs => RecordKind::Ucs,
            TableKind::Vport => RecordKind::Vport,
            TableKind::Appid => RecordKind::Appid,
            TableKind::Dimstyle => RecordKind::Dimstyle,
        }
    }
}

/// A singleton table control record.
///
/// Holds the ordered array of hard-owner references to the table's named
/// records. The entry order is the table order.
#[derive(Debug, Clone)]
pub struct Control {
    /// Which named table this control governs
    pub table: TableKind,
    /// Ordered references to the owned table records
    pub entries: Vec<HandleRef>,
}

impl Control {
    /// Create an empty control for a table.
    pub fn new(table: TableKind) -> Self {
        Control {
            table,
            entries: Vec::new(),
        }
    }

    /// Number of owned table records.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no records.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_record_pairing() {
        for table in TableKind::ALL {
            assert_eq!(table.control_kind().controlled_table(), Some(table));
            assert_eq!(table.record_kind().table_kind(), Some(table));
        }
    }

    #[test]
    fn test_empty_control() {
        let c = Control::new(TableKind::Layer);
        assert!(c.is_empty());
        assert_eq!(c.table, TableKind::Layer);
    }
}
