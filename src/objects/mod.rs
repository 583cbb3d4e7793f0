//! Non-entity object record payloads.
//!
//! Objects are the non-drawable record kinds: dictionaries, table controls
//! and table records. They carry the common envelope but no sibling links.

pub mod dictionary;

pub use dictionary::Dictionary;

use crate::record::RecordKind;
use crate::tables::{AppId, BlockHeader, Control, DimStyle, Layer, LineType, TextStyle};

/// Concrete object payloads behind the closed record discriminant.
#[derive(Debug, Clone)]
pub enum ObjectData {
    /// Key → handle map
    Dictionary(Dictionary),
    /// Singleton table control
    Control(Control),
    /// Layer table record
    Layer(Layer),
    /// Linetype table record
    LineType(LineType),
    /// Text style table record
    TextStyle(TextStyle),
    /// Dimension style table record
    DimStyle(DimStyle),
    /// Registered application table record
    AppId(AppId),
    /// Block header table record
    BlockHeader(BlockHeader),
}

impl ObjectData {
    /// Concrete record kind of this object.
    pub fn kind(&self) -> RecordKind {
        match self {
            ObjectData::Dictionary(_) => RecordKind::Dictionary,
            ObjectData::Control(c) => c.table.control_kind(),
            ObjectData::Layer(_) => RecordKind::Layer,
            ObjectData::LineType(_) => RecordKind::Ltype,
            ObjectData::TextStyle(_) => RecordKind::Style,
            ObjectData::DimStyle(_) => RecordKind::Dimstyle,
            ObjectData::AppId(_) => RecordKind::Appid,
            ObjectData::BlockHeader(_) => RecordKind::BlockHeader,
        }
    }

    /// Table record name, if this object is a named table record.
    pub fn name(&self) -> Option<&str> {
        match self {
            ObjectData::Layer(l) => Some(&l.name),
            ObjectData::LineType(l) => Some(&l.name),
            ObjectData::TextStyle(s) => Some(&s.name),
            ObjectData::DimStyle(d) => Some(&d.name),
            ObjectData::AppId(a) => Some(&a.name),
            ObjectData::BlockHeader(b) => Some(&b.name),
            ObjectData::Dictionary(_) | ObjectData::Control(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::TableKind;

    #[test]
    fn test_kind_dispatch() {
        let o = ObjectData::Layer(Layer::layer_zero());
        assert_eq!(o.kind(), RecordKind::Layer);
        let o = ObjectData::Control(Control::new(TableKind::Ltype));
        assert_eq!(o.kind(), RecordKind::LtypeControl);
    }

    #[test]
    fn test_names() {
        let o = ObjectData::AppId(AppId::acad());
        assert_eq!(o.name(), Some("ACAD"));
        let o = ObjectData::Dictionary(Dictionary::new());
        assert_eq!(o.name(), None);
    }
}
