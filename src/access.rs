//! Generic, type-validated field access.
//!
//! One facade replaces the per-field accessor explosion: given a record
//! handle and a field name, the facade resolves the field's declared kind
//! from the schema, validates it against the caller's expected kind
//! family, and dispatches the read or write. No mutation happens on a
//! failed validation.
//!
//! String reads always return an owned copy, whatever the document
//! version; string writes flagged `as_text` are re-encoded through the
//! document's text context so later reads stay version-consistent.

use crate::document::Document;
use crate::error::{CadError, Result};
use crate::schema::{FieldValue, KindFamily, SCHEMA};
use crate::types::Handle;

/// Read a field of a record, validated against an expected kind family.
pub fn get_field(
    doc: &Document,
    handle: Handle,
    field: &str,
    expected: KindFamily,
) -> Result<FieldValue> {
    let record = doc
        .record(handle)
        .ok_or(CadError::RecordNotFound(handle.value()))?;
    let type_name = record.type_name();
    let desc = SCHEMA
        .descriptor(type_name, field)
        .ok_or_else(|| CadError::UnknownField {
            type_name,
            field: field.to_string(),
        })?;
    if desc.storage.family() != expected {
        return Err(CadError::KindMismatch {
            field: field.to_string(),
            declared: desc.storage,
            requested: expected,
        });
    }
    (desc.get)(record).ok_or_else(|| {
        CadError::InvalidArgument(format!(
            "schema entry {type_name}.{field} does not match the record variant"
        ))
    })
}

/// Write a field of a record, validated against the declared kind.
///
/// With `as_text` set, string values are first normalized through the
/// document's text context (the same path construction uses), so a
/// pre-unicode document stores what its code page can represent.
pub fn set_field(
    doc: &mut Document,
    handle: Handle,
    field: &str,
    value: FieldValue,
    as_text: bool,
) -> Result<()> {
    let ctx = doc.text_context();
    let record = doc
        .record_mut(handle)
        .ok_or(CadError::RecordNotFound(handle.value()))?;
    let type_name = record.type_name();
    let desc = SCHEMA
        .descriptor(type_name, field)
        .ok_or_else(|| CadError::UnknownField {
            type_name,
            field: field.to_string(),
        })?;
    if desc.storage.family() != value.family() {
        return Err(CadError::KindMismatch {
            field: field.to_string(),
            declared: desc.storage,
            requested: value.family(),
        });
    }

    let value = match value {
        FieldValue::Text(s) if as_text => FieldValue::Text(ctx.encode_for_storage(&s)),
        other => other,
    };

    if !(desc.set)(record, &value) {
        return Err(CadError::InvalidArgument(format!(
            "schema entry {type_name}.{field} does not match the record variant"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::types::{Vector3, CadVersion};

    #[test]
    fn test_get_checked_kind() {
        let mut doc = Document::new();
        let ms = doc.model_space();
        let c = doc
            .add_circle(ms, Vector3::new(1.0, 2.0, 0.0), 4.5)
            .unwrap();

        // declared real, requested real
        let v = get_field(&doc, c, "radius", KindFamily::Real).unwrap();
        assert_eq!(v, FieldValue::Real(4.5));

        // declared real, requested 3D point
        let err = get_field(&doc, c, "radius", KindFamily::Point3).unwrap_err();
        assert!(matches!(err, CadError::KindMismatch { .. }));
    }

    #[test]
    fn test_unknown_field() {
        let mut doc = Document::new();
        let ms = doc.model_space();
        let c = doc.add_circle(ms, Vector3::ZERO, 1.0).unwrap();
        let err = get_field(&doc, c, "altitude", KindFamily::Real).unwrap_err();
        assert!(matches!(err, CadError::UnknownField { .. }));
    }

    #[test]
    fn test_set_rejects_mismatch_without_mutation() {
        let mut doc = Document::new();
        let ms = doc.model_space();
        let c = doc.add_circle(ms, Vector3::ZERO, 2.0).unwrap();

        let err = set_field(
            &mut doc,
            c,
            "radius",
            FieldValue::Text("huge".to_string()),
            false,
        )
        .unwrap_err();
        assert!(matches!(err, CadError::KindMismatch { .. }));

        let v = get_field(&doc, c, "radius", KindFamily::Real).unwrap();
        assert_eq!(v, FieldValue::Real(2.0));
    }

    #[test]
    fn test_set_as_text_reencodes() {
        let mut doc = Document::with_version(CadVersion::AC1015);
        let ms = doc.model_space();
        let t = doc
            .add_text(ms, "placeholder", crate::types::Vector2::ZERO, 2.5)
            .unwrap();

        // Ω is not representable in the ANSI_1252 storage of an AC1015 doc
        set_field(
            &mut doc,
            t,
            "text_value",
            FieldValue::Text("Ω".to_string()),
            true,
        )
        .unwrap();
        let v = get_field(&doc, t, "text_value", KindFamily::Text).unwrap();
        assert_ne!(v, FieldValue::Text("Ω".to_string()));
    }
}
