//! Generic field accessor integration tests.
//!
//! Exercises the schema-driven facade: kind-family validation, failure
//! without mutation, and the version-dependent string paths.

use anyhow::Result;
use dwggraph::{
    get_field, set_field, CadError, CadVersion, Document, FieldValue, KindFamily, Vector2,
    Vector3,
};

#[test]
fn scenario_c_radius_kind_check() -> Result<()> {
    let mut doc = Document::new();
    let ms = doc.model_space();
    let circle = doc.add_circle(ms, Vector3::new(3.0, 4.0, 0.0), 7.25)?;

    // requested as a 3D point: rejected
    let err = get_field(&doc, circle, "radius", KindFamily::Point3).unwrap_err();
    assert!(matches!(err, CadError::KindMismatch { .. }));

    // requested as a real: the stored value
    assert_eq!(
        get_field(&doc, circle, "radius", KindFamily::Real)?,
        FieldValue::Real(7.25)
    );
    Ok(())
}

#[test]
fn declared_real_through_text_family_fails_without_mutation() -> Result<()> {
    let mut doc = Document::new();
    let ms = doc.model_space();
    let circle = doc.add_circle(ms, Vector3::ZERO, 2.0)?;

    let err = get_field(&doc, circle, "radius", KindFamily::Text).unwrap_err();
    assert!(matches!(err, CadError::KindMismatch { .. }));

    let err = set_field(
        &mut doc,
        circle,
        "radius",
        FieldValue::Text("2 meters".to_string()),
        true,
    )
    .unwrap_err();
    assert!(matches!(err, CadError::KindMismatch { .. }));

    // untouched by the failed accesses
    assert_eq!(
        get_field(&doc, circle, "radius", KindFamily::Real)?,
        FieldValue::Real(2.0)
    );
    Ok(())
}

#[test]
fn point_families_are_distinguished() -> Result<()> {
    let mut doc = Document::new();
    let ms = doc.model_space();

    // TEXT's insertion point is declared 2D; LINE endpoints 3D
    let text = doc.add_text(ms, "label", Vector2::new(1.0, 2.0), 2.5)?;
    let line = doc.add_line(ms, Vector3::ZERO, Vector3::new(9.0, 0.0, 0.0))?;

    assert_eq!(
        get_field(&doc, text, "insertion_point", KindFamily::Point2)?,
        FieldValue::Point2(Vector2::new(1.0, 2.0))
    );
    let err = get_field(&doc, text, "insertion_point", KindFamily::Point3).unwrap_err();
    assert!(matches!(err, CadError::KindMismatch { .. }));

    assert_eq!(
        get_field(&doc, line, "end_point", KindFamily::Point3)?,
        FieldValue::Point3(Vector3::new(9.0, 0.0, 0.0))
    );
    let err = get_field(&doc, line, "end_point", KindFamily::Point2).unwrap_err();
    assert!(matches!(err, CadError::KindMismatch { .. }));
    Ok(())
}

#[test]
fn integer_widths_are_distinguished() -> Result<()> {
    let mut doc = Document::new();
    let ms = doc.model_space();
    let text = doc.add_text(ms, "label", Vector2::ZERO, 2.5)?;

    set_field(&mut doc, text, "generation", FieldValue::Int16(4), false)?;
    assert_eq!(
        get_field(&doc, text, "generation", KindFamily::Int16)?,
        FieldValue::Int16(4)
    );
    let err = get_field(&doc, text, "generation", KindFamily::Int32).unwrap_err();
    assert!(matches!(err, CadError::KindMismatch { .. }));

    // the modeler-space 32-bit storage answers to the Int32 family
    let pl = doc.add_polyline_2d(ms)?;
    let v = doc.add_vertex_2d(pl, Vector3::ZERO)?;
    set_field(&mut doc, v, "vertex_id", FieldValue::Int32(1000), false)?;
    assert_eq!(
        get_field(&doc, v, "vertex_id", KindFamily::Int32)?,
        FieldValue::Int32(1000)
    );
    Ok(())
}

#[test]
fn unknown_fields_are_reported_per_type() {
    let mut doc = Document::new();
    let ms = doc.model_space();
    let circle = doc.add_circle(ms, Vector3::ZERO, 1.0).unwrap();

    let err = get_field(&doc, circle, "start_point", KindFamily::Point3).unwrap_err();
    match err {
        CadError::UnknownField { type_name, field } => {
            assert_eq!(type_name, "CIRCLE");
            assert_eq!(field, "start_point");
        }
        other => panic!("expected UnknownField, got {other:?}"),
    }

    let missing = dwggraph::Handle::new(0x70000);
    let err = get_field(&doc, missing, "radius", KindFamily::Real).unwrap_err();
    assert!(matches!(err, CadError::RecordNotFound(_)));
}

#[test]
fn string_reads_return_owned_copies_in_both_version_paths() -> Result<()> {
    for version in [CadVersion::AC1015, CadVersion::AC1032] {
        let mut doc = Document::with_version(version);
        let ms = doc.model_space();
        let t = doc.add_text(ms, "résumé", Vector2::ZERO, 1.0)?;

        let first = get_field(&doc, t, "text_value", KindFamily::Text)?;
        let second = get_field(&doc, t, "text_value", KindFamily::Text)?;
        // both reads hold independent owned values
        assert_eq!(first, second);
        assert_eq!(first, FieldValue::Text("résumé".to_string()));
    }
    Ok(())
}

#[test]
fn string_writes_stay_version_consistent() -> Result<()> {
    // modern document: unicode survives a write/read cycle
    let mut modern = Document::new();
    let ms = modern.model_space();
    let t = modern.add_text(ms, "x", Vector2::ZERO, 1.0)?;
    set_field(
        &mut modern,
        t,
        "text_value",
        FieldValue::Text("Ω 直径".to_string()),
        true,
    )?;
    assert_eq!(
        get_field(&modern, t, "text_value", KindFamily::Text)?,
        FieldValue::Text("Ω 直径".to_string())
    );

    // legacy document: the same write degrades through the code page and
    // later reads see the stored form
    let mut legacy = Document::with_version(CadVersion::AC1015);
    let ms = legacy.model_space();
    let t = legacy.add_text(ms, "x", Vector2::ZERO, 1.0)?;
    set_field(
        &mut legacy,
        t,
        "text_value",
        FieldValue::Text("Ω 直径".to_string()),
        true,
    )?;
    let stored = get_field(&legacy, t, "text_value", KindFamily::Text)?;
    assert_ne!(stored, FieldValue::Text("Ω 直径".to_string()));
    Ok(())
}

#[test]
fn table_record_names_readable_through_the_facade() -> Result<()> {
    let mut doc = Document::new();
    let walls = doc.add_layer("WALLS")?;
    assert_eq!(
        get_field(&doc, walls, "name", KindFamily::Text)?,
        FieldValue::Text("WALLS".to_string())
    );
    Ok(())
}
