//! Document graph integration tests.
//!
//! Exercises the ownership, chain, terminator and dictionary invariants
//! end to end, through the public builder surface only.

use dwggraph::entities::EntityData;
use dwggraph::objects::ObjectData;
use dwggraph::tables::TableKind;
use dwggraph::{acis, CadError, Document, Handle, RecordKind, Vector3};

/// Walk every record of a document and check ownership totality by hand:
/// every non-root record's owner resolves, and owning containers list the
/// record among their members.
fn assert_ownership_total(doc: &Document) {
    for record in doc.records() {
        if doc.is_root(record.handle) {
            continue;
        }
        let owner = record.envelope.owner;
        assert!(
            owner.is_owner(),
            "record {} carries a non-owner owner reference",
            record.handle
        );
        let owner_rec = doc
            .record(owner.value)
            .unwrap_or_else(|| panic!("owner of {} does not resolve", record.handle));

        // where the owner is a chain container, its structures must list
        // us: members and brackets via the chain walk, terminators via
        // the owner's seqend slot
        if owner_rec.kind().is_container() && record.is_entity() {
            if record.kind() == RecordKind::Seqend {
                let seqend = match owner_rec.entity() {
                    Some(EntityData::Polyline2D(p)) => p.seqend,
                    Some(EntityData::Polyline3D(p)) => p.seqend,
                    Some(EntityData::Insert(i)) => i.seqend,
                    _ => None,
                };
                assert_eq!(
                    seqend,
                    Some(record.handle),
                    "container {} does not hold terminator {}",
                    owner.value,
                    record.handle
                );
            } else {
                let chained: Vec<Handle> = doc.chain_entities(owner.value).collect();
                assert!(
                    chained.contains(&record.handle),
                    "container {} does not chain {}",
                    owner.value,
                    record.handle
                );
            }
        }
    }
}

#[test]
fn default_document_satisfies_all_invariants() {
    let mut doc = Document::new();
    doc.validate().expect("default document must validate");
    assert_ownership_total(&doc);
    assert!(doc.notifications.is_empty());
}

#[test]
fn scenario_a_polyline_with_two_vertices() {
    let mut doc = Document::new();
    let ms = doc.model_space();

    let pl = doc.add_polyline_2d(ms).unwrap();
    let v1 = doc.add_vertex_2d(pl, Vector3::new(0.0, 0.0, 0.0)).unwrap();
    let v2 = doc.add_vertex_2d(pl, Vector3::new(5.0, 5.0, 0.0)).unwrap();

    let rec = doc.record(pl).unwrap();
    let polyline = match rec.entity().unwrap() {
        EntityData::Polyline2D(p) => p,
        _ => panic!("not a polyline"),
    };

    // owned count covers exactly the two vertices
    assert_eq!(polyline.chain.count, 2);
    assert_eq!(polyline.chain.owned.len(), 2);

    // a terminator exists and closes the sequence
    let seqend = polyline.seqend.expect("first vertex insertion creates the terminator");
    assert_eq!(doc.record(seqend).unwrap().kind(), RecordKind::Seqend);

    // first/last bound the two vertices; the terminator trails them
    assert_eq!(polyline.chain.first, Some(v1));
    assert_eq!(polyline.chain.last, Some(v2));

    // the second vertex's previous sibling is the first
    let v2_rec = doc.record(v2).unwrap();
    assert_eq!(v2_rec.entity().unwrap().common().prev, Some(v1));
    assert_eq!(v2_rec.entity().unwrap().common().next, Some(seqend));

    doc.validate().unwrap();
    assert_ownership_total(&doc);
}

#[test]
fn scenario_b_dictionary_upsert_replaces() {
    let mut doc = Document::new();
    let dict = doc.add_dictionary(Some("ACAD_MATERIAL")).unwrap();

    doc.dict_upsert(dict, "Standard", Handle::new(0x11)).unwrap();
    let before = match doc.record(dict).unwrap().object().unwrap() {
        ObjectData::Dictionary(d) => d.len(),
        _ => panic!(),
    };

    doc.dict_upsert(dict, "Standard", Handle::new(0x99)).unwrap();

    assert_eq!(doc.dict_lookup(dict, "Standard"), Some(Handle::new(0x99)));
    let after = match doc.record(dict).unwrap().object().unwrap() {
        ObjectData::Dictionary(d) => d.len(),
        _ => panic!(),
    };
    assert_eq!(before, after);
    assert_eq!(after, 1);
}

#[test]
fn chain_walk_matches_owned_count() {
    let mut doc = Document::new();
    let ms = doc.model_space();
    for i in 0..12 {
        doc.add_line(
            ms,
            Vector3::new(i as f64, 0.0, 0.0),
            Vector3::new(i as f64, 10.0, 0.0),
        )
        .unwrap();
    }

    let rec = doc.record(ms).unwrap();
    let header = match rec.object().unwrap() {
        ObjectData::BlockHeader(b) => b,
        _ => panic!(),
    };
    assert_eq!(header.chain.count, 12);

    // the walk visits brackets + members, front bracket first
    let walked: Vec<Handle> = doc.chain_entities(ms).collect();
    assert_eq!(walked.len(), 14);
    assert_eq!(walked.first().copied(), header.block_begin);
    assert_eq!(walked.last().copied(), header.block_end);

    doc.validate().unwrap();
}

#[test]
fn terminator_is_unique_per_sequence() {
    let mut doc = Document::new();
    let ms = doc.model_space();
    let pl = doc.add_polyline_2d(ms).unwrap();
    for i in 0..5 {
        doc.add_vertex_2d(pl, Vector3::new(i as f64, 0.0, 0.0)).unwrap();
    }

    let seqends: Vec<Handle> = doc
        .records()
        .filter(|r| r.kind() == RecordKind::Seqend && r.envelope.owner.value == pl)
        .map(|r| r.handle)
        .collect();
    assert_eq!(seqends.len(), 1);

    // positioned after all member vertices
    let walked: Vec<Handle> = doc.chain_entities(pl).collect();
    assert_eq!(walked.len(), 5);
    let last_member = doc.record(*walked.last().unwrap()).unwrap();
    assert_eq!(
        last_member.entity().unwrap().common().next,
        Some(seqends[0])
    );
}

#[test]
fn handles_are_unique_across_the_graph() {
    let mut doc = Document::new();
    let ms = doc.model_space();
    doc.add_block("DOOR").unwrap();
    doc.add_layer("WALLS").unwrap();
    doc.add_circle(ms, Vector3::ZERO, 1.0).unwrap();

    let mut seen = std::collections::HashSet::new();
    for record in doc.records() {
        assert!(record.handle.is_valid());
        assert!(
            seen.insert(record.handle),
            "handle {} assigned twice",
            record.handle
        );
        // the resolver is total over assigned handles
        assert!(doc.resolve(record.handle).is_some());
    }
}

#[test]
fn forward_pointer_reference_is_deferred_not_fatal() {
    let mut doc = Document::new();
    let ms = doc.model_space();

    // insert referencing a block that never gets created
    let phantom = Handle::new(0xAB0DE);
    doc.add_insert(ms, phantom, Vector3::ZERO).unwrap();

    // validation succeeds; the dangling pointer is reported, not fatal
    doc.validate().unwrap();
    assert!(doc
        .notifications
        .iter()
        .any(|n| n.message.contains("0xAB0DE")));
}

#[test]
fn unresolved_owner_reference_is_fatal() {
    let mut doc = Document::new();
    let ms = doc.model_space();
    let line = doc.add_line(ms, Vector3::ZERO, Vector3::ZERO).unwrap();

    // corrupt the owner to a handle that resolves nowhere
    doc.record_mut(line).unwrap().envelope.owner =
        dwggraph::HandleRef::hard_owner(Handle::new(0xFFFF0));

    let err = doc.validate().unwrap_err();
    assert!(matches!(err, CadError::UnresolvedReference(_)));
}

#[test]
fn table_records_hang_off_their_controls() {
    let mut doc = Document::new();
    let walls = doc.add_layer("WALLS").unwrap();

    let control = doc.control_handle(TableKind::Layer);
    assert_eq!(doc.record(walls).unwrap().envelope.owner.value, control);

    let control_rec = doc.record(control).unwrap();
    let entries = match control_rec.object().unwrap() {
        ObjectData::Control(c) => &c.entries,
        _ => panic!(),
    };
    assert!(entries.iter().any(|r| r.value == walls));

    assert_eq!(doc.find_table_record(TableKind::Layer, "walls"), Some(walls));
}

#[test]
fn member_indexing_excludes_brackets_and_terminator() {
    let mut doc = Document::new();
    let ms = doc.model_space();
    let pl = doc.add_polyline_2d(ms).unwrap();
    let v1 = doc.add_vertex_2d(pl, Vector3::ZERO).unwrap();
    let v2 = doc.add_vertex_2d(pl, Vector3::new(1.0, 0.0, 0.0)).unwrap();

    assert_eq!(doc.member_at(pl, 0).unwrap(), v1);
    assert_eq!(doc.member_at(pl, 1).unwrap(), v2);

    // index 2 would be the terminator's slot, but it is not a member
    let err = doc.member_at(pl, 2).unwrap_err();
    assert!(matches!(err, CadError::IndexOutOfRange { index: 2, len: 2 }));
}

#[test]
fn acis_transform_examples() {
    // known fixed points and mirror values, end to end
    assert_eq!(acis::encode(&[10]).blocks, vec![vec![10]]);
    assert_eq!(acis::encode(&[65]).blocks, vec![vec![94]]);

    let payload = b"700 0 1 0\n16 Autodesk AutoCAD 19 ASM 223.0.1.1930 NT 24";
    let once = acis::encode(payload);
    let twice = acis::encode(&once.blocks.concat());
    assert_eq!(twice.blocks.concat(), payload);
}
