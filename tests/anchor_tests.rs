use serde_json::json;

use fractree::Session;

fn wide_record() -> serde_json::Value {
    json!({ "x": 1, "y": 2, "z": 3, "w": 4, "v": 5 })
}

#[test]
fn duplicate_record_becomes_anchor_ref() {
    let tree = json!({ "b": wide_record(), "c": wide_record() });
    let mut session = Session::new();
    let (envelope, stats) = session.compress_with_stats(&tree, "root");
    assert_eq!(stats.anchor_references, 1);

    let content = envelope.content.as_object().unwrap();
    let b = content.get("⧖b").unwrap().as_object().unwrap();
    assert_eq!(b.get("⧖anchor_id").unwrap(), &json!("root.b"));
    let c = content.get("⧖c").unwrap().as_object().unwrap();
    assert_eq!(c.get("☍anchor").unwrap(), &json!("root.b"));
    assert_eq!(c.get("⧖size").unwrap(), &json!(5));

    let restored = session.decompress(&envelope.to_value()).unwrap();
    assert_eq!(restored, tree);
}

#[test]
fn later_duplicates_reference_first_seen_path() {
    let tree = json!({ "b": wide_record(), "c": wide_record(), "d": wide_record() });
    let mut session = Session::new();
    let (envelope, stats) = session.compress_with_stats(&tree, "root");
    assert_eq!(stats.anchor_references, 2);

    let content = envelope.content.as_object().unwrap();
    for key in ["⧖c", "⧖d"] {
        let r = content.get(key).unwrap().as_object().unwrap();
        assert_eq!(r.get("☍anchor").unwrap(), &json!("root.b"));
    }

    let restored = session.decompress(&envelope.to_value()).unwrap();
    assert_eq!(restored, tree);
}

// A duplicate whose canonical form fits in 20 chars is cheaper inline.
#[test]
fn short_duplicates_are_not_referenced() {
    let tree = json!({ "b": { "x": 1 }, "c": { "x": 1 } });
    let mut session = Session::new();
    let (envelope, stats) = session.compress_with_stats(&tree, "root");
    assert_eq!(stats.anchor_references, 0);

    let restored = session.decompress(&envelope.to_value()).unwrap();
    assert_eq!(restored, tree);
}

// Anchor eligibility comes from field count alone, duplication or not.
#[test]
fn wide_record_gets_anchor_id_without_duplicates() {
    let tree = wide_record();
    let mut session = Session::new();
    let envelope = session.compress(&tree, "root");

    let content = envelope.content.as_object().unwrap();
    assert_eq!(content.get("⧖anchor_id").unwrap(), &json!("root"));
    assert!(session.anchor_points().contains_key("root"));

    let restored = session.decompress(&envelope.to_value()).unwrap();
    assert_eq!(restored, tree);
}

#[test]
fn narrow_record_gets_no_anchor_id() {
    let tree = json!({ "x": 1, "y": 2 });
    let envelope = Session::new().compress(&tree, "root");
    assert!(envelope
        .content
        .as_object()
        .unwrap()
        .get("⧖anchor_id")
        .is_none());
}

// A duplicate long enough to reference but too narrow to carry an
// anchor id has no resolvable definition; decode degrades to the
// placeholder even in a same-session round trip.
#[test]
fn long_narrow_duplicate_degrades_to_placeholder() {
    let record = json!({ "x": "aaaaaaaaaaaaaaaaaaaaaaaa" });
    let tree = json!({ "b": record.clone(), "c": record.clone() });
    let mut session = Session::new();
    let (envelope, stats) = session.compress_with_stats(&tree, "root");
    assert_eq!(stats.anchor_references, 1);

    let restored = session.decompress(&envelope.to_value()).unwrap();
    assert_eq!(restored.get("b").unwrap(), &record);
    assert_eq!(
        restored.get("c").unwrap(),
        &json!({ "$unresolved_anchor": "root.b", "size": 1 })
    );
}

// References with no preceding definition decode to the documented
// placeholder instead of erroring.
#[test]
fn forward_reference_yields_placeholder() {
    let blob = json!({
        "$fractal": {},
        "content": { "☍anchor": "root.ghost", "⧖size": 5 },
    });
    let restored = Session::new().decompress(&blob).unwrap();
    assert_eq!(
        restored,
        json!({ "$unresolved_anchor": "root.ghost", "size": 5 })
    );
}

#[test]
fn placeholder_size_defaults_to_zero() {
    let blob = json!({
        "$fractal": {},
        "content": { "☍anchor": "root.ghost" },
    });
    let restored = Session::new().decompress(&blob).unwrap();
    assert_eq!(
        restored,
        json!({ "$unresolved_anchor": "root.ghost", "size": 0 })
    );
}

#[test]
fn resolved_references_are_counted() {
    let tree = json!({ "b": wide_record(), "c": wide_record() });
    let mut session = Session::new();
    let envelope = session.compress(&tree, "root");
    let (_, stats) = session
        .decompress_with_stats(&envelope.to_value())
        .unwrap();
    assert_eq!(stats.references_resolved, 1);
}
