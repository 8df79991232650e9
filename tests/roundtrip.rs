use serde_json::json;

use fractree::Session;

#[test]
fn scalars_pass_through() {
    let mut session = Session::new();
    for tree in [json!(null), json!(true), json!(42), json!("hello")] {
        let envelope = session.compress(&tree, "root");
        let restored = session.decompress(&envelope.to_value()).unwrap();
        assert_eq!(restored, tree);
    }
}

#[test]
fn plain_tree_roundtrip_identity() {
    let tree = json!({
        "alpha": 1,
        "beta": [1, 2, 3],
        "gamma": { "delta": "hi", "eps": null },
    });
    let mut session = Session::new();
    let envelope = session.compress(&tree, "root");
    let restored = session.decompress(&envelope.to_value()).unwrap();
    assert_eq!(restored, tree);
}

#[test]
fn field_order_is_preserved() {
    let tree = json!({ "z": 1, "a": 2, "m": 3 });
    let mut session = Session::new();
    let envelope = session.compress(&tree, "root");
    let restored = session.decompress(&envelope.to_value()).unwrap();
    assert_eq!(
        serde_json::to_string(&restored).unwrap(),
        serde_json::to_string(&tree).unwrap()
    );
}

// The worked example: `a` must tile, `c` must dedup against `b`, and the
// whole structure must restore exactly.
#[test]
fn combined_pattern_and_anchor_example() {
    let record = json!({ "x": 1, "y": 2, "z": 3, "w": 4, "v": 5 });
    let tree = json!({ "a": [1, 1, 1, 1], "b": record, "c": record });

    let mut session = Session::new();
    let (envelope, stats) = session.compress_with_stats(&tree, "root");
    assert_eq!(stats.pattern_reuse, 1);
    assert_eq!(stats.anchor_references, 1);

    let content = envelope.content.as_object().unwrap();
    let a = content.get("⇌a").unwrap().as_object().unwrap();
    assert_eq!(a.get("∴count").unwrap(), &json!(4));
    let c = content.get("⧖c").unwrap().as_object().unwrap();
    assert_eq!(c.get("☍anchor").unwrap(), &json!("root.b"));

    let restored = session.decompress(&envelope.to_value()).unwrap();
    assert_eq!(restored, tree);
}

#[test]
fn one_shot_helpers_roundtrip_without_patterns() {
    let tree = json!({ "k1": "one", "k2": [true, false, null] });
    let envelope = fractree::compress(&tree);
    let restored = fractree::decompress(&envelope.to_value()).unwrap();
    assert_eq!(restored, tree);
}
