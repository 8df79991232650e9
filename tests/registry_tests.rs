use serde_json::json;

use fractree::{FractreeError, PatternRegistry, Session};

#[test]
fn registry_survives_save_and_load() {
    let tree = json!([1, 2, 3, 1, 2, 3, 1, 2, 3]);
    let mut encoder = Session::new();
    let envelope = encoder.compress(&tree, "root");
    assert_eq!(encoder.patterns().len(), 1);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("patterns.json");
    encoder.patterns().save(&path).unwrap();

    let mut decoder = Session::new();
    *decoder.patterns_mut() = PatternRegistry::load(&path).unwrap();
    let restored = decoder.decompress(&envelope.to_value()).unwrap();
    assert_eq!(restored, tree);
}

#[test]
fn loading_garbage_is_a_registry_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("patterns.json");
    std::fs::write(&path, b"not json").unwrap();
    let err = PatternRegistry::load(&path).unwrap_err();
    assert!(matches!(err, FractreeError::Registry(_)));
}

// Registries persist across calls on the same session, so a later
// decompress can expand a pattern registered by an earlier compress.
#[test]
fn patterns_accumulate_across_calls() {
    let mut session = Session::new();
    session.compress(&json!([5, 5, 5, 5]), "first");
    session.compress(&json!(["a", "b", "a", "b"]), "second");
    assert_eq!(session.patterns().len(), 2);

    session.reset();
    assert!(session.patterns().is_empty());
    assert!(session.anchor_points().is_empty());
}

#[test]
fn identical_units_share_one_registry_entry() {
    let mut session = Session::new();
    session.compress(&json!([1, 1, 1, 1]), "first");
    session.compress(&json!([1, 1]), "second");
    assert_eq!(session.patterns().len(), 1);
}
