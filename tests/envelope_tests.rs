use serde_json::json;

use fractree::{Envelope, FractreeError, Session, FORMAT_VERSION};

#[test]
fn empty_blob_is_rejected() {
    let err = Session::new().decompress(&json!({})).unwrap_err();
    assert!(matches!(err, FractreeError::Envelope(_)));
}

#[test]
fn missing_metadata_is_rejected() {
    let err = Session::new()
        .decompress(&json!({ "content": {} }))
        .unwrap_err();
    assert!(matches!(err, FractreeError::Envelope(_)));
}

#[test]
fn missing_content_is_rejected() {
    let err = Session::new()
        .decompress(&json!({ "$fractal": { "version": "1.0.0" } }))
        .unwrap_err();
    assert!(matches!(err, FractreeError::Envelope(_)));
}

#[test]
fn non_object_blob_is_rejected() {
    let err = Session::new().decompress(&json!([1, 2, 3])).unwrap_err();
    assert!(matches!(err, FractreeError::Envelope(_)));
}

#[test]
fn minimal_envelope_is_accepted() {
    let blob = json!({ "$fractal": {}, "content": {} });
    let restored = Session::new().decompress(&blob).unwrap();
    assert_eq!(restored, json!({}));
}

#[test]
fn metadata_carries_version_and_ratio() {
    let tree = json!({ "a": [1, 2, 3], "b": "text" });
    let envelope = Session::new().compress(&tree, "root");
    assert_eq!(envelope.fractal.version, FORMAT_VERSION);
    assert!(envelope.fractal.compression_ratio > 0.0);
    assert_eq!(
        envelope.fractal.compression_efficiency,
        1.0 - envelope.fractal.compression_ratio
    );
}

#[test]
fn envelope_value_shape() {
    let envelope = Session::new().compress(&json!(1), "root");
    let value = envelope.to_value();
    let map = value.as_object().unwrap();
    assert!(map.contains_key("$fractal"));
    assert!(map.contains_key("content"));

    let reparsed = Envelope::from_value(&value).unwrap();
    assert_eq!(reparsed.fractal.version, FORMAT_VERSION);
    assert_eq!(reparsed.content, json!(1));
}
