//! Canonical serialization, the size estimator and content hashing.
//!
//! Both sides of the compression ratio are measured the same way: the
//! character length of the compact JSON form with record field order
//! preserved. Content hashes are truncated SHA-256 digests rendered as
//! hex, which keeps pattern and anchor identifiers short but stable.

use serde_json::Value;
use sha2::{Digest, Sha256};

/// Number of digest bytes kept when minting content identifiers.
pub const HASH_PREFIX_BYTES: usize = 8;

/// Compact serialization with insertion order preserved.
///
/// Serializing a `Value` cannot fail, so this is infallible.
pub fn canonical(node: &Value) -> String {
    serde_json::to_string(node).expect("JSON value serialization is infallible")
}

/// Canonical size estimate used for both original and compressed sizes.
pub fn size_of(node: &Value) -> usize {
    canonical(node).len()
}

/// Truncated hex SHA-256 of an arbitrary string.
pub fn content_hash(data: &str) -> String {
    let digest = Sha256::digest(data.as_bytes());
    hex::encode(&digest[..HASH_PREFIX_BYTES])
}

/// Deep equality as the codec defines it: scalars by value, composites
/// by canonical serialization.
pub fn deep_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Array(_) | Value::Object(_), _) | (_, Value::Array(_) | Value::Object(_)) => {
            canonical(a) == canonical(b)
        }
        _ => a == b,
    }
}
