//! Structural compressor for nested tree data.
//!
//! Two redundancy patterns drive the encoding: exact tiling repetition
//! inside arrays becomes a pattern reference, and duplicate records
//! across the document become anchor references to the first sighting.
//! The result is a self-describing envelope that [`Session::decompress`]
//! expands back into a structurally equivalent tree.
//!
//! Inputs must be tree shaped, produced by a single top-down traversal:
//! no cycles, and no reference resolving before its definition. Decoded
//! output is best effort when that precondition is broken; see
//! [`decode`] for the degradation rules.

pub mod config;
pub mod decode;
pub mod encode;
pub mod envelope;
pub mod error;
pub mod io_utils;
pub mod pattern;
pub mod session;
pub mod size;
pub mod stats;
pub mod tag;

pub use config::Config;
pub use envelope::{Envelope, FractalMeta, FORMAT_VERSION};
pub use error::FractreeError;
pub use pattern::{detect_patterns, pattern_id, PatternRegistry, TilePattern};
pub use session::Session;
pub use size::{canonical, content_hash, size_of};
pub use stats::{CompressionStats, DecodeStats};
pub use tag::{strip_tag, KeyTag, ESCAPE_GLYPH};

use serde_json::Value;

/// One-shot compression with a fresh session and default configuration.
///
/// The session (and its pattern registry) is dropped afterwards, so a
/// later [`decompress`] of the result expands pattern references only
/// to their stored samples. Hold a [`Session`] across both calls when
/// exact expansion matters.
pub fn compress(tree: &Value) -> Envelope {
    Session::new().compress(tree, "root")
}

/// One-shot decompression with a fresh session.
pub fn decompress(blob: &Value) -> Result<Value, FractreeError> {
    Session::new().decompress(blob)
}
