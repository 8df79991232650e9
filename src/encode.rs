//! Recursive encoder.
//!
//! Depth is checked before type dispatch, so any subtree sitting at the
//! limit collapses to a truncation marker regardless of its kind. The
//! encoder cannot fail; truncation and fallback to elementwise encoding
//! are ordinary outcomes, not errors.

use std::collections::HashMap;

use log::debug;
use serde_json::{json, Map, Value};

use crate::config::Config;
use crate::pattern::{detect_patterns, pattern_id, PatternRegistry, TilePattern};
use crate::size::{canonical, content_hash, size_of};
use crate::stats::CompressionStats;
use crate::tag::{
    KeyTag, MARKER_ANCHOR, MARKER_ANCHOR_ID, MARKER_COUNT, MARKER_PATH, MARKER_PATTERN,
    MARKER_SAMPLE, MARKER_SIZE, MARKER_TRUNCATED,
};

/// Per-call encoder state. A fresh context is built for every
/// `compress` call; only the pattern registry and the minted-anchor map
/// outlive it, on the session.
pub(crate) struct EncodeCtx<'a> {
    config: &'a Config,
    patterns: &'a mut PatternRegistry,
    minted: &'a mut HashMap<String, String>,
    /// Content hash of each record seen this call, mapped to the path
    /// where it first appeared. First sighting wins.
    anchors: HashMap<String, String>,
    pub(crate) stats: CompressionStats,
}

impl<'a> EncodeCtx<'a> {
    pub(crate) fn new(
        config: &'a Config,
        patterns: &'a mut PatternRegistry,
        minted: &'a mut HashMap<String, String>,
    ) -> Self {
        Self {
            config,
            patterns,
            minted,
            anchors: HashMap::new(),
            stats: CompressionStats::default(),
        }
    }

    /// Encode `node` rooted at `path`.
    pub(crate) fn encode_node(&mut self, node: &Value, path: &str, depth: usize) -> Value {
        if depth >= self.config.max_depth {
            return json!({ MARKER_TRUNCATED: true, MARKER_PATH: path });
        }
        match node {
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => node.clone(),
            Value::Array(items) => self.encode_array(items, path, depth),
            Value::Object(fields) => self.encode_record(node, fields, path, depth),
        }
    }

    fn encode_array(&mut self, items: &[Value], path: &str, depth: usize) -> Value {
        let candidates = detect_patterns(items);
        if let Some(best) = candidates.first() {
            if self.accept_pattern(best) {
                let id = pattern_id(&best.sequence);
                debug!(
                    "pattern {} adopted at {path}: period {} x {}",
                    id, best.length, best.repetitions
                );
                self.patterns.insert(id.clone(), best.sequence.clone());
                self.stats.pattern_reuse += 1;
                let sample: Vec<Value> =
                    best.sequence.iter().take(2).cloned().collect();
                return json!({
                    MARKER_PATTERN: id,
                    MARKER_COUNT: best.repetitions,
                    MARKER_SAMPLE: sample,
                });
            }
        }

        let encoded: Vec<Value> = items
            .iter()
            .enumerate()
            .map(|(i, item)| self.encode_node(item, &format!("{path}[{i}]"), depth + 1))
            .collect();
        Value::Array(encoded)
    }

    fn accept_pattern(&self, pattern: &TilePattern) -> bool {
        pattern.repetitions > 1 && pattern.coverage > self.config.pattern_coverage
    }

    fn encode_record(
        &mut self,
        node: &Value,
        fields: &Map<String, Value>,
        path: &str,
        depth: usize,
    ) -> Value {
        let serialized = canonical(node);
        let hash = content_hash(&serialized);

        if let Some(first_seen) = self.anchors.get(&hash) {
            if serialized.len() > self.config.anchor_min_len {
                debug!("anchor ref at {path} -> {first_seen}");
                self.stats.anchor_references += 1;
                return json!({
                    MARKER_ANCHOR: first_seen,
                    MARKER_SIZE: fields.len(),
                });
            }
        }
        self.anchors
            .entry(hash.clone())
            .or_insert_with(|| path.to_string());

        let mut out = Map::new();
        for (key, value) in fields {
            let tagged = KeyTag::for_field(key, value).apply(key);
            let encoded = self.encode_node(value, &format!("{path}.{key}"), depth + 1);
            out.insert(tagged, encoded);
        }

        // Anchor-eligible records advertise their own id so that later
        // references can resolve against them.
        if fields.len() >= self.config.anchor_field_threshold {
            out.insert(MARKER_ANCHOR_ID.to_string(), Value::String(path.to_string()));
            self.minted.insert(path.to_string(), hash);
        }

        Value::Object(out)
    }

    /// Finish the call: measure both sides and return the counters.
    pub(crate) fn finish(mut self, original: &Value, compressed: &Value) -> CompressionStats {
        self.stats.original_size = size_of(original);
        self.stats.compressed_size = size_of(compressed);
        self.stats
    }
}
