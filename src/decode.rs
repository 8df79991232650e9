//! Recursive decoder.
//!
//! Dispatch looks for marker keys in priority order: anchor reference,
//! pattern reference, then plain list or record. Missing definitions
//! never abort the walk; they degrade to the documented placeholder or
//! sample, so decoded output must be treated as potentially partial
//! whenever references cross sessions or precede their definitions.

use std::collections::HashMap;

use log::debug;
use serde_json::{json, Map, Value};

use crate::pattern::PatternRegistry;
use crate::stats::DecodeStats;
use crate::tag::{
    strip_tag, MARKER_ANCHOR, MARKER_ANCHOR_ID, MARKER_COUNT, MARKER_PATTERN, MARKER_SAMPLE,
    MARKER_SIZE, MARKER_UNRESOLVED,
};

/// Ceiling on elements produced by one pattern expansion. A corrupted
/// or hostile repeat count yields a truncated expansion instead of an
/// unbounded allocation.
pub const MAX_EXPANSION_ELEMENTS: usize = 1 << 20;

/// Per-call decoder state.
pub(crate) struct DecodeCtx<'a> {
    patterns: &'a PatternRegistry,
    /// Anchor definitions decoded so far, keyed by anchor id. Populated
    /// strictly as defining records finish decoding, which is what makes
    /// define-before-use the only order that resolves.
    resolved: HashMap<String, Value>,
    pub(crate) stats: DecodeStats,
}

impl<'a> DecodeCtx<'a> {
    pub(crate) fn new(patterns: &'a PatternRegistry) -> Self {
        Self {
            patterns,
            resolved: HashMap::new(),
            stats: DecodeStats::default(),
        }
    }

    pub(crate) fn decode_node(&mut self, node: &Value) -> Value {
        match node {
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => node.clone(),
            Value::Array(items) => {
                Value::Array(items.iter().map(|item| self.decode_node(item)).collect())
            }
            Value::Object(fields) => self.decode_object(fields),
        }
    }

    fn decode_object(&mut self, fields: &Map<String, Value>) -> Value {
        if let Some(anchor) = fields.get(MARKER_ANCHOR) {
            return self.decode_anchor_ref(anchor, fields.get(MARKER_SIZE));
        }
        if let Some(id) = fields.get(MARKER_PATTERN).and_then(Value::as_str) {
            return self.decode_pattern_ref(id, fields);
        }
        self.decode_record(fields)
    }

    fn decode_anchor_ref(&mut self, anchor: &Value, declared_size: Option<&Value>) -> Value {
        if let Some(id) = anchor.as_str() {
            if let Some(value) = self.resolved.get(id) {
                self.stats.references_resolved += 1;
                return value.clone();
            }
        }
        debug!("unresolved anchor {anchor}");
        json!({
            MARKER_UNRESOLVED: anchor,
            "size": declared_size.cloned().unwrap_or_else(|| json!(0)),
        })
    }

    fn decode_pattern_ref(&mut self, id: &str, fields: &Map<String, Value>) -> Value {
        let count = fields
            .get(MARKER_COUNT)
            .and_then(Value::as_u64)
            .unwrap_or(1);
        if let Some(unit) = self.patterns.get(id) {
            self.stats.patterns_expanded += 1;
            if unit.is_empty() {
                return Value::Array(Vec::new());
            }
            let max_repeats = (MAX_EXPANSION_ELEMENTS / unit.len()).max(1) as u64;
            let count = count.min(max_repeats) as usize;
            let mut out = Vec::with_capacity(unit.len() * count);
            for _ in 0..count {
                for item in unit {
                    out.push(self.decode_node(item));
                }
            }
            return Value::Array(out);
        }
        // Best effort: the registry that encoded this blob is gone.
        debug!("unknown pattern {id}, falling back to sample");
        fields
            .get(MARKER_SAMPLE)
            .cloned()
            .unwrap_or_else(|| Value::Array(Vec::new()))
    }

    fn decode_record(&mut self, fields: &Map<String, Value>) -> Value {
        let mut out = Map::new();
        let mut anchor_id = None;

        for (key, value) in fields {
            if key == MARKER_ANCHOR_ID {
                anchor_id = value.as_str().map(str::to_string);
                continue;
            }
            out.insert(strip_tag(key).to_string(), self.decode_node(value));
        }

        let record = Value::Object(out);
        if let Some(id) = anchor_id {
            self.resolved.insert(id, record.clone());
        }
        record
    }
}
