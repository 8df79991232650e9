//! Key tagging and the marker-key vocabulary of the compressed form.
//!
//! Every record field in the compressed output carries at most one tag
//! glyph in front of its key. Tags are a closed alphabet, so decoding
//! strips them by matching the first character only. An untagged key
//! whose own first character is reserved gets the no-op escape glyph
//! instead, so the decoder always removes exactly one encoder-added
//! character and raw keys survive the round trip.

use serde_json::Value;

/// Marker key carried by a pattern reference.
pub const MARKER_PATTERN: &str = "⧖pattern";
/// Repetition count of a pattern reference.
pub const MARKER_COUNT: &str = "∴count";
/// Two-element sample stored next to a pattern reference.
pub const MARKER_SAMPLE: &str = "☍sample";
/// Marker key carried by an anchor reference.
pub const MARKER_ANCHOR: &str = "☍anchor";
/// Declared field count of an anchor reference.
pub const MARKER_SIZE: &str = "⧖size";
/// Anchor id embedded in an anchor-eligible record.
pub const MARKER_ANCHOR_ID: &str = "⧖anchor_id";
/// Truncation marker for depth-limited subtrees.
pub const MARKER_TRUNCATED: &str = "$truncated";
/// Path field of a truncation marker.
pub const MARKER_PATH: &str = "path";
/// Placeholder key for an anchor reference that could not be resolved.
pub const MARKER_UNRESOLVED: &str = "$unresolved_anchor";

/// No-op discriminant prefixed to untagged keys that start with a
/// reserved character.
pub const ESCAPE_GLYPH: char = '⟁';

fn is_reserved(c: char) -> bool {
    c == ESCAPE_GLYPH || KeyTag::ALPHABET.iter().any(|t| t.glyph() == Some(c))
}

/// Semantic hint attached in front of a record key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTag {
    /// Self-referential value. JSON trees carry no function values, so
    /// the encoder never produces this tag, but the decoder still
    /// strips it.
    SelfRef,
    /// Value is a list.
    BidirFlow,
    /// Value is a record with more than three fields.
    ComplexObj,
    /// Key name mentions an identifier.
    Anchor,
    /// Key name mentions a pattern or template.
    Seed,
    /// Key name mentions recursion.
    Recursive,
    /// No hint.
    None,
}

impl KeyTag {
    /// The full tag alphabet, in decode-strip order.
    pub const ALPHABET: [KeyTag; 6] = [
        KeyTag::SelfRef,
        KeyTag::BidirFlow,
        KeyTag::ComplexObj,
        KeyTag::Anchor,
        KeyTag::Seed,
        KeyTag::Recursive,
    ];

    /// Single discriminant character used in the serialized key.
    pub fn glyph(self) -> Option<char> {
        match self {
            KeyTag::SelfRef => Some('↻'),
            KeyTag::BidirFlow => Some('⇌'),
            KeyTag::ComplexObj => Some('⧖'),
            KeyTag::Anchor => Some('☍'),
            KeyTag::Seed => Some('∴'),
            KeyTag::Recursive => Some('🜏'),
            KeyTag::None => None,
        }
    }

    /// Select the tag for a field, first matching rule wins.
    pub fn for_field(key: &str, value: &Value) -> KeyTag {
        match value {
            Value::Array(_) => return KeyTag::BidirFlow,
            Value::Object(map) if map.len() > 3 => return KeyTag::ComplexObj,
            _ => {}
        }
        if key.contains("id") || key.contains("key") {
            KeyTag::Anchor
        } else if key.contains("pattern") || key.contains("template") {
            KeyTag::Seed
        } else if key.contains("recursive") || key.contains("self") {
            KeyTag::Recursive
        } else {
            KeyTag::None
        }
    }

    /// Prefix `key` with this tag's glyph. Untagged keys that already
    /// begin with a reserved character get the escape glyph instead.
    pub fn apply(self, key: &str) -> String {
        let glyph = match self.glyph() {
            Some(g) => g,
            None => match key.chars().next() {
                Some(first) if is_reserved(first) => ESCAPE_GLYPH,
                _ => return key.to_string(),
            },
        };
        let mut out = String::with_capacity(glyph.len_utf8() + key.len());
        out.push(glyph);
        out.push_str(key);
        out
    }
}

/// Strip the leading encoder-added character from a serialized key:
/// either a tag glyph or the escape glyph. Other keys pass through.
pub fn strip_tag(key: &str) -> &str {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) if is_reserved(first) => chars.as_str(),
        _ => key,
    }
}
