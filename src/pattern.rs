//! Array tiling detection and the pattern registry.

use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;

use crate::error::FractreeError;
use crate::size::{canonical, content_hash, deep_eq};

/// A repeating unit that exactly tiles an array.
#[derive(Debug, Clone)]
pub struct TilePattern {
    /// The repeating unit itself, stored uncompressed.
    pub sequence: Vec<Value>,
    /// Period, in elements.
    pub length: usize,
    /// Number of times the unit tiles the array.
    pub repetitions: usize,
    /// Fraction of the array covered by full tilings. Always 1.0 for an
    /// accepted candidate, since ragged tails reject the candidate.
    pub coverage: f64,
}

/// Find every period that exactly tiles `array`.
///
/// Candidates are returned best coverage first; the sort is stable, so
/// among the all-1.0 survivors the shortest period stays in front and
/// is the one the encoder adopts.
pub fn detect_patterns(array: &[Value]) -> Vec<TilePattern> {
    let mut patterns = Vec::new();

    for len in 1..=array.len() / 2 {
        let unit = &array[..len];
        let mut repetitions = 0usize;
        let mut matches = true;

        for chunk in array.chunks(len) {
            if chunk.len() == len && chunk.iter().zip(unit).all(|(a, b)| deep_eq(a, b)) {
                repetitions += 1;
            } else {
                matches = false;
                break;
            }
        }

        if matches && repetitions > 1 {
            patterns.push(TilePattern {
                sequence: unit.to_vec(),
                length: len,
                repetitions,
                coverage: (repetitions * len) as f64 / array.len() as f64,
            });
        }
    }

    patterns.sort_by(|a, b| {
        b.coverage
            .partial_cmp(&a.coverage)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    patterns
}

/// Mint the identifier under which a unit is registered.
pub fn pattern_id(sequence: &[Value]) -> String {
    let serialized = canonical(&Value::Array(sequence.to_vec()));
    format!("pattern_{}", content_hash(&serialized))
}

/// Registered repeating units, keyed by pattern id.
///
/// The registry belongs to a [`Session`](crate::Session) and persists
/// across calls; a pattern reference in a blob only names its unit, so
/// expansion needs the registry that was live when the blob was
/// encoded, or one reloaded from disk.
#[derive(Debug, Clone, Default)]
pub struct PatternRegistry {
    entries: HashMap<String, Vec<Value>>,
}

impl PatternRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a unit under `id`. Re-registering the same unit is a
    /// no-op since ids are content derived.
    pub fn insert(&mut self, id: String, sequence: Vec<Value>) {
        self.entries.insert(id, sequence);
    }

    pub fn get(&self, id: &str) -> Option<&[Value]> {
        self.entries.get(id).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Serialize the registry to disk as JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), FractreeError> {
        let data = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(path, data)?;
        Ok(())
    }

    /// Load a registry previously written by [`save`](Self::save).
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, FractreeError> {
        let data = std::fs::read_to_string(&path)?;
        let entries: HashMap<String, Vec<Value>> = serde_json::from_str(&data)
            .map_err(|e| FractreeError::Registry(format!("invalid registry file: {e}")))?;
        Ok(Self { entries })
    }
}
