//! Per-call compression and decompression counters.

/// Counters gathered during a single `compress` call.
#[derive(Debug, Clone, Default)]
pub struct CompressionStats {
    /// Canonical size of the input tree.
    pub original_size: usize,
    /// Canonical size of the encoded tree.
    pub compressed_size: usize,
    /// Number of pattern references emitted.
    pub pattern_reuse: usize,
    /// Number of anchor references emitted.
    pub anchor_references: usize,
}

impl CompressionStats {
    /// `compressed / original`. An empty input still serializes to a
    /// nonzero canonical form, so the denominator is never zero.
    pub fn ratio(&self) -> f64 {
        self.compressed_size as f64 / self.original_size as f64
    }

    pub fn efficiency(&self) -> f64 {
        1.0 - self.ratio()
    }

    pub fn report(&self) {
        eprintln!(
            "Compressed {} -> {} chars ({:.2}%), {} pattern refs, {} anchor refs",
            self.original_size,
            self.compressed_size,
            self.ratio() * 100.0,
            self.pattern_reuse,
            self.anchor_references,
        );
    }
}

/// Counters gathered during a single `decompress` call.
#[derive(Debug, Clone, Default)]
pub struct DecodeStats {
    /// Anchor references resolved against a decoded definition.
    pub references_resolved: usize,
    /// Pattern references expanded from the registry.
    pub patterns_expanded: usize,
}
