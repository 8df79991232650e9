//! The caller-owned compression session.
//!
//! A `Session` replaces hidden instance globals with explicit state: the
//! pattern registry and the minted-anchor map live here and persist
//! across calls, while everything per-call (depth, the anchor-seen map,
//! the counters) is rebuilt for each invocation. A pattern reference in
//! a blob carries only a two-element sample, so full expansion requires
//! either the session that encoded it or a registry reloaded via
//! [`PatternRegistry::load`]. Sessions are not shared between threads;
//! use one per thread or serialize access.

use std::collections::HashMap;

use serde_json::Value;

use crate::config::Config;
use crate::decode::DecodeCtx;
use crate::encode::EncodeCtx;
use crate::envelope::{Envelope, FractalMeta};
use crate::error::FractreeError;
use crate::pattern::PatternRegistry;
use crate::stats::{CompressionStats, DecodeStats};

#[derive(Debug, Default)]
pub struct Session {
    config: Config,
    patterns: PatternRegistry,
    /// Anchor ids minted so far, mapped to the content hash of their
    /// defining record. Grows across calls until [`reset`](Self::reset).
    anchor_points: HashMap<String, String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: Config) -> Result<Self, FractreeError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn patterns(&self) -> &PatternRegistry {
        &self.patterns
    }

    pub fn patterns_mut(&mut self) -> &mut PatternRegistry {
        &mut self.patterns
    }

    pub fn anchor_points(&self) -> &HashMap<String, String> {
        &self.anchor_points
    }

    /// Drop all accumulated cross-call state.
    pub fn reset(&mut self) {
        self.patterns.clear();
        self.anchor_points.clear();
    }

    /// Compress `tree`, naming its root `name` for path derivation.
    pub fn compress(&mut self, tree: &Value, name: &str) -> Envelope {
        self.compress_with_stats(tree, name).0
    }

    /// Compress and also return the raw per-call counters.
    pub fn compress_with_stats(&mut self, tree: &Value, name: &str) -> (Envelope, CompressionStats) {
        let mut ctx = EncodeCtx::new(&self.config, &mut self.patterns, &mut self.anchor_points);
        let content = ctx.encode_node(tree, name, 0);
        let stats = ctx.finish(tree, &content);
        let envelope = Envelope {
            fractal: FractalMeta::from_stats(&stats),
            content,
        };
        (envelope, stats)
    }

    /// Expand a blob back into a tree.
    ///
    /// Fails only on a structurally invalid envelope. Unresolvable
    /// anchor or pattern references degrade to placeholders instead of
    /// erroring, so the output may be partial.
    pub fn decompress(&self, blob: &Value) -> Result<Value, FractreeError> {
        self.decompress_with_stats(blob).map(|(tree, _)| tree)
    }

    /// Expand a blob and report how many references were resolved.
    pub fn decompress_with_stats(
        &self,
        blob: &Value,
    ) -> Result<(Value, DecodeStats), FractreeError> {
        let envelope = Envelope::from_value(blob)?;
        Ok(self.expand(&envelope))
    }

    /// Expand an already-validated envelope.
    pub fn expand(&self, envelope: &Envelope) -> (Value, DecodeStats) {
        let mut ctx = DecodeCtx::new(&self.patterns);
        let tree = ctx.decode_node(&envelope.content);
        (tree, ctx.stats)
    }
}
