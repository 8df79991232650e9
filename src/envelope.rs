//! The self-describing wrapper around an encoded tree.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::FractreeError;
use crate::stats::CompressionStats;

/// Version string written into every envelope.
pub const FORMAT_VERSION: &str = "1.0.0";

/// Statistics block stored under the `$fractal` key.
///
/// Every field defaults so that foreign or hand-built metadata never
/// fails structural validation; only a missing `$fractal` or `content`
/// key is a hard error.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FractalMeta {
    #[serde(default)]
    pub version: String,
    #[serde(rename = "compressionRatio", default)]
    pub compression_ratio: f64,
    #[serde(rename = "patternReuse", default)]
    pub pattern_reuse: usize,
    #[serde(rename = "anchorReferences", default)]
    pub anchor_references: usize,
    #[serde(rename = "compressionEfficiency", default)]
    pub compression_efficiency: f64,
}

impl FractalMeta {
    pub(crate) fn from_stats(stats: &CompressionStats) -> Self {
        Self {
            version: FORMAT_VERSION.to_string(),
            compression_ratio: stats.ratio(),
            pattern_reuse: stats.pattern_reuse,
            anchor_references: stats.anchor_references,
            compression_efficiency: stats.efficiency(),
        }
    }
}

/// A compressed tree plus its metadata, as produced by
/// [`Session::compress`](crate::Session::compress).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(rename = "$fractal")]
    pub fractal: FractalMeta,
    pub content: Value,
}

impl Envelope {
    /// Validate and parse a blob. Missing `$fractal` or `content` is a
    /// structural error; anything else is accepted.
    pub fn from_value(blob: &Value) -> Result<Self, FractreeError> {
        let map = blob
            .as_object()
            .ok_or_else(|| FractreeError::Envelope("blob is not a JSON object".into()))?;
        let meta = map
            .get("$fractal")
            .ok_or_else(|| FractreeError::Envelope("missing $fractal metadata".into()))?;
        let content = map
            .get("content")
            .ok_or_else(|| FractreeError::Envelope("missing content".into()))?;
        let fractal = serde_json::from_value(meta.clone()).unwrap_or_default();
        Ok(Self {
            fractal,
            content: content.clone(),
        })
    }

    /// Serialize to the interchange JSON form.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).expect("envelope serialization is infallible")
    }
}
