use crate::error::FractreeError;

/// Runtime configuration parameters for the encoder and decoder.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum recursion depth before a subtree is truncated.
    pub max_depth: usize,
    /// Minimum tiling coverage required before a pattern reference is
    /// emitted. Exact tilings always have coverage 1.0, so any value
    /// below 1.0 leaves the gate effectively at "repetitions > 1".
    pub pattern_coverage: f64,
    /// Number of own fields at which a record is assigned an anchor id.
    pub anchor_field_threshold: usize,
    /// Minimum canonical serialization length before a duplicate record
    /// is replaced by an anchor reference.
    pub anchor_min_len: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_depth: 10,
            pattern_coverage: 0.7,
            anchor_field_threshold: 5,
            anchor_min_len: 20,
        }
    }
}

impl Config {
    /// Reject parameter combinations the codec cannot operate under.
    pub fn validate(&self) -> Result<(), FractreeError> {
        if self.max_depth == 0 {
            return Err(FractreeError::Config("max_depth must be at least 1".into()));
        }
        if !(0.0..=1.0).contains(&self.pattern_coverage) {
            return Err(FractreeError::Config(format!(
                "pattern_coverage {} outside 0.0..=1.0",
                self.pattern_coverage
            )));
        }
        if self.anchor_field_threshold == 0 {
            return Err(FractreeError::Config(
                "anchor_field_threshold must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
