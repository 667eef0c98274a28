use crate::core::forcefield::params::TopologyParams;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

pub const DEFAULT_NATIVE_CUTOFF: f64 = 6.5;
pub const DEFAULT_MIN_SEQUENCE_SEPARATION: usize = 4;

/// Settings of the native-contact search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NativeConfig {
    /// Contact threshold in Angstroms; a pair is native when its distance is below it.
    pub cutoff: f64,
    /// Minimum sequence separation for pairs within one chain.
    pub min_sequence_separation: usize,
    /// Compare representative particles instead of the closest heavy atoms.
    pub use_representative_distance: bool,
}

impl Default for NativeConfig {
    fn default() -> Self {
        Self {
            cutoff: DEFAULT_NATIVE_CUTOFF,
            min_sequence_separation: DEFAULT_MIN_SEQUENCE_SEPARATION,
            use_representative_distance: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TopologyConfig {
    /// Which model of the structure to convert (0-based).
    pub model_index: usize,
    pub native: NativeConfig,
    pub params: TopologyParams,
}

#[derive(Default)]
pub struct TopologyConfigBuilder {
    model_index: Option<usize>,
    native_cutoff: Option<f64>,
    min_sequence_separation: Option<usize>,
    use_representative_distance: Option<bool>,
    params: Option<TopologyParams>,
}

impl TopologyConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn model_index(mut self, index: usize) -> Self {
        self.model_index = Some(index);
        self
    }
    pub fn native_cutoff(mut self, cutoff: f64) -> Self {
        self.native_cutoff = Some(cutoff);
        self
    }
    pub fn min_sequence_separation(mut self, separation: usize) -> Self {
        self.min_sequence_separation = Some(separation);
        self
    }
    pub fn use_representative_distance(mut self, enabled: bool) -> Self {
        self.use_representative_distance = Some(enabled);
        self
    }
    pub fn params(mut self, params: TopologyParams) -> Self {
        self.params = Some(params);
        self
    }

    /// Builds the configuration; unset values take their defaults.
    pub fn build(self) -> Result<TopologyConfig, ConfigError> {
        let defaults = NativeConfig::default();
        let cutoff = self.native_cutoff.unwrap_or(defaults.cutoff);
        if !(cutoff.is_finite() && cutoff > 0.0) {
            return Err(ConfigError::InvalidParameter {
                name: "native_cutoff",
                reason: format!("must be a positive distance, got {}", cutoff),
            });
        }

        Ok(TopologyConfig {
            model_index: self.model_index.unwrap_or(0),
            native: NativeConfig {
                cutoff,
                min_sequence_separation: self
                    .min_sequence_separation
                    .unwrap_or(defaults.min_sequence_separation),
                use_representative_distance: self
                    .use_representative_distance
                    .unwrap_or(defaults.use_representative_distance),
            },
            params: self.params.unwrap_or_default(),
        })
    }
}
