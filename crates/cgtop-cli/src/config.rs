use crate::cli::TopologyArgs;
use crate::error::{CliError, Result};
use cgtop::core::forcefield::params::TopologyParams;
use cgtop::engine::config as core_config;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialInputConfig {
    model: Option<usize>,
    lenient: Option<bool>,
    registry: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialNativeConfig {
    cutoff: Option<f64>,
    #[serde(rename = "min-separation")]
    min_separation: Option<usize>,
    #[serde(rename = "representative-distance")]
    representative_distance: Option<bool>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialForcefieldConfig {
    params: Option<PathBuf>,
}

/// A run configuration as read from TOML; every section and key is optional.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialTopologyConfig {
    input: Option<PartialInputConfig>,
    native: Option<PartialNativeConfig>,
    forcefield: Option<PartialForcefieldConfig>,
}

/// Everything the `topology` command needs after file values and CLI arguments
/// have been merged.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub topology: core_config::TopologyConfig,
    pub lenient: bool,
    pub registry: Option<PathBuf>,
}

impl PartialTopologyConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Merges file values with CLI arguments. Precedence, highest first: dedicated
    /// flags, `-S key=value` overrides, the config file, built-in defaults.
    pub fn merge_with_cli(mut self, args: &TopologyArgs) -> Result<ResolvedConfig> {
        self.apply_set_values(&args.set_values)?;

        let input = self.input.take().unwrap_or_default();
        let native = self.native.take().unwrap_or_default();
        let forcefield = self.forcefield.take().unwrap_or_default();

        let params = match args.params.as_ref().or(forcefield.params.as_ref()) {
            Some(path) => {
                debug!("Loading force constants from {:?}", path);
                TopologyParams::load(path).map_err(|e| CliError::FileParsing {
                    path: path.clone(),
                    source: e.into(),
                })?
            }
            None => TopologyParams::default(),
        };

        let mut builder = core_config::TopologyConfigBuilder::new().params(params);
        if let Some(model) = args.model.or(input.model) {
            builder = builder.model_index(model);
        }
        if let Some(cutoff) = args.cutoff.or(native.cutoff) {
            builder = builder.native_cutoff(cutoff);
        }
        if let Some(separation) = native.min_separation {
            builder = builder.min_sequence_separation(separation);
        }
        if let Some(enabled) = native.representative_distance {
            builder = builder.use_representative_distance(enabled);
        }
        let topology = builder
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        Ok(ResolvedConfig {
            topology,
            lenient: args.input.lenient || input.lenient.unwrap_or(false),
            registry: args.input.registry.clone().or(input.registry),
        })
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let (key, value_str) = kv_pair.split_once('=').ok_or_else(|| {
                CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                ))
            })?;

            match key {
                "native.cutoff" => {
                    self.native.get_or_insert_with(Default::default).cutoff =
                        Some(parse_value(key, value_str, "float")?);
                }
                "native.min-separation" => {
                    self.native
                        .get_or_insert_with(Default::default)
                        .min_separation = Some(parse_value(key, value_str, "integer")?);
                }
                "native.representative-distance" => {
                    self.native
                        .get_or_insert_with(Default::default)
                        .representative_distance = Some(parse_value(key, value_str, "boolean")?);
                }
                "input.model" => {
                    self.input.get_or_insert_with(Default::default).model =
                        Some(parse_value(key, value_str, "integer")?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value.parse().map_err(|_| {
        CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value))
    })
}
