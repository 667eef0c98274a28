use crate::core::models::chain::PolymerType;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Force constants for the bonded terms of one polymer class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BondedParams {
    pub bond_k: f64,
    pub angle_k: f64,
    /// First-harmonic dihedral constant.
    pub dihedral_k1: f64,
    /// Third-harmonic dihedral constant.
    pub dihedral_k3: f64,
}

impl BondedParams {
    pub const PROTEIN: Self = Self {
        bond_k: 100.0,
        angle_k: 20.0,
        dihedral_k1: 1.0,
        dihedral_k3: 0.5,
    };

    pub const NUCLEIC: Self = Self {
        bond_k: 60.0,
        angle_k: 40.0,
        dihedral_k1: 1.0,
        dihedral_k3: 0.5,
    };
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NativeParams {
    /// Well depth assigned to every native contact.
    pub epsilon: f64,
}

impl Default for NativeParams {
    fn default() -> Self {
        Self { epsilon: 1.0 }
    }
}

/// The constants written into a topology alongside the native geometry.
///
/// Every key is optional in the TOML source; anything missing keeps the built-in
/// default of its section.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(from = "PartialTopologyParams")]
pub struct TopologyParams {
    pub protein: BondedParams,
    pub nucleic: BondedParams,
    pub native: NativeParams,
}

impl Default for TopologyParams {
    fn default() -> Self {
        Self {
            protein: BondedParams::PROTEIN,
            nucleic: BondedParams::NUCLEIC,
            native: NativeParams::default(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialBondedParams {
    bond_k: Option<f64>,
    angle_k: Option<f64>,
    dihedral_k1: Option<f64>,
    dihedral_k3: Option<f64>,
}

impl PartialBondedParams {
    fn over(self, base: BondedParams) -> BondedParams {
        BondedParams {
            bond_k: self.bond_k.unwrap_or(base.bond_k),
            angle_k: self.angle_k.unwrap_or(base.angle_k),
            dihedral_k1: self.dihedral_k1.unwrap_or(base.dihedral_k1),
            dihedral_k3: self.dihedral_k3.unwrap_or(base.dihedral_k3),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialNativeParams {
    epsilon: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct PartialTopologyParams {
    #[serde(default)]
    protein: PartialBondedParams,
    #[serde(default)]
    nucleic: PartialBondedParams,
    #[serde(default)]
    native: PartialNativeParams,
}

impl From<PartialTopologyParams> for TopologyParams {
    fn from(partial: PartialTopologyParams) -> Self {
        let defaults = Self::default();
        Self {
            protein: partial.protein.over(defaults.protein),
            nucleic: partial.nucleic.over(defaults.nucleic),
            native: NativeParams {
                epsilon: partial.native.epsilon.unwrap_or(defaults.native.epsilon),
            },
        }
    }
}

#[derive(Debug, Error)]
pub enum ParamLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

impl TopologyParams {
    pub fn load(path: &Path) -> Result<Self, ParamLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| ParamLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ParamLoadError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Bonded constants for chains of the given polymer type.
    ///
    /// Nucleic acids of every flavour share one set; everything else uses the
    /// protein constants.
    pub fn bonded_for(&self, polymer_type: PolymerType) -> &BondedParams {
        if polymer_type.is_nucleic() {
            &self.nucleic
        } else {
            &self.protein
        }
    }
}
