use crate::core::models::chain::PolymerType;
use phf::{Map, phf_map};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Name-derived attributes of a residue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResidueProperties {
    pub short_name: char,
    /// Residue mass in Daltons.
    pub mass: f64,
    /// Net charge in elementary charge units.
    pub charge: f64,
    pub polymer_type: PolymerType,
}

impl ResidueProperties {
    /// Placeholder assigned to residue names absent from the table.
    pub const UNKNOWN: Self = Self::new('0', DEFAULT_MASS, 0.0, PolymerType::None);

    pub const fn new(short_name: char, mass: f64, charge: f64, polymer_type: PolymerType) -> Self {
        Self {
            short_name,
            mass,
            charge,
            polymer_type,
        }
    }
}

pub const DEFAULT_MASS: f64 = 100.0;

const fn protein(short_name: char, mass: f64, charge: f64) -> ResidueProperties {
    ResidueProperties::new(short_name, mass, charge, PolymerType::Protein)
}

const fn nucleotide(short_name: char, polymer_type: PolymerType) -> ResidueProperties {
    ResidueProperties::new(short_name, DEFAULT_MASS, 0.0, polymer_type)
}

const fn ion(short_name: char, mass: f64, charge: f64) -> ResidueProperties {
    ResidueProperties::new(short_name, mass, charge, PolymerType::Ion)
}

const WATER: ResidueProperties = ResidueProperties::new('w', DEFAULT_MASS, 0.0, PolymerType::Water);

#[rustfmt::skip]
static BUILTIN_RESIDUES: Map<&'static str, ResidueProperties> = phf_map! {
    // --- Amino acids (residue masses) ---
    "ALA" => protein('A', 71.09, 0.0),
    "ARG" => protein('R', 156.19, 1.0),
    "ASN" => protein('N', 114.11, 0.0),
    "ASP" => protein('D', 115.09, -1.0),
    "CYS" => protein('C', 103.15, 0.0),
    "GLN" => protein('Q', 128.14, 0.0),
    "GLU" => protein('E', 129.12, -1.0),
    "GLY" => protein('G', 57.05, 0.0),
    "HIS" => protein('H', 137.14, 1.0),
    "ILE" => protein('I', 113.16, 0.0),
    "LEU" => protein('L', 113.16, 0.0),
    "LYS" => protein('K', 128.17, 1.0),
    "MET" => protein('M', 131.19, 0.0),
    "PHE" => protein('F', 147.18, 0.0),
    "PRO" => protein('P', 97.12, 0.0),
    "SER" => protein('S', 87.08, 0.0),
    "THR" => protein('T', 101.11, 0.0),
    "TRP" => protein('W', 186.21, 0.0),
    "TYR" => protein('Y', 163.18, 0.0),
    "VAL" => protein('V', 99.14, 0.0),
    "SEC" => protein('U', DEFAULT_MASS, 0.0),

    // --- Nucleotides ---
    "DA" => nucleotide('A', PolymerType::DNA),
    "DC" => nucleotide('C', PolymerType::DNA),
    "DG" => nucleotide('G', PolymerType::DNA),
    "DT" => nucleotide('T', PolymerType::DNA),
    "T"  => nucleotide('T', PolymerType::DNA),
    "RA" => nucleotide('A', PolymerType::RNA),
    "RC" => nucleotide('C', PolymerType::RNA),
    "RG" => nucleotide('G', PolymerType::RNA),
    "RU" => nucleotide('U', PolymerType::RNA),
    "U"  => nucleotide('U', PolymerType::RNA),
    "A"  => nucleotide('A', PolymerType::NucleicAcid),
    "C"  => nucleotide('C', PolymerType::NucleicAcid),
    "G"  => nucleotide('G', PolymerType::NucleicAcid),

    // --- Ions ---
    "CA" => ion('c', 40.08, 2.0),
    "ZN" => ion('z', 65.37, 2.0),
    "MG" => ion('m', 24.31, 2.0),
    "NA" => ion('n', 22.99, 1.0),
    "K"  => ion('k', 39.10, 1.0),
    "CL" => ion('l', 35.45, -1.0),

    // --- Solvent ---
    "HOH" => WATER,
    "WAT" => WATER,
};

/// Classifies a residue by exact name using the built-in table.
///
/// This is total: unknown names yield [`ResidueProperties::UNKNOWN`].
pub fn classify(residue_name: &str) -> ResidueProperties {
    BUILTIN_RESIDUES
        .get(residue_name)
        .copied()
        .unwrap_or(ResidueProperties::UNKNOWN)
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct ResidueEntry {
    short_name: String,
    #[serde(default = "default_mass")]
    mass: f64,
    #[serde(default)]
    charge: f64,
    polymer_type: String,
}

fn default_mass() -> f64 {
    DEFAULT_MASS
}

/// Residue classification table: the built-in entries plus user overrides.
///
/// Overrides are keyed by exact residue name and take precedence over the built-in
/// table, so nonstandard residues can be classified without touching the parser.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResidueRegistry {
    overrides: HashMap<String, ResidueProperties>,
}

impl ResidueRegistry {
    /// A registry holding only the built-in table.
    pub fn builtin() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> Result<Self, RegistryLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| RegistryLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            RegistryLoadError::Toml { source, .. } => RegistryLoadError::Toml {
                path: path.to_string_lossy().to_string(),
                source,
            },
            other => other,
        })
    }

    /// Parses overrides from TOML text, one table per residue name:
    ///
    /// ```toml
    /// [MSE]
    /// short-name = "M"
    /// mass = 178.1
    /// polymer-type = "protein"
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self, RegistryLoadError> {
        let entries: HashMap<String, ResidueEntry> =
            toml::from_str(content).map_err(|e| RegistryLoadError::Toml {
                path: String::new(),
                source: e,
            })?;

        let mut overrides = HashMap::with_capacity(entries.len());
        for (name, entry) in entries {
            let mut chars = entry.short_name.chars();
            let short_name = match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => {
                    return Err(RegistryLoadError::InvalidEntry {
                        residue: name,
                        message: format!(
                            "short-name must be a single character, got '{}'",
                            entry.short_name
                        ),
                    });
                }
            };
            let polymer_type = entry.polymer_type.parse::<PolymerType>().map_err(|e| {
                RegistryLoadError::InvalidEntry {
                    residue: name.clone(),
                    message: e.to_string(),
                }
            })?;
            overrides.insert(
                name,
                ResidueProperties::new(short_name, entry.mass, entry.charge, polymer_type),
            );
        }
        Ok(Self { overrides })
    }

    pub fn classify(&self, residue_name: &str) -> ResidueProperties {
        self.overrides
            .get(residue_name)
            .copied()
            .unwrap_or_else(|| classify(residue_name))
    }

    pub fn override_count(&self) -> usize {
        self.overrides.len()
    }
}

#[derive(Debug, Error)]
pub enum RegistryLoadError {
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
    #[error("Invalid registry entry for residue '{residue}': {message}")]
    InvalidEntry { residue: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn classify_known_amino_acids() {
        let arg = classify("ARG");
        assert_eq!(arg.short_name, 'R');
        assert_eq!(arg.charge, 1.0);
        assert_eq!(arg.mass, 156.19);
        assert_eq!(arg.polymer_type, PolymerType::Protein);

        let asp = classify("ASP");
        assert_eq!(asp.charge, -1.0);
        assert_eq!(classify("GLY").mass, 57.05);
    }

    #[test]
    fn classify_nucleotides_by_sugar_chemistry() {
        assert_eq!(classify("DG").polymer_type, PolymerType::DNA);
        assert_eq!(classify("T").polymer_type, PolymerType::DNA);
        assert_eq!(classify("RU").polymer_type, PolymerType::RNA);
        assert_eq!(classify("U").polymer_type, PolymerType::RNA);
        assert_eq!(classify("A").polymer_type, PolymerType::NucleicAcid);
        assert_eq!(classify("DC").short_name, 'C');
        assert_eq!(classify("DA").mass, DEFAULT_MASS);
    }

    #[test]
    fn classify_ions_and_water() {
        let calcium = classify("CA");
        assert_eq!(calcium.polymer_type, PolymerType::Ion);
        assert_eq!(calcium.charge, 2.0);
        assert_eq!(calcium.short_name, 'c');
        assert_eq!(classify("ZN").mass, 65.37);
        assert_eq!(classify("HOH").polymer_type, PolymerType::Water);
        assert_eq!(classify("HOH").short_name, 'w');
    }

    #[test]
    fn classify_unknown_name_returns_sentinel_defaults() {
        let unknown = classify("XYZ");
        assert_eq!(unknown, ResidueProperties::UNKNOWN);
        assert_eq!(unknown.mass, 100.0);
        assert_eq!(unknown.charge, 0.0);
        assert_eq!(unknown.polymer_type, PolymerType::None);
        // Matching is exact, not case-folded.
        assert_eq!(classify("ala"), ResidueProperties::UNKNOWN);
    }

    #[test]
    fn registry_overrides_take_precedence() {
        let registry = ResidueRegistry::from_toml_str(
            r#"
            [MSE]
            short-name = "M"
            mass = 178.1
            polymer-type = "protein"

            [HOH]
            short-name = "o"
            polymer-type = "other"
            "#,
        )
        .unwrap();

        assert_eq!(registry.override_count(), 2);
        let mse = registry.classify("MSE");
        assert_eq!(mse.short_name, 'M');
        assert_eq!(mse.polymer_type, PolymerType::Protein);
        assert_eq!(registry.classify("HOH").polymer_type, PolymerType::Other);
        assert_eq!(registry.classify("HOH").mass, DEFAULT_MASS);
        assert_eq!(registry.classify("ALA"), classify("ALA"));
    }

    #[test]
    fn registry_rejects_multi_character_short_name() {
        let result = ResidueRegistry::from_toml_str(
            r#"
            [XXX]
            short-name = "ab"
            polymer-type = "protein"
            "#,
        );
        assert!(matches!(result, Err(RegistryLoadError::InvalidEntry { .. })));
    }

    #[test]
    fn registry_rejects_unknown_polymer_type() {
        let result = ResidueRegistry::from_toml_str(
            r#"
            [XXX]
            short-name = "x"
            polymer-type = "plasma"
            "#,
        );
        assert!(matches!(result, Err(RegistryLoadError::InvalidEntry { .. })));
    }

    #[test]
    fn load_fails_for_missing_file() {
        let dir = tempdir().unwrap();
        let result = ResidueRegistry::load(&dir.path().join("missing.toml"));
        assert!(matches!(result, Err(RegistryLoadError::Io { .. })));
    }

    #[test]
    fn load_reports_path_for_malformed_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "this is not toml").unwrap();
        match ResidueRegistry::load(&path) {
            Err(RegistryLoadError::Toml { path: p, .. }) => assert!(p.ends_with("bad.toml")),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
