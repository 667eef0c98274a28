use super::error::{AccessError, checked_get};
use super::residue::Residue;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Polymer classification shared by residues and chains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PolymerType {
    Protein,
    DNA,
    RNA,
    /// Nucleic acid whose sugar chemistry is not given by the residue name ("A", "G", ...).
    NucleicAcid,
    Ion,
    Water,
    Other,
    /// Unclassified residue name.
    #[default]
    None,
}

impl PolymerType {
    pub fn is_nucleic(&self) -> bool {
        matches!(
            self,
            PolymerType::DNA | PolymerType::RNA | PolymerType::NucleicAcid
        )
    }

    /// Whether chains of this type contribute particles to a coarse-grained topology.
    ///
    /// Water, ions, `Other` and unclassified chains are skipped entirely.
    pub fn is_topology_eligible(&self) -> bool {
        matches!(self, PolymerType::Protein) || self.is_nucleic()
    }
}

#[derive(Debug, Error)]
#[error("Invalid polymer type string: '{0}'")]
pub struct ParsePolymerTypeError(pub String);

impl FromStr for PolymerType {
    type Err = ParsePolymerTypeError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "protein" => Ok(PolymerType::Protein),
            "dna" => Ok(PolymerType::DNA),
            "rna" => Ok(PolymerType::RNA),
            "na" | "nucleic-acid" | "nucleic_acid" => Ok(PolymerType::NucleicAcid),
            "ion" => Ok(PolymerType::Ion),
            "water" => Ok(PolymerType::Water),
            "other" => Ok(PolymerType::Other),
            "none" => Ok(PolymerType::None),
            _ => Err(ParsePolymerTypeError(s.to_string())),
        }
    }
}

impl fmt::Display for PolymerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            PolymerType::Protein => "Protein",
            PolymerType::DNA => "DNA",
            PolymerType::RNA => "RNA",
            PolymerType::NucleicAcid => "NucleicAcid",
            PolymerType::Ion => "Ion",
            PolymerType::Water => "Water",
            PolymerType::Other => "Other",
            PolymerType::None => "None",
        })
    }
}

/// How residue names are rendered when exporting a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SequenceStyle {
    /// Single-letter abbreviations, concatenated.
    #[default]
    OneLetter,
    /// Full residue names separated by spaces.
    ThreeLetter,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Sequence style must be 1 (one-letter) or 3 (three-letter), got {0}")]
pub struct InvalidSequenceStyle(pub u8);

impl TryFrom<u8> for SequenceStyle {
    type Error = InvalidSequenceStyle;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(SequenceStyle::OneLetter),
            3 => Ok(SequenceStyle::ThreeLetter),
            other => Err(InvalidSequenceStyle(other)),
        }
    }
}

/// An ordered run of residues sharing one chain identity.
///
/// The chain identity is taken from the first residue added and never changes while
/// the chain holds residues. The polymer type is that of the first classified residue.
#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    id: char,
    polymer_type: PolymerType,
    residues: Vec<Residue>,
}

impl Default for Chain {
    fn default() -> Self {
        Self {
            id: ' ',
            polymer_type: PolymerType::None,
            residues: Vec::new(),
        }
    }
}

impl Chain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the chain back to its empty state so it can be refilled.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Appends a residue in file order.
    ///
    /// The first residue fixes the chain identity; the first residue with a known
    /// polymer type fixes the chain's polymer type.
    pub fn add_residue(&mut self, residue: Residue) {
        if self.residues.is_empty() {
            self.id = residue.chain_id();
        }
        if self.polymer_type == PolymerType::None {
            self.polymer_type = residue.polymer_type();
        }
        self.residues.push(residue);
    }

    pub fn id(&self) -> char {
        self.id
    }

    pub fn polymer_type(&self) -> PolymerType {
        self.polymer_type
    }

    pub fn residues(&self) -> &[Residue] {
        &self.residues
    }

    /// Returns the `n`-th residue of the chain.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::EmptyCollection`] if the chain has no residues and
    /// [`AccessError::IndexOutOfRange`] if `n` is past the end.
    pub fn residue(&self, n: usize) -> Result<&Residue, AccessError> {
        checked_get(&self.residues, n, "residues", || format!("chain '{}'", self.id))
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    /// Whether the chain was opened by a heteroatom residue (ligand, ion, water).
    pub fn is_hetero(&self) -> bool {
        self.residues.first().is_some_and(Residue::is_hetero)
    }

    pub fn atom_count(&self) -> usize {
        self.residues.iter().map(Residue::len).sum()
    }

    pub fn sequence(&self, style: SequenceStyle) -> String {
        match style {
            SequenceStyle::OneLetter => self.residues.iter().map(Residue::short_name).collect(),
            SequenceStyle::ThreeLetter => self
                .residues
                .iter()
                .map(Residue::name)
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

impl fmt::Display for Chain {
    /// Writes every atom of the chain as PDB lines followed by a `TER` record.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for residue in &self.residues {
            write!(f, "{}", residue)?;
        }
        writeln!(f, "TER")
    }
}
