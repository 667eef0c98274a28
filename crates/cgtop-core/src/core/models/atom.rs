use nalgebra::Point3;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The record keywords understood by the PDB reader.
///
/// Only `Atom` and `Hetatm` describe atoms stored in the hierarchy; the remaining
/// kinds are boundary markers that drive the parser's state transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RecordKind {
    /// Standard polymer atom (`ATOM  `).
    #[default]
    Atom,
    /// Heteroatom: ligands, ions and waters (`HETATM`).
    Hetatm,
    /// Beginning of a model block (`MODEL `).
    Model,
    /// Chain terminator (`TER   `).
    Ter,
    /// End of a model block (`ENDMDL`).
    EndModel,
    /// End of the structure (`END   `).
    End,
}

impl RecordKind {
    /// The six-character keyword, padded the way it appears at the start of a line.
    pub fn keyword(&self) -> &'static str {
        match self {
            RecordKind::Atom => "ATOM  ",
            RecordKind::Hetatm => "HETATM",
            RecordKind::Model => "MODEL ",
            RecordKind::Ter => "TER   ",
            RecordKind::EndModel => "ENDMDL",
            RecordKind::End => "END   ",
        }
    }

    /// Returns `true` for the two record kinds that carry atom data.
    pub fn is_atom_record(&self) -> bool {
        matches!(self, RecordKind::Atom | RecordKind::Hetatm)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unrecognized record keyword '{0}'")]
pub struct ParseRecordKindError(pub String);

impl FromStr for RecordKind {
    type Err = ParseRecordKindError;

    /// Parses a record keyword. Trailing padding is ignored, case is not.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_end() {
            "ATOM" => Ok(RecordKind::Atom),
            "HETATM" => Ok(RecordKind::Hetatm),
            "MODEL" => Ok(RecordKind::Model),
            "TER" => Ok(RecordKind::Ter),
            "ENDMDL" => Ok(RecordKind::EndModel),
            "END" => Ok(RecordKind::End),
            other => Err(ParseRecordKindError(other.to_string())),
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword().trim_end())
    }
}

/// One atom record of a PDB file.
///
/// The fields mirror the fixed columns of an `ATOM`/`HETATM` line. An atom is
/// populated while decoding a single line and is never mutated after it has been
/// handed to a [`Residue`](super::residue::Residue).
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Record keyword of the source line (`ATOM` or `HETATM`).
    pub record: RecordKind,
    /// Atom serial number (columns 7-11).
    pub serial: i32,
    /// Atom name, trimmed (e.g. "CA", "C3'").
    pub name: String,
    /// Alternate location indicator, `' '` when absent.
    pub alt_loc: char,
    /// Residue name, trimmed (e.g. "ALA", "DG", "HOH").
    pub residue_name: String,
    /// Single-character chain identifier, `' '` when absent.
    pub chain_id: char,
    /// Residue sequence number. May repeat across chains.
    pub residue_index: i32,
    /// Code for insertion of residues, `' '` when absent.
    pub insertion_code: char,
    /// Orthogonal coordinates in Angstroms.
    pub position: Point3<f64>,
    pub occupancy: f64,
    pub temperature_factor: f64,
    pub segment_id: String,
    /// Element symbol, trimmed. May be empty in older files.
    pub element: String,
    /// Formal charge string (e.g. "2+"), kept verbatim.
    pub charge: String,
}

impl Default for Atom {
    fn default() -> Self {
        Self {
            record: RecordKind::Atom,
            serial: 0,
            name: String::new(),
            alt_loc: ' ',
            residue_name: String::new(),
            chain_id: ' ',
            residue_index: 0,
            insertion_code: ' ',
            position: Point3::origin(),
            occupancy: 0.0,
            temperature_factor: 0.0,
            segment_id: String::new(),
            element: String::new(),
            charge: String::new(),
        }
    }
}

impl Atom {
    /// Creates a polymer (`ATOM`) record with the identifying fields set and every
    /// other field at its default.
    ///
    /// # Arguments
    ///
    /// * `name` - The atom name.
    /// * `residue_name` - The name of the residue the atom belongs to.
    /// * `chain_id` - The chain identifier.
    /// * `residue_index` - The residue sequence number.
    /// * `position` - The 3D coordinates of the atom.
    pub fn new(
        name: &str,
        residue_name: &str,
        chain_id: char,
        residue_index: i32,
        position: Point3<f64>,
    ) -> Self {
        Self {
            name: name.to_string(),
            residue_name: residue_name.to_string(),
            chain_id,
            residue_index,
            position,
            ..Self::default()
        }
    }

    /// Returns the same atom with a different record keyword.
    pub fn with_record(mut self, record: RecordKind) -> Self {
        self.record = record;
        self
    }

    /// Returns the same atom with an explicit element symbol.
    pub fn with_element(mut self, element: &str) -> Self {
        self.element = element.to_string();
        self
    }

    pub fn is_hetero(&self) -> bool {
        self.record == RecordKind::Hetatm
    }

    /// Whether this atom is a hydrogen (or deuterium).
    ///
    /// The element column decides when present; otherwise the first letter of the
    /// atom name (after any leading digits, as in "1HB") is used.
    pub fn is_hydrogen(&self) -> bool {
        let element = self.element.trim();
        if !element.is_empty() {
            return element.eq_ignore_ascii_case("H") || element.eq_ignore_ascii_case("D");
        }
        matches!(
            self.name
                .trim()
                .chars()
                .find(|c| !c.is_ascii_digit())
                .map(|c| c.to_ascii_uppercase()),
            Some('H') | Some('D')
        )
    }

    /// Euclidean distance to another atom in Angstroms.
    pub fn distance(&self, other: &Atom) -> f64 {
        nalgebra::distance(&self.position, &other.position)
    }
}

impl fmt::Display for Atom {
    /// Formats the atom as a fixed-column PDB `ATOM`/`HETATM` line (without newline).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Names shorter than four characters start in column 14 by convention.
        let name = if self.name.len() < 4 {
            format!(" {:<3}", self.name)
        } else {
            format!("{:<4}", self.name)
        };
        write!(
            f,
            "{:<6}{:>5} {}{}{:>3} {}{:>4}{}   {:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}      {:<4}{:>2}{:<2}",
            self.record.keyword(),
            self.serial,
            name,
            self.alt_loc,
            self.residue_name,
            self.chain_id,
            self.residue_index,
            self.insertion_code,
            self.position.x,
            self.position.y,
            self.position.z,
            self.occupancy,
            self.temperature_factor,
            self.segment_id,
            self.element,
            self.charge
        )
    }
}
