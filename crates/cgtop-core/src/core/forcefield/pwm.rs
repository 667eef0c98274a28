use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Boltzmann constant in kcal/(mol K).
pub const K_B: f64 = 0.0019872041;
/// Reference temperature of the tabulated PWM energies, in K.
pub const TEMPERATURE: f64 = 300.0;
/// Conversion factor from PWM units (k_B T) to kcal/mol.
pub const KB_T: f64 = K_B * TEMPERATURE;

const SECTION_TAG: &str = "[ PWMcos ]";
const FIELDS_PER_RECORD: usize = 13;
const FIELD_NAMES: [&str; FIELDS_PER_RECORD] = [
    "protein serial",
    "r0",
    "theta1",
    "theta2",
    "theta3",
    "ene_A",
    "ene_C",
    "ene_G",
    "ene_T",
    "gamma",
    "epsilon",
    "sigma",
    "phi",
];

#[derive(Debug, Error)]
pub enum PwmError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("No '[ PWMcos ]' section found")]
    MissingSection,
    #[error("Invalid section header on line {line}: '{content}'")]
    InvalidHeader { line: usize, content: String },
    #[error("Section declares {expected} records but only {found} are present")]
    Truncated { expected: usize, found: usize },
    #[error("Invalid {field} in record {record} (value: '{value}')")]
    InvalidToken {
        record: usize,
        field: &'static str,
        value: String,
    },
}

/// One protein-particle / DNA-base interaction of the PWMcos potential.
///
/// Angles are stored in radians and PWM energies in kcal/mol.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PwmCosRecord {
    /// 0-based index of the protein particle.
    pub protein_index: usize,
    pub r0: f64,
    pub theta1: f64,
    pub theta2: f64,
    pub theta3: f64,
    pub energy_a: f64,
    pub energy_c: f64,
    pub energy_g: f64,
    pub energy_t: f64,
    pub gamma: f64,
    pub epsilon: f64,
    pub sigma: f64,
    pub phi: f64,
}

impl PwmCosRecord {
    fn parse(record: usize, tokens: &[&str]) -> Result<Self, PwmError> {
        let mut values = [0.0f64; FIELDS_PER_RECORD];
        for (slot, (token, field)) in values.iter_mut().zip(tokens.iter().zip(FIELD_NAMES)) {
            *slot = token.parse().map_err(|_| PwmError::InvalidToken {
                record,
                field,
                value: token.to_string(),
            })?;
        }

        let serial: i64 = tokens[0].parse().map_err(|_| PwmError::InvalidToken {
            record,
            field: FIELD_NAMES[0],
            value: tokens[0].to_string(),
        })?;
        if serial < 1 {
            return Err(PwmError::InvalidToken {
                record,
                field: FIELD_NAMES[0],
                value: tokens[0].to_string(),
            });
        }

        let [_, r0, theta1, theta2, theta3, ea, ec, eg, et, gamma, epsilon, sigma, phi] = values;
        Ok(Self {
            protein_index: (serial - 1) as usize,
            r0,
            theta1: theta1.to_radians(),
            theta2: theta2.to_radians(),
            theta3: theta3.to_radians(),
            energy_a: ea * KB_T,
            energy_c: ec * KB_T,
            energy_g: eg * KB_T,
            energy_t: et * KB_T,
            gamma,
            epsilon,
            sigma,
            phi: phi.to_radians(),
        })
    }

    /// Precomputed Gaussian width `2 sigma^2`.
    pub fn twice_sigma_squared(&self) -> f64 {
        2.0 * self.sigma * self.sigma
    }

    /// Distance beyond which this interaction is negligible.
    pub fn cutoff(&self) -> f64 {
        self.r0 + 5.0 * self.sigma
    }
}

/// All interactions that share one protein particle.
#[derive(Debug, Clone, PartialEq)]
pub struct PwmCosGroup {
    pub protein_index: usize,
    pub records: Vec<PwmCosRecord>,
    /// Largest record cutoff in the group.
    pub cutoff: f64,
}

impl PwmCosGroup {
    fn start(record: PwmCosRecord) -> Self {
        Self {
            protein_index: record.protein_index,
            cutoff: record.cutoff(),
            records: vec![record],
        }
    }
}

/// Sequence-specific protein-DNA parameters read from a `[ PWMcos ]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct PwmCosParams {
    groups: Vec<PwmCosGroup>,
    energy_scaling: f64,
    energy_shift: f64,
}

impl PwmCosParams {
    pub fn load(path: &Path) -> Result<Self, PwmError> {
        let file = File::open(path)?;
        Self::read_from(&mut BufReader::new(file))
    }

    /// Reads the first `[ PWMcos ] <n>` section of a parameter stream.
    ///
    /// The header is followed by one comment line and `n` records of 13
    /// whitespace-separated fields. Consecutive records with the same protein
    /// serial are grouped together.
    pub fn read_from(reader: &mut impl BufRead) -> Result<Self, PwmError> {
        let mut line = String::new();
        let mut line_num = 0;
        let expected = loop {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                return Err(PwmError::MissingSection);
            }
            line_num += 1;
            if let Some(pos) = line.find(SECTION_TAG) {
                let count = line[pos + SECTION_TAG.len()..].split_whitespace().next();
                break count
                    .and_then(|c| c.parse::<usize>().ok())
                    .ok_or_else(|| PwmError::InvalidHeader {
                        line: line_num,
                        content: line.trim_end().to_string(),
                    })?;
            }
        };

        // Column comment.
        line.clear();
        reader.read_line(&mut line)?;

        let mut body = String::new();
        reader.read_to_string(&mut body)?;
        let tokens: Vec<&str> = body.split_whitespace().collect();
        let found = tokens.len() / FIELDS_PER_RECORD;
        if found < expected {
            return Err(PwmError::Truncated { expected, found });
        }

        let mut groups: Vec<PwmCosGroup> = Vec::new();
        for (n, chunk) in tokens.chunks_exact(FIELDS_PER_RECORD).take(expected).enumerate() {
            let record = PwmCosRecord::parse(n + 1, chunk)?;
            match groups.last_mut() {
                Some(group) if group.protein_index == record.protein_index => {
                    group.cutoff = group.cutoff.max(record.cutoff());
                    group.records.push(record);
                }
                _ => groups.push(PwmCosGroup::start(record)),
            }
        }
        debug!(
            records = expected,
            protein_particles = groups.len(),
            "Read PWMcos parameters"
        );

        Ok(Self {
            groups,
            energy_scaling: 1.0,
            energy_shift: 0.0,
        })
    }

    pub fn groups(&self) -> &[PwmCosGroup] {
        &self.groups
    }

    /// Number of protein particles with at least one interaction.
    pub fn protein_particle_count(&self) -> usize {
        self.groups.len()
    }

    pub fn record_count(&self) -> usize {
        self.groups.iter().map(|g| g.records.len()).sum()
    }

    pub fn group_for(&self, protein_index: usize) -> Option<&PwmCosGroup> {
        self.groups.iter().find(|g| g.protein_index == protein_index)
    }

    pub fn energy_scaling(&self) -> f64 {
        self.energy_scaling
    }

    pub fn set_energy_scaling(&mut self, scaling: f64) {
        self.energy_scaling = scaling;
    }

    pub fn energy_shift(&self) -> f64 {
        self.energy_shift
    }

    pub fn set_energy_shift(&mut self, shift: f64) {
        self.energy_shift = shift;
    }
}
