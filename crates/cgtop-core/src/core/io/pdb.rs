use crate::core::io::traits::StructureFile;
use crate::core::models::atom::{Atom, RecordKind};
use crate::core::models::chain::Chain;
use crate::core::models::model::Model;
use crate::core::models::residue::{AddOutcome, Residue};
use crate::core::models::structure::Structure;
use crate::core::models::topology::Topology;
use crate::core::topology::registry::ResidueRegistry;
use nalgebra::Point3;
use std::io::{self, BufRead, Write};
use std::mem;
use thiserror::Error;
use tracing::{debug, warn};

/// Minimum length of an `ATOM`/`HETATM` line: everything through the z coordinate.
const MIN_ATOM_LINE_LEN: usize = 54;

/// One decoded line of a PDB stream.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    /// An `ATOM` or `HETATM` line; the atom's `record` field tells which.
    Atom(Atom),
    Model { serial: i32 },
    Ter,
    EndModel,
    End,
}

/// Why a line could not be decoded. Any of these ends ingestion.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("Unrecognized record keyword '{0}'")]
    UnknownKeyword(String),
    #[error("Invalid {field} in columns {columns} (value: '{value}')")]
    InvalidField {
        field: &'static str,
        columns: &'static str,
        value: String,
    },
    #[error("Line is too short for an atom record ({len} chars, need at least 54)")]
    LineTooShort { len: usize },
    #[error("Line is not valid UTF-8 (record keyword '{keyword}')")]
    InvalidEncoding { keyword: String },
}

impl DecodeError {
    /// Whether lenient reading may skip the line: it carries no atom record.
    pub fn is_skippable(&self) -> bool {
        match self {
            DecodeError::UnknownKeyword(_) => true,
            DecodeError::InvalidEncoding { keyword } => !keyword
                .parse::<RecordKind>()
                .is_ok_and(|kind| kind.is_atom_record()),
            _ => false,
        }
    }
}

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Returns the byte columns `start..end` of `line`, clamped to the line length.
fn column(line: &str, start: usize, end: usize) -> &str {
    let end = end.min(line.len());
    if start >= end {
        return "";
    }
    line.get(start..end).unwrap_or("")
}

fn column_char(line: &str, index: usize) -> char {
    column(line, index, index + 1).chars().next().unwrap_or(' ')
}

fn parse_int(
    line: &str,
    start: usize,
    end: usize,
    field: &'static str,
    columns: &'static str,
) -> Result<i32, DecodeError> {
    let raw = column(line, start, end).trim();
    raw.parse().map_err(|_| DecodeError::InvalidField {
        field,
        columns,
        value: raw.to_string(),
    })
}

fn parse_float(
    line: &str,
    start: usize,
    end: usize,
    field: &'static str,
    columns: &'static str,
) -> Result<f64, DecodeError> {
    let raw = column(line, start, end).trim();
    raw.parse().map_err(|_| DecodeError::InvalidField {
        field,
        columns,
        value: raw.to_string(),
    })
}

/// Like [`parse_float`], but a blank field reads as zero.
fn parse_optional_float(
    line: &str,
    start: usize,
    end: usize,
    field: &'static str,
    columns: &'static str,
) -> Result<f64, DecodeError> {
    if column(line, start, end).trim().is_empty() {
        Ok(0.0)
    } else {
        parse_float(line, start, end, field, columns)
    }
}

/// Decodes one line of a PDB file.
///
/// Recognized keywords are `ATOM`, `HETATM`, `MODEL`, `TER`, `ENDMDL` and `END`.
/// Everything else, blank lines included, is [`DecodeError::UnknownKeyword`].
pub fn decode_line(line: &str) -> Result<Record, DecodeError> {
    let keyword = column(line, 0, 6);
    let kind: RecordKind = keyword
        .parse()
        .map_err(|_| DecodeError::UnknownKeyword(keyword.trim_end().to_string()))?;

    match kind {
        RecordKind::Atom | RecordKind::Hetatm => decode_atom(line, kind).map(Record::Atom),
        RecordKind::Model => {
            let raw = column(line, 6, line.len()).trim();
            let serial = if raw.is_empty() {
                0
            } else {
                raw.parse().map_err(|_| DecodeError::InvalidField {
                    field: "model serial",
                    columns: "7-14",
                    value: raw.to_string(),
                })?
            };
            Ok(Record::Model { serial })
        }
        RecordKind::Ter => Ok(Record::Ter),
        RecordKind::EndModel => Ok(Record::EndModel),
        RecordKind::End => Ok(Record::End),
    }
}

/// Decodes one raw line, without its line terminator.
///
/// Bytes that are not valid UTF-8 make the line undecodable rather than failing the
/// read.
pub fn decode_bytes(line: &[u8]) -> Result<Record, DecodeError> {
    match std::str::from_utf8(line) {
        Ok(text) => decode_line(text),
        Err(_) => {
            let keyword = &line[..line.len().min(6)];
            Err(DecodeError::InvalidEncoding {
                keyword: String::from_utf8_lossy(keyword).trim_end().to_string(),
            })
        }
    }
}

fn decode_atom(line: &str, record: RecordKind) -> Result<Atom, DecodeError> {
    if line.len() < MIN_ATOM_LINE_LEN {
        return Err(DecodeError::LineTooShort { len: line.len() });
    }

    let serial = parse_int(line, 6, 11, "serial", "7-11")?;
    let residue_index = parse_int(line, 22, 26, "residue index", "23-26")?;
    let x = parse_float(line, 30, 38, "x coordinate", "31-38")?;
    let y = parse_float(line, 38, 46, "y coordinate", "39-46")?;
    let z = parse_float(line, 46, 54, "z coordinate", "47-54")?;
    let occupancy = parse_optional_float(line, 54, 60, "occupancy", "55-60")?;
    let temperature_factor = parse_optional_float(line, 60, 66, "temperature factor", "61-66")?;

    Ok(Atom {
        record,
        serial,
        name: column(line, 12, 16).trim().to_string(),
        alt_loc: column_char(line, 16),
        residue_name: column(line, 17, 20).trim().to_string(),
        chain_id: column_char(line, 21),
        residue_index,
        insertion_code: column_char(line, 26),
        position: Point3::new(x, y, z),
        occupancy,
        temperature_factor,
        segment_id: column(line, 72, 76).trim().to_string(),
        element: column(line, 76, 78).trim().to_string(),
        charge: column(line, 78, 80).trim().to_string(),
    })
}

/// The record-driven state machine that turns decoded records into models.
///
/// Three accumulators (residue, chain, model) are filled incrementally and flushed
/// upward when a boundary is detected. Empty accumulators are never flushed, which
/// makes repeated terminators harmless.
pub struct StructureAssembler<'a> {
    registry: &'a ResidueRegistry,
    residue: Residue,
    chain: Chain,
    model: Model,
    models: Vec<Model>,
}

impl<'a> StructureAssembler<'a> {
    pub fn new(registry: &'a ResidueRegistry) -> Self {
        Self {
            registry,
            residue: Residue::default(),
            chain: Chain::default(),
            model: Model::default(),
            models: Vec::new(),
        }
    }

    /// Applies one record to the accumulators.
    pub fn feed(&mut self, record: Record) {
        match record {
            Record::Atom(atom) => self.on_atom(atom),
            Record::Model { serial } => {
                if !self.model.is_empty() || !self.chain.is_empty() || !self.residue.is_empty() {
                    warn!(
                        serial,
                        "MODEL record opened before the previous model was closed; discarding its content"
                    );
                }
                self.residue.reset();
                self.chain.reset();
                self.model = Model::new(serial);
            }
            Record::Ter => {
                self.flush_residue();
                self.flush_chain();
            }
            Record::EndModel => {
                self.flush_residue();
                self.flush_chain();
                self.push_model();
            }
            Record::End => self.close(),
        }
    }

    fn on_atom(&mut self, atom: Atom) {
        let (record, serial) = (atom.record, atom.serial);
        match self.residue.add_atom(atom) {
            AddOutcome::Accepted => {
                if (record == RecordKind::Hetatm) != self.residue.is_hetero() {
                    warn!(
                        serial,
                        record = %record,
                        residue = self.residue.index(),
                        "Record kind differs from the residue's first atom; keeping the residue's kind"
                    );
                }
            }
            AddOutcome::NewResidue(atom) => {
                // Heteroatom residues always form a chain of their own.
                let close_chain = self.residue.is_hetero() || atom.is_hetero();
                self.flush_residue();
                if close_chain {
                    self.flush_chain();
                }
                self.seed(atom);
            }
            AddOutcome::NewChain(atom) => {
                self.flush_residue();
                self.flush_chain();
                self.seed(atom);
            }
        }
    }

    fn seed(&mut self, atom: Atom) {
        let properties = self.registry.classify(&atom.residue_name);
        self.residue = Residue::from_first_atom(atom, properties);
    }

    fn flush_residue(&mut self) {
        if !self.residue.is_empty() {
            self.chain.add_residue(mem::take(&mut self.residue));
        }
    }

    fn flush_chain(&mut self) {
        if !self.chain.is_empty() {
            let chain = mem::take(&mut self.chain);
            debug!(
                chain = %chain.id(),
                residues = chain.len(),
                polymer_type = %chain.polymer_type(),
                "Closed chain"
            );
            self.model.add_chain(chain);
        }
    }

    fn push_model(&mut self) {
        let model = mem::take(&mut self.model);
        debug!(serial = model.serial(), chains = model.len(), "Closed model");
        self.models.push(model);
    }

    /// End-of-structure handling: flush everything, keep the model only if non-empty.
    fn close(&mut self) {
        self.flush_residue();
        self.flush_chain();
        if self.model.is_empty() {
            self.model.reset();
        } else {
            self.push_model();
        }
    }

    /// Flushes pending content as an `END` record would and returns every model.
    pub fn finish(mut self) -> Vec<Model> {
        self.close();
        self.models
    }
}

/// Options for [`PdbFile::read_from`].
#[derive(Debug, Clone, Default)]
pub struct PdbReadOptions {
    /// Skip lines with unrecognized keywords (`HEADER`, `REMARK`, `CONECT`, ...)
    /// instead of ending ingestion at the first one.
    pub skip_unknown_records: bool,
    /// Residue classification used when seeding residues.
    pub registry: ResidueRegistry,
}

/// Where and why ingestion stopped before the end of the stream.
#[derive(Debug, Clone, PartialEq)]
pub struct StopPoint {
    /// 1-based line number of the undecodable line.
    pub line: usize,
    pub error: DecodeError,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdbMetadata {
    /// Records decoded and applied.
    pub records_read: usize,
    /// Lines skipped in lenient mode.
    pub records_skipped: usize,
    /// Set when an undecodable line ended ingestion early.
    pub stopped_at: Option<StopPoint>,
}

pub struct PdbFile;

impl StructureFile for PdbFile {
    type Metadata = PdbMetadata;
    type Options = PdbReadOptions;
    type Error = PdbError;

    fn read_from(
        reader: &mut impl BufRead,
        options: &Self::Options,
    ) -> Result<(Structure, Self::Metadata), Self::Error> {
        let mut assembler = StructureAssembler::new(&options.registry);
        let mut metadata = PdbMetadata::default();

        for (line_num, line_res) in reader.split(b'\n').enumerate() {
            let mut line = line_res?;
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            match decode_bytes(&line) {
                Ok(record) => {
                    assembler.feed(record);
                    metadata.records_read += 1;
                }
                Err(error) if options.skip_unknown_records && error.is_skippable() => {
                    metadata.records_skipped += 1;
                }
                Err(error) => {
                    warn!(line = line_num + 1, %error, "Stopping PDB ingestion at undecodable line");
                    metadata.stopped_at = Some(StopPoint {
                        line: line_num + 1,
                        error,
                    });
                    break;
                }
            }
        }

        let models = assembler.finish();
        debug!(
            models = models.len(),
            records = metadata.records_read,
            "Finished reading PDB stream"
        );
        Ok((Structure::new("", models), metadata))
    }

    /// Writes every model; a lone model with serial 0 is written without a
    /// `MODEL`/`ENDMDL` wrapper.
    fn write_to(structure: &Structure, writer: &mut impl Write) -> Result<(), Self::Error> {
        match structure.models() {
            [single] if single.serial() == 0 => {
                for chain in single.chains() {
                    write!(writer, "{}", chain)?;
                }
            }
            models => {
                for model in models {
                    write!(writer, "{}", model)?;
                }
            }
        }
        writeln!(writer, "END")?;
        Ok(())
    }
}

impl PdbFile {
    /// Writes the coarse-grained particles of a topology as PDB `ATOM` records,
    /// one per bead, with a `TER` after each chain.
    pub fn write_particles(topology: &Topology, writer: &mut impl Write) -> Result<(), PdbError> {
        let mut previous_chain = None;
        for particle in &topology.particles {
            if previous_chain.is_some_and(|c| c != particle.chain_id) {
                writeln!(writer, "TER")?;
            }
            previous_chain = Some(particle.chain_id);

            let mut bead = Atom::new(
                particle.name,
                &particle.residue_name,
                particle.chain_id,
                particle.residue_index,
                particle.position,
            );
            bead.serial = particle.index as i32;
            bead.occupancy = 1.0;
            writeln!(writer, "{}", bead)?;
        }
        if previous_chain.is_some() {
            writeln!(writer, "TER")?;
        }
        writeln!(writer, "END")?;
        Ok(())
    }
}
