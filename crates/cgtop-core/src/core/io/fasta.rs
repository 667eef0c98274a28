use crate::core::models::chain::SequenceStyle;
use crate::core::models::model::Model;
use crate::core::models::structure::Structure;
use std::io::{self, Write};

/// Residues per sequence line.
pub const LINE_WIDTH: usize = 80;

/// Writes one FASTA record per polymer chain of `model`.
///
/// Headers read `>{stem}_{chain}`; water, ion and unclassified chains are skipped.
/// Returns the number of records written.
pub fn write_model(model: &Model, stem: &str, writer: &mut impl Write) -> io::Result<usize> {
    let mut records = 0;
    for chain in model
        .chains()
        .iter()
        .filter(|c| c.polymer_type().is_topology_eligible())
    {
        writeln!(writer, ">{}_{}", stem, chain.id())?;
        let sequence = chain.sequence(SequenceStyle::OneLetter);
        let residues: Vec<char> = sequence.chars().collect();
        for line in residues.chunks(LINE_WIDTH) {
            writeln!(writer, "{}", line.iter().collect::<String>())?;
        }
        records += 1;
    }
    Ok(records)
}

/// Writes the FASTA block for the first model of `structure`, headed by the
/// structure's file stem. An empty structure writes nothing.
pub fn write_structure(structure: &Structure, writer: &mut impl Write) -> io::Result<usize> {
    match structure.models().first() {
        Some(model) => write_model(model, &structure.fasta_stem(), writer),
        None => Ok(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::{Atom, RecordKind};
    use crate::core::models::chain::Chain;
    use crate::core::models::residue::Residue;
    use crate::core::topology::registry::classify;
    use nalgebra::Point3;

    fn chain(id: char, names: &[&str], record: RecordKind) -> Chain {
        let mut chain = Chain::new();
        for (i, name) in names.iter().enumerate() {
            let atom = Atom::new("CA", name, id, i as i32 + 1, Point3::origin()).with_record(record);
            chain.add_residue(Residue::from_first_atom(atom, classify(name)));
        }
        chain
    }

    #[test]
    fn writes_one_record_per_polymer_chain() {
        let mut model = Model::new(0);
        model.add_chain(chain('A', &["MET", "LYS", "TRP"], RecordKind::Atom));
        model.add_chain(chain('W', &["HOH"], RecordKind::Hetatm));
        model.add_chain(chain('B', &["DG", "DC"], RecordKind::Atom));

        let mut out = Vec::new();
        let n = write_model(&model, "1abc", &mut out).unwrap();
        assert_eq!(n, 2);
        assert_eq!(String::from_utf8(out).unwrap(), ">1abc_A\nMKW\n>1abc_B\nGC\n");
    }

    #[test]
    fn long_sequences_are_wrapped() {
        let names = vec!["ALA"; LINE_WIDTH + 5];
        let mut model = Model::new(0);
        model.add_chain(chain('A', &names, RecordKind::Atom));

        let mut out = Vec::new();
        write_model(&model, "long", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].len(), LINE_WIDTH);
        assert_eq!(lines[2], "AAAAA");
    }

    #[test]
    fn structure_header_uses_file_stem() {
        let mut model = Model::new(0);
        model.add_chain(chain('A', &["GLY"], RecordKind::Atom));
        let structure = Structure::new("data/2xyz.pdb", vec![model]);

        let mut out = Vec::new();
        write_structure(&structure, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), ">2xyz_A\nG\n");

        let mut out = Vec::new();
        assert_eq!(write_structure(&Structure::default(), &mut out).unwrap(), 0);
        assert!(out.is_empty());
    }
}
