use super::error::EngineError;
use crate::core::models::atom::Atom;
use crate::core::models::chain::Chain;
use crate::core::models::residue::Residue;
use crate::core::topology::registry::DEFAULT_MASS;
use crate::core::utils::geometry;
use nalgebra::Point3;

pub const PROTEIN_BEAD: &str = "CA";
pub const PHOSPHATE_BEAD: &str = "P";
pub const SUGAR_BEAD: &str = "S";
pub const BASE_BEAD: &str = "B";

const PHOSPHATE_MASS: f64 = 94.97;
const PHOSPHATE_CHARGE: f64 = -1.0;
const SUGAR_MASS: f64 = 83.11;

const SUGAR_RING_ATOMS: [&str; 5] = ["C1'", "C2'", "C3'", "C4'", "O4'"];

/// Atoms of the phosphate and sugar groups; every other heavy atom belongs to the base.
const BACKBONE_ATOMS: [&str; 16] = [
    "P", "OP1", "OP2", "OP3", "O1P", "O2P", "O3P", "O5'", "C5'", "C4'", "O4'", "C3'", "O3'",
    "C2'", "O2'", "C1'",
];

/// A coarse-grained particle before it receives a global index.
#[derive(Debug, Clone, PartialEq)]
pub struct Bead {
    pub name: &'static str,
    pub position: Point3<f64>,
    pub mass: f64,
    pub charge: f64,
}

/// The beads standing in for one residue, in output order.
#[derive(Debug, Clone)]
pub struct ResidueBeads<'r> {
    pub residue: &'r Residue,
    pub beads: Vec<Bead>,
}

/// Maps every residue of a chain onto its coarse-grained beads.
///
/// Protein (and any non-nucleic polymer) residues give a single `CA` bead at the
/// representative atom. Nucleotides give phosphate, sugar and base beads, except the
/// first residue of the chain, which has no phosphate bead.
///
/// # Errors
///
/// Returns [`EngineError::MissingAtoms`] when a residue lacks the atoms a bead is
/// placed on.
pub fn map_chain(chain: &Chain) -> Result<Vec<ResidueBeads<'_>>, EngineError> {
    let nucleic = chain.polymer_type().is_nucleic();
    chain
        .residues()
        .iter()
        .enumerate()
        .map(|(position, residue)| {
            let beads = if nucleic {
                nucleotide_beads(chain.id(), residue, position == 0)?
            } else {
                vec![protein_bead(chain.id(), residue)?]
            };
            Ok(ResidueBeads { residue, beads })
        })
        .collect()
}

fn protein_bead(chain: char, residue: &Residue) -> Result<Bead, EngineError> {
    let representative = residue
        .representative()
        .ok_or_else(|| missing(chain, residue, PROTEIN_BEAD))?;
    Ok(Bead {
        name: PROTEIN_BEAD,
        position: representative.position,
        mass: residue.mass(),
        charge: residue.charge(),
    })
}

fn nucleotide_beads(chain: char, residue: &Residue, first: bool) -> Result<Vec<Bead>, EngineError> {
    let mut beads = Vec::with_capacity(3);

    if !first {
        let phosphate = residue
            .atom_by_name(PHOSPHATE_BEAD)
            .ok_or_else(|| missing(chain, residue, PHOSPHATE_BEAD))?;
        beads.push(Bead {
            name: PHOSPHATE_BEAD,
            position: phosphate.position,
            mass: PHOSPHATE_MASS,
            charge: PHOSPHATE_CHARGE,
        });
    }

    let sugar = geometry::centroid(
        residue
            .atoms()
            .iter()
            .filter(|a| SUGAR_RING_ATOMS.contains(&primed(a).as_str()))
            .map(|a| &a.position),
    )
    .ok_or_else(|| missing(chain, residue, SUGAR_BEAD))?;
    beads.push(Bead {
        name: SUGAR_BEAD,
        position: sugar,
        mass: SUGAR_MASS,
        charge: 0.0,
    });

    let base = geometry::centroid(
        residue
            .heavy_atoms()
            .filter(|a| !BACKBONE_ATOMS.contains(&primed(a).as_str()))
            .map(|a| &a.position),
    )
    .ok_or_else(|| missing(chain, residue, BASE_BEAD))?;
    beads.push(Bead {
        name: BASE_BEAD,
        position: base,
        mass: base_mass(residue.short_name()),
        charge: 0.0,
    });

    Ok(beads)
}

/// Atom name with the legacy `*` sugar marker rewritten as a prime.
fn primed(atom: &Atom) -> String {
    atom.name.replace('*', "'")
}

fn base_mass(short_name: char) -> f64 {
    match short_name {
        'A' => 134.10,
        'G' => 150.10,
        'C' => 110.10,
        'T' => 125.11,
        'U' => 111.08,
        _ => DEFAULT_MASS,
    }
}

fn missing(chain: char, residue: &Residue, bead: &'static str) -> EngineError {
    EngineError::MissingAtoms {
        chain,
        residue: residue.index(),
        residue_name: residue.name().to_string(),
        bead,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::topology::registry::classify;

    pub(crate) fn residue_from(name: &str, index: i32, atoms: &[(&str, [f64; 3])]) -> Residue {
        let mut iter = atoms.iter().map(|(atom_name, [x, y, z])| {
            Atom::new(atom_name, name, 'A', index, Point3::new(*x, *y, *z))
        });
        let first = iter.next().expect("fixture needs at least one atom");
        let mut residue = Residue::from_first_atom(first, classify(name));
        for atom in iter {
            residue.add_atom(atom);
        }
        residue
    }

    pub(crate) fn nucleotide(name: &str, index: i32, offset: f64) -> Residue {
        residue_from(
            name,
            index,
            &[
                ("P", [offset, 0.0, 0.0]),
                ("OP1", [offset, 1.0, 0.0]),
                ("O5'", [offset + 0.5, 0.0, 0.0]),
                ("C1'", [offset + 1.0, 1.0, 0.0]),
                ("C2'", [offset + 1.0, 2.0, 0.0]),
                ("C3'", [offset + 2.0, 1.0, 0.0]),
                ("C4'", [offset + 2.0, 2.0, 0.0]),
                ("O4'", [offset + 1.5, 1.5, 0.0]),
                ("N9", [offset + 1.0, 4.0, 0.0]),
                ("C8", [offset + 1.0, 6.0, 0.0]),
                ("H8", [offset + 9.0, 9.0, 9.0]),
            ],
        )
    }

    pub(crate) fn chain_of(residues: Vec<Residue>) -> Chain {
        let mut chain = Chain::new();
        for residue in residues {
            chain.add_residue(residue);
        }
        chain
    }

    #[test]
    fn protein_residue_maps_to_single_ca_bead() {
        let chain = chain_of(vec![
            residue_from("ALA", 1, &[("N", [0.0, 0.0, 0.0]), ("CA", [1.0, 2.0, 3.0])]),
            residue_from("LYS", 2, &[("CA", [4.0, 2.0, 3.0])]),
        ]);

        let mapped = map_chain(&chain).unwrap();
        assert_eq!(mapped.len(), 2);
        assert_eq!(mapped[0].beads.len(), 1);
        let bead = &mapped[0].beads[0];
        assert_eq!(bead.name, "CA");
        assert_eq!(bead.position, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(bead.mass, 71.09);
        assert_eq!(mapped[1].beads[0].charge, 1.0);
    }

    #[test]
    fn protein_residue_without_representative_is_an_error() {
        let chain = chain_of(vec![residue_from("GLY", 7, &[("N", [0.0, 0.0, 0.0])])]);
        match map_chain(&chain) {
            Err(EngineError::MissingAtoms { residue, bead, .. }) => {
                assert_eq!(residue, 7);
                assert_eq!(bead, "CA");
            }
            other => panic!("expected MissingAtoms, got {:?}", other),
        }
    }

    #[test]
    fn first_nucleotide_has_no_phosphate_bead() {
        let chain = chain_of(vec![
            nucleotide("DG", 1, 0.0),
            nucleotide("DA", 2, 10.0),
        ]);
        let mapped = map_chain(&chain).unwrap();

        let names: Vec<Vec<&str>> = mapped
            .iter()
            .map(|r| r.beads.iter().map(|b| b.name).collect())
            .collect();
        assert_eq!(names, vec![vec!["S", "B"], vec!["P", "S", "B"]]);
    }

    #[test]
    fn nucleotide_beads_use_group_centroids() {
        let chain = chain_of(vec![nucleotide("DG", 1, 0.0), nucleotide("DT", 2, 10.0)]);
        let mapped = map_chain(&chain).unwrap();
        let beads = &mapped[1].beads;

        assert_eq!(beads[0].position, Point3::new(10.0, 0.0, 0.0));
        assert_eq!(beads[0].mass, 94.97);
        assert_eq!(beads[0].charge, -1.0);

        let sugar = beads[1].position;
        assert!((sugar.x - 11.5).abs() < 1e-9);
        assert!((sugar.y - 1.5).abs() < 1e-9);

        // Base centroid over N9 and C8; the hydrogen is ignored.
        let base = beads[2].position;
        assert!((base.x - 11.0).abs() < 1e-9);
        assert!((base.y - 5.0).abs() < 1e-9);
        assert_eq!(beads[2].mass, 125.11);
        assert_eq!(mapped[0].beads[1].mass, 150.10);
    }

    #[test]
    fn starred_sugar_names_are_recognised() {
        let chain = chain_of(vec![residue_from(
            "U",
            1,
            &[
                ("C1*", [0.0, 0.0, 0.0]),
                ("C3*", [2.0, 0.0, 0.0]),
                ("N1", [5.0, 5.0, 5.0]),
            ],
        )]);
        let mapped = map_chain(&chain).unwrap();
        assert_eq!(mapped[0].beads[0].position, Point3::new(1.0, 0.0, 0.0));
        assert_eq!(mapped[0].beads[1].position, Point3::new(5.0, 5.0, 5.0));
    }

    #[test]
    fn missing_phosphate_after_first_residue_is_an_error() {
        let second = residue_from(
            "DC",
            2,
            &[("C1'", [0.0, 0.0, 0.0]), ("N1", [1.0, 1.0, 1.0])],
        );
        let chain = chain_of(vec![nucleotide("DG", 1, 0.0), second]);
        assert!(matches!(
            map_chain(&chain),
            Err(EngineError::MissingAtoms { bead: "P", residue: 2, .. })
        ));
    }
}
