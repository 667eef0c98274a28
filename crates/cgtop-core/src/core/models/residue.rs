use super::atom::{Atom, RecordKind};
use super::chain::PolymerType;
use super::error::{AccessError, checked_get};
use crate::core::topology::registry::ResidueProperties;
use crate::core::utils::geometry;
use std::fmt;

/// Residue index held by a residue that has been reset and not yet seeded.
const UNSET_INDEX: i32 = i32::MIN;

/// Atom names that mark a residue's representative particle.
const REPRESENTATIVE_ATOM_NAMES: [&str; 3] = ["CA", "C3'", "C3*"];

/// Result of offering an atom to a [`Residue`].
///
/// A rejected atom is handed back so the caller can start the next residue or chain
/// with it. Rejection is the parser's boundary signal, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum AddOutcome {
    /// The atom belongs to this residue and was stored.
    Accepted,
    /// The atom carries a different residue index: a residue boundary was crossed.
    NewResidue(Atom),
    /// The atom carries a different chain identity: a chain boundary was crossed.
    NewChain(Atom),
}

/// A contiguous run of atoms sharing one residue index.
///
/// Name-derived properties (abbreviation, charge, mass, polymer type) are assigned
/// when the residue is seeded. The representative atom is tracked while atoms are
/// added: the alpha carbon for proteins, C3' for nucleotides and the atom itself for
/// heteroatoms.
#[derive(Debug, Clone, PartialEq)]
pub struct Residue {
    name: String,
    short_name: char,
    chain_id: char,
    index: i32,
    atoms: Vec<Atom>,
    charge: f64,
    mass: f64,
    polymer_type: PolymerType,
    representative: Option<usize>,
}

impl Default for Residue {
    fn default() -> Self {
        let unknown = ResidueProperties::UNKNOWN;
        Self {
            name: String::new(),
            short_name: unknown.short_name,
            chain_id: ' ',
            index: UNSET_INDEX,
            atoms: Vec::new(),
            charge: unknown.charge,
            mass: unknown.mass,
            polymer_type: unknown.polymer_type,
            representative: None,
        }
    }
}

impl Residue {
    /// Creates an empty residue with the given identity and classification.
    pub fn new(name: &str, chain_id: char, index: i32, properties: ResidueProperties) -> Self {
        Self {
            name: name.to_string(),
            short_name: properties.short_name,
            chain_id,
            index,
            atoms: Vec::new(),
            charge: properties.charge,
            mass: properties.mass,
            polymer_type: properties.polymer_type,
            representative: None,
        }
    }

    /// Starts a residue from its first atom, taking name, chain and index from it.
    pub fn from_first_atom(atom: Atom, properties: ResidueProperties) -> Self {
        let mut residue = Self::new(
            &atom.residue_name,
            atom.chain_id,
            atom.residue_index,
            properties,
        );
        residue.push_atom(atom);
        residue
    }

    /// Clears the residue back to the unseeded state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Offers an atom to this residue.
    ///
    /// An empty residue that was never seeded rejects every atom with
    /// [`AddOutcome::NewResidue`], which the caller answers by seeding a fresh residue.
    pub fn add_atom(&mut self, atom: Atom) -> AddOutcome {
        if !self.atoms.is_empty() && atom.chain_id != self.chain_id {
            return AddOutcome::NewChain(atom);
        }
        if atom.residue_index != self.index {
            return AddOutcome::NewResidue(atom);
        }
        self.push_atom(atom);
        AddOutcome::Accepted
    }

    fn push_atom(&mut self, atom: Atom) {
        let is_representative = atom.record == RecordKind::Hetatm
            || REPRESENTATIVE_ATOM_NAMES.contains(&atom.name.as_str());
        self.atoms.push(atom);
        if is_representative {
            self.representative = Some(self.atoms.len() - 1);
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn short_name(&self) -> char {
        self.short_name
    }

    pub fn chain_id(&self) -> char {
        self.chain_id
    }

    pub fn index(&self) -> i32 {
        self.index
    }

    pub fn charge(&self) -> f64 {
        self.charge
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn polymer_type(&self) -> PolymerType {
        self.polymer_type
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// Returns the `n`-th atom of the residue.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::EmptyCollection`] if the residue has no atoms and
    /// [`AccessError::IndexOutOfRange`] if `n` is past the end.
    pub fn atom(&self, n: usize) -> Result<&Atom, AccessError> {
        checked_get(&self.atoms, n, "atoms", || {
            format!("residue {} {}", self.name, self.index)
        })
    }

    pub fn atom_by_name(&self, name: &str) -> Option<&Atom> {
        self.atoms.iter().find(|a| a.name == name)
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// The atom standing in for this residue in coarse-grained output, if any was seen.
    pub fn representative(&self) -> Option<&Atom> {
        self.representative.and_then(|i| self.atoms.get(i))
    }

    /// Whether the residue came from `HETATM` records.
    ///
    /// Only the first stored atom is inspected; mixed-record residues are not supported.
    pub fn is_hetero(&self) -> bool {
        self.atoms.first().is_some_and(Atom::is_hetero)
    }

    pub fn heavy_atoms(&self) -> impl Iterator<Item = &Atom> {
        self.atoms.iter().filter(|a| !a.is_hydrogen())
    }
}

impl fmt::Display for Residue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for atom in &self.atoms {
            writeln!(f, "{}", atom)?;
        }
        Ok(())
    }
}

/// Minimum distance between the heavy atoms of two residues.
///
/// Returns `None` when either residue has no heavy atom, i.e. when every candidate
/// pair involves a hydrogen.
pub fn residue_min_distance(r1: &Residue, r2: &Residue) -> Option<f64> {
    let first: Vec<_> = r1.heavy_atoms().map(|a| a.position).collect();
    let second: Vec<_> = r2.heavy_atoms().map(|a| a.position).collect();
    geometry::min_pairwise_distance(&first, &second)
}

/// Distance between the representative atoms of two residues.
pub fn residue_representative_distance(r1: &Residue, r2: &Residue) -> Option<f64> {
    Some(r1.representative()?.distance(r2.representative()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::topology::registry::classify;
    use nalgebra::Point3;

    fn atom(name: &str, res: &str, chain: char, index: i32, pos: [f64; 3]) -> Atom {
        Atom::new(name, res, chain, index, Point3::new(pos[0], pos[1], pos[2]))
    }

    fn seeded(first: Atom) -> Residue {
        let props = classify(&first.residue_name);
        Residue::from_first_atom(first, props)
    }

    #[test]
    fn default_residue_is_unseeded_sentinel() {
        let residue = Residue::default();
        assert!(residue.is_empty());
        assert_eq!(residue.name(), "");
        assert_eq!(residue.short_name(), '0');
        assert_eq!(residue.mass(), 100.0);
        assert_eq!(residue.charge(), 0.0);
        assert_eq!(residue.polymer_type(), PolymerType::None);
        assert!(residue.representative().is_none());
    }

    #[test]
    fn unseeded_residue_rejects_first_atom_as_new_residue() {
        let mut residue = Residue::default();
        let a = atom("N", "ALA", 'A', 1, [0.0; 3]);
        assert_eq!(residue.add_atom(a.clone()), AddOutcome::NewResidue(a));
        assert!(residue.is_empty());
    }

    #[test]
    fn from_first_atom_seeds_identity_and_classification() {
        let residue = seeded(atom("N", "LYS", 'A', 5, [0.0; 3]));
        assert_eq!(residue.name(), "LYS");
        assert_eq!(residue.chain_id(), 'A');
        assert_eq!(residue.index(), 5);
        assert_eq!(residue.short_name(), 'K');
        assert_eq!(residue.charge(), 1.0);
        assert_eq!(residue.polymer_type(), PolymerType::Protein);
        assert_eq!(residue.len(), 1);
    }

    #[test]
    fn add_atom_accepts_matching_index_and_keeps_order() {
        let mut residue = seeded(atom("N", "ALA", 'A', 1, [0.0; 3]));
        assert_eq!(
            residue.add_atom(atom("CA", "ALA", 'A', 1, [1.0, 0.0, 0.0])),
            AddOutcome::Accepted
        );
        assert_eq!(
            residue.add_atom(atom("C", "ALA", 'A', 1, [2.0, 0.0, 0.0])),
            AddOutcome::Accepted
        );
        let names: Vec<_> = residue.atoms().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["N", "CA", "C"]);
    }

    #[test]
    fn add_atom_signals_residue_boundary() {
        let mut residue = seeded(atom("CA", "ALA", 'A', 1, [0.0; 3]));
        let next = atom("CA", "GLY", 'A', 2, [3.8, 0.0, 0.0]);
        assert_eq!(
            residue.add_atom(next.clone()),
            AddOutcome::NewResidue(next)
        );
        assert_eq!(residue.len(), 1);
    }

    #[test]
    fn add_atom_signals_chain_boundary_before_index() {
        let mut residue = seeded(atom("CA", "ALA", 'A', 1, [0.0; 3]));
        let same_index_other_chain = atom("CA", "ALA", 'B', 1, [0.0; 3]);
        assert_eq!(
            residue.add_atom(same_index_other_chain.clone()),
            AddOutcome::NewChain(same_index_other_chain)
        );
    }

    #[test]
    fn representative_tracks_alpha_carbon() {
        let mut residue = seeded(atom("N", "SER", 'A', 3, [0.0; 3]));
        assert!(residue.representative().is_none());
        residue.add_atom(atom("CA", "SER", 'A', 3, [1.0, 2.0, 3.0]));
        residue.add_atom(atom("CB", "SER", 'A', 3, [2.0, 2.0, 3.0]));
        let rep = residue.representative().unwrap();
        assert_eq!(rep.name, "CA");
        assert_eq!(rep.position, Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn representative_tracks_nucleotide_c3_prime() {
        let mut residue = seeded(atom("P", "DG", 'B', 1, [0.0; 3]));
        residue.add_atom(atom("C3'", "DG", 'B', 1, [4.0, 0.0, 0.0]));
        assert_eq!(residue.representative().unwrap().name, "C3'");
    }

    #[test]
    fn representative_of_heteroatom_is_the_atom() {
        let zinc = atom("ZN", "ZN", 'C', 401, [1.0, 1.0, 1.0]).with_record(RecordKind::Hetatm);
        let residue = seeded(zinc);
        assert_eq!(residue.representative().unwrap().name, "ZN");
        assert!(residue.is_hetero());
        assert_eq!(residue.polymer_type(), PolymerType::Ion);
    }

    #[test]
    fn atom_access_distinguishes_empty_and_out_of_range() {
        let empty = Residue::default();
        assert!(matches!(
            empty.atom(0),
            Err(AccessError::EmptyCollection {
                collection: "atoms",
                ..
            })
        ));
        let residue = seeded(atom("CA", "ALA", 'A', 1, [0.0; 3]));
        assert_eq!(residue.atom(0).unwrap().name, "CA");
        assert!(matches!(
            residue.atom(3),
            Err(AccessError::IndexOutOfRange { index: 3, .. })
        ));
    }

    #[test]
    fn reset_returns_to_sentinel_state() {
        let mut residue = seeded(atom("CA", "ALA", 'A', 1, [0.0; 3]));
        residue.reset();
        assert_eq!(residue, Residue::default());
    }

    #[test]
    fn min_distance_ignores_hydrogens() {
        let mut r1 = seeded(atom("CA", "GLY", 'A', 1, [0.0; 3]));
        r1.add_atom(atom("HA2", "GLY", 'A', 1, [5.0, 0.0, 0.0]));
        let mut r2 = seeded(atom("CA", "GLY", 'A', 5, [10.0, 0.0, 0.0]));
        r2.add_atom(atom("HA2", "GLY", 'A', 5, [5.5, 0.0, 0.0]));

        let d = residue_min_distance(&r1, &r2).unwrap();
        assert!((d - 10.0).abs() < 1e-12);
    }

    #[test]
    fn min_distance_is_none_when_only_hydrogens_are_near() {
        let r1 = seeded(atom("H1", "HOH", 'W', 1, [0.0; 3]));
        let r2 = seeded(atom("CA", "ALA", 'A', 1, [0.5, 0.0, 0.0]));
        assert_eq!(residue_min_distance(&r1, &r2), None);
    }

    #[test]
    fn representative_distance_requires_both_representatives() {
        let r1 = seeded(atom("CA", "ALA", 'A', 1, [0.0; 3]));
        let r2 = seeded(atom("CA", "ALA", 'A', 2, [0.0, 3.0, 4.0]));
        let r3 = seeded(atom("N", "ALA", 'A', 3, [0.0; 3]));
        assert!((residue_representative_distance(&r1, &r2).unwrap() - 5.0).abs() < 1e-12);
        assert_eq!(residue_representative_distance(&r1, &r3), None);
    }
}
