use super::chain::{Chain, SequenceStyle};
use super::error::{AccessError, checked_get};
use std::fmt;

/// One structural snapshot: a `MODEL` block, or the whole file when it has none.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Model {
    serial: i32,
    chains: Vec<Chain>,
}

impl Model {
    /// Creates an empty model with the given serial number.
    pub fn new(serial: i32) -> Self {
        Self {
            serial,
            chains: Vec::new(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn serial(&self) -> i32 {
        self.serial
    }

    pub fn set_serial(&mut self, serial: i32) {
        self.serial = serial;
    }

    pub fn add_chain(&mut self, chain: Chain) {
        self.chains.push(chain);
    }

    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    /// Returns the `n`-th chain of the model.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::EmptyCollection`] if the model has no chains and
    /// [`AccessError::IndexOutOfRange`] if `n` is past the end.
    pub fn chain(&self, n: usize) -> Result<&Chain, AccessError> {
        checked_get(&self.chains, n, "chains", || format!("model {}", self.serial))
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    pub fn residue_count(&self) -> usize {
        self.chains.iter().map(Chain::len).sum()
    }

    pub fn atom_count(&self) -> usize {
        self.chains.iter().map(Chain::atom_count).sum()
    }

    /// Sequence of every chain, paired with its chain identity.
    pub fn sequences(&self, style: SequenceStyle) -> Vec<(char, String)> {
        self.chains
            .iter()
            .map(|c| (c.id(), c.sequence(style)))
            .collect()
    }
}

impl fmt::Display for Model {
    /// Writes the model as a PDB `MODEL ... ENDMDL` block.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "MODEL {:>8}", self.serial)?;
        for chain in &self.chains {
            write!(f, "{}", chain)?;
        }
        writeln!(f, "ENDMDL")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use crate::core::models::residue::Residue;
    use crate::core::topology::registry::classify;
    use nalgebra::Point3;

    fn chain(id: char, names: &[&str]) -> Chain {
        let mut chain = Chain::new();
        for (i, name) in names.iter().enumerate() {
            let atom = Atom::new("CA", name, id, i as i32 + 1, Point3::origin());
            chain.add_residue(Residue::from_first_atom(atom, classify(name)));
        }
        chain
    }

    #[test]
    fn new_model_is_empty_with_serial() {
        let model = Model::new(3);
        assert_eq!(model.serial(), 3);
        assert!(model.is_empty());
        assert_eq!(Model::default().serial(), 0);
    }

    #[test]
    fn chain_access_distinguishes_empty_and_out_of_range() {
        let mut model = Model::new(1);
        let err = model.chain(0).unwrap_err();
        assert_eq!(err.to_string(), "No chains found in model 1");

        model.add_chain(chain('A', &["ALA"]));
        assert_eq!(model.chain(0).unwrap().id(), 'A');
        assert!(matches!(
            model.chain(2),
            Err(AccessError::IndexOutOfRange { index: 2, len: 1, .. })
        ));
    }

    #[test]
    fn counts_aggregate_over_chains() {
        let mut model = Model::new(1);
        model.add_chain(chain('A', &["ALA", "GLY"]));
        model.add_chain(chain('B', &["SER"]));
        assert_eq!(model.len(), 2);
        assert_eq!(model.residue_count(), 3);
        assert_eq!(model.atom_count(), 3);
    }

    #[test]
    fn sequences_are_reported_per_chain() {
        let mut model = Model::new(1);
        model.add_chain(chain('A', &["ALA", "GLY"]));
        model.add_chain(chain('B', &["DA", "DT"]));
        assert_eq!(
            model.sequences(SequenceStyle::OneLetter),
            vec![('A', "AG".to_string()), ('B', "AT".to_string())]
        );
    }

    #[test]
    fn display_wraps_chains_in_model_block() {
        let mut model = Model::new(2);
        model.add_chain(chain('A', &["ALA"]));
        let text = model.to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "MODEL        2");
        assert!(lines[1].starts_with("ATOM  "));
        assert_eq!(lines[2], "TER");
        assert_eq!(lines[3], "ENDMDL");
    }
}
