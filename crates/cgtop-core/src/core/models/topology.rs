use nalgebra::Point3;

/// One coarse-grained particle. Indices are 1-based and global across chains.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub index: usize,
    pub chain_id: char,
    pub residue_index: i32,
    pub residue_name: String,
    /// Bead name ("CA", "P", "S" or "B").
    pub name: &'static str,
    pub mass: f64,
    pub charge: f64,
    pub position: Point3<f64>,
}

/// Harmonic bond between two particles; `r0` is the native length in Angstroms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BondTerm {
    pub i: usize,
    pub j: usize,
    pub r0: f64,
    pub k: f64,
}

/// Bend angle `i-j-k`; `theta0` is the native angle in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleTerm {
    pub i: usize,
    pub j: usize,
    pub k: usize,
    pub theta0: f64,
    pub k_angle: f64,
}

/// Torsion `i-j-k-l`; `phi0` is the native dihedral in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DihedralTerm {
    pub i: usize,
    pub j: usize,
    pub k: usize,
    pub l: usize,
    pub phi0: f64,
    pub k1: f64,
    pub k3: f64,
}

/// A native-contact pair for a structure-based nonbonded potential.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NativeContact {
    pub i: usize,
    pub j: usize,
    /// Native distance between the two particles in Angstroms.
    pub sigma: f64,
    pub epsilon: f64,
}

/// Bonded terms contributed by a single chain.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BondedTerms {
    pub bonds: Vec<BondTerm>,
    pub angles: Vec<AngleTerm>,
    pub dihedrals: Vec<DihedralTerm>,
}

/// Number of entries in each topology block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TermCounts {
    pub particles: usize,
    pub bonds: usize,
    pub angles: usize,
    pub dihedrals: usize,
}

impl std::ops::AddAssign for TermCounts {
    fn add_assign(&mut self, rhs: Self) {
        self.particles += rhs.particles;
        self.bonds += rhs.bonds;
        self.angles += rhs.angles;
        self.dihedrals += rhs.dihedrals;
    }
}

/// The complete coarse-grained topology of one model.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Topology {
    pub particles: Vec<Particle>,
    pub bonds: Vec<BondTerm>,
    pub angles: Vec<AngleTerm>,
    pub dihedrals: Vec<DihedralTerm>,
    pub native: Vec<NativeContact>,
}

impl Topology {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counts(&self) -> TermCounts {
        TermCounts {
            particles: self.particles.len(),
            bonds: self.bonds.len(),
            angles: self.angles.len(),
            dihedrals: self.dihedrals.len(),
        }
    }

    pub fn extend_bonded(&mut self, terms: BondedTerms) {
        self.bonds.extend(terms.bonds);
        self.angles.extend(terms.angles);
        self.dihedrals.extend(terms.dihedrals);
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
