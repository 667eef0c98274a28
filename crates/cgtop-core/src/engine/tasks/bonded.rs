use crate::core::forcefield::params::BondedParams;
use crate::core::models::chain::PolymerType;
use crate::core::models::topology::{
    AngleTerm, BondTerm, BondedTerms, DihedralTerm, Particle, TermCounts,
};
use crate::core::utils::geometry;
use tracing::{debug, instrument};

/// Derives the bonded terms of one chain from its mapped particles.
///
/// `particles` must be the chain's beads in output order, as produced by
/// [`crate::engine::cg::map_chain`]. For nucleic acids that layout is
/// `S0 B0 P1 S1 B1 P2 S2 B2 ...`; every other polymer has one bead per residue.
/// Equilibrium lengths and angles are measured on the input coordinates.
#[instrument(skip_all, name = "bonded_terms_task", fields(particles = particles.len()))]
pub fn run(polymer_type: PolymerType, particles: &[Particle], params: &BondedParams) -> BondedTerms {
    let terms = if polymer_type.is_nucleic() {
        nucleic_terms(particles, params)
    } else {
        linear_terms(particles, params)
    };
    debug!(
        bonds = terms.bonds.len(),
        angles = terms.angles.len(),
        dihedrals = terms.dihedrals.len(),
        "Derived bonded terms."
    );
    terms
}

/// Number of particles and bonded terms a chain of `len` residues produces.
///
/// Short chains clamp at zero.
pub fn expected_counts(polymer_type: PolymerType, len: usize) -> TermCounts {
    if polymer_type.is_nucleic() {
        TermCounts {
            particles: (3 * len).saturating_sub(1),
            bonds: (3 * len).saturating_sub(2),
            angles: (4 * len).saturating_sub(5),
            dihedrals: (2 * len).saturating_sub(4),
        }
    } else {
        TermCounts {
            particles: len,
            bonds: len.saturating_sub(1),
            angles: len.saturating_sub(2),
            dihedrals: len.saturating_sub(3),
        }
    }
}

fn linear_terms(particles: &[Particle], params: &BondedParams) -> BondedTerms {
    BondedTerms {
        bonds: particles
            .windows(2)
            .map(|w| bond(&w[0], &w[1], params))
            .collect(),
        angles: particles
            .windows(3)
            .map(|w| angle(&w[0], &w[1], &w[2], params))
            .collect(),
        dihedrals: particles
            .windows(4)
            .map(|w| dihedral(&w[0], &w[1], &w[2], &w[3], params))
            .collect(),
    }
}

fn nucleic_terms(particles: &[Particle], params: &BondedParams) -> BondedTerms {
    let mut terms = BondedTerms::default();
    if particles.len() < 2 {
        return terms;
    }
    let residues = (particles.len() + 1) / 3;
    let sugar = |r: usize| &particles[3 * r];
    let base = |r: usize| &particles[3 * r + 1];
    let phosphate = |r: usize| &particles[3 * r - 1];

    terms.bonds.push(bond(sugar(0), base(0), params));
    for r in 1..residues {
        terms.bonds.push(bond(sugar(r - 1), phosphate(r), params));
        terms.bonds.push(bond(phosphate(r), sugar(r), params));
        terms.bonds.push(bond(sugar(r), base(r), params));
    }

    for r in 0..residues {
        if r >= 1 {
            terms
                .angles
                .push(angle(sugar(r - 1), phosphate(r), sugar(r), params));
            terms
                .angles
                .push(angle(phosphate(r), sugar(r), base(r), params));
        }
        if r + 1 < residues {
            terms
                .angles
                .push(angle(base(r), sugar(r), phosphate(r + 1), params));
            if r >= 1 {
                terms
                    .angles
                    .push(angle(phosphate(r), sugar(r), phosphate(r + 1), params));
            }
        }
    }

    let mut backbone = vec![sugar(0)];
    for r in 1..residues {
        backbone.push(phosphate(r));
        backbone.push(sugar(r));
    }
    terms.dihedrals = backbone
        .windows(4)
        .map(|w| dihedral(w[0], w[1], w[2], w[3], params))
        .collect();

    terms
}

fn bond(a: &Particle, b: &Particle, params: &BondedParams) -> BondTerm {
    BondTerm {
        i: a.index,
        j: b.index,
        r0: geometry::distance(&a.position, &b.position),
        k: params.bond_k,
    }
}

fn angle(a: &Particle, b: &Particle, c: &Particle, params: &BondedParams) -> AngleTerm {
    AngleTerm {
        i: a.index,
        j: b.index,
        k: c.index,
        theta0: geometry::bend_angle(&a.position, &b.position, &c.position),
        k_angle: params.angle_k,
    }
}

fn dihedral(
    a: &Particle,
    b: &Particle,
    c: &Particle,
    d: &Particle,
    params: &BondedParams,
) -> DihedralTerm {
    DihedralTerm {
        i: a.index,
        j: b.index,
        k: c.index,
        l: d.index,
        phi0: geometry::dihedral_angle(&a.position, &b.position, &c.position, &d.position),
        k1: params.dihedral_k1,
        k3: params.dihedral_k3,
    }
}
