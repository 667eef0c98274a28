use crate::core::models::chain::Chain;
use crate::core::models::model::Model;
use crate::core::models::structure::Structure;
use crate::core::models::topology::{Particle, Topology};
use crate::engine::cg::{self, ResidueBeads};
use crate::engine::config::TopologyConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::tasks::{bonded, native};
use tracing::{debug, info, instrument};

/// Builds the coarse-grained topology of the configured model of `structure`.
///
/// # Errors
///
/// Returns [`EngineError::Access`] when the structure has no models or the configured
/// model index is out of range, and any error of [`build_model_topology`].
#[instrument(skip_all, name = "topology_workflow")]
pub fn run(
    structure: &Structure,
    config: &TopologyConfig,
    reporter: &ProgressReporter,
) -> Result<Topology, EngineError> {
    info!(
        structure = structure.name(),
        model = config.model_index,
        "Starting topology construction."
    );
    let model = structure.model(config.model_index)?;
    build_model_topology(model, config, reporter)
}

/// Builds the coarse-grained topology of one model.
///
/// Chains that are neither protein nor nucleic acid are skipped and take no particle
/// indices. Particles are numbered from 1 in chain order, bonded terms are derived per
/// chain, and one native-contact search runs over all contributing chains.
///
/// # Errors
///
/// Returns [`EngineError::EmptyModel`] for a model without chains and
/// [`EngineError::MissingAtoms`] when a residue cannot be mapped onto its beads.
pub fn build_model_topology(
    model: &Model,
    config: &TopologyConfig,
    reporter: &ProgressReporter,
) -> Result<Topology, EngineError> {
    if model.is_empty() {
        return Err(EngineError::EmptyModel {
            serial: model.serial(),
        });
    }

    // === Phase 1: Bead Mapping ===
    reporter.report(Progress::PhaseStart {
        name: "Bead Mapping",
    });
    let mut mapped_chains: Vec<(&Chain, Vec<ResidueBeads<'_>>)> = Vec::new();
    for chain in model.chains() {
        if !chain.polymer_type().is_topology_eligible() {
            debug!(
                chain = %chain.id(),
                polymer_type = %chain.polymer_type(),
                "Skipping chain without a coarse-grained representation."
            );
            continue;
        }
        mapped_chains.push((chain, cg::map_chain(chain)?));
    }
    reporter.report(Progress::PhaseFinish);

    // === Phase 2: Particles and Bonded Terms ===
    reporter.report(Progress::PhaseStart {
        name: "Bonded Terms",
    });
    let mut topology = Topology::new();
    let mut sites = Vec::new();
    for (ordinal, (chain, mapped)) in mapped_chains.iter().enumerate() {
        let start = topology.particles.len();
        for residue_beads in mapped {
            for bead in &residue_beads.beads {
                let index = topology.particles.len() + 1;
                topology.particles.push(Particle {
                    index,
                    chain_id: chain.id(),
                    residue_index: residue_beads.residue.index(),
                    residue_name: residue_beads.residue.name().to_string(),
                    name: bead.name,
                    mass: bead.mass,
                    charge: bead.charge,
                    position: bead.position,
                });
            }
        }

        let polymer_type = chain.polymer_type();
        let terms = bonded::run(
            polymer_type,
            &topology.particles[start..],
            config.params.bonded_for(polymer_type),
        );
        topology.extend_bonded(terms);
        sites.extend(native::chain_sites(
            ordinal,
            polymer_type.is_nucleic(),
            mapped,
            start + 1,
        ));
    }
    reporter.report(Progress::PhaseFinish);

    // === Phase 3: Native Contacts ===
    reporter.report(Progress::PhaseStart {
        name: "Native Contacts",
    });
    topology.native = native::run(
        &sites,
        &config.native,
        config.params.native.epsilon,
        reporter,
    );
    reporter.report(Progress::PhaseFinish);

    info!(
        chains = mapped_chains.len(),
        particles = topology.particles.len(),
        bonds = topology.bonds.len(),
        angles = topology.angles.len(),
        dihedrals = topology.dihedrals.len(),
        native = topology.native.len(),
        "Topology construction complete."
    );
    Ok(topology)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::forcefield::params::TopologyParams;
    use crate::core::models::atom::{Atom, RecordKind};
    use crate::core::models::chain::PolymerType;
    use crate::core::models::error::AccessError;
    use crate::core::models::residue::Residue;
    use crate::core::topology::registry::classify;
    use crate::engine::config::TopologyConfigBuilder;
    use crate::engine::tasks::bonded::expected_counts;
    use nalgebra::Point3;
    use std::sync::Mutex;

    fn residue(chain: char, name: &str, index: i32, atoms: &[(&str, [f64; 3])]) -> Residue {
        let record = if classify(name).polymer_type.is_topology_eligible() {
            RecordKind::Atom
        } else {
            RecordKind::Hetatm
        };
        let mut iter = atoms.iter().map(|(atom_name, [x, y, z])| {
            Atom::new(atom_name, name, chain, index, Point3::new(*x, *y, *z)).with_record(record)
        });
        let mut residue = Residue::from_first_atom(iter.next().unwrap(), classify(name));
        for atom in iter {
            residue.add_atom(atom);
        }
        residue
    }

    fn chain_of(residues: Vec<Residue>) -> Chain {
        let mut chain = Chain::new();
        for residue in residues {
            chain.add_residue(residue);
        }
        chain
    }

    fn nucleotide(index: i32, x: f64) -> Vec<(&'static str, [f64; 3])> {
        vec![
            ("P", [x, 0.0, 0.0]),
            ("C1'", [x + 1.0, 1.0, 0.0]),
            ("C3'", [x + 2.0, 1.0, 0.0]),
            ("C4'", [x + 2.0, 2.0, (index % 2) as f64]),
            ("N1", [x + 1.0, 4.0, 0.0]),
        ]
    }

    fn two_chain_model() -> Model {
        let mut model = Model::new(0);
        model.add_chain(chain_of(vec![
            residue('A', "ALA", 1, &[("CA", [0.0, 0.0, 0.0])]),
            residue('A', "GLY", 2, &[("CA", [3.8, 0.0, 0.0])]),
            residue('A', "SER", 3, &[("CA", [3.8, 3.8, 0.0])]),
        ]));
        model.add_chain(chain_of(vec![residue('B', "HOH", 4, &[("O", [20.0, 0.0, 0.0])])]));
        model
    }

    #[test]
    fn two_chain_model_skips_water() {
        let model = two_chain_model();
        let topology =
            build_model_topology(&model, &TopologyConfig::default(), &ProgressReporter::new())
                .unwrap();

        assert_eq!(topology.particles.len(), 3);
        assert_eq!(topology.bonds.len(), 2);
        assert_eq!(topology.angles.len(), 1);
        assert_eq!(topology.dihedrals.len(), 0);
        assert!(topology.particles.iter().all(|p| p.chain_id == 'A'));
        assert_eq!(
            topology.particles.iter().map(|p| p.index).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn particle_indices_continue_across_chains() {
        let mut model = Model::new(1);
        let first: Vec<_> = (0..2).map(|i| nucleotide(i, i as f64 * 6.0)).collect();
        let second: Vec<_> = (0..3).map(|i| nucleotide(i, 40.0 + i as f64 * 6.0)).collect();
        model.add_chain(chain_of(vec![
            residue('A', "DA", 1, &first[0]),
            residue('A', "DT", 2, &first[1]),
        ]));
        model.add_chain(chain_of(vec![residue('Z', "CA", 10, &[("CA", [0.0, 30.0, 0.0])])]));
        model.add_chain(chain_of(vec![
            residue('B', "RG", 1, &second[0]),
            residue('B', "RC", 2, &second[1]),
            residue('B', "RU", 3, &second[2]),
        ]));

        let topology =
            build_model_topology(&model, &TopologyConfig::default(), &ProgressReporter::new())
                .unwrap();

        let mut expected = expected_counts(PolymerType::DNA, 2);
        expected += expected_counts(PolymerType::RNA, 3);
        assert_eq!(topology.counts(), expected);

        let indices: Vec<usize> = topology.particles.iter().map(|p| p.index).collect();
        assert_eq!(indices, (1..=13).collect::<Vec<_>>());
        // The ion chain takes no index slots: chain B starts right after chain A.
        assert_eq!(topology.particles[5].chain_id, 'B');
        assert_eq!(topology.particles[5].name, "S");
        assert!(topology.bonds.iter().all(|b| (b.i <= 5) == (b.j <= 5)));
    }

    #[test]
    fn native_contacts_use_configured_epsilon() {
        let mut model = two_chain_model();
        model.add_chain(chain_of(vec![residue('C', "LYS", 1, &[("CA", [0.0, 4.0, 0.0])])]));
        let mut params = TopologyParams::default();
        params.native.epsilon = 0.25;
        let config = TopologyConfigBuilder::new().params(params).build().unwrap();

        let topology =
            build_model_topology(&model, &config, &ProgressReporter::new()).unwrap();
        assert!(!topology.native.is_empty());
        assert!(topology.native.iter().all(|c| c.epsilon == 0.25));
        assert!(topology.native.iter().any(|c| c.j == 4));
    }

    #[test]
    fn model_without_chains_is_an_error() {
        let result = build_model_topology(
            &Model::new(3),
            &TopologyConfig::default(),
            &ProgressReporter::new(),
        );
        assert!(matches!(result, Err(EngineError::EmptyModel { serial: 3 })));
    }

    #[test]
    fn model_with_only_solvent_gives_empty_topology() {
        let mut model = Model::new(0);
        model.add_chain(chain_of(vec![residue('W', "HOH", 1, &[("O", [0.0, 0.0, 0.0])])]));
        let topology =
            build_model_topology(&model, &TopologyConfig::default(), &ProgressReporter::new())
                .unwrap();
        assert!(topology.is_empty());
        assert!(topology.native.is_empty());
    }

    #[test]
    fn run_reports_missing_models() {
        let empty = Structure::new("empty", Vec::new());
        let result = run(&empty, &TopologyConfig::default(), &ProgressReporter::new());
        assert!(matches!(
            result,
            Err(EngineError::Access(AccessError::EmptyCollection { .. }))
        ));

        let structure = Structure::new("one", vec![two_chain_model()]);
        let config = TopologyConfigBuilder::new().model_index(1).build().unwrap();
        let result = run(&structure, &config, &ProgressReporter::new());
        assert!(matches!(
            result,
            Err(EngineError::Access(AccessError::IndexOutOfRange { .. }))
        ));
    }

    #[test]
    fn run_reports_phases_in_order() {
        let events = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|e| {
            if let Progress::PhaseStart { name } = e {
                events.lock().unwrap().push(name);
            }
        }));
        let structure = Structure::new("two", vec![two_chain_model()]);
        run(&structure, &TopologyConfig::default(), &reporter).unwrap();
        drop(reporter);

        assert_eq!(
            events.into_inner().unwrap(),
            vec!["Bead Mapping", "Bonded Terms", "Native Contacts"]
        );
    }
}
