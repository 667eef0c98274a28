use crate::core::models::topology::NativeContact;
use crate::core::utils::geometry;
use crate::engine::cg::ResidueBeads;
use crate::engine::config::NativeConfig;
use crate::engine::progress::{Progress, ProgressReporter};
use nalgebra::Point3;
use tracing::{info, instrument};

/// One candidate for native contacts: a particle together with the heavy atoms it
/// stands for.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactSite {
    /// Ordinal of the contributing chain among the topology's chains.
    pub chain: usize,
    /// Position of the site along its chain, used for the separation filter.
    pub sequence: usize,
    /// Global particle index.
    pub particle: usize,
    pub representative: Point3<f64>,
    pub atoms: Vec<Point3<f64>>,
}

/// Builds the contact sites of one mapped chain.
///
/// Protein residues contribute one site carrying all of their heavy atoms. Nucleotide
/// beads are single-point sites, so a nucleic chain contributes one site per bead.
/// `first_index` is the global index of the chain's first particle.
pub fn chain_sites(
    chain: usize,
    nucleic: bool,
    mapped: &[ResidueBeads<'_>],
    first_index: usize,
) -> Vec<ContactSite> {
    let mut sites = Vec::new();
    let mut particle = first_index;
    for residue in mapped {
        for bead in &residue.beads {
            let atoms = if nucleic {
                vec![bead.position]
            } else {
                residue.residue.heavy_atoms().map(|a| a.position).collect()
            };
            sites.push(ContactSite {
                chain,
                sequence: sites.len(),
                particle,
                representative: bead.position,
                atoms,
            });
            particle += 1;
        }
    }
    sites
}

/// Finds every native pair among `sites`.
///
/// Pairs from the same chain closer in sequence than the configured separation are
/// skipped. A pair is native when its distance is below the cutoff; the distance is
/// that of the closest heavy atoms, or of the representatives when configured so.
/// Sites without heavy atoms never form contacts.
#[instrument(skip_all, name = "native_contacts_task")]
pub fn run(
    sites: &[ContactSite],
    config: &NativeConfig,
    epsilon: f64,
    reporter: &ProgressReporter,
) -> Vec<NativeContact> {
    info!(
        sites = sites.len(),
        cutoff = config.cutoff,
        "Searching native contacts."
    );

    let contacts = reporter.task(sites.len() as u64, || {
        let mut contacts = Vec::new();
        for (n, a) in sites.iter().enumerate() {
            for b in &sites[n + 1..] {
                if a.chain == b.chain
                    && b.sequence.abs_diff(a.sequence) < config.min_sequence_separation
                {
                    continue;
                }
                let sigma = geometry::distance(&a.representative, &b.representative);
                let distance = if config.use_representative_distance {
                    Some(sigma)
                } else {
                    geometry::min_pairwise_distance(&a.atoms, &b.atoms)
                };
                if distance.is_some_and(|d| d < config.cutoff) {
                    contacts.push(NativeContact {
                        i: a.particle,
                        j: b.particle,
                        sigma,
                        epsilon,
                    });
                }
            }
            reporter.report(Progress::TaskIncrement);
        }
        contacts
    });

    info!(contacts = contacts.len(), "Native contact search complete.");
    contacts
}
