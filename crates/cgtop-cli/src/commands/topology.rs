use crate::cli::TopologyArgs;
use crate::config::PartialTopologyConfig;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use cgtop::core::io::pdb::PdbFile;
use cgtop::core::io::top::TopFile;
use cgtop::engine::progress::ProgressReporter;
use cgtop::workflows;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

pub fn run(args: TopologyArgs) -> Result<()> {
    let partial_config = match &args.config {
        Some(path) => PartialTopologyConfig::from_file(path)?,
        None => PartialTopologyConfig::default(),
    };
    info!("Merging configuration from file and CLI arguments...");
    let config = partial_config.merge_with_cli(&args)?;

    let (structure, _) =
        super::load_structure(&args.input.input, config.lenient, config.registry.as_deref())?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Building coarse-grained topology...");
    let topology = workflows::topology::run(&structure, &config.topology, &reporter)?;

    write_with(&args.output, |w| Ok(TopFile::write(&topology, w)?))?;
    let counts = topology.counts();
    println!(
        "✓ Topology written to {}: {} particles, {} bonds, {} angles, {} dihedrals, {} native contacts",
        args.output.display(),
        counts.particles,
        counts.bonds,
        counts.angles,
        counts.dihedrals,
        topology.native.len()
    );

    if let Some(path) = &args.cg_pdb {
        write_with(path, |w| Ok(PdbFile::write_particles(&topology, w)?))?;
        println!("✓ Coarse-grained beads written to {}", path.display());
    }
    Ok(())
}

fn write_with(
    path: &Path,
    write: impl FnOnce(&mut BufWriter<File>) -> anyhow::Result<()>,
) -> Result<()> {
    info!("Writing {:?}", path);
    let to_cli_error = |e: anyhow::Error| CliError::FileWriting {
        path: path.to_path_buf(),
        source: e,
    };
    let mut writer = BufWriter::new(File::create(path)?);
    write(&mut writer).map_err(to_cli_error)?;
    writer.flush().map_err(|e| to_cli_error(e.into()))
}
