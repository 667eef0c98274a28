pub mod info;
pub mod pwm;
pub mod sequence;
pub mod topology;

use crate::cli::InputArgs;
use crate::error::{CliError, Result};
use cgtop::core::io::pdb::{PdbFile, PdbMetadata, PdbReadOptions};
use cgtop::core::io::traits::StructureFile;
use cgtop::core::models::structure::Structure;
use cgtop::core::topology::registry::ResidueRegistry;
use std::path::Path;
use tracing::{info, warn};

/// Reads a PDB file with the given record mode and optional registry overrides.
pub fn load_structure(
    input: &Path,
    lenient: bool,
    registry: Option<&Path>,
) -> Result<(Structure, PdbMetadata)> {
    let registry = match registry {
        Some(path) => {
            let registry = ResidueRegistry::load(path).map_err(|e| CliError::FileParsing {
                path: path.to_path_buf(),
                source: e.into(),
            })?;
            info!(
                overrides = registry.override_count(),
                "Loaded residue registry from {:?}", path
            );
            registry
        }
        None => ResidueRegistry::builtin(),
    };
    let options = PdbReadOptions {
        skip_unknown_records: lenient,
        registry,
    };

    info!("Loading input structure from {:?}", input);
    let (structure, metadata) =
        PdbFile::read_from_path_with(input, &options).map_err(|e| CliError::FileParsing {
            path: input.to_path_buf(),
            source: e.into(),
        })?;

    if let Some(stop) = &metadata.stopped_at {
        warn!(
            line = stop.line,
            "Input ended early at an undecodable line: {}", stop.error
        );
        eprintln!(
            "Warning: reading stopped at line {} ({}); content before it was kept.",
            stop.line, stop.error
        );
    }
    Ok((structure, metadata))
}

pub fn load_input(args: &InputArgs) -> Result<(Structure, PdbMetadata)> {
    load_structure(&args.input, args.lenient, args.registry.as_deref())
}
