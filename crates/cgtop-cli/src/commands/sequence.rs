use crate::cli::SequenceArgs;
use crate::error::Result;
use cgtop::core::io::fasta;
use std::fs::File;
use std::io::{BufWriter, Write};
use tracing::info;

pub fn run(args: SequenceArgs) -> Result<()> {
    let (structure, _) = super::load_input(&args.input)?;

    for model in structure.models() {
        if structure.len() > 1 {
            println!("Model {}", model.serial());
        }
        for (chain_id, sequence) in model.sequences(args.style) {
            println!("{}: {}", chain_id, sequence);
        }
    }

    if let Some(path) = &args.fasta {
        let mut writer = BufWriter::new(File::create(path)?);
        let records = fasta::write_structure(&structure, &mut writer)?;
        writer.flush()?;
        info!(records, "FASTA written to {:?}", path);
        println!("✓ {} FASTA record(s) written to {}", records, path.display());
    }
    Ok(())
}
