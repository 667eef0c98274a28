use crate::cli::InfoArgs;
use crate::error::Result;

pub fn run(args: InfoArgs) -> Result<()> {
    let (structure, metadata) = super::load_input(&args.input)?;

    println!("{}", structure.name());
    println!(
        "  records read: {}, skipped: {}",
        metadata.records_read, metadata.records_skipped
    );
    if structure.is_empty() {
        println!("  no models");
        return Ok(());
    }
    for model in structure.models() {
        println!(
            "  model {}: {} chain(s), {} residue(s), {} atom(s)",
            model.serial(),
            model.len(),
            model.residue_count(),
            model.atom_count()
        );
        for chain in model.chains() {
            println!(
                "    chain '{}' {:<8} {:>5} residue(s){}",
                chain.id(),
                chain.polymer_type(),
                chain.len(),
                if chain.is_hetero() { "  [het]" } else { "" }
            );
        }
    }
    Ok(())
}
