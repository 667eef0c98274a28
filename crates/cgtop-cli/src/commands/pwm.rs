use crate::cli::PwmArgs;
use crate::error::{CliError, Result};
use cgtop::core::forcefield::pwm::PwmCosParams;

pub fn run(args: PwmArgs) -> Result<()> {
    let mut params = PwmCosParams::load(&args.input).map_err(|e| CliError::FileParsing {
        path: args.input.clone(),
        source: e.into(),
    })?;
    if let Some(scaling) = args.scaling {
        params.set_energy_scaling(scaling);
    }
    if let Some(shift) = args.shift {
        params.set_energy_shift(shift);
    }

    println!(
        "{} PWMcos record(s) over {} protein particle(s) (scaling {}, shift {})",
        params.record_count(),
        params.protein_particle_count(),
        params.energy_scaling(),
        params.energy_shift()
    );
    for group in params.groups() {
        println!(
            "  particle {:>6}: {:>3} record(s), cutoff {:.3}",
            group.protein_index + 1,
            group.records.len(),
            group.cutoff
        );
    }
    Ok(())
}
