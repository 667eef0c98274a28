use cgtop::core::models::chain::SequenceStyle;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan, Ted Yu, William A. Goddard III, Victor Wai Tak Kam",
    version,
    about = "cgtop - build coarse-grained simulation topologies from PDB structures.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the coarse-grained topology of one model of a PDB structure.
    Topology(TopologyArgs),
    /// Print the residue sequence of every chain.
    Sequence(SequenceArgs),
    /// Summarize the models, chains and residues of a PDB structure.
    Info(InfoArgs),
    /// Read a PWMcos parameter section and summarize its groups.
    Pwm(PwmArgs),
}

/// Options shared by every subcommand that reads a PDB file.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Path to the input PDB file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Skip unrecognized records (HEADER, REMARK, CONECT, ...) instead of stopping at them.
    #[arg(long)]
    pub lenient: bool,

    /// TOML file extending the built-in residue classification table.
    #[arg(short, long, value_name = "PATH")]
    pub registry: Option<PathBuf>,
}

/// Arguments for the `topology` subcommand.
#[derive(Args, Debug)]
pub struct TopologyArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Path for the topology output file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Also write the coarse-grained beads as a PDB file.
    #[arg(long, value_name = "PATH")]
    pub cg_pdb: Option<PathBuf>,

    /// Path to a run configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Force constants file in TOML format, overriding the config file.
    #[arg(short, long, value_name = "PATH")]
    pub params: Option<PathBuf>,

    /// Index of the model to convert (0-based), overriding the config file.
    #[arg(short, long, value_name = "INT")]
    pub model: Option<usize>,

    /// Native-contact cutoff in Angstroms, overriding the config file.
    #[arg(long, value_name = "FLOAT")]
    pub cutoff: Option<f64>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S native.cutoff=8.0
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `sequence` subcommand.
#[derive(Args, Debug)]
pub struct SequenceArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Residue code length: 1 for one-letter codes, 3 for residue names.
    #[arg(short, long, default_value = "1", value_parser = parse_sequence_style)]
    pub style: SequenceStyle,

    /// Write the polymer chains of the first model as FASTA to this path.
    #[arg(long, value_name = "PATH")]
    pub fasta: Option<PathBuf>,
}

/// Arguments for the `info` subcommand.
#[derive(Args, Debug)]
pub struct InfoArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

/// Arguments for the `pwm` subcommand.
#[derive(Args, Debug)]
pub struct PwmArgs {
    /// Path to a file containing a `[ PWMcos ]` section.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Multiply every PWM energy by this factor.
    #[arg(long, value_name = "FLOAT")]
    pub scaling: Option<f64>,

    /// Shift every PWM energy by this amount.
    #[arg(long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub shift: Option<f64>,
}

fn parse_sequence_style(s: &str) -> Result<SequenceStyle, String> {
    let n: u8 = s
        .parse()
        .map_err(|_| format!("'{}' is not a residue code length", s))?;
    SequenceStyle::try_from(n).map_err(|e| e.to_string())
}
