use thiserror::Error;

use super::config::ConfigError;
use crate::core::models::error::AccessError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Structure access failed: {0}")]
    Access(#[from] AccessError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Model {serial} contains no chains")]
    EmptyModel { serial: i32 },

    #[error(
        "Cannot place bead '{bead}' for residue {residue_name} {residue} in chain '{chain}': required atoms are missing"
    )]
    MissingAtoms {
        chain: char,
        residue: i32,
        residue_name: String,
        bead: &'static str,
    },
}
