//! # Force Field Module
//!
//! Parameters that accompany a coarse-grained topology.
//!
//! ## Key Components
//!
//! - [`params`] - Bonded force constants per polymer class and the native-contact well
//!   depth, loaded from TOML with built-in defaults
//! - [`pwm`] - Sequence-specific protein-DNA (PWMcos) parameters read from a labelled
//!   section of a parameter file and grouped by protein particle
//!
//! ## Usage
//!
//! ```ignore
//! use cgtop::core::forcefield::params::TopologyParams;
//!
//! let params = TopologyParams::load(Path::new("cgtop-params.toml"))?;
//! let k = params.bonded_for(chain.polymer_type()).bond_k;
//! ```

pub mod params;
pub mod pwm;
