//! # Engine Module
//!
//! This module turns an all-atom [`Model`](crate::core::models::model::Model) into the
//! pieces of a coarse-grained topology.
//!
//! ## Overview
//!
//! The engine maps residues onto coarse-grained beads, derives bonded terms chain by
//! chain and searches native contacts across the whole model. It holds no state between
//! runs; every entry point is a pure function of its inputs and configuration.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Model selection, native-contact settings and force constants
//! - **Bead Mapping** ([`cg`]) - One `CA` bead per amino acid, phosphate / sugar / base beads per nucleotide
//! - **Tasks** ([`tasks`]) - Bonded-term derivation and the native-contact search
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress reporting for front-ends
//! - **Error Handling** ([`error`]) - Engine-specific error types

pub mod cg;
pub mod config;
pub mod error;
pub mod progress;
pub mod tasks;
