//! # Core Models Module
//!
//! Data structures representing a parsed PDB file as a strict four-level hierarchy,
//! plus the coarse-grained topology derived from it.
//!
//! ## Key Components
//!
//! - [`atom`] - One ATOM/HETATM record with its fixed-column fields
//! - [`residue`] - A contiguous run of atoms sharing one residue index
//! - [`chain`] - An ordered run of residues sharing one chain identity
//! - [`model`] - One structural snapshot (a `MODEL` block or the whole file)
//! - [`structure`] - All models read from one source
//! - [`topology`] - Coarse-grained particles and interaction terms
//! - [`error`] - Errors raised by indexed access into the hierarchy
//!
//! ## Usage
//!
//! ```ignore
//! use cgtop::core::models::{atom::Atom, residue::{AddOutcome, Residue}};
//!
//! let mut residue = Residue::default();
//! match residue.add_atom(atom) {
//!     AddOutcome::Accepted => {}
//!     AddOutcome::NewResidue(atom) | AddOutcome::NewChain(atom) => { /* boundary */ }
//! }
//! ```

pub mod atom;
pub mod chain;
pub mod error;
pub mod model;
pub mod residue;
pub mod structure;
pub mod topology;
