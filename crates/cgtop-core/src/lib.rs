//! # cgtop Core Library
//!
//! A library for turning all-atom PDB structures into coarse-grained simulation
//! topologies (particles, bonds, angles, dihedrals and native contacts).
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Structure`, `Model`, `Chain`,
//!   `Residue`, `Atom`), the residue classification table, forcefield constants, geometry
//!   helpers and the file formats (PDB in, topology / FASTA / coarse-grained PDB out).
//!
//! - **[`engine`]: The Logic Core.** Coarse-grained bead mapping and the tasks that derive
//!   bonded terms and native contacts, together with configuration, progress reporting and
//!   the engine error type.
//!
//! - **[`workflows`]: The Public API.** Complete procedures that tie `core` and `engine`
//!   together, such as building the topology of one model of a structure.

pub mod core;
pub mod engine;
pub mod workflows;
