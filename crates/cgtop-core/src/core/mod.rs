//! # Core Module
//!
//! The fundamental building blocks of cgtop: the hierarchical structure model, the
//! residue classification table, forcefield constants and file I/O.
//!
//! ## Architecture
//!
//! - **Structural Representation** ([`models`]) - Structure, models, chains, residues and atoms
//! - **Residue Knowledge** ([`topology`]) - Residue-name classification (mass, charge, polymer type)
//! - **Parameters** ([`forcefield`]) - Bonded / native constants and PWMcos parameter ingestion
//! - **File I/O** ([`io`]) - PDB reading and writing, topology output, sequence export
//! - **Utilities** ([`utils`]) - Geometric measurements on coordinates
//!
//! ## Ownership
//!
//! The structural model is a pure tree: a `Model` owns its `Chain`s, a `Chain` owns its
//! `Residue`s and a `Residue` owns its `Atom`s. There are no back-references.

pub mod forcefield;
pub mod io;
pub mod models;
pub mod topology;
pub mod utils;
