//! # Topology Module
//!
//! Residue-level chemical knowledge used while building the structure hierarchy.
//!
//! ## Overview
//!
//! Every residue is classified by its exact name when it is seeded: a one-letter
//! abbreviation, a mass, a net charge and a polymer type. The polymer type decides
//! whether a chain contributes particles to a coarse-grained topology at all.
//!
//! ## Key Components
//!
//! - [`registry`] - The built-in classification table and user-supplied overrides
//!
//! ## Usage
//!
//! ```ignore
//! use cgtop::core::topology::registry::{classify, ResidueRegistry};
//!
//! assert_eq!(classify("LYS").short_name, 'K');
//!
//! let registry = ResidueRegistry::load(Path::new("residues.toml"))?;
//! let mse = registry.classify("MSE");
//! ```

pub mod registry;
