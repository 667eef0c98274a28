//! Computational steps of topology construction.
//!
//! Each task derives one family of topology terms from already-mapped particles:
//! [`bonded`] walks a single chain to produce bonds, angles and dihedrals, while
//! [`native`] compares contact sites across every contributing chain.

pub mod bonded;
pub mod native;
