//! File formats read and written by cgtop.
//!
//! PDB coordinates come in through the [`traits::StructureFile`] interface and are
//! assembled into the structure hierarchy by a record-driven state machine. The
//! outputs are the section-tagged topology text format, FASTA sequences and
//! coarse-grained bead coordinates written back as PDB.

pub mod fasta;
pub mod pdb;
pub mod top;
pub mod traits;
