//! # Workflows Module
//!
//! High-level entry points that tie the `core` data model and the `engine` together.
//!
//! ## Overview
//!
//! A workflow takes a parsed [`Structure`](crate::core::models::structure::Structure)
//! and a configuration, reports its phases through a
//! [`ProgressReporter`](crate::engine::progress::ProgressReporter) and returns a finished
//! result. Reading inputs and writing outputs stays with the caller.
//!
//! - **Topology Workflow** ([`topology`]) - Bead mapping, bonded terms and native contacts
//!   for one model of a structure.

pub mod topology;
