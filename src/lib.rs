//! Canonry: configuration composition and resolution for world-building
//! editors.
//!
//! Merges the framework baseline schema with a project's schema slice,
//! builds quantile-based prominence scales from simulation output, and
//! resolves which artistic style / composition pairs random selection may
//! produce.

pub mod core;
pub mod schema;
