//! The three engines: schema merging, prominence scaling and style
//! exclusion. Each is pure and independent of the others.

pub mod exclusion;
pub mod framework;
pub mod merge;
pub mod prominence;
