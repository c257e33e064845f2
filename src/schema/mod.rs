//! Record types shared by the editors, the simulation and the engines in
//! [`crate::core`]. Field names serialize in camelCase to match the editors'
//! JSON.

pub mod culture;
pub mod entity_kind;
pub mod relationship_kind;
pub mod slice;
pub mod style;
pub mod tag;
